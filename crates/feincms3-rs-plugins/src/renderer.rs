//! Rendering placed plugins.
//!
//! Every renderable plugin implements [`RenderPlugin`]. [`PluginRenderer`]
//! carries what renderers need (the oEmbed resolver) and renders whole
//! regions in order.

use async_trait::async_trait;
use tracing::Instrument;

use feincms3_rs_content_editor::{Contents, Plugin, PluginKind, PluginRecord};
use feincms3_rs_core::logging::render_span;
use feincms3_rs_core::SafeString;

use crate::external::{render_external, External};
use crate::html::{render_html, Html};
use crate::oembed::OembedResolver;

/// A plugin that knows how to render itself.
#[async_trait]
pub trait RenderPlugin: Plugin {
    /// Short name used in logs.
    fn plugin_name(&self) -> &'static str;

    /// Produces the plugin's markup.
    async fn render(&self, renderer: &PluginRenderer) -> SafeString;
}

#[async_trait]
impl RenderPlugin for PluginRecord<External> {
    fn plugin_name(&self) -> &'static str {
        External::meta().model_name
    }

    async fn render(&self, renderer: &PluginRenderer) -> SafeString {
        render_external(renderer.oembed(), &self.data).await
    }
}

#[async_trait]
impl RenderPlugin for PluginRecord<Html> {
    fn plugin_name(&self) -> &'static str {
        Html::meta().model_name
    }

    async fn render(&self, _renderer: &PluginRenderer) -> SafeString {
        render_html(&self.data)
    }
}

/// Renders plugins and regions.
#[derive(Debug, Clone)]
pub struct PluginRenderer {
    oembed: OembedResolver,
}

impl PluginRenderer {
    /// Creates a renderer using `oembed` for external content.
    pub const fn new(oembed: OembedResolver) -> Self {
        Self { oembed }
    }

    /// The resolver used for external content.
    pub const fn oembed(&self) -> &OembedResolver {
        &self.oembed
    }

    /// Renders a single plugin inside a tracing span.
    pub async fn render_plugin<P: RenderPlugin>(&self, plugin: &P) -> SafeString {
        let span = render_span(plugin.plugin_name(), plugin.id());
        plugin.render(self).instrument(span).await
    }

    /// Renders `plugins` one after another and concatenates the output.
    pub async fn render_plugins<P: RenderPlugin>(&self, plugins: &[P]) -> SafeString {
        let mut out = SafeString::empty();
        for plugin in plugins {
            out.push_safe(&self.render_plugin(plugin).await);
        }
        out
    }

    /// Renders the plugins of `region`, in order.
    pub async fn render_region<P: RenderPlugin>(
        &self,
        contents: &Contents<P>,
        region: &str,
    ) -> SafeString {
        self.render_plugins(contents.get(region)).await
    }
}
