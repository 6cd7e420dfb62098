//! Test app models: pages, page plugins, and articles.
//!
//! Pages form a tree and render their plugins into the regions of their
//! template. Articles are served by the apps mounted on pages.

use std::fmt;
use std::sync::OnceLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use feincms3_rs_content_editor::{
    contents_for_item, Contents, Placement, Plugin, PluginRecord, Region, Template,
};
use feincms3_rs_core::{Feincms3Result, SafeString};
use feincms3_rs_plugins::{External, Html, PluginRenderer, RenderPlugin};

use crate::apps::{reverse_app, AppsRegistry};

/// An application that can be mounted on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Application {
    /// Key stored on the page; also the namespace prefix when reversing.
    pub key: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Name of the URL configuration the app serves.
    pub urlconf: &'static str,
}

/// Menus a page can be listed in, as `(key, title)`.
pub const MENUS: &[(&str, &str)] = &[("main", "main"), ("footer", "footer")];

/// Apps for company PR and for a more informal blog.
///
/// The keys have to match the article categories exactly, otherwise article
/// URLs cannot be reversed.
pub const APPLICATIONS: &[Application] = &[
    Application {
        key: "publications",
        title: "publications",
        urlconf: "testapp.articles_urls",
    },
    Application {
        key: "blog",
        title: "blog",
        urlconf: "testapp.articles_urls",
    },
];

/// Page templates and their regions.
pub fn templates() -> &'static [Template] {
    static TEMPLATES: OnceLock<Vec<Template>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        vec![
            Template::new("standard", "standard", "pages/standard.html")
                .region(Region::new("main", "Main")),
            Template::new("with-sidebar", "with sidebar", "pages/with-sidebar.html")
                .region(Region::new("main", "Main"))
                .region(Region::new("sidebar", "Sidebar").inherited()),
        ]
    })
}

/// Looks up an application by key.
pub fn application(key: &str) -> Option<&'static Application> {
    APPLICATIONS.iter().find(|a| a.key == key)
}

/// A node of the page tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Primary key.
    pub id: i64,
    /// The parent page, `None` for root pages.
    pub parent_id: Option<i64>,
    /// The page title.
    pub title: String,
    /// Full URL path, e.g. `/en/blog/`.
    pub path: String,
    /// Inactive pages are hidden from visitors.
    pub is_active: bool,
    /// Language of the page's content.
    pub language_code: String,
    /// Key of one of [`templates`].
    pub template_key: String,
    /// Key of one of [`MENUS`], if listed in a menu.
    pub menu: Option<String>,
    /// Key of one of [`APPLICATIONS`], if an app is mounted here.
    pub application: Option<String>,
}

impl Page {
    /// Creates an active standard page.
    pub fn new(id: i64, title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id,
            parent_id: None,
            title: title.into(),
            path: path.into(),
            is_active: true,
            language_code: "en".to_string(),
            template_key: "standard".to_string(),
            menu: None,
            application: None,
        }
    }

    /// Places the page below the page `parent_id`.
    #[must_use]
    pub const fn parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Sets the page's language code.
    #[must_use]
    pub fn language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    /// Renders the page with the template `key`, see [`templates`].
    #[must_use]
    pub fn template_key(mut self, key: impl Into<String>) -> Self {
        self.template_key = key.into();
        self
    }

    /// Lists the page in one of [`MENUS`].
    #[must_use]
    pub fn menu(mut self, menu: impl Into<String>) -> Self {
        self.menu = Some(menu.into());
        self
    }

    /// Mounts the app with the given key on this page.
    #[must_use]
    pub fn application(mut self, app: impl Into<String>) -> Self {
        self.application = Some(app.into());
        self
    }

    /// Deactivates the page, so [`active`] and app mounts skip it.
    #[must_use]
    pub const fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// The page's template; unknown keys fall back to the first template.
    pub fn template(&self) -> &'static Template {
        let templates = templates();
        templates
            .iter()
            .find(|t| t.key == self.template_key)
            .unwrap_or(&templates[0])
    }

    /// Ancestor ids, closest first.
    ///
    /// Walking stops at a parent missing from `pages` or at a cycle.
    pub fn ancestors(&self, pages: &[Self]) -> Vec<i64> {
        let mut ancestors = Vec::new();
        let mut current = self.parent_id;
        while let Some(id) = current {
            if id == self.id || ancestors.contains(&id) {
                break;
            }
            ancestors.push(id);
            current = pages.iter().find(|p| p.id == id).and_then(|p| p.parent_id);
        }
        ancestors
    }

    /// The page's plugins grouped per region, with inherited regions filled
    /// from ancestors.
    pub fn contents(&self, pages: &[Self], plugins: &[PagePlugin]) -> Contents<PagePlugin> {
        contents_for_item(
            self.id,
            &self.template().regions,
            plugins,
            &self.ancestors(pages),
        )
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Active pages only.
pub fn active(pages: &[Page]) -> impl Iterator<Item = &Page> {
    pages.iter().filter(|p| p.is_active)
}

/// Any plugin that can be placed on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePlugin {
    /// Content resolved through oEmbed.
    External(PluginRecord<External>),
    /// HTML inserted as is.
    Html(PluginRecord<Html>),
}

impl PagePlugin {
    /// An external embed of `url`.
    pub fn external(id: i64, placement: Placement, url: impl Into<String>) -> Self {
        Self::External(PluginRecord::new(id, placement, External::new(url)))
    }

    /// A raw HTML fragment.
    pub fn html(id: i64, placement: Placement, html: impl Into<String>) -> Self {
        Self::Html(PluginRecord::new(id, placement, Html::new(html)))
    }

    /// Model name of the concrete plugin, as registered with the editor.
    pub fn model_name(&self) -> &'static str {
        self.plugin_name()
    }
}

impl Plugin for PagePlugin {
    fn id(&self) -> i64 {
        match self {
            Self::External(p) => p.id,
            Self::Html(p) => p.id,
        }
    }

    fn placement(&self) -> &Placement {
        match self {
            Self::External(p) => &p.placement,
            Self::Html(p) => &p.placement,
        }
    }
}

#[async_trait]
impl RenderPlugin for PagePlugin {
    fn plugin_name(&self) -> &'static str {
        match self {
            Self::External(p) => p.plugin_name(),
            Self::Html(p) => p.plugin_name(),
        }
    }

    async fn render(&self, renderer: &PluginRenderer) -> SafeString {
        match self {
            Self::External(p) => p.render(renderer).await,
            Self::Html(p) => p.render(renderer).await,
        }
    }
}

/// Article categories. Each one is served by the app of the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Publications,
    Blog,
}

impl Category {
    /// The category's key, shared with its app.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publications => "publications",
            Self::Blog => "blog",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A news item shown by the publications or blog app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// Decides which app serves the article.
    pub category: Category,
}

impl Article {
    /// Creates an article in `category`.
    pub fn new(id: i64, title: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            title: title.into(),
            category,
        }
    }

    /// The article's URL below the page hosting its category's app in
    /// `language_code`.
    pub fn get_absolute_url(
        &self,
        apps: &AppsRegistry,
        language_code: &str,
    ) -> Feincms3Result<String> {
        let pk = self.id.to_string();
        reverse_app(
            apps,
            &[self.category.as_str(), "articles"],
            "article-detail",
            &[("pk", pk.as_str())],
            language_code,
        )
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
