//! Raw HTML.
//!
//! Provides a simple textarea where raw HTML, CSS and JS can be entered.
//! Most useful for people wanting to shoot themselves in the foot: the
//! content is inserted into the page as-is.

use std::fmt;

use serde::{Deserialize, Serialize};

use feincms3_rs_content_editor::{ContentEditorInline, PluginField, PluginKind, PluginMeta};
use feincms3_rs_core::{mark_safe, SafeString, ValidationError};

/// Help text shown below the HTML textarea.
pub const HTML_HELP_TEXT: &str = "The content will be inserted directly into the page. \
     It is VERY important that the HTML snippet is well-formed!";

/// A raw HTML snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Html {
    /// The snippet, inserted without escaping.
    pub html: String,
}

impl Html {
    /// Creates a snippet.
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Snippets have no meaningful title; the editor shows an empty label.
impl fmt::Display for Html {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

impl PluginKind for Html {
    fn meta() -> &'static PluginMeta {
        static META: PluginMeta = PluginMeta {
            model_name: "html",
            verbose_name: "HTML",
            verbose_name_plural: "HTML",
            fields: &[PluginField {
                name: "html",
                label: "HTML",
                help_text: HTML_HELP_TEXT,
                widget: "textarea",
            }],
        };
        &META
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.html.trim().is_empty() {
            return Err(ValidationError::for_field(
                "html",
                ValidationError::new("This field is required.", "required"),
            ));
        }
        Ok(())
    }
}

/// Returns the snippet marked safe so it is not escaped.
///
/// The contents are of course not guaranteed to be safe at all.
pub fn render_html(plugin: &Html) -> SafeString {
    mark_safe(plugin.html.as_str())
}

/// Inline editor for the HTML plugin of `app_label`.
///
/// Identical to any other plugin inline.
pub fn html_inline(app_label: impl Into<String>) -> ContentEditorInline {
    ContentEditorInline::create::<Html>(app_label)
}
