//! External content: anything the oEmbed lookup knows how to embed.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use feincms3_rs_content_editor::{ContentEditorInline, PluginField, PluginKind, PluginMeta};
use feincms3_rs_core::{mark_safe, SafeString, ValidationError};

use crate::oembed::OembedResolver;

/// An embed of an external resource, e.g. a video page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct External {
    /// The resource URL passed to the oEmbed lookup.
    pub url: String,
}

impl External {
    /// Creates an embed for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl fmt::Display for External {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl PluginKind for External {
    fn meta() -> &'static PluginMeta {
        static META: PluginMeta = PluginMeta {
            model_name: "external",
            verbose_name: "external content",
            verbose_name_plural: "external contents",
            fields: &[PluginField {
                name: "url",
                label: "URL",
                help_text: "",
                widget: "url",
            }],
        };
        &META
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let error = if self.url.trim().is_empty() {
            ValidationError::new("This field is required.", "required")
        } else {
            match Url::parse(self.url.trim()) {
                Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {
                    return Ok(());
                }
                _ => ValidationError::new("Enter a valid URL.", "invalid"),
            }
        };
        Err(ValidationError::for_field("url", error))
    }
}

/// Video providers whose embeds get a responsive wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoProvider {
    /// `youtube.com`
    YouTube,
    /// `vimeo.com`
    Vimeo,
}

impl VideoProvider {
    /// Detects the provider by searching `html` for its domain.
    ///
    /// This is plain substring containment anywhere in the markup, not an
    /// inspection of the embed's `src`; a fragment that merely mentions
    /// `youtube.com` counts as a YouTube embed. YouTube is checked first.
    pub fn detect(html: &str) -> Option<Self> {
        if html.contains("youtube.com") {
            Some(Self::YouTube)
        } else if html.contains("vimeo.com") {
            Some(Self::Vimeo)
        } else {
            None
        }
    }

    /// CSS classes of the wrapping element.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::YouTube => "flex-video widescreen",
            Self::Vimeo => "flex-video widescreen vimeo",
        }
    }
}

/// Wraps known video embeds in a responsive container.
///
/// Other fragments are returned unchanged. The fragment is trusted verbatim.
pub fn wrap_embed(html: &str) -> SafeString {
    match VideoProvider::detect(html) {
        Some(provider) => mark_safe(format!(
            "<div class=\"{}\">{html}</div>",
            provider.css_class()
        )),
        None => mark_safe(html),
    }
}

/// Renders an external plugin.
///
/// Lookup failures render as an empty string.
pub async fn render_external(resolver: &OembedResolver, plugin: &External) -> SafeString {
    let html = resolver.oembed_html(&plugin.url).await;
    wrap_embed(&html)
}

/// Inline editor for the external plugin of `app_label`.
pub fn external_inline(app_label: impl Into<String>) -> ContentEditorInline {
    ContentEditorInline::create::<External>(app_label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_url() {
        let plugin = External::new("https://vimeo.com/1");
        assert_eq!(plugin.to_string(), "https://vimeo.com/1");
    }

    #[test]
    fn test_validate() {
        assert!(External::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .validate()
            .is_ok());

        let err = External::new("").validate().unwrap_err();
        assert_eq!(err.errors_for("url")[0].code, "required");

        for bad in ["youtube", "ftp://example.com/x", "mailto:a@example.com"] {
            let err = External::new(bad).validate().unwrap_err();
            assert_eq!(err.errors_for("url")[0].code, "invalid", "{bad}");
        }
    }

    #[test]
    fn test_detect_provider() {
        assert_eq!(
            VideoProvider::detect("<iframe src=\"https://www.youtube.com/embed/x\">"),
            Some(VideoProvider::YouTube)
        );
        assert_eq!(
            VideoProvider::detect("<iframe src=\"https://player.vimeo.com/video/1\">"),
            Some(VideoProvider::Vimeo)
        );
        assert_eq!(
            VideoProvider::detect("<a href=\"https://vimeo.com\">youtube.com</a>"),
            Some(VideoProvider::YouTube)
        );
        assert_eq!(VideoProvider::detect("<blockquote>tweet</blockquote>"), None);
    }

    #[test]
    fn test_wrap_embed() {
        let html = "<iframe src='https://www.youtube.com/embed/xyz'></iframe>";
        assert_eq!(
            wrap_embed(html).as_str(),
            format!("<div class=\"flex-video widescreen\">{html}</div>")
        );

        let html = "<iframe src='https://player.vimeo.com/video/1'></iframe>";
        assert_eq!(
            wrap_embed(html).as_str(),
            format!("<div class=\"flex-video widescreen vimeo\">{html}</div>")
        );

        assert_eq!(wrap_embed("<p>a & b</p>").as_str(), "<p>a & b</p>");
        assert!(wrap_embed("").is_empty());
    }

    #[test]
    fn test_external_inline() {
        let inline = external_inline("testapp");
        assert_eq!(inline.model_name, "external");
        assert_eq!(inline.verbose_name, "external content");
        assert_eq!(inline.fields, vec!["url"]);
        assert_eq!(inline.extra, 0);
    }
}
