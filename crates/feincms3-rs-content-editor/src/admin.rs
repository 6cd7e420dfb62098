//! Inline editor registration for plugin kinds.
//!
//! Each plugin kind is edited through a [`ContentEditorInline`] attached to a
//! [`ContentEditor`], the admin of the parent model. The editor publishes its
//! regions and plugin inlines as JSON for the client-side editor.

use serde::{Deserialize, Serialize};
use serde_json::json;

use feincms3_rs_core::ValidationError;

use crate::plugin::{Plugin, PluginKind};
use crate::regions::Template;

/// Inline editing configuration for one plugin kind.
///
/// # Examples
///
/// ```
/// use feincms3_rs_content_editor::admin::ContentEditorInline;
///
/// let inline = ContentEditorInline::new("testapp", "external")
///     .verbose_name("external content")
///     .regions(vec!["main"]);
/// assert!(inline.allows_region("main"));
/// assert!(!inline.allows_region("sidebar"));
/// assert_eq!(inline.prefix(), "testapp_external_set");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEditorInline {
    /// The app label of the concrete plugin model.
    pub app_label: String,
    /// The model name of the concrete plugin model.
    pub model_name: String,
    /// Human-readable singular name.
    pub verbose_name: String,
    /// Human-readable plural name.
    pub verbose_name_plural: String,
    /// Number of extra empty forms; always zero, plugins are added explicitly.
    pub extra: usize,
    /// Fields shown in the inline form, besides region and ordering.
    pub fields: Vec<String>,
    /// Regions this plugin may be placed into; `None` allows all.
    pub regions: Option<Vec<String>>,
}

impl ContentEditorInline {
    /// Creates an inline for the given model.
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        let model = model_name.into();
        let verbose = model.replace('_', " ");
        Self {
            app_label: app_label.into(),
            verbose_name_plural: format!("{verbose}s"),
            verbose_name: verbose,
            model_name: model,
            extra: 0,
            fields: Vec::new(),
            regions: None,
        }
    }

    /// Creates an inline from the metadata of plugin kind `T`.
    pub fn create<T: PluginKind>(app_label: impl Into<String>) -> Self {
        let meta = T::meta();
        Self {
            app_label: app_label.into(),
            model_name: meta.model_name.to_string(),
            verbose_name: meta.verbose_name.to_string(),
            verbose_name_plural: meta.verbose_name_plural.to_string(),
            extra: 0,
            fields: meta.fields.iter().map(|f| f.name.to_string()).collect(),
            regions: None,
        }
    }

    /// Sets the verbose name.
    #[must_use]
    pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
        self.verbose_name = name.into();
        self
    }

    /// Sets the fields to display.
    #[must_use]
    pub fn fields(mut self, fields: Vec<&str>) -> Self {
        self.fields = fields.into_iter().map(String::from).collect();
        self
    }

    /// Restricts the plugin to the given regions.
    #[must_use]
    pub fn regions(mut self, regions: Vec<&str>) -> Self {
        self.regions = Some(regions.into_iter().map(String::from).collect());
        self
    }

    /// Returns `true` if the plugin may be placed into `region`.
    pub fn allows_region(&self, region: &str) -> bool {
        self.regions
            .as_ref()
            .map_or(true, |allowed| allowed.iter().any(|r| r == region))
    }

    /// The formset prefix, i.e. the reverse accessor of the plugin model.
    pub fn prefix(&self) -> String {
        format!("{}_{}_set", self.app_label, self.model_name)
    }
}

/// Admin configuration of a model whose objects hold plugins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEditor {
    /// The application label of the parent model.
    pub app_label: String,
    /// The parent model name.
    pub model_name: String,
    /// Plugin inlines in the order they are offered.
    pub inlines: Vec<ContentEditorInline>,
}

impl ContentEditor {
    /// Creates an editor without inlines.
    pub fn new(app_label: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            app_label: app_label.into(),
            model_name: model_name.into(),
            inlines: Vec::new(),
        }
    }

    /// Adds an inline.
    #[must_use]
    pub fn inline(mut self, inline: ContentEditorInline) -> Self {
        self.inlines.push(inline);
        self
    }

    /// Looks up the inline editing `model_name`.
    pub fn get_inline(&self, model_name: &str) -> Option<&ContentEditorInline> {
        self.inlines.iter().find(|i| i.model_name == model_name)
    }

    /// Returns the configuration consumed by the client-side editor.
    pub fn editor_config(&self, template: &Template) -> serde_json::Value {
        let regions: Vec<_> = template
            .regions
            .iter()
            .map(|r| json!({"key": r.key, "title": r.title, "inherited": r.inherited}))
            .collect();
        let plugins: Vec<_> = self
            .inlines
            .iter()
            .map(|i| json!({"prefix": i.prefix(), "title": i.verbose_name, "regions": i.regions}))
            .collect();
        json!({"regions": regions, "plugins": plugins})
    }

    /// Checks that `plugin` may sit where it is placed.
    ///
    /// The region must exist in `template` and be allowed by the inline
    /// registered for `model_name`.
    pub fn validate_placement<P: Plugin>(
        &self,
        template: &Template,
        model_name: &str,
        plugin: &P,
    ) -> Result<(), ValidationError> {
        let region_error = |message: String| {
            ValidationError::for_field("region", ValidationError::new(message, "invalid_choice"))
        };

        let inline = self.get_inline(model_name).ok_or_else(|| {
            ValidationError::new(
                format!("No inline registered for '{model_name}'."),
                "unregistered",
            )
        })?;
        if template.get_region(plugin.region()).is_none() {
            return Err(region_error(format!(
                "Region '{}' does not exist in template '{}'.",
                plugin.region(),
                template.key
            )));
        }
        if !inline.allows_region(plugin.region()) {
            return Err(region_error(format!(
                "'{}' is not allowed in region '{}'.",
                inline.verbose_name,
                plugin.region()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::Placement;
    use crate::regions::Region;

    struct Slot(Placement);

    impl Plugin for Slot {
        fn id(&self) -> i64 {
            1
        }

        fn placement(&self) -> &Placement {
            &self.0
        }
    }

    fn template() -> Template {
        Template::new("with-sidebar", "with sidebar", "pages/with-sidebar.html")
            .region(Region::new("main", "Main"))
            .region(Region::new("sidebar", "Sidebar"))
    }

    fn editor() -> ContentEditor {
        ContentEditor::new("testapp", "page")
            .inline(ContentEditorInline::new("testapp", "external").regions(vec!["main"]))
            .inline(ContentEditorInline::new("testapp", "html"))
    }

    #[test]
    fn test_inline_defaults() {
        let inline = ContentEditorInline::new("testapp", "rich_text");
        assert_eq!(inline.verbose_name, "rich text");
        assert_eq!(inline.verbose_name_plural, "rich texts");
        assert_eq!(inline.extra, 0);
        assert!(inline.allows_region("anything"));
    }

    #[test]
    fn test_editor_config() {
        let config = editor().editor_config(&template());
        assert_eq!(config["regions"][1]["key"], "sidebar");
        assert_eq!(config["regions"][1]["inherited"], false);
        assert_eq!(config["plugins"][0]["prefix"], "testapp_external_set");
        assert_eq!(config["plugins"][0]["regions"], json!(["main"]));
        assert!(config["plugins"][1]["regions"].is_null());
    }

    #[test]
    fn test_validate_placement() {
        let editor = editor();
        let template = template();

        let ok = Slot(Placement::new(1, "main", 0));
        assert!(editor.validate_placement(&template, "external", &ok).is_ok());

        let restricted = Slot(Placement::new(1, "sidebar", 0));
        let err = editor
            .validate_placement(&template, "external", &restricted)
            .unwrap_err();
        assert_eq!(err.errors_for("region")[0].code, "invalid_choice");
        assert!(editor.validate_placement(&template, "html", &restricted).is_ok());

        let missing = Slot(Placement::new(1, "footer", 0));
        assert!(editor.validate_placement(&template, "html", &missing).is_err());

        let err = editor.validate_placement(&template, "image", &ok).unwrap_err();
        assert_eq!(err.code, "unregistered");
    }
}
