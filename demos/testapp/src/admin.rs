//! Content editor registration for pages.

use feincms3_rs_content_editor::{ContentEditor, Template};
use feincms3_rs_core::ValidationError;
use feincms3_rs_plugins::{external_inline, html_inline};

use crate::models::PagePlugin;

/// The page admin with one inline per page plugin.
pub fn page_editor() -> ContentEditor {
    ContentEditor::new("testapp", "page")
        .inline(external_inline("testapp"))
        .inline(html_inline("testapp"))
}

/// Validates a plugin's fields and its placement on a page using `template`.
pub fn clean_plugin(
    editor: &ContentEditor,
    template: &Template,
    plugin: &PagePlugin,
) -> Result<(), ValidationError> {
    match plugin {
        PagePlugin::External(record) => record.full_clean()?,
        PagePlugin::Html(record) => record.full_clean()?,
    }
    editor.validate_placement(template, plugin.model_name(), plugin)
}
