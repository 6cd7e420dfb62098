//! Integration tests for templates, plugin placement and editor metadata.

use std::fmt;

use feincms3_rs_content_editor::{
    contents_for_item, ContentEditor, ContentEditorInline, Placement, Plugin, PluginField,
    PluginKind, PluginMeta, PluginRecord, Region, Template,
};
use feincms3_rs_core::ValidationError;

// ── Fixtures ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct Text {
    text: String,
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short: String = self.text.chars().take(10).collect();
        f.write_str(&short)
    }
}

impl PluginKind for Text {
    fn meta() -> &'static PluginMeta {
        static META: PluginMeta = PluginMeta {
            model_name: "text",
            verbose_name: "text",
            verbose_name_plural: "texts",
            fields: &[PluginField {
                name: "text",
                label: "text",
                help_text: "",
                widget: "textarea",
            }],
        };
        &META
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::for_field(
                "text",
                ValidationError::new("This field is required.", "required"),
            ));
        }
        Ok(())
    }
}

fn text(id: i64, parent: i64, region: &str, ordering: i32) -> PluginRecord<Text> {
    PluginRecord::new(
        id,
        Placement::new(parent, region, ordering),
        Text {
            text: format!("text {id}"),
        },
    )
}

fn with_sidebar() -> Template {
    Template::new("with-sidebar", "with sidebar", "pages/with-sidebar.html")
        .region(Region::new("main", "Main"))
        .region(Region::new("sidebar", "Sidebar").inherited())
}

fn ids(plugins: &[PluginRecord<Text>]) -> Vec<i64> {
    plugins.iter().map(Plugin::id).collect()
}

// ═════════════════════════════════════════════════════════════════════
// Contents
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_page_tree_inherits_sidebar() {
    // 1 is the root page, 2 its child, 3 a grandchild.
    let plugins = vec![
        text(1, 1, "main", 10),
        text(2, 1, "sidebar", 10),
        text(3, 1, "sidebar", 20),
        text(4, 2, "main", 10),
        text(5, 3, "main", 20),
        text(6, 3, "main", 10),
    ];
    let template = with_sidebar();

    let root = contents_for_item(1, &template.regions, &plugins, &[]);
    assert_eq!(ids(root.get("main")), vec![1]);
    assert_eq!(ids(root.get("sidebar")), vec![2, 3]);

    let grandchild = contents_for_item(3, &template.regions, &plugins, &[2, 1]);
    assert_eq!(ids(grandchild.get("main")), vec![6, 5]);
    assert_eq!(ids(grandchild.get("sidebar")), vec![2, 3]);
}

#[test]
fn test_main_region_never_inherited() {
    let plugins = vec![text(1, 1, "main", 0)];
    let contents = contents_for_item(2, &with_sidebar().regions, &plugins, &[1]);
    assert!(contents.get("main").is_empty());
}

#[test]
fn test_template_switch_keeps_orphans() {
    let plugins = vec![text(1, 1, "main", 0), text(2, 1, "sidebar", 0)];
    let standard = Template::new("standard", "standard", "pages/standard.html")
        .region(Region::new("main", "Main"));

    let contents = contents_for_item(1, &standard.regions, &plugins, &[]);
    assert_eq!(ids(contents.get("main")), vec![1]);
    assert_eq!(ids(contents.unknown_region_contents()), vec![2]);
}

// ═════════════════════════════════════════════════════════════════════
// Editor
// ═════════════════════════════════════════════════════════════════════

#[test]
fn test_editor_config_from_plugin_kind() {
    let editor = ContentEditor::new("testapp", "page")
        .inline(ContentEditorInline::create::<Text>("testapp").regions(vec!["main"]));

    let config = editor.editor_config(&with_sidebar());
    assert_eq!(config["regions"][0]["title"], "Main");
    assert_eq!(config["regions"][1]["inherited"], true);
    assert_eq!(config["plugins"][0]["prefix"], "testapp_text_set");
    assert_eq!(config["plugins"][0]["title"], "text");
}

#[test]
fn test_record_validation_and_placement() {
    let editor = ContentEditor::new("testapp", "page")
        .inline(ContentEditorInline::create::<Text>("testapp").regions(vec!["main"]));
    let template = with_sidebar();

    let record = text(1, 1, "main", 0);
    assert!(record.full_clean().is_ok());
    assert!(editor.validate_placement(&template, "text", &record).is_ok());

    let sidebar = text(2, 1, "sidebar", 0);
    assert!(sidebar.full_clean().is_ok());
    assert!(editor.validate_placement(&template, "text", &sidebar).is_err());

    let empty = PluginRecord::new(
        3,
        Placement::new(1, "main", 0),
        Text {
            text: String::new(),
        },
    );
    let err = empty.full_clean().unwrap_err();
    assert_eq!(err.errors_for("text").len(), 1);
}

#[test]
fn test_record_display_is_short_text() {
    let record = PluginRecord::new(
        1,
        Placement::new(1, "main", 0),
        Text {
            text: "a rather long paragraph".to_string(),
        },
    );
    assert_eq!(record.to_string(), "a rather l");
}
