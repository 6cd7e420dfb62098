//! Regions and page templates.
//!
//! A [`Template`] names the file used to render a page and the [`Region`]s
//! that file exposes. Plugins are placed into regions by key.

use serde::{Deserialize, Serialize};

/// A named area of a template that holds plugins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Identifier stored on each plugin placement.
    pub key: String,
    /// Human-readable title shown in the editor.
    pub title: String,
    /// Whether an empty region falls back to the contents of ancestors.
    pub inherited: bool,
}

impl Region {
    /// Creates a region that does not inherit content.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            inherited: false,
        }
    }

    /// Marks the region as inheriting content from ancestors when empty.
    #[must_use]
    pub const fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }
}

/// A page template and its regions.
///
/// # Examples
///
/// ```
/// use feincms3_rs_content_editor::regions::{Region, Template};
///
/// let template = Template::new("standard", "standard", "pages/standard.html")
///     .region(Region::new("main", "Main"));
/// assert!(template.get_region("main").is_some());
/// assert!(template.get_region("sidebar").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Identifier stored on pages using this template.
    pub key: String,
    /// Human-readable title.
    pub title: String,
    /// Path of the template file.
    pub template_name: String,
    /// Regions in display order.
    pub regions: Vec<Region>,
}

impl Template {
    /// Creates a template without regions.
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        template_name: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            template_name: template_name.into(),
            regions: Vec::new(),
        }
    }

    /// Appends a region.
    #[must_use]
    pub fn region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self
    }

    /// Looks up a region by key.
    pub fn get_region(&self, key: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.key == key)
    }

    /// Returns the region keys in display order.
    pub fn region_keys(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.key.as_str()).collect()
    }
}
