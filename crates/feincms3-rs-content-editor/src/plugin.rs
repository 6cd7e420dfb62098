//! Plugin records and their placement.
//!
//! A plugin *kind* ([`PluginKind`]) is the abstract content type, e.g. an
//! external embed holding a URL. A [`PluginRecord`] binds one kind to a
//! concrete parent object and slot ([`Placement`]), the way a concrete model
//! combines an abstract plugin with a parent's plugin base.

use std::fmt;

use serde::{Deserialize, Serialize};

use feincms3_rs_core::ValidationError;

/// Where a plugin lives: its parent object, region and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Primary key of the parent object (e.g. a page).
    pub parent_id: i64,
    /// Key of the region the plugin is shown in.
    pub region: String,
    /// Sort key within the region; lower values come first.
    pub ordering: i32,
}

impl Placement {
    /// Creates a placement.
    pub fn new(parent_id: i64, region: impl Into<String>, ordering: i32) -> Self {
        Self {
            parent_id,
            region: region.into(),
            ordering,
        }
    }
}

/// Anything that occupies a placement slot.
pub trait Plugin: Send + Sync {
    /// Primary key of the plugin record.
    fn id(&self) -> i64;

    /// The slot this plugin occupies.
    fn placement(&self) -> &Placement;

    /// Shortcut for `placement().region`.
    fn region(&self) -> &str {
        &self.placement().region
    }

    /// Shortcut for `placement().ordering`.
    fn ordering(&self) -> i32 {
        self.placement().ordering
    }

    /// Shortcut for `placement().parent_id`.
    fn parent_id(&self) -> i64 {
        self.placement().parent_id
    }
}

/// Editor-facing description of a single plugin field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginField {
    /// Attribute name.
    pub name: &'static str,
    /// Form label.
    pub label: &'static str,
    /// Help text shown below the input.
    pub help_text: &'static str,
    /// Input widget hint (`"url"`, `"textarea"`, ...).
    pub widget: &'static str,
}

/// Static metadata of a plugin kind, equivalent to its `class Meta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PluginMeta {
    /// Lowercase model name (e.g. "external").
    pub model_name: &'static str,
    /// Human-readable singular name.
    pub verbose_name: &'static str,
    /// Human-readable plural name.
    pub verbose_name_plural: &'static str,
    /// Editable fields in form order.
    pub fields: &'static [PluginField],
}

/// An abstract content type that can be placed into regions.
///
/// `Display` provides the string shown for a record in the editor.
pub trait PluginKind: fmt::Display + fmt::Debug + Clone + Send + Sync + 'static {
    /// Returns the static metadata for this kind.
    fn meta() -> &'static PluginMeta;

    /// Validates the field values, mirroring a model form's `full_clean`.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A concrete plugin: one kind's data bound to a placement.
///
/// # Examples
///
/// ```
/// use std::fmt;
/// use feincms3_rs_content_editor::plugin::{
///     Placement, Plugin, PluginKind, PluginMeta, PluginRecord,
/// };
///
/// #[derive(Debug, Clone)]
/// struct Quote(String);
///
/// impl fmt::Display for Quote {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str(&self.0)
///     }
/// }
///
/// impl PluginKind for Quote {
///     fn meta() -> &'static PluginMeta {
///         static META: PluginMeta = PluginMeta {
///             model_name: "quote",
///             verbose_name: "quote",
///             verbose_name_plural: "quotes",
///             fields: &[],
///         };
///         &META
///     }
/// }
///
/// let record = PluginRecord::new(1, Placement::new(10, "main", 0), Quote("hi".into()));
/// assert_eq!(record.region(), "main");
/// assert_eq!(record.to_string(), "hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRecord<T> {
    /// Primary key.
    pub id: i64,
    /// Parent, region and ordering.
    pub placement: Placement,
    /// The kind-specific fields.
    pub data: T,
}

impl<T: PluginKind> PluginRecord<T> {
    /// Creates a record.
    pub const fn new(id: i64, placement: Placement, data: T) -> Self {
        Self {
            id,
            placement,
            data,
        }
    }

    /// Validates placement and data together.
    ///
    /// Field errors of the data are kept; a missing region is reported on
    /// the `region` field.
    pub fn full_clean(&self) -> Result<(), ValidationError> {
        let mut errors = match self.data.validate() {
            Ok(()) => ValidationError::with_field_errors(Default::default()),
            Err(err) if err.field_errors.is_empty() => {
                ValidationError::for_field("__all__", err)
            }
            Err(err) => err,
        };
        if self.placement.region.is_empty() {
            errors
                .field_errors
                .entry("region".to_string())
                .or_default()
                .push(ValidationError::new("This field is required.", "required"));
        }
        if errors.field_errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl<T: PluginKind> Plugin for PluginRecord<T> {
    fn id(&self) -> i64 {
        self.id
    }

    fn placement(&self) -> &Placement {
        &self.placement
    }
}

impl<T: fmt::Display> fmt::Display for PluginRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.data.fmt(f)
    }
}
