//! # feincms3-rs-content-editor
//!
//! The building blocks plugins plug into: page templates with regions,
//! placement of plugin records, per-region grouping, and inline editor
//! metadata for the admin.
//!
//! ## Modules
//!
//! - [`regions`] - [`Region`] and [`Template`]
//! - [`plugin`] - [`Placement`], the [`Plugin`] and [`PluginKind`] traits, [`PluginRecord`]
//! - [`contents`] - [`Contents`] and [`contents_for_item`]
//! - [`admin`] - [`ContentEditorInline`] and [`ContentEditor`]

pub mod admin;
pub mod contents;
pub mod plugin;
pub mod regions;

pub use admin::{ContentEditor, ContentEditorInline};
pub use contents::{contents_for_item, Contents};
pub use plugin::{Placement, Plugin, PluginField, PluginKind, PluginMeta, PluginRecord};
pub use regions::{Region, Template};
