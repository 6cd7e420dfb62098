//! # feincms3-rs-core
//!
//! Core types, settings, logging, and error types for feincms3-rs.
//! This crate has no framework dependencies and provides the foundation for all other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Project settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`safestring`] - HTML strings marked safe for direct injection

pub mod error;
pub mod logging;
pub mod safestring;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{Feincms3Error, Feincms3Result, ValidationError};
pub use safestring::{mark_safe, SafeString};
pub use settings::{CacheSettings, OembedSettings, Settings, SETTINGS};
