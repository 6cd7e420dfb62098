//! # feincms3-rs
//!
//! Content plugins and content-editor building blocks for CMS sites.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `feincms3-rs` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use feincms3_rs::cache::InMemoryCache;
//! use feincms3_rs::core::OembedSettings;
//! use feincms3_rs::plugins::{render_external, External, OembedResolver};
//!
//! # async fn run() -> feincms3_rs::core::Feincms3Result<()> {
//! let resolver = OembedResolver::new(Arc::new(InMemoryCache::new()), OembedSettings::default())?;
//! let html = render_external(&resolver, &External::new("https://vimeo.com/76979871")).await;
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

/// Settings, errors, logging, and safe strings.
pub use feincms3_rs_core as core;

/// Cache backends and the settings-driven cache registry.
#[cfg(feature = "cache")]
pub use feincms3_rs_cache as cache;

/// Regions, templates, plugin placement, and inline editor metadata.
#[cfg(feature = "content-editor")]
pub use feincms3_rs_content_editor as content_editor;

/// The external (oEmbed) and raw HTML plugins and their renderer.
#[cfg(feature = "plugins")]
pub use feincms3_rs_plugins as plugins;

/// Commonly used items.
pub mod prelude {
    pub use feincms3_rs_core::{mark_safe, Feincms3Error, Feincms3Result, SafeString, Settings};

    #[cfg(feature = "cache")]
    pub use feincms3_rs_cache::{CacheBackend, CacheValue, InMemoryCache};

    #[cfg(feature = "content-editor")]
    pub use feincms3_rs_content_editor::{
        Contents, Placement, Plugin, PluginKind, PluginRecord, Region, Template,
    };

    #[cfg(feature = "plugins")]
    pub use feincms3_rs_plugins::{External, Html, OembedResolver, PluginRenderer, RenderPlugin};
}

// ── Third-party re-exports ───────────────────────────────────────────

pub use async_trait;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
pub use tracing_subscriber;
