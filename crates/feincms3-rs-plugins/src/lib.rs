//! # feincms3-rs-plugins
//!
//! Content plugins for feincms3-rs.
//!
//! - [`external`] - Embeds of external resources through a cached oEmbed lookup
//! - [`html`] - Raw HTML snippets inserted as-is
//! - [`oembed`] - The [`OembedResolver`] behind external content
//! - [`renderer`] - Rendering plugins and whole regions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use feincms3_rs_cache::InMemoryCache;
//! use feincms3_rs_core::OembedSettings;
//! use feincms3_rs_plugins::external::{render_external, External};
//! use feincms3_rs_plugins::oembed::OembedResolver;
//!
//! async fn example() {
//!     let resolver =
//!         OembedResolver::new(Arc::new(InMemoryCache::new()), OembedSettings::default()).unwrap();
//!     let plugin = External::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
//!     let html = render_external(&resolver, &plugin).await;
//!     println!("{html}");
//! }
//! ```

// These clippy lints are intentionally allowed:
// - doc_markdown: backtick requirements for provider names are too strict
#![allow(clippy::doc_markdown)]

pub mod external;
pub mod html;
pub mod oembed;
pub mod renderer;

pub use external::{external_inline, render_external, External, VideoProvider};
pub use html::{html_inline, render_html, Html};
pub use oembed::{cache_key, FetchError, OembedResolver};
pub use renderer::{PluginRenderer, RenderPlugin};
