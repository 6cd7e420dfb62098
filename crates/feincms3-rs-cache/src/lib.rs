//! # feincms3-rs-cache
//!
//! Async cache backends for feincms3-rs, modelled on Django's cache framework.
//!
//! The oEmbed resolver receives one of these as an injected
//! `Arc<dyn CacheBackend>`; nothing in the workspace reaches for a global cache.
//!
//! - [`backend`] - The [`CacheBackend`] trait, [`InMemoryCache`] and [`DummyCache`]
//! - [`registry`] - Building backends from settings

// These clippy lints are intentionally allowed:
// - significant_drop_tightening: RwLock guards must be held for the operation duration
#![allow(clippy::significant_drop_tightening)]

pub mod backend;
pub mod registry;

pub use backend::{CacheBackend, CacheValue, DummyCache, InMemoryCache};
pub use registry::{cache_from_settings, CacheHandler};
