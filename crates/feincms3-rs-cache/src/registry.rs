//! Building cache backends from [`CacheSettings`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use feincms3_rs_core::{CacheSettings, Feincms3Error, Feincms3Result, Settings};

use crate::backend::{CacheBackend, DummyCache, InMemoryCache};

/// Builds the backend described by `config`.
///
/// Supported backends are `"locmem"` and `"dummy"`. A `timeout` of zero
/// means entries stored without an explicit TTL never expire.
pub fn cache_from_settings(config: &CacheSettings) -> Feincms3Result<Arc<dyn CacheBackend>> {
    match config.backend.as_str() {
        "locmem" => {
            let default_timeout =
                (config.timeout > 0).then(|| Duration::from_secs(config.timeout));
            Ok(Arc::new(
                InMemoryCache::new()
                    .key_prefix(config.key_prefix.clone())
                    .default_timeout(default_timeout),
            ))
        }
        "dummy" => Ok(Arc::new(DummyCache)),
        other => Err(Feincms3Error::ImproperlyConfigured(format!(
            "Unknown cache backend '{other}'"
        ))),
    }
}

/// The set of configured caches, keyed by alias.
#[derive(Clone, Default)]
pub struct CacheHandler {
    caches: HashMap<String, Arc<dyn CacheBackend>>,
}

impl CacheHandler {
    /// Builds every cache listed in `settings.caches`.
    pub fn from_settings(settings: &Settings) -> Feincms3Result<Self> {
        let mut caches = HashMap::new();
        for (alias, config) in &settings.caches {
            caches.insert(alias.clone(), cache_from_settings(config)?);
        }
        Ok(Self { caches })
    }

    /// Returns the cache registered under `alias`.
    pub fn get(&self, alias: &str) -> Feincms3Result<Arc<dyn CacheBackend>> {
        self.caches
            .get(alias)
            .cloned()
            .ok_or_else(|| Feincms3Error::ImproperlyConfigured(format!(
                "The cache '{alias}' is not configured"
            )))
    }

    /// Returns the `"default"` cache.
    pub fn default_cache(&self) -> Feincms3Result<Arc<dyn CacheBackend>> {
        self.get("default")
    }
}

impl std::fmt::Debug for CacheHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut aliases: Vec<_> = self.caches.keys().collect();
        aliases.sort();
        f.debug_struct("CacheHandler").field("aliases", &aliases).finish()
    }
}
