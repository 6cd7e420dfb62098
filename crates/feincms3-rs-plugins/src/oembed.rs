//! Cached oEmbed lookups.
//!
//! [`OembedResolver`] turns an arbitrary URL into an embeddable HTML fragment
//! by asking an oEmbed lookup service (noembed.com by default). Results are
//! cached per URL, failures included:
//!
//! | Outcome | Cached value | TTL (default) |
//! |---|---|---|
//! | success | the `html` field, or `""` | 30 days |
//! | connection failure or timeout | `""` | 60 seconds |
//! | HTTP error or malformed body | `""` | 1 day |
//!
//! Resolution never fails; every error degrades to an empty fragment so a
//! broken embed cannot break page rendering. Concurrent misses for the same
//! URL are not coalesced and may each reach the network.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use feincms3_rs_cache::{CacheBackend, CacheValue};
use feincms3_rs_core::{Feincms3Error, Feincms3Result, OembedSettings};

/// Prefix of every cache key written by the resolver.
pub const CACHE_KEY_PREFIX: &str = "oembed-url-";

/// Returns the cache key for `url`.
///
/// The key only depends on the URL, so every lookup of one URL shares a
/// single cache slot.
///
/// # Examples
///
/// ```
/// use feincms3_rs_plugins::oembed::cache_key;
///
/// assert_eq!(cache_key(""), "oembed-url-d41d8cd98f00b204e9800998ecf8427e");
/// ```
pub fn cache_key(url: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{:x}", md5::compute(url.as_bytes()))
}

/// Why a lookup produced no fragment.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The service could not be reached or did not answer in time.
    #[error("connection failed: {0}")]
    Connection(#[source] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),
    /// The body was not a JSON object.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Connection failures are expected to go away soon.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    fn negative_ttl(&self, config: &OembedSettings) -> Duration {
        if self.is_transient() {
            Duration::from_secs(config.transient_failure_ttl_secs)
        } else {
            Duration::from_secs(config.persistent_failure_ttl_secs)
        }
    }
}

/// Resolves URLs to embeddable HTML through a cached oEmbed lookup.
///
/// The cache is injected; pass a shared backend to share results between
/// resolvers, or an `InMemoryCache` in tests.
#[derive(Clone)]
pub struct OembedResolver {
    cache: Arc<dyn CacheBackend>,
    client: reqwest::Client,
    endpoint: Url,
    config: OembedSettings,
}

impl OembedResolver {
    /// Creates a resolver with its own HTTP client.
    pub fn new(cache: Arc<dyn CacheBackend>, config: OembedSettings) -> Feincms3Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                Feincms3Error::ImproperlyConfigured(format!("Failed to build HTTP client: {e}"))
            })?;
        Self::with_client(cache, config, client)
    }

    /// Creates a resolver that sends lookups through `client`.
    ///
    /// The request timeout from `config` is applied per request.
    pub fn with_client(
        cache: Arc<dyn CacheBackend>,
        config: OembedSettings,
        client: reqwest::Client,
    ) -> Feincms3Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            Feincms3Error::ImproperlyConfigured(format!(
                "Invalid oEmbed endpoint '{}': {e}",
                config.endpoint
            ))
        })?;
        Ok(Self {
            cache,
            client,
            endpoint,
            config,
        })
    }

    /// The configuration in use.
    pub const fn config(&self) -> &OembedSettings {
        &self.config
    }

    /// The cache results are stored in.
    pub fn cache(&self) -> &Arc<dyn CacheBackend> {
        &self.cache
    }

    /// Returns the embed HTML for `url`, caching failures.
    pub async fn oembed_html(&self, url: &str) -> String {
        self.resolve(url, true).await
    }

    /// Returns the embed HTML for `url`.
    ///
    /// With `cache_failures` unset, failed lookups leave the cache untouched
    /// and the next call tries again. Successful lookups are always cached.
    pub async fn resolve(&self, url: &str, cache_failures: bool) -> String {
        let key = cache_key(url);

        match self.cache.get(&key).await {
            Ok(Some(CacheValue::String(html))) => {
                tracing::debug!(url, key = %key, "oEmbed cache hit");
                return html;
            }
            Ok(Some(other)) => {
                tracing::warn!(key = %key, value = ?other, "Ignoring non-string oEmbed cache entry");
            }
            Ok(None) => tracing::debug!(url, key = %key, "oEmbed cache miss"),
            Err(err) => tracing::warn!(key = %key, error = %err, "oEmbed cache read failed"),
        }

        match self.fetch(url).await {
            Ok(html) => {
                let ttl = Duration::from_secs(self.config.success_ttl_secs);
                self.store(&key, html.clone(), ttl).await;
                html
            }
            Err(err) => {
                tracing::warn!(
                    url,
                    error = %err,
                    transient = err.is_transient(),
                    "oEmbed lookup failed"
                );
                if cache_failures {
                    self.store(&key, String::new(), err.negative_ttl(&self.config))
                        .await;
                }
                String::new()
            }
        }
    }

    /// Performs one lookup without touching the cache.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let max_width = self.config.max_width.to_string();
        let max_height = self.config.max_height.to_string();

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("url", url),
                ("nowrap", "on"),
                ("maxwidth", max_width.as_str()),
                ("maxheight", max_height.as_str()),
            ])
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()
            .await
            .map_err(FetchError::Connection)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Connection)?;
        parse_html(&body)
    }

    async fn store(&self, key: &str, html: String, ttl: Duration) {
        if let Err(err) = self
            .cache
            .set(key, CacheValue::String(html), Some(ttl))
            .await
        {
            tracing::warn!(key, error = %err, "oEmbed cache write failed");
        }
    }
}

impl std::fmt::Debug for OembedResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OembedResolver")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Extracts the `html` field of an oEmbed response body.
///
/// A missing or non-string `html` field yields an empty fragment; a body that
/// is not a JSON object is malformed.
fn parse_html(body: &[u8]) -> Result<String, FetchError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| FetchError::Malformed("expected a JSON object".to_string()))?;
    Ok(object
        .get("html")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_string())
}

#[cfg(test)]
mod tests {
    use feincms3_rs_cache::InMemoryCache;

    use super::*;

    #[test]
    fn test_cache_key_is_md5_of_url() {
        assert_eq!(cache_key("a"), "oembed-url-0cc175b9c0f1b6a831c399e269772661");
        assert_eq!(cache_key("a"), cache_key("a"));
        assert_ne!(cache_key("a"), cache_key("b"));
    }

    #[test]
    fn test_parse_html() {
        assert_eq!(parse_html(br#"{"html": "<iframe></iframe>"}"#).unwrap(), "<iframe></iframe>");
        assert_eq!(parse_html(br#"{"title": "no html"}"#).unwrap(), "");
        assert_eq!(parse_html(br#"{"html": null}"#).unwrap(), "");
    }

    #[test]
    fn test_parse_html_malformed() {
        assert!(matches!(parse_html(b"<html>"), Err(FetchError::Malformed(_))));
        assert!(matches!(parse_html(b"[1, 2]"), Err(FetchError::Malformed(_))));
        assert!(matches!(parse_html(b""), Err(FetchError::Malformed(_))));
    }

    #[test]
    fn test_negative_ttls() {
        let config = OembedSettings::default();
        let persistent = FetchError::Status(StatusCode::NOT_FOUND);
        assert!(!persistent.is_transient());
        assert_eq!(persistent.negative_ttl(&config), Duration::from_secs(86_400));
        assert_eq!(
            FetchError::Malformed(String::new()).negative_ttl(&config),
            Duration::from_secs(86_400)
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = OembedSettings {
            endpoint: "not a url".to_string(),
            ..OembedSettings::default()
        };
        let err = OembedResolver::new(Arc::new(InMemoryCache::new()), config).unwrap_err();
        assert!(matches!(err, Feincms3Error::ImproperlyConfigured(_)));
    }

    #[tokio::test]
    async fn test_cached_fragment_returned_without_lookup() {
        let cache = Arc::new(InMemoryCache::new());
        cache
            .set(&cache_key("https://example.com/"), "<p>cached</p>".into(), None)
            .await
            .unwrap();

        let config = OembedSettings {
            endpoint: "http://127.0.0.1:9/embed".to_string(),
            ..OembedSettings::default()
        };
        let resolver = OembedResolver::new(cache, config).unwrap();
        assert_eq!(resolver.oembed_html("https://example.com/").await, "<p>cached</p>");
    }

    #[test]
    fn test_debug_hides_cache() {
        let resolver =
            OembedResolver::new(Arc::new(InMemoryCache::new()), OembedSettings::default()).unwrap();
        let debug = format!("{resolver:?}");
        assert!(debug.contains("noembed.com"));
        assert!(debug.ends_with(".. }"));
    }
}
