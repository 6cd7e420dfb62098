//! Settings for feincms3-rs.
//!
//! [`Settings`] holds the project configuration with defaults matching a fresh
//! project. [`SETTINGS`] is the globally-accessible, lazily-initialized
//! instance.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Cache backend configuration.
///
/// Fields missing from a configured alias take their default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// The cache backend (`"locmem"` or `"dummy"`).
    pub backend: String,
    /// The cache location (unused by the in-process backends).
    pub location: String,
    /// Default timeout in seconds for entries stored without an explicit TTL.
    pub timeout: u64,
    /// Prefix prepended to every key.
    pub key_prefix: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: "locmem".to_string(),
            location: String::new(),
            timeout: 300,
            key_prefix: String::new(),
        }
    }
}

/// Configuration of the oEmbed lookup used by the external content plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OembedSettings {
    /// The lookup endpoint, queried with `url`, `nowrap`, `maxwidth` and `maxheight`.
    pub endpoint: String,
    /// Maximum embed width passed to the provider.
    pub max_width: u32,
    /// Maximum embed height passed to the provider.
    pub max_height: u32,
    /// Timeout of the outbound request in seconds.
    pub timeout_secs: u64,
    /// How long successfully resolved fragments are cached.
    pub success_ttl_secs: u64,
    /// How long connection failures are cached.
    pub transient_failure_ttl_secs: u64,
    /// How long HTTP errors and malformed responses are cached.
    pub persistent_failure_ttl_secs: u64,
    /// User agent sent with lookups.
    pub user_agent: String,
}

impl Default for OembedSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://noembed.com/embed".to_string(),
            max_width: 1200,
            max_height: 800,
            timeout_secs: 2,
            success_ttl_secs: 30 * 86_400,
            transient_failure_ttl_secs: 60,
            persistent_failure_ttl_secs: 86_400,
            user_agent: concat!("feincms3-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// The complete set of project settings.
///
/// # Examples
///
/// ```
/// use feincms3_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.oembed.max_width, 1200);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The log filter (e.g. "info", "feincms3_rs_plugins=debug").
    pub log_level: String,

    // ── Internationalization ─────────────────────────────────────────

    /// The default language code.
    pub language_code: String,
    /// Available languages as `(code, name)` pairs.
    pub languages: Vec<(String, String)>,

    // ── Cache ────────────────────────────────────────────────────────

    /// Cache backend configurations, keyed by alias (e.g. "default").
    pub caches: HashMap<String, CacheSettings>,

    // ── Plugins ──────────────────────────────────────────────────────

    /// oEmbed lookup configuration.
    pub oembed: OembedSettings,
}

impl Default for Settings {
    fn default() -> Self {
        let mut caches = HashMap::new();
        caches.insert("default".to_string(), CacheSettings::default());

        Self {
            debug: true,
            log_level: "info".to_string(),
            language_code: "en".to_string(),
            languages: vec![
                ("en".to_string(), "English".to_string()),
                ("de".to_string(), "German".to_string()),
            ],
            caches,
            oembed: OembedSettings::default(),
        }
    }
}

impl Settings {
    /// Returns the cache configuration registered under `alias`.
    pub fn cache(&self, alias: &str) -> Option<&CacheSettings> {
        self.caches.get(alias)
    }

    /// Returns `true` if `code` is one of the configured languages.
    pub fn has_language(&self, code: &str) -> bool {
        self.languages.iter().any(|(c, _)| c == code)
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
