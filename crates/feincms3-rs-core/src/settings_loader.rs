//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML file (overriding defaults key by key).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FEINCMS3_DEBUG` | `debug` |
//! | `FEINCMS3_LOG_LEVEL` | `log_level` |
//! | `FEINCMS3_LANGUAGE_CODE` | `language_code` |
//! | `FEINCMS3_OEMBED_ENDPOINT` | `oembed.endpoint` |
//! | `FEINCMS3_OEMBED_TIMEOUT` | `oembed.timeout_secs` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use feincms3_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/settings.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::Feincms3Error;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values, including keys
/// nested inside tables such as `[oembed]`.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, Feincms3Error> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| Feincms3Error::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        Feincms3Error::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, toml_to_json(toml_value));
    serde_json::from_value(merged).map_err(|e| {
        Feincms3Error::ConfigurationError(format!("Failed to deserialize settings from TOML: {e}"))
    })
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, Feincms3Error> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        Feincms3Error::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, Feincms3Error> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `FEINCMS3_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(settings, |name| std::env::var(name).ok());
}

/// Applies overrides using `lookup` to resolve variable names.
///
/// Unparseable numeric values are ignored.
pub fn apply_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("FEINCMS3_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("FEINCMS3_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("FEINCMS3_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Some(val) = lookup("FEINCMS3_OEMBED_ENDPOINT") {
        settings.oembed.endpoint = val;
    }

    if let Some(val) = lookup("FEINCMS3_OEMBED_TIMEOUT") {
        if let Ok(secs) = val.parse::<u64>() {
            settings.oembed.timeout_secs = secs;
        }
    }
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = match base_map.remove(&key) {
                    Some(base_v) => merge_json(base_v, override_v),
                    None => override_v,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            language_code = "de"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.language_code, "de");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_str_partial_oembed_table() {
        let toml = r#"
            [oembed]
            endpoint = "http://localhost:9000/embed"
            timeout_secs = 5
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.oembed.endpoint, "http://localhost:9000/embed");
        assert_eq!(settings.oembed.timeout_secs, 5);
        assert_eq!(settings.oembed.max_width, 1200);
        assert_eq!(settings.oembed.persistent_failure_ttl_secs, 86_400);
    }

    #[test]
    fn test_from_toml_str_caches() {
        let toml = r#"
            [caches.default]
            backend = "dummy"

            [caches.embeds]
            backend = "locmem"
            location = "embeds"
            timeout = 60
            key_prefix = "site1"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.cache("default").unwrap().backend, "dummy");
        assert_eq!(settings.cache("default").unwrap().timeout, 300);
        let embeds = settings.cache("embeds").unwrap();
        assert_eq!(embeds.key_prefix, "site1");
        assert_eq!(embeds.timeout, 60);
    }

    #[test]
    fn test_from_toml_str_partial_cache_alias() {
        let toml = r#"
            [caches.embeds]
            backend = "dummy"
        "#;

        let settings = from_toml_str(toml).unwrap();
        let embeds = settings.cache("embeds").unwrap();
        assert_eq!(embeds.backend, "dummy");
        assert_eq!(embeds.timeout, 300);
        assert!(embeds.location.is_empty());
        assert!(embeds.key_prefix.is_empty());
        assert_eq!(settings.cache("default").unwrap().backend, "locmem");
    }

    #[test]
    fn test_from_toml_str_languages() {
        let toml = r#"
            languages = [["en", "English"], ["fr", "French"]]
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(settings.has_language("fr"));
        assert!(!settings.has_language("de"));
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.oembed.timeout_secs, 2);
    }

    #[test]
    fn test_from_toml_str_invalid() {
        assert!(from_toml_str("[[invalid toml content").is_err());
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("debug = \"sometimes\"");
        assert!(matches!(result, Err(Feincms3Error::ConfigurationError(_))));
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_from_toml_file_missing() {
        assert!(from_toml_file("/nonexistent/path/settings.toml").is_err());
    }

    // ── Overrides ───────────────────────────────────────────────────

    #[test]
    fn test_apply_overrides_debug() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, lookup_from(&[("FEINCMS3_DEBUG", "false")]));
        assert!(!settings.debug);

        apply_overrides(&mut settings, lookup_from(&[("FEINCMS3_DEBUG", "1")]));
        assert!(settings.debug);
    }

    #[test]
    fn test_apply_overrides_oembed() {
        let mut settings = Settings::default();
        apply_overrides(
            &mut settings,
            lookup_from(&[
                ("FEINCMS3_OEMBED_ENDPOINT", "http://127.0.0.1:1/embed"),
                ("FEINCMS3_OEMBED_TIMEOUT", "7"),
            ]),
        );
        assert_eq!(settings.oembed.endpoint, "http://127.0.0.1:1/embed");
        assert_eq!(settings.oembed.timeout_secs, 7);
    }

    #[test]
    fn test_apply_overrides_invalid_timeout() {
        let mut settings = Settings::default();
        apply_overrides(
            &mut settings,
            lookup_from(&[("FEINCMS3_OEMBED_TIMEOUT", "soon")]),
        );
        assert_eq!(settings.oembed.timeout_secs, 2);
    }

    #[test]
    fn test_apply_overrides_nothing_set() {
        let mut settings = Settings::default();
        apply_overrides(&mut settings, lookup_from(&[]));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.language_code, "en");
    }

    // ── merge_json helper ───────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"outer": {"a": 1, "b": 2}});
        let over = serde_json::json!({"outer": {"b": 3}});
        let merged = merge_json(base, over);
        assert_eq!(merged["outer"]["a"], 1);
        assert_eq!(merged["outer"]["b"], 3);
    }

    #[test]
    fn test_merge_json_array_override() {
        let base = serde_json::json!({"list": [1, 2, 3]});
        let over = serde_json::json!({"list": [4, 5]});
        assert_eq!(merge_json(base, over)["list"], serde_json::json!([4, 5]));
    }
}
