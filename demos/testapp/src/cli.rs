//! Command line interface of the test app.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use feincms3_rs_cache::CacheHandler;
use feincms3_rs_core::settings_loader::{from_env, from_toml_file_with_env};
use feincms3_rs_core::{Feincms3Error, Feincms3Result, Settings};
use feincms3_rs_plugins::external::wrap_embed;
use feincms3_rs_plugins::{render_external, External, OembedResolver, PluginRenderer};

use crate::admin::page_editor;
use crate::demo;
use crate::models::templates;
use crate::views::render_page;

/// feincms3 test app.
#[derive(Debug, Parser)]
#[command(name = "feincms3-testapp", version, about)]
pub struct Cli {
    /// TOML settings file. `FEINCMS3_*` environment variables override it.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a URL through oEmbed and print the rendered embed.
    Embed {
        url: String,
        /// Do not remember failed lookups.
        #[arg(long)]
        no_cache_failures: bool,
    },
    /// Print the content editor configuration for a page template.
    EditorConfig {
        #[arg(default_value = "standard")]
        template: String,
    },
    /// Render a page of the built-in demo site.
    RenderPage {
        /// Primary key of the demo page.
        id: i64,
    },
}

/// Loads settings from `path`, or from defaults and the environment.
///
/// The default language has to be one of the configured languages.
pub fn load_settings(path: Option<&Path>) -> Feincms3Result<Settings> {
    let settings = match path {
        Some(path) => from_toml_file_with_env(path)?,
        None => from_env(),
    };
    if !settings.has_language(&settings.language_code) {
        return Err(Feincms3Error::ImproperlyConfigured(format!(
            "LANGUAGE_CODE '{}' is not in LANGUAGES",
            settings.language_code
        )));
    }
    Ok(settings)
}

/// Builds the oEmbed resolver on top of the `default` cache.
pub fn build_resolver(settings: &Settings) -> Feincms3Result<OembedResolver> {
    let cache = CacheHandler::from_settings(settings)?.default_cache()?;
    OembedResolver::new(cache, settings.oembed.clone())
}

/// Runs `command` and returns what should be printed.
pub async fn run(command: &Command, settings: &Settings) -> Feincms3Result<String> {
    match command {
        Command::Embed {
            url,
            no_cache_failures,
        } => {
            let resolver = build_resolver(settings)?;
            let html = if *no_cache_failures {
                wrap_embed(&resolver.resolve(url, false).await)
            } else {
                render_external(&resolver, &External::new(url.as_str())).await
            };
            Ok(html.into_inner())
        }
        Command::EditorConfig { template } => {
            let template = templates()
                .iter()
                .find(|t| &t.key == template)
                .ok_or_else(|| Feincms3Error::NotFound(format!("Unknown template '{template}'")))?;
            serde_json::to_string_pretty(&page_editor().editor_config(template))
                .map_err(|e| Feincms3Error::SerializationError(e.to_string()))
        }
        Command::RenderPage { id } => {
            let site = demo::site();
            let page = site
                .pages
                .iter()
                .find(|p| p.id == *id && p.is_active)
                .ok_or_else(|| Feincms3Error::NotFound(format!("No active page with id {id}")))?;
            let renderer = PluginRenderer::new(build_resolver(settings)?);
            Ok(render_page(&renderer, page, &site.pages, &site.plugins)
                .await
                .into_inner())
        }
    }
}

#[cfg(test)]
mod tests {
    use feincms3_rs_core::CacheSettings;

    use super::*;

    #[test]
    fn test_parse_embed() {
        let cli = Cli::try_parse_from([
            "feincms3-testapp",
            "embed",
            "https://vimeo.com/1",
            "--no-cache-failures",
        ])
        .unwrap();
        assert!(cli.settings.is_none());
        assert!(matches!(
            cli.command,
            Command::Embed { ref url, no_cache_failures: true } if url == "https://vimeo.com/1"
        ));
    }

    #[test]
    fn test_parse_global_settings() {
        let cli = Cli::try_parse_from(["feincms3-testapp", "editor-config", "--settings", "site.toml"])
            .unwrap();
        assert_eq!(cli.settings.as_deref(), Some(Path::new("site.toml")));
        assert!(matches!(cli.command, Command::EditorConfig { ref template } if template == "standard"));
    }

    #[test]
    fn test_embed_requires_url() {
        assert!(Cli::try_parse_from(["feincms3-testapp", "embed"]).is_err());
    }

    #[tokio::test]
    async fn test_editor_config_output() {
        let out = run(
            &Command::EditorConfig {
                template: "with-sidebar".to_string(),
            },
            &Settings::default(),
        )
        .await
        .unwrap();
        let config: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(config["regions"][1]["key"], "sidebar");
        assert_eq!(config["plugins"][0]["prefix"], "testapp_external_set");
    }

    #[tokio::test]
    async fn test_unknown_template() {
        let err = run(
            &Command::EditorConfig {
                template: "nope".to_string(),
            },
            &Settings::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Feincms3Error::NotFound(_)));
    }

    #[test]
    fn test_unknown_cache_backend() {
        let mut settings = Settings::default();
        settings.caches.insert(
            "default".to_string(),
            CacheSettings {
                backend: "memcached".to_string(),
                ..CacheSettings::default()
            },
        );
        assert!(matches!(
            build_resolver(&settings),
            Err(Feincms3Error::ImproperlyConfigured(_))
        ));
    }

    #[test]
    fn test_missing_default_cache() {
        let mut settings = Settings::default();
        settings.caches.clear();
        assert!(build_resolver(&settings).is_err());
    }
}
