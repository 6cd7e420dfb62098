//! Apps mounted on pages and reversing URLs into them.
//!
//! A page with an application serves that app's URL configuration below its
//! own path. Each mount is namespaced as `<app>-<language>`, so the same app
//! can live on one page per language.

use std::collections::HashMap;

use feincms3_rs_core::{Feincms3Error, Feincms3Result};

use crate::models::{active, application, Page};

/// A named route of an app's URL configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    /// Path relative to the mount point, with `<type:name>` placeholders.
    pub pattern: &'static str,
}

/// Routes of `testapp.articles_urls`, namespaced `articles`.
pub const ARTICLES_URLS: &[Route] = &[
    Route {
        name: "article-index",
        pattern: "",
    },
    Route {
        name: "article-detail",
        pattern: "<int:pk>/",
    },
];

/// Returns the app namespace and routes of the URL configuration `name`.
pub fn urlconf(name: &str) -> Option<(&'static str, &'static [Route])> {
    match name {
        "testapp.articles_urls" => Some(("articles", ARTICLES_URLS)),
        _ => None,
    }
}

/// Every route reachable through an app mounted on an active page.
#[derive(Debug, Clone, Default)]
pub struct AppsRegistry {
    routes: HashMap<String, String>,
}

impl AppsRegistry {
    /// Collects the app mounts of the active pages in `pages`.
    ///
    /// When an app is mounted twice for one language the first page wins.
    pub fn from_pages(pages: &[Page]) -> Feincms3Result<Self> {
        let mut routes = HashMap::new();

        for page in active(pages) {
            let Some(key) = page.application.as_deref() else {
                continue;
            };
            let app = application(key).ok_or_else(|| {
                Feincms3Error::ImproperlyConfigured(format!(
                    "Page '{}' mounts unknown application '{key}'",
                    page.path
                ))
            })?;
            let (app_namespace, app_routes) = urlconf(app.urlconf).ok_or_else(|| {
                Feincms3Error::ImproperlyConfigured(format!(
                    "Application '{key}' uses unknown urlconf '{}'",
                    app.urlconf
                ))
            })?;

            let instance = format!("{key}-{}", page.language_code);
            for route in app_routes {
                let name = format!("{instance}:{app_namespace}:{}", route.name);
                if routes.contains_key(&name) {
                    tracing::warn!(app = key, page = %page.path, "Application already mounted, ignoring");
                    break;
                }
                routes.insert(name, join_path(&page.path, route.pattern));
            }
        }

        Ok(Self { routes })
    }

    /// Number of reversible routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn join_path(prefix: &str, pattern: &str) -> String {
    let mut path = String::with_capacity(prefix.len() + pattern.len() + 1);
    path.push_str(prefix);
    if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(pattern.trim_start_matches('/'));
    path
}

/// Reverses `viewname` inside the app instance identified by `namespaces`.
///
/// The first namespace is the app key and gets the language appended, so
/// `(["blog", "articles"], "article-detail")` in English looks up
/// `blog-en:articles:article-detail`.
///
/// # Errors
///
/// Returns [`Feincms3Error::NotFound`] if no active page mounts the app in
/// `language_code`, or if a placeholder has no value in `kwargs`.
///
/// # Examples
///
/// ```
/// use feincms3_testapp::apps::{reverse_app, AppsRegistry};
/// use feincms3_testapp::models::Page;
///
/// let pages = vec![Page::new(1, "Blog", "/en/blog/").application("blog")];
/// let apps = AppsRegistry::from_pages(&pages).unwrap();
///
/// let url = reverse_app(&apps, &["blog", "articles"], "article-detail", &[("pk", "42")], "en");
/// assert_eq!(url.unwrap(), "/en/blog/42/");
/// ```
pub fn reverse_app(
    apps: &AppsRegistry,
    namespaces: &[&str],
    viewname: &str,
    kwargs: &[(&str, &str)],
    language_code: &str,
) -> Feincms3Result<String> {
    let Some((app, rest)) = namespaces.split_first() else {
        return Err(Feincms3Error::NotFound(format!(
            "Reverse for '{viewname}' needs an app namespace"
        )));
    };

    let mut parts = vec![format!("{app}-{language_code}")];
    parts.extend(rest.iter().map(ToString::to_string));
    parts.push(viewname.to_string());
    let qualified = parts.join(":");

    let route = apps
        .routes
        .get(&qualified)
        .ok_or_else(|| Feincms3Error::NotFound(format!("Reverse for '{qualified}' not found")))?;
    substitute_pattern(route, kwargs)
}

/// Replaces `<type:name>` placeholders in `route` with values from `kwargs`.
fn substitute_pattern(route: &str, kwargs: &[(&str, &str)]) -> Feincms3Result<String> {
    let mut result = String::new();
    let mut remaining = route;

    while let Some(start) = remaining.find('<') {
        result.push_str(&remaining[..start]);

        let end = remaining[start..].find('>').ok_or_else(|| {
            Feincms3Error::ImproperlyConfigured(format!(
                "Unclosed angle bracket in route template: {route}"
            ))
        })? + start;

        let inner = &remaining[start + 1..end];
        let param = inner.find(':').map_or(inner, |pos| &inner[pos + 1..]);

        let value = kwargs
            .iter()
            .find(|(name, _)| *name == param)
            .map(|(_, value)| *value)
            .ok_or_else(|| {
                Feincms3Error::NotFound(format!(
                    "No value provided for parameter '{param}' in URL pattern"
                ))
            })?;
        result.push_str(value);

        remaining = &remaining[end + 1..];
    }
    result.push_str(remaining);

    Ok(result)
}
