//! Rendering pages.

use feincms3_rs_core::safestring::escape;
use feincms3_rs_core::{mark_safe, SafeString};
use feincms3_rs_plugins::PluginRenderer;

use crate::models::{Page, PagePlugin};

/// Renders every region of `page`, each wrapped in a `<div>` named after it.
///
/// Inherited regions that are empty on `page` show the contents of the
/// closest ancestor that has some.
pub async fn render_page(
    renderer: &PluginRenderer,
    page: &Page,
    pages: &[Page],
    plugins: &[PagePlugin],
) -> SafeString {
    let contents = page.contents(pages, plugins);
    tracing::debug!(page = page.id, template = %page.template().key, "Rendering page");

    let mut out = SafeString::empty();
    for region in contents.regions() {
        let html = renderer.render_region(&contents, &region.key).await;
        out.push_safe(&mark_safe(format!(
            "<div class=\"region region-{}\">",
            escape(&region.key)
        )));
        out.push_safe(&html);
        out.push_safe(&mark_safe("</div>"));
    }
    out
}
