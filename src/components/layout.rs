//! Base layout for exported pages.
//!
//! Every exported page shares the same HTML skeleton. The stylesheet is
//! embedded inline: the export is a self-contained static tree with no asset
//! pipeline, so pages must render correctly when served from any directory
//! or opened straight from disk.

use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"body { font-family: sans-serif; margin: 0 auto; max-width: 60rem; padding: 0 1rem; color: #222; }
header.site { border-bottom: 2px solid #369; margin-bottom: 1rem; padding: 0.5rem 0; }
header.site a { color: #369; text-decoration: none; font-weight: bold; }
h1 { font-size: 1.4rem; }
table.listing { border-collapse: collapse; width: 100%; }
table.listing th, table.listing td { border-bottom: 1px solid #ccc; padding: 0.4rem; text-align: left; vertical-align: top; }
table.listing th { background: #eef3f8; }
td.num { text-align: right; white-space: nowrap; }
article.post { border: 1px solid #ccc; margin-bottom: 1rem; }
article.post header { background: #eef3f8; padding: 0.4rem; }
article.post .body { padding: 0.6rem; }
p.empty { color: #666; font-style: italic; }
footer.site { border-top: 1px solid #ccc; color: #666; font-size: 0.8rem; margin-top: 2rem; padding: 0.5rem 0; }"#;

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::BaseLayout;
///
/// let content = html! { h1 { "Hello" } };
/// let page = BaseLayout::new("My Forum")
///     .with_home_href("../index.html")
///     .render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    home_href: &'a str,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title.
    #[must_use]
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            home_href: "index.html",
        }
    }

    /// Set the relative link back to the site index. Pages one directory
    /// deep pass `"../index.html"`.
    #[must_use]
    pub fn with_home_href(mut self, home_href: &'a str) -> Self {
        self.home_href = home_href;
        self
    }

    /// Render the complete HTML page with the given content.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (PreEscaped(self.title)) }
                    style { (PreEscaped(STYLE)) }
                }
                body {
                    header class="site" {
                        a href=(self.home_href) { "Forum index" }
                    }
                    main {
                        (content)
                    }
                    (Self::render_footer())
                }
            }
        }
    }

    fn render_footer() -> Markup {
        html! {
            footer class="site" {
                small { "Static archive exported from phpBB." }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_layout_basic_structure() {
        let content = html! { h1 { "Test Content" } };
        let page = BaseLayout::new("Test Page").render(content);
        let html = page.into_string();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains(r#"<meta charset="UTF-8">"#));
        assert!(html.contains("<title>Test Page</title>"));
        assert!(html.contains("<h1>Test Content</h1>"));
        assert!(html.contains("<main>"));
        assert!(html.contains("Static archive exported from phpBB."));
    }

    #[test]
    fn test_base_layout_default_home_link() {
        let page = BaseLayout::new("T").render(html! {});
        assert!(page
            .into_string()
            .contains(r#"<a href="index.html">Forum index</a>"#));
    }

    #[test]
    fn test_base_layout_custom_home_link() {
        let page = BaseLayout::new("T")
            .with_home_href("../index.html")
            .render(html! {});
        assert!(page
            .into_string()
            .contains(r#"<a href="../index.html">Forum index</a>"#));
    }

    #[test]
    fn test_base_layout_inlines_stylesheet() {
        let page = BaseLayout::new("T").render(html! {});
        let html = page.into_string();
        // No external assets; the style block rides along in every page.
        assert!(html.contains("<style>"));
        assert!(html.contains("table.listing"));
        assert!(!html.contains("link rel=\"stylesheet\""));
    }

    #[test]
    fn test_base_layout_title_is_not_reescaped() {
        // phpBB stores titles HTML-encoded already.
        let page = BaseLayout::new("Tips &amp; Tricks").render(html! {});
        let html = page.into_string();
        assert!(html.contains("<title>Tips &amp; Tricks</title>"));
        assert!(!html.contains("&amp;amp;"));
    }
}
