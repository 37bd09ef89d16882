//! Syndication documents built from backend data.
//!
//! - **Sitemap**: search engine indexing (`sitemap.xml`)
//! - **RSS 2.0**: feed readers (`rss.xml`)
//! - **robots.txt**: crawler rules pointing at the sitemap
//!
//! All three render from a [`FeedSource`] snapshot plus the merged site info,
//! so the server and the offline CLI commands share one code path.

pub mod robots;
pub mod rss;
pub mod sitemap;

use crate::api::{Backend, Category, Label, PostSummary, fetch_or};
use std::borrow::Cow;

/// Backend data the documents are rendered from.
#[derive(Debug, Clone, Default)]
pub struct FeedSource {
    pub posts: Vec<PostSummary>,
    pub categories: Vec<Category>,
    pub labels: Vec<Label>,
}

impl FeedSource {
    /// Fetch everything, substituting empty lists for failed calls.
    pub fn fetch(backend: &dyn Backend) -> Self {
        Self {
            posts: fetch_or(backend.all_posts(), Vec::new(), "posts"),
            categories: fetch_or(backend.categories(), Vec::new(), "categories"),
            labels: fetch_or(backend.labels(), Vec::new(), "labels"),
        }
    }
}

/// Minify XML content if enabled.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    if enabled {
        let minified = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("");
        Cow::Owned(minified)
    } else {
        Cow::Borrowed(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeBackend;

    #[test]
    fn test_minify_xml_basic() {
        let xml = r#"<?xml version="1.0"?>
<root>
  <item>Hello</item>
</root>"#;
        assert_eq!(
            minify_xml(xml, true),
            r#"<?xml version="1.0"?><root><item>Hello</item></root>"#
        );
    }

    #[test]
    fn test_minify_xml_keeps_inner_spacing() {
        assert_eq!(minify_xml("  <tag>  content  </tag>  ", true), "<tag>  content  </tag>");
    }

    #[test]
    fn test_minify_xml_disabled() {
        let xml = "<a>\n  <b/>\n</a>";
        assert!(matches!(minify_xml(xml, false), Cow::Borrowed(_)));
    }

    #[test]
    fn test_fetch_collects_everything() {
        let backend = FakeBackend::default()
            .with_posts(vec![PostSummary {
                id: 1,
                slug: "hello".into(),
                ..PostSummary::default()
            }])
            .with_labels(vec![Label {
                slug: "rust".into(),
                ..Label::default()
            }]);
        let source = FeedSource::fetch(&backend);
        assert_eq!(source.posts.len(), 1);
        assert_eq!(source.labels.len(), 1);
        assert!(source.categories.is_empty());
    }
}
