//! Sitemap generation.
//!
//! Lists the home page, every post, category and label for search engine
//! indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/posts/hello</loc>
//!     <lastmod>2025-01-01T00:00:00Z</lastmod>
//!   </url>
//! </urlset>
//! ```

use super::{FeedSource, minify_xml};
use crate::{
    config::SitemapConfig,
    site::SiteInfo,
    utils::{date::DateTimeUtc, url::encode_segment},
};
use std::borrow::Cow;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Render the sitemap document.
pub fn render_sitemap(site: &SiteInfo, source: &FeedSource, config: &SitemapConfig) -> String {
    let xml = Sitemap::build(site, source).into_xml();
    minify_xml(&xml, config.minify).into_owned()
}

struct Sitemap {
    urls: Vec<UrlEntry>,
}

struct UrlEntry {
    loc: String,
    lastmod: Option<String>,
}

impl UrlEntry {
    fn new(base_url: &str, path: &str, lastmod: Option<&str>) -> Self {
        Self {
            loc: format!("{base_url}{path}"),
            lastmod: lastmod
                .and_then(DateTimeUtc::parse)
                .map(DateTimeUtc::to_rfc3339),
        }
    }
}

impl Sitemap {
    fn build(site: &SiteInfo, source: &FeedSource) -> Self {
        let base_url = site.base_url();

        // Home changes whenever any post does
        let newest = source
            .posts
            .iter()
            .filter_map(|p| p.last_modified().and_then(DateTimeUtc::parse))
            .max_by_key(|dt| dt.to_unix());

        let mut urls = Vec::with_capacity(
            1 + source.posts.len() + source.categories.len() + source.labels.len(),
        );
        urls.push(UrlEntry {
            loc: format!("{base_url}/"),
            lastmod: newest.map(DateTimeUtc::to_rfc3339),
        });
        urls.extend(source.posts.iter().map(|post| {
            UrlEntry::new(
                base_url,
                &format!("/posts/{}", encode_segment(&post.slug)),
                post.last_modified(),
            )
        }));
        urls.extend(source.categories.iter().map(|category| {
            UrlEntry::new(
                base_url,
                &format!("/categories/{}", encode_segment(&category.slug)),
                category.updated_at.as_deref(),
            )
        }));
        urls.extend(source.labels.iter().map(|label| {
            UrlEntry::new(
                base_url,
                &format!("/labels/{}", encode_segment(&label.slug)),
                label.updated_at.as_deref(),
            )
        }));

        Self { urls }
    }

    fn into_xml(self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(&lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Category, Label, PostSummary};

    fn site() -> SiteInfo {
        let mut site = SiteInfo::fallback();
        site.metadata.url = "https://example.com/".into();
        site
    }

    fn post(slug: &str, created: Option<&str>, updated: Option<&str>) -> PostSummary {
        PostSummary {
            slug: slug.into(),
            created_at: created.map(Into::into),
            updated_at: updated.map(Into::into),
            ..PostSummary::default()
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("hello"), "hello");
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("it's"), "it&apos;s");
    }

    #[test]
    fn test_sitemap_empty_source_has_home() {
        let xml = render_sitemap(&site(), &FeedSource::default(), &SitemapConfig::default());
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#)));
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_sitemap_lists_every_kind() {
        let source = FeedSource {
            posts: vec![
                post("hello", Some("2024-06-15T14:30:45Z"), None),
                post("world", Some("2024-01-01"), Some("2024-07-01T08:00:00+08:00")),
            ],
            categories: vec![Category {
                slug: "notes".into(),
                updated_at: Some("2024-02-02".into()),
                ..Category::default()
            }],
            labels: vec![Label {
                slug: "rust".into(),
                ..Label::default()
            }],
        };
        let xml = render_sitemap(&site(), &source, &SitemapConfig::default());

        assert_eq!(xml.matches("<url>").count(), 5);
        assert!(xml.contains("<loc>https://example.com/posts/hello</loc>"));
        assert!(xml.contains("<lastmod>2024-06-15T14:30:45Z</lastmod>"));
        // updatedAt wins over createdAt, normalized to UTC
        assert!(xml.contains("<lastmod>2024-07-01T00:00:00Z</lastmod>"));
        assert!(xml.contains("<loc>https://example.com/categories/notes</loc>"));
        assert!(xml.contains("<lastmod>2024-02-02T00:00:00Z</lastmod>"));
        assert!(xml.contains("<loc>https://example.com/labels/rust</loc>"));
    }

    #[test]
    fn test_home_lastmod_is_newest_post() {
        let source = FeedSource {
            posts: vec![
                post("a", Some("2024-01-01"), None),
                post("b", Some("2024-03-01"), None),
            ],
            ..FeedSource::default()
        };
        let sitemap = Sitemap::build(&site(), &source);
        assert_eq!(sitemap.urls[0].lastmod.as_deref(), Some("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn test_sitemap_encodes_slugs() {
        let source = FeedSource {
            posts: vec![post("a&b", None, None), post("hello world café", None, None)],
            labels: vec![Label {
                slug: "c#".into(),
                ..Label::default()
            }],
            ..FeedSource::default()
        };
        let xml = render_sitemap(&site(), &source, &SitemapConfig::default());
        assert!(xml.contains("<loc>https://example.com/posts/a%26b</loc>"));
        assert!(xml.contains("<loc>https://example.com/posts/hello%20world%20caf%C3%A9</loc>"));
        assert!(xml.contains("<loc>https://example.com/labels/c%23</loc>"));
    }

    #[test]
    fn test_sitemap_minify() {
        let config = SitemapConfig {
            minify: true,
            ..SitemapConfig::default()
        };
        let xml = render_sitemap(&site(), &FeedSource::default(), &config);
        assert!(!xml.contains('\n'));
        assert!(xml.contains("<url><loc>https://example.com/</loc></url>"));
    }
}
