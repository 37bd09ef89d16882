//! `robots.txt` generation.

use crate::{config::SitemapConfig, site::SiteInfo};

/// Allow everything except the JSON API and point crawlers at the sitemap.
pub fn render_robots(site: &SiteInfo, sitemap: &SitemapConfig) -> String {
    let mut out = String::from("User-agent: *\nAllow: /\nDisallow: /api/\n");
    if sitemap.enable {
        out.push_str(&format!("\nSitemap: {}{}\n", site.base_url(), sitemap.route()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robots_points_at_sitemap() {
        let mut site = SiteInfo::fallback();
        site.metadata.url = "https://example.com/".into();
        let robots = render_robots(&site, &SitemapConfig::default());
        assert!(robots.starts_with("User-agent: *\n"));
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.ends_with("Sitemap: https://example.com/sitemap.xml\n"));
    }

    #[test]
    fn test_robots_without_sitemap() {
        let config = SitemapConfig {
            enable: false,
            ..SitemapConfig::default()
        };
        assert!(!render_robots(&SiteInfo::fallback(), &config).contains("Sitemap:"));
    }
}
