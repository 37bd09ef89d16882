//! `[feed]` and `[sitemap]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [feed]
//! enable = true
//! path = "rss.xml"    # Served at /rss.xml
//! limit = 20          # Newest posts included
//! minify = false
//!
//! [sitemap]
//! enable = true
//! path = "sitemap.xml"
//! minify = false
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enable: bool,
    pub path: String,
    pub limit: usize,
    pub minify: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "rss.xml".into(),
            limit: 20,
            minify: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    pub path: String,
    pub minify: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
            minify: false,
        }
    }
}

impl FeedConfig {
    pub const PATH: FieldPath = FieldPath::new("feed.path");

    /// Request path the feed is served at.
    pub fn route(&self) -> String {
        route_for(&self.path)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_path(&self.path, Self::PATH, diag);
    }
}

impl SitemapConfig {
    pub const PATH: FieldPath = FieldPath::new("sitemap.path");

    pub fn route(&self) -> String {
        route_for(&self.path)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_path(&self.path, Self::PATH, diag);
    }
}

fn route_for(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

fn validate_path(path: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
    if path.trim_matches('/').is_empty() {
        diag.error(field, "path must not be empty");
    } else if !path.ends_with(".xml") {
        diag.error_with_hint(field, "path must end with .xml", "e.g. \"rss.xml\"");
    }
}
