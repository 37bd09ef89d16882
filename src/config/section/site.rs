//! `[site]` section configuration.
//!
//! `[site.fallback]` is a partial site info record merged over the builtin
//! fallback, so every gap in backend data is filled with operator-chosen
//! values. Keys use the backend's camelCase names.
//!
//! # Example
//!
//! ```toml
//! [site]
//! refresh_interval = 300     # Seconds between site info refreshes (0 = never)
//!
//! [site.fallback]
//! postsPerPage = 12
//!
//! [site.fallback.metadata]
//! name = "Notes"
//! url = "https://blog.example.com"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::site::{PartialSiteInfo, SiteInfo, merge_with_fallback};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Seconds between background site info refreshes. `0` disables them.
    pub refresh_interval: u64,

    /// Overrides for the builtin fallback record.
    pub fallback: PartialSiteInfo,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            refresh_interval: 300,
            fallback: PartialSiteInfo::default(),
        }
    }
}

impl SiteSectionConfig {
    pub const FALLBACK_URL: FieldPath = FieldPath::new("site.fallback.metadata.url");

    /// Complete fallback: config overrides over the builtin record.
    pub fn fallback_record(&self) -> SiteInfo {
        merge_with_fallback(self.fallback.clone(), &SiteInfo::fallback())
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let url = self
            .fallback
            .metadata
            .as_ref()
            .and_then(|m| m.url.as_deref());
        if let Some(url) = url {
            match url::Url::parse(url) {
                Ok(parsed) if parsed.host_str().is_some() => {}
                _ => diag.error_with_hint(
                    Self::FALLBACK_URL,
                    format!("invalid site URL: {url}"),
                    "use format like https://example.com",
                ),
            }
        }
    }
}
