//! `[backend]` section configuration.
//!
//! Where the REST API lives and how long to wait for it.
//!
//! # Example
//!
//! ```toml
//! [backend]
//! url = "http://127.0.0.1:8080"   # Base URL; `/api/v1` is appended per call
//! timeout = 10                    # Request timeout in seconds
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the backend, without the `/api/v1` prefix.
    pub url: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".into(),
            timeout: 10,
        }
    }
}

impl BackendConfig {
    pub const URL: FieldPath = FieldPath::new("backend.url");
    pub const TIMEOUT: FieldPath = FieldPath::new("backend.timeout");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        match url::Url::parse(&self.url) {
            Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
                diag.error_with_hint(
                    Self::URL,
                    format!("scheme '{}' not supported, must be http or https", parsed.scheme()),
                    "use format like http://127.0.0.1:8080",
                );
            }
            Ok(_) => {}
            Err(e) => {
                diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {e}"),
                    "use format like http://127.0.0.1:8080",
                );
            }
        }

        if self.timeout == 0 {
            diag.error(Self::TIMEOUT, "timeout must be at least 1 second");
        }
    }
}
