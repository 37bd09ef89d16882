//! `[serve]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 5280                 # HTTP port number
//! threads = 4                 # Request handler threads
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the server accessible from LAN.

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Number of request handler threads.
    pub threads: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 5280,
            threads: 4,
        }
    }
}

impl ServeConfig {
    pub const THREADS: FieldPath = FieldPath::new("serve.threads");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.threads == 0 {
            diag.error(Self::THREADS, "at least one handler thread is required");
        }
    }
}
