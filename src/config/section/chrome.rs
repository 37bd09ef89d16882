//! `[chrome]` section configuration.
//!
//! Initial nav bar appearance applied at the start of every request.
//!
//! # Example
//!
//! ```toml
//! [chrome]
//! baseline = "site-nav"   # Class always present on the nav bar
//! initial = ""            # Override applied at start and on reset
//! padding = true          # Reserve space below the nav for content
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub baseline: String,
    pub initial: String,
    pub padding: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            baseline: "site-nav".into(),
            initial: String::new(),
            padding: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_chrome_config() {
        let config = test_parse_config("[chrome]\ninitial = \"nav-shadow\"\npadding = false");
        assert_eq!(config.chrome.baseline, "site-nav");
        assert_eq!(config.chrome.initial, "nav-shadow");
        assert!(!config.chrome.padding);
    }
}
