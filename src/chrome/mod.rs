//! Per-request page chrome: nav bar appearance, content padding and the
//! background overlay.
//!
//! A [`Chrome`] is built from config at the start of every request. Pages
//! change it only through leases (`acquire` / `release`), so nothing a page
//! sets survives past its own render.

mod background;
mod nav;

pub use background::{Background, BackgroundLease, Overlay};
pub use nav::{NavChrome, NavLease, NavStyle, SOLID_NAV, TRANSPARENT_NAV};

use crate::config::ChromeConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub nav: NavChrome,
    pub background: Background,
}

impl Chrome {
    pub fn new(config: &ChromeConfig) -> Self {
        Self {
            nav: NavChrome::new(&config.baseline, &config.initial, config.padding),
            background: Background::default(),
        }
    }
}

impl Default for Chrome {
    fn default() -> Self {
        Self::new(&ChromeConfig::default())
    }
}
