//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads from request handler threads.

use crate::config::FrontendConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<FrontendConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(FrontendConfig::default()));

#[inline]
pub fn cfg() -> Arc<FrontendConfig> {
    CONFIG.load_full()
}

#[inline]
pub fn init_config(config: FrontendConfig) -> Arc<FrontendConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
