//! Configuration sections.
//!
//! | Section      | Purpose                                      |
//! |--------------|----------------------------------------------|
//! | `[backend]`  | REST API base URL and timeout                |
//! | `[serve]`    | HTTP server (interface, port, threads)       |
//! | `[site]`     | Site info refresh and fallback overrides     |
//! | `[chrome]`   | Initial nav bar appearance                   |
//! | `[feed]`     | RSS feed                                     |
//! | `[sitemap]`  | Sitemap                                      |

mod backend;
mod chrome;
mod feed;
mod serve;
mod site;

pub use backend::BackendConfig;
pub use chrome::ChromeConfig;
pub use feed::{FeedConfig, SitemapConfig};
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
