//! `sitemap` and `rss` commands: render from live backend data, write to a
//! file or stdout.

use super::OutputArgs;
use crate::{
    api::{Backend, BackendClient, fetch_or},
    config::FrontendConfig,
    feed::{FeedSource, rss::render_rss, sitemap::render_sitemap},
    log,
    site::{SiteInfo, merge_with_fallback},
};
use anyhow::{Context, Result};
use std::fs;

pub fn run_sitemap(config: &FrontendConfig, args: &OutputArgs) -> Result<()> {
    let backend = BackendClient::new(&config.backend)?;
    let (site, source) = collect(&backend, config);
    let xml = render_sitemap(&site, &source, &config.sitemap);
    write_output(&xml, args, "sitemap")
}

pub fn run_rss(config: &FrontendConfig, args: &OutputArgs) -> Result<()> {
    let backend = BackendClient::new(&config.backend)?;
    let (site, source) = collect(&backend, config);
    let xml = render_rss(&site, &source, &config.feed)?;
    write_output(&xml, args, "rss")
}

/// Merged site info plus every post, category and label.
fn collect(backend: &dyn Backend, config: &FrontendConfig) -> (SiteInfo, FeedSource) {
    let partial = fetch_or(backend.site_info(), Default::default(), "site info");
    let site = merge_with_fallback(partial, &config.site.fallback_record());
    (site, FeedSource::fetch(backend))
}

fn write_output(content: &str, args: &OutputArgs, module: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log!(module; "wrote {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}
