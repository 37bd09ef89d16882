//! blogfront - server-side frontend for a personal blog.

#![allow(dead_code)]

mod api;
mod auth;
mod chrome;
mod cli;
mod config;
mod core;
mod feed;
mod interact;
mod locale;
mod logger;
mod site;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{FrontendConfig, init_config};

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = init_config(FrontendConfig::load(cli)?);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(),
        Commands::Sitemap { output } => cli::feed::run_sitemap(&config, output),
        Commands::Rss { output } => cli::feed::run_rss(&config, output),
        Commands::Locales {
            user_language,
            accept_language,
            token,
        } => cli::inspect::run_locales(
            &config,
            user_language.as_deref(),
            accept_language.as_deref(),
            token.as_deref(),
        ),
        Commands::SiteInfo { pretty, offline } => {
            cli::inspect::run_site_info(&config, *pretty, *offline)
        }
    }
}
