//! `locales` and `site-info` commands.

use crate::{
    api::{Backend, BackendClient, fetch_or},
    auth::AuthCookies,
    config::FrontendConfig,
    locale::{Locales, resolve_locales, resolve_request_locales},
    site::{SiteInfo, merge_with_fallback},
};
use anyhow::Result;

/// Print the resolved locale list as JSON.
///
/// With a token and no explicit user language, the stored language is looked
/// up through the backend the way a request would.
pub fn run_locales(
    config: &FrontendConfig,
    user_language: Option<&str>,
    accept_language: Option<&str>,
    token: Option<&str>,
) -> Result<()> {
    let locales = match token {
        Some(token) if user_language.is_none() => {
            let backend = BackendClient::new(&config.backend)?;
            let cookies = AuthCookies {
                token: Some(token.to_string()),
                refresh_token: None,
            };
            resolve_request_locales(&backend, &cookies, accept_language)
        }
        _ => resolve_locales(user_language, accept_language),
    };
    println!("{}", locales_json(&locales)?);
    Ok(())
}

/// Print site info merged over the configured fallback.
pub fn run_site_info(config: &FrontendConfig, pretty: bool, offline: bool) -> Result<()> {
    let fallback = config.site.fallback_record();
    let site = if offline {
        fallback
    } else {
        let backend = BackendClient::new(&config.backend)?;
        let partial = fetch_or(backend.site_info(), Default::default(), "site info");
        merge_with_fallback(partial, &fallback)
    };
    println!("{}", site_json(&site, pretty)?);
    Ok(())
}

fn locales_json(locales: &Locales) -> Result<String> {
    Ok(serde_json::to_string(locales.as_slice())?)
}

fn site_json(site: &SiteInfo, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(site)?
    } else {
        serde_json::to_string(site)?
    };
    Ok(json)
}
