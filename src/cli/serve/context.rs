//! Shared server state and the per-request composition root.

use crate::{
    api::Backend,
    auth::{AuthCookies, AuthState},
    chrome::Chrome,
    config::FrontendConfig,
    interact::Toasts,
    locale::{Locales, resolve_locales},
    site::{SiteInfo, SiteInfoStore},
};
use std::sync::Arc;

/// State shared by every handler thread.
pub struct App {
    pub config: Arc<FrontendConfig>,
    pub backend: Arc<dyn Backend>,
    pub store: Arc<SiteInfoStore>,
}

impl App {
    /// Store seeded with the configured fallback.
    pub fn new(config: Arc<FrontendConfig>, backend: Arc<dyn Backend>) -> Self {
        let store = Arc::new(SiteInfoStore::new(config.site.fallback_record()));
        Self {
            config,
            backend,
            store,
        }
    }
}

/// Request data handlers need, detached from `tiny_http`.
#[derive(Debug, Clone, Default)]
pub struct Incoming {
    pub method: String,
    pub url: String,
    pub cookie: Option<String>,
    pub accept_language: Option<String>,
    pub body: String,
}

impl Incoming {
    #[cfg(test)]
    pub fn get(url: &str) -> Self {
        Self {
            method: "GET".into(),
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Everything a page render reads or writes, built fresh per request.
pub struct RequestContext {
    pub site: Arc<SiteInfo>,
    pub locales: Locales,
    pub auth: AuthState,
    pub chrome: Chrome,
    pub toasts: Toasts,
}

impl RequestContext {
    pub fn build(app: &App, incoming: &Incoming) -> Self {
        let cookies = AuthCookies::from_cookie_header(incoming.cookie.as_deref());
        let auth = AuthState::load(app.backend.as_ref(), cookies);

        // The user record is already loaded; no second lookup for its language
        let user_language = auth.user.as_ref().and_then(|u| u.language.as_deref());
        let locales = resolve_locales(user_language, incoming.accept_language.as_deref());

        Self {
            site: app.store.current(),
            locales,
            auth,
            chrome: Chrome::new(&app.config.chrome),
            toasts: Toasts::default(),
        }
    }
}
