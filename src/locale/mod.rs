//! Reader locale resolution.
//!
//! Builds the ordered list of locale tags used to pick translated UI strings.
//! Candidates come from (in priority order):
//!
//! 1. the logged-in user's stored language, then its primary subtag
//! 2. the `Accept-Language` entries in header order, then their primary subtags
//!
//! Quality weights (`q=`) are stripped but not used for ordering: the header's
//! left-to-right order is kept as-is.
//!
//! ```text
//! user = "en-US", header = "zh-CN,zh;q=0.9"
//!   → ["en-us", "en", "zh-cn", "zh"]
//! ```

use crate::{
    api::Backend,
    auth::AuthCookies,
    debug,
};

/// Tag used when no candidate survives normalization.
pub const DEFAULT_LOCALE: &str = "en";

/// Ordered, deduplicated, lowercase locale tags. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locales(Vec<String>);

impl Locales {
    /// Most preferred tag.
    pub fn primary(&self) -> &str {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for Locales {
    fn default() -> Self {
        Self(vec![DEFAULT_LOCALE.to_string()])
    }
}

/// Resolve locale preferences from the stored user language and the raw
/// `Accept-Language` header value.
pub fn resolve_locales(user_language: Option<&str>, accept_language: Option<&str>) -> Locales {
    let mut candidates: Vec<&str> = Vec::new();

    if let Some(lang) = user_language {
        candidates.push(lang);
        candidates.push(primary_subtag(lang));
    }

    if let Some(header) = accept_language {
        let tags = parse_accept_language(header);
        candidates.extend(tags.iter().copied());
        candidates.extend(tags.iter().map(|tag| primary_subtag(tag)));
    }

    let mut out: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let tag = candidate.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }

    if out.is_empty() {
        Locales::default()
    } else {
        Locales(out)
    }
}

/// Split an `Accept-Language` value into tags, in header order.
///
/// Parameters after `;` are dropped and `*` is skipped.
pub fn parse_accept_language(header: &str) -> Vec<&str> {
    header
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .collect()
}

/// Text before the first `-` (or the whole tag).
pub fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}

/// Resolve locales for an incoming request.
///
/// The stored user language is looked up through the backend; a failed lookup
/// (not logged in, network error, bad payload) counts as "no preference".
pub fn resolve_request_locales(
    backend: &dyn Backend,
    auth: &AuthCookies,
    accept_language: Option<&str>,
) -> Locales {
    let user_language = if auth.has_token() {
        match backend.login_user(auth) {
            Ok(user) => user.language,
            Err(e) => {
                debug!("locale"; "user language unavailable: {}", e);
                None
            }
        }
    } else {
        None
    };

    resolve_locales(user_language.as_deref(), accept_language)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, fake::FakeBackend};

    fn tags(locales: &Locales) -> Vec<&str> {
        locales.iter().collect()
    }

    #[test]
    fn test_user_language_then_header() {
        let locales = resolve_locales(Some("en-US"), Some("zh-CN,zh;q=0.9"));
        assert_eq!(tags(&locales), ["en-us", "en", "zh-cn", "zh"]);
    }

    #[test]
    fn test_nothing_defaults_to_en() {
        let locales = resolve_locales(None, None);
        assert_eq!(tags(&locales), ["en"]);
        assert_eq!(locales.primary(), "en");
    }

    #[test]
    fn test_blank_inputs_default_to_en() {
        let locales = resolve_locales(Some("   "), Some(" , ;q=0.5, *"));
        assert_eq!(tags(&locales), ["en"]);
    }

    #[test]
    fn test_header_order_ignores_quality() {
        let locales = resolve_locales(None, Some("fr;q=0.1, de-AT;q=0.9, ja"));
        assert_eq!(tags(&locales), ["fr", "de-at", "ja", "de"]);
    }

    #[test]
    fn test_subtags_appended_after_all_tags() {
        let locales = resolve_locales(None, Some("pt-BR,es-MX"));
        assert_eq!(tags(&locales), ["pt-br", "es-mx", "pt", "es"]);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let locales = resolve_locales(Some("EN"), Some("en-GB, en, EN-gb"));
        assert_eq!(tags(&locales), ["en", "en-gb"]);
    }

    #[test]
    fn test_output_is_trimmed_lowercase_unique() {
        let locales = resolve_locales(Some(" Zh-Hant-TW "), Some("ZH-hant-tw,  zh ; q=1"));
        let all = tags(&locales);
        assert_eq!(all, ["zh-hant-tw", "zh"]);
        for tag in &all {
            assert_eq!(*tag, tag.trim().to_lowercase());
        }
    }

    #[test]
    fn test_parse_accept_language() {
        assert_eq!(
            parse_accept_language("en-US,en;q=0.9, *;q=0.1"),
            ["en-US", "en"]
        );
        assert!(parse_accept_language("").is_empty());
    }

    #[test]
    fn test_primary_subtag() {
        assert_eq!(primary_subtag("en-US"), "en");
        assert_eq!(primary_subtag("zh"), "zh");
        assert_eq!(primary_subtag(""), "");
    }

    #[test]
    fn test_request_locales_use_user_language() {
        let backend = FakeBackend::default().with_user_language("ja-JP");
        let auth = AuthCookies::with_token("t");
        let locales = resolve_request_locales(&backend, &auth, Some("en"));
        assert_eq!(tags(&locales), ["ja-jp", "ja", "en"]);
    }

    #[test]
    fn test_request_locales_swallow_backend_errors() {
        let backend = FakeBackend::default().failing_user(ApiError::Unauthorized);
        let auth = AuthCookies::with_token("expired");
        let locales = resolve_request_locales(&backend, &auth, Some("ko-KR"));
        assert_eq!(tags(&locales), ["ko-kr", "ko"]);
    }

    #[test]
    fn test_request_locales_skip_lookup_without_token() {
        let backend = FakeBackend::default().with_user_language("ja-JP");
        let locales = resolve_request_locales(&backend, &AuthCookies::default(), None);
        assert_eq!(tags(&locales), ["en"]);
        assert_eq!(backend.calls("login_user"), 0);
    }
}
