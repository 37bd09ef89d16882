//! Request authentication context.
//!
//! The browser holds `token` and `refresh_token` cookies. The frontend never
//! interprets them; it forwards them to the backend on every outbound call as
//!
//! ```text
//! Authorization: Bearer <token>
//! X-Refresh-Token: <refresh_token>
//! ```

use crate::api::{Backend, User};
use crate::debug;
use percent_encoding::percent_decode_str;

pub const TOKEN_COOKIE: &str = "token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";
pub const REFRESH_TOKEN_HEADER: &str = "X-Refresh-Token";

/// Credentials read from the request cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthCookies {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
}

impl AuthCookies {
    /// Parse a raw `Cookie` header value.
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        let mut cookies = Self::default();
        let Some(header) = header else {
            return cookies;
        };

        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            if value.is_empty() {
                continue;
            }
            let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
            match name.trim() {
                TOKEN_COOKIE => cookies.token = Some(value),
                REFRESH_TOKEN_COOKIE => cookies.refresh_token = Some(value),
                _ => {}
            }
        }

        cookies
    }

    #[cfg(test)]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            refresh_token: None,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Outbound header pairs for the backend.
    pub fn forward_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(2);
        if let Some(token) = &self.token {
            headers.push(("Authorization", format!("Bearer {token}")));
        }
        if let Some(refresh) = &self.refresh_token {
            headers.push((REFRESH_TOKEN_HEADER, refresh.clone()));
        }
        headers
    }
}

/// Who is making the current request.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub cookies: AuthCookies,
    pub user: Option<User>,
}

impl AuthState {
    /// Look up the logged-in user. Any failure leaves the request anonymous.
    pub fn load(backend: &dyn Backend, cookies: AuthCookies) -> Self {
        let user = if cookies.has_token() {
            backend
                .login_user(&cookies)
                .inspect_err(|e| debug!("auth"; "anonymous request: {}", e))
                .ok()
        } else {
            None
        };
        Self { cookies, user }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, fake::FakeBackend};

    #[test]
    fn test_parse_cookie_header() {
        let cookies = AuthCookies::from_cookie_header(Some(
            "theme=dark; token=abc.def; refresh_token=r%2Bx%3D",
        ));
        assert_eq!(cookies.token.as_deref(), Some("abc.def"));
        assert_eq!(cookies.refresh_token.as_deref(), Some("r+x="));
    }

    #[test]
    fn test_parse_cookie_header_missing() {
        assert_eq!(AuthCookies::from_cookie_header(None), AuthCookies::default());
        let cookies = AuthCookies::from_cookie_header(Some("token=; other"));
        assert!(!cookies.has_token());
    }

    #[test]
    fn test_forward_headers() {
        let cookies = AuthCookies {
            token: Some("t1".into()),
            refresh_token: Some("r1".into()),
        };
        assert_eq!(
            cookies.forward_headers(),
            vec![
                ("Authorization", "Bearer t1".to_string()),
                (REFRESH_TOKEN_HEADER, "r1".to_string())
            ]
        );
        assert!(AuthCookies::default().forward_headers().is_empty());
    }

    #[test]
    fn test_auth_state_load() {
        let backend = FakeBackend::default().with_user_language("en");
        let state = AuthState::load(&backend, AuthCookies::with_token("t"));
        assert!(state.is_logged_in());
        assert!(!state.is_admin());
    }

    #[test]
    fn test_auth_state_failure_is_anonymous() {
        let backend = FakeBackend::default().failing_user(ApiError::Unauthorized);
        let state = AuthState::load(&backend, AuthCookies::with_token("t"));
        assert!(!state.is_logged_in());
    }
}
