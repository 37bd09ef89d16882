//! Request path → route.

use crate::{config::FrontendConfig, utils::url::decode_segment as decode};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/` and `/page/<n>`.
    Home { page: u32 },
    Post(Cow<'a, str>),
    Category { slug: Cow<'a, str>, page: u32 },
    Label { slug: Cow<'a, str>, page: u32 },
    /// `/users/<username>`
    User(Cow<'a, str>),
    /// `POST /api/posts/<id>/like`
    Like(u64),
    /// `GET /api/site-info`
    SiteInfo,
    Sitemap,
    Rss,
    Robots,
    /// Known path, wrong method.
    MethodNotAllowed,
    NotFound,
}

impl<'a> Route<'a> {
    /// Resolve `url` (path plus optional query) for `method`.
    pub fn parse(method: &str, url: &'a str, config: &FrontendConfig) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let page = page_param(query);
        let is_get = matches!(method, "GET" | "HEAD");

        let route = match segments.as_slice() {
            [] => Self::Home { page: 1 },
            ["page", n] => match n.parse() {
                Ok(n) if n >= 1 => Self::Home { page: n },
                _ => Self::NotFound,
            },
            ["posts", slug] => Self::Post(decode(*slug)),
            ["categories", slug] => Self::Category {
                slug: decode(*slug),
                page,
            },
            ["labels", slug] => Self::Label {
                slug: decode(*slug),
                page,
            },
            ["users", username] => Self::User(decode(*username)),
            ["api", "posts", id, "like"] => {
                return match id.parse() {
                    Ok(id) if method == "POST" => Self::Like(id),
                    Ok(_) => Self::MethodNotAllowed,
                    Err(_) => Self::NotFound,
                };
            }
            ["api", "site-info"] => Self::SiteInfo,
            ["robots.txt"] => Self::Robots,
            _ if config.sitemap.enable && path == config.sitemap.route() => Self::Sitemap,
            _ if config.feed.enable && path == config.feed.route() => Self::Rss,
            _ => Self::NotFound,
        };

        match route {
            Self::NotFound => Self::NotFound,
            _ if !is_get => Self::MethodNotAllowed,
            route => route,
        }
    }
}

/// `page=<n>` from the query string, defaulting to 1.
fn page_param(query: &str) -> u32 {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(1)
}
