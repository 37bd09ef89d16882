//! Backend REST API access.
//!
//! The backend is an opaque collaborator under `/api/v1/...`. Everything the
//! frontend needs from it goes through the [`Backend`] trait:
//!
//! | Call            | Endpoint                             |
//! |-----------------|--------------------------------------|
//! | `site_info`     | `GET  /api/v1/site-info`             |
//! | `login_user`    | `GET  /api/v1/users/me`              |
//! | `user`          | `GET  /api/v1/users/<username>`      |
//! | `posts`         | `GET  /api/v1/posts?page=&pageSize=` |
//! | `post`          | `GET  /api/v1/posts/<slug>`          |
//! | `categories`    | `GET  /api/v1/categories`            |
//! | `labels`        | `GET  /api/v1/labels`                |
//! | `comments`      | `GET  /api/v1/posts/<id>/comments`   |
//! | `like_post`     | `POST /api/v1/posts/<id>/like`       |
//! | `unlike_post`   | `DELETE /api/v1/posts/<id>/like`     |

mod client;
mod error;
#[cfg(test)]
pub mod fake;
mod types;

pub use client::BackendClient;
pub use error::ApiError;
pub use types::{Category, Comment, Label, Paged, Post, PostSummary, User};

use crate::{auth::AuthCookies, debug, logger, site::PartialSiteInfo};

pub type ApiResult<T> = Result<T, ApiError>;

/// Listing filter for post pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostFilter<'a> {
    #[default]
    All,
    Category(&'a str),
    Label(&'a str),
}

/// Page size used when walking every post (sitemap, feed).
const WALK_PAGE_SIZE: u32 = 100;

/// Upper bound on pages walked, in case the backend misreports `total`.
const WALK_MAX_PAGES: u32 = 1000;

/// Read/write access to the backend.
pub trait Backend: Send + Sync {
    fn site_info(&self) -> ApiResult<PartialSiteInfo>;

    fn login_user(&self, auth: &AuthCookies) -> ApiResult<User>;

    /// Public profile of `username`.
    fn user(&self, auth: &AuthCookies, username: &str) -> ApiResult<User>;

    fn posts(
        &self,
        auth: &AuthCookies,
        filter: PostFilter<'_>,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Paged<PostSummary>>;

    fn post(&self, auth: &AuthCookies, slug: &str) -> ApiResult<Post>;

    fn categories(&self) -> ApiResult<Vec<Category>>;

    fn labels(&self) -> ApiResult<Vec<Label>>;

    fn comments(&self, post_id: u64) -> ApiResult<Vec<Comment>>;

    fn like_post(&self, auth: &AuthCookies, post_id: u64) -> ApiResult<()>;

    fn unlike_post(&self, auth: &AuthCookies, post_id: u64) -> ApiResult<()>;

    /// Every published post, walking the paged listing.
    fn all_posts(&self) -> ApiResult<Vec<PostSummary>> {
        let anonymous = AuthCookies::default();
        let mut out = Vec::new();
        let mut page = 1;
        loop {
            let paged = self.posts(&anonymous, PostFilter::All, page, WALK_PAGE_SIZE)?;
            // The echoed `page`/`pageSize` are optional, so only the local
            // counters and the item count decide when to stop.
            let short_page = paged.items.len() < WALK_PAGE_SIZE as usize;
            out.extend(paged.items);
            let complete = paged.total > 0 && out.len() as u64 >= paged.total;
            if short_page || complete || page >= WALK_MAX_PAGES {
                return Ok(out);
            }
            page += 1;
        }
    }
}

/// Substitute `fallback` for a failed fetch.
///
/// Rendering never stops on a backend error; the failure is logged once per
/// `what` and then only under `--verbose`.
pub fn fetch_or<T>(result: ApiResult<T>, fallback: T, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            logger::warn_once(what, &format!("{what}: {e}, using fallback"));
            debug!("api"; "{} failed: {:?}", what, e);
            fallback
        }
    }
}
