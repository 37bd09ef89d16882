//! In-memory [`Backend`] for tests.

use super::{
    ApiError, ApiResult, Backend, Category, Comment, Label, Paged, Post, PostFilter, PostSummary,
    User,
};
use crate::{auth::AuthCookies, site::PartialSiteInfo};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct FakeBackend {
    user: Option<User>,
    user_error: Option<ApiError>,
    site_info: Option<PartialSiteInfo>,
    posts: Vec<PostSummary>,
    full_posts: Vec<Post>,
    post_error: Option<ApiError>,
    bare_paging: bool,
    categories: Vec<Category>,
    labels: Vec<Label>,
    listing_error: Option<ApiError>,
    comments: Vec<Comment>,
    like_error: Option<ApiError>,
    calls: Mutex<FxHashMap<&'static str, usize>>,
}

/// Rebuild an error for repeated calls (`ApiError` is not `Clone`).
fn replicate(err: &ApiError) -> ApiError {
    match err {
        ApiError::NotFound(p) => ApiError::NotFound(p.clone()),
        ApiError::Forbidden(p) => ApiError::Forbidden(p.clone()),
        ApiError::Unauthorized => ApiError::Unauthorized,
        ApiError::Status { status, path } => ApiError::Status {
            status: *status,
            path: path.clone(),
        },
        ApiError::Network(_) | ApiError::Decode { .. } => ApiError::Status {
            status: 599,
            path: "fake".into(),
        },
    }
}

impl FakeBackend {
    pub fn with_user_language(mut self, language: &str) -> Self {
        self.user = Some(User {
            id: 1,
            username: "reader".into(),
            language: Some(language.into()),
            ..User::default()
        });
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn failing_user(mut self, err: ApiError) -> Self {
        self.user_error = Some(err);
        self
    }

    pub fn with_site_info(mut self, info: PartialSiteInfo) -> Self {
        self.site_info = Some(info);
        self
    }

    pub fn with_posts(mut self, posts: Vec<PostSummary>) -> Self {
        self.posts = posts;
        self
    }

    pub fn with_post(mut self, post: Post) -> Self {
        self.posts.push(post.summary.clone());
        self.full_posts.push(post);
        self
    }

    pub fn failing_post(mut self, err: ApiError) -> Self {
        self.post_error = Some(err);
        self
    }

    /// Answer listings with only `items` and `total`, as a backend that
    /// omits the paging echo does.
    pub fn without_paging_echo(mut self) -> Self {
        self.bare_paging = true;
        self
    }

    /// Fail both the category and the label listing.
    pub fn failing_listings(mut self, err: ApiError) -> Self {
        self.listing_error = Some(err);
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    pub fn failing_like(mut self, err: ApiError) -> Self {
        self.like_error = Some(err);
        self
    }

    /// Number of times `method` was called.
    pub fn calls(&self, method: &str) -> usize {
        self.calls.lock().get(method).copied().unwrap_or(0)
    }

    fn record(&self, method: &'static str) {
        *self.calls.lock().entry(method).or_default() += 1;
    }
}

impl Backend for FakeBackend {
    fn site_info(&self) -> ApiResult<PartialSiteInfo> {
        self.record("site_info");
        self.site_info
            .clone()
            .ok_or_else(|| ApiError::from_status(500, "/site-info"))
    }

    fn login_user(&self, _auth: &AuthCookies) -> ApiResult<User> {
        self.record("login_user");
        if let Some(err) = &self.user_error {
            return Err(replicate(err));
        }
        self.user.clone().ok_or(ApiError::Unauthorized)
    }

    fn user(&self, _auth: &AuthCookies, username: &str) -> ApiResult<User> {
        self.record("user");
        if let Some(err) = &self.user_error {
            return Err(replicate(err));
        }
        self.user
            .clone()
            .filter(|u| u.username == username)
            .ok_or_else(|| ApiError::NotFound(format!("/users/{username}")))
    }

    fn posts(
        &self,
        _auth: &AuthCookies,
        filter: PostFilter<'_>,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Paged<PostSummary>> {
        self.record("posts");
        let matching: Vec<_> = self
            .posts
            .iter()
            .filter(|p| match filter {
                PostFilter::All => true,
                PostFilter::Category(slug) => p.category.as_ref().is_some_and(|c| c.slug == slug),
                PostFilter::Label(slug) => p.labels.iter().any(|l| l.slug == slug),
            })
            .cloned()
            .collect();
        let size = page_size.max(1) as usize;
        let start = (page.max(1) as usize - 1) * size;
        let items = matching.iter().skip(start).take(size).cloned().collect();
        let total = matching.len() as u64;
        if self.bare_paging {
            return Ok(Paged {
                items,
                total,
                ..Paged::default()
            });
        }
        Ok(Paged {
            items,
            total,
            page,
            page_size,
        })
    }

    fn post(&self, _auth: &AuthCookies, slug: &str) -> ApiResult<Post> {
        self.record("post");
        if let Some(err) = &self.post_error {
            return Err(replicate(err));
        }
        self.full_posts
            .iter()
            .find(|p| p.summary.slug == slug)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("/posts/{slug}")))
    }

    fn categories(&self) -> ApiResult<Vec<Category>> {
        self.record("categories");
        if let Some(err) = &self.listing_error {
            return Err(replicate(err));
        }
        Ok(self.categories.clone())
    }

    fn labels(&self) -> ApiResult<Vec<Label>> {
        self.record("labels");
        if let Some(err) = &self.listing_error {
            return Err(replicate(err));
        }
        Ok(self.labels.clone())
    }

    fn comments(&self, _post_id: u64) -> ApiResult<Vec<Comment>> {
        self.record("comments");
        Ok(self.comments.clone())
    }

    fn like_post(&self, _auth: &AuthCookies, _post_id: u64) -> ApiResult<()> {
        self.record("like_post");
        self.like_error.as_ref().map_or(Ok(()), |e| Err(replicate(e)))
    }

    fn unlike_post(&self, _auth: &AuthCookies, _post_id: u64) -> ApiResult<()> {
        self.record("unlike_post");
        self.like_error.as_ref().map_or(Ok(()), |e| Err(replicate(e)))
    }
}
