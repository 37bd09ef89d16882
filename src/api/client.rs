//! HTTP implementation of [`Backend`].

use super::{
    ApiError, ApiResult, Backend, Category, Comment, Label, Paged, Post, PostFilter, PostSummary,
    User,
};
use crate::{
    auth::AuthCookies, config::BackendConfig, debug, site::PartialSiteInfo,
    utils::url::encode_segment,
};
use reqwest::{
    Method,
    blocking::{Client, RequestBuilder},
};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

const API_PREFIX: &str = "/api/v1";

/// Response body, either wrapped in `{ "data": ... }` or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Blocking backend client. Cheap to clone; shares one connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(concat!("blogfront/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base, API_PREFIX, path)
    }

    fn request(&self, method: Method, path: &str, auth: Option<&AuthCookies>) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(auth) = auth {
            for (name, value) in auth.forward_headers() {
                builder = builder.header(name, value);
            }
        }
        builder
    }

    fn send(&self, builder: RequestBuilder, path: &str) -> ApiResult<String> {
        let response = builder.send()?;
        let status = response.status();
        debug!("api"; "{} -> {}", path, status.as_u16());
        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), path));
        }
        Ok(response.text()?)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, auth: Option<&AuthCookies>) -> ApiResult<T> {
        let body = self.send(self.request(Method::GET, path, auth), path)?;
        decode(&body, path)
    }

    fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: Option<&AuthCookies>,
    ) -> ApiResult<T> {
        let builder = self.request(Method::GET, path, auth).query(query);
        let body = self.send(builder, path)?;
        decode(&body, path)
    }

    fn command(&self, method: Method, path: &str, auth: &AuthCookies) -> ApiResult<()> {
        self.send(self.request(method, path, Some(auth)), path)
            .map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(body: &str, path: &str) -> ApiResult<T> {
    serde_json::from_str::<Payload<T>>(body)
        .map(Payload::into_inner)
        .map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
}

impl Backend for BackendClient {
    fn site_info(&self) -> ApiResult<PartialSiteInfo> {
        self.get("/site-info", None)
    }

    fn login_user(&self, auth: &AuthCookies) -> ApiResult<User> {
        if !auth.has_token() {
            return Err(ApiError::Unauthorized);
        }
        self.get("/users/me", Some(auth))
    }

    fn posts(
        &self,
        auth: &AuthCookies,
        filter: PostFilter<'_>,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Paged<PostSummary>> {
        let mut query = vec![
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        match filter {
            PostFilter::All => {}
            PostFilter::Category(slug) => query.push(("category", slug.to_string())),
            PostFilter::Label(slug) => query.push(("label", slug.to_string())),
        }
        self.get_query("/posts", &query, Some(auth))
    }

    fn post(&self, auth: &AuthCookies, slug: &str) -> ApiResult<Post> {
        let path = format!("/posts/{}", encode_segment(slug));
        self.get(&path, Some(auth))
    }

    fn user(&self, auth: &AuthCookies, username: &str) -> ApiResult<User> {
        let path = format!("/users/{}", encode_segment(username));
        self.get(&path, Some(auth))
    }

    fn categories(&self) -> ApiResult<Vec<Category>> {
        self.get("/categories", None)
    }

    fn labels(&self) -> ApiResult<Vec<Label>> {
        self.get("/labels", None)
    }

    fn comments(&self, post_id: u64) -> ApiResult<Vec<Comment>> {
        self.get(&format!("/posts/{post_id}/comments"), None)
    }

    fn like_post(&self, auth: &AuthCookies, post_id: u64) -> ApiResult<()> {
        self.command(Method::POST, &format!("/posts/{post_id}/like"), auth)
    }

    fn unlike_post(&self, auth: &AuthCookies, post_id: u64) -> ApiResult<()> {
        self.command(Method::DELETE, &format!("/posts/{post_id}/like"), auth)
    }
}
