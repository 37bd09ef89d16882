//! Backend records.
//!
//! Field names follow the backend's camelCase JSON. Optional fields default
//! when missing or `null`, so partially populated records still decode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    /// Stored UI language, e.g. `en-US`.
    pub language: Option<String>,
    pub role: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Label {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub summary: Option<String>,
    pub cover: Option<String>,
    pub category: Option<Category>,
    pub labels: Vec<Label>,
    pub author: Option<User>,
    pub like_count: u64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl PostSummary {
    /// Last modification time for feeds: `updatedAt`, else `createdAt`.
    pub fn last_modified(&self) -> Option<&str> {
        self.updated_at.as_deref().or(self.created_at.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Post {
    #[serde(flatten)]
    pub summary: PostSummary,
    /// Rendered HTML body.
    pub content: String,
    pub is_liked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    pub author: Option<User>,
    pub created_at: Option<String>,
    pub replies: Vec<Comment>,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
}

const fn first_page() -> u32 {
    1
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            page_size: 0,
        }
    }
}

impl<T> Paged<T> {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX).max(1)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Pin the paging fields to what was requested.
    ///
    /// `page` and `pageSize` are optional in listing responses; a page size
    /// the backend did report is kept.
    pub fn for_request(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        if self.page_size == 0 {
            self.page_size = page_size;
        }
        self
    }
}
