//! Site info schema and the builtin fallback record.
//!
//! The backend serves this record from `/api/v1/site-info`, often with
//! fields missing. Consumers only ever see the merged, complete [`SiteInfo`].

use super::merge::merge_record;
use serde::{Deserialize, Serialize};

/// Link shown on the owner card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Link shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub url: String,
}

merge_record! {
    /// Branding and document metadata.
    pub struct Metadata / PartialMetadata {
        /// Short site name, used in the nav bar.
        pub name: String,
        /// Document title suffix.
        pub title: String,
        pub description: String,
        pub keywords: Vec<String>,
        /// Default content language tag.
        pub language: String,
        /// Public base URL, without trailing slash.
        pub url: String,
    }
}

merge_record! {
    /// Colors for one scheme.
    pub struct ColorScheme / PartialColorScheme {
        pub primary: String,
        pub background: String,
        pub foreground: String,
        pub accent: String,
    }
}

merge_record! {
    pub struct ColorSchemes / PartialColorSchemes {
        pub light: ColorScheme,
        pub dark: ColorScheme,
    }
}

merge_record! {
    /// Blog owner card.
    pub struct Owner / PartialOwner {
        pub name: String,
        pub email: String,
        pub avatar: String,
        pub bio: String,
        pub links: Vec<SocialLink>,
    }
}

merge_record! {
    pub struct Footer / PartialFooter {
        pub copyright: String,
        /// Free text under the copyright line (e.g. filing number).
        pub text: String,
        pub links: Vec<FooterLink>,
    }
}

merge_record! {
    /// Complete site configuration as seen by the rest of the frontend.
    pub struct SiteInfo / PartialSiteInfo {
        pub metadata: Metadata,
        pub color_schemes: ColorSchemes,
        pub owner: Owner,
        pub footer: Footer,
        pub posts_per_page: u32,
        pub comments_enabled: bool,
    }
}

impl SiteInfo {
    /// Builtin complete record used to fill gaps in backend data.
    pub fn fallback() -> Self {
        Self {
            metadata: Metadata {
                name: "Blog".into(),
                title: "A personal blog".into(),
                description: "Notes, posts and other writing.".into(),
                keywords: vec!["blog".into()],
                language: "en".into(),
                url: "http://localhost:5280".into(),
            },
            color_schemes: ColorSchemes {
                light: ColorScheme {
                    primary: "#2563eb".into(),
                    background: "#ffffff".into(),
                    foreground: "#111827".into(),
                    accent: "#f59e0b".into(),
                },
                dark: ColorScheme {
                    primary: "#60a5fa".into(),
                    background: "#0b0f19".into(),
                    foreground: "#e5e7eb".into(),
                    accent: "#fbbf24".into(),
                },
            },
            owner: Owner {
                name: "Owner".into(),
                email: "owner@example.com".into(),
                avatar: "/avatar.png".into(),
                bio: String::new(),
                links: Vec::new(),
            },
            footer: Footer {
                copyright: "© Blog".into(),
                text: String::new(),
                links: Vec::new(),
            },
            posts_per_page: 10,
            comments_enabled: true,
        }
    }

    /// Public base URL without trailing slash.
    pub fn base_url(&self) -> &str {
        self.metadata.url.trim_end_matches('/')
    }
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self::fallback()
    }
}
