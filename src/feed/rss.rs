//! RSS 2.0 feed generation.
//!
//! Channel data comes from the merged site info, items from the newest
//! posts. Posts without a parseable date are left out.

use super::{FeedSource, minify_xml};
use crate::{
    api::{PostSummary, User},
    config::FeedConfig,
    debug,
    site::SiteInfo,
    utils::{date::DateTimeUtc, url::encode_segment},
};
use anyhow::{Result, anyhow};
use regex::Regex;
use rss::{CategoryBuilder, ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};
use std::sync::LazyLock;

/// Render the RSS document.
pub fn render_rss(site: &SiteInfo, source: &FeedSource, config: &FeedConfig) -> Result<String> {
    let xml = RssFeed::build(site, &source.posts, config.limit).into_xml()?;
    Ok(minify_xml(&xml, config.minify).into_owned())
}

struct RssFeed<'a> {
    site: &'a SiteInfo,
    posts: Vec<(DateTimeUtc, &'a PostSummary)>,
}

impl<'a> RssFeed<'a> {
    fn build(site: &'a SiteInfo, posts: &'a [PostSummary], limit: usize) -> Self {
        let mut dated: Vec<_> = posts
            .iter()
            .filter_map(|post| publish_date(post).map(|date| (date, post)))
            .collect();

        let excluded = posts.len() - dated.len();
        if excluded > 0 {
            debug!("rss"; "excluded {} posts without a valid date", excluded);
        }

        // Newest first; stable so equal dates keep backend order
        dated.sort_by_key(|(date, _)| std::cmp::Reverse(date.to_unix()));
        dated.truncate(limit);

        Self { site, posts: dated }
    }

    fn into_xml(self) -> Result<String> {
        let base_url = self.site.base_url();
        let items: Vec<_> = self
            .posts
            .iter()
            .map(|(date, post)| post_to_rss_item(post, *date, self.site))
            .collect();

        let metadata = &self.site.metadata;
        let copyright = Some(self.site.footer.copyright.clone()).filter(|c| !c.is_empty());
        let language = Some(metadata.language.clone()).filter(|l| !l.is_empty());

        let channel = ChannelBuilder::default()
            .title(&metadata.name)
            .link(format!("{base_url}/"))
            .description(&metadata.description)
            .language(language)
            .copyright(copyright)
            .generator("blogfront".to_string())
            .last_build_date(self.posts.first().map(|(date, _)| date.to_rfc2822()))
            .items(items)
            .build();

        channel
            .validate()
            .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
        Ok(channel.to_string())
    }
}

/// `createdAt`, falling back to `updatedAt`.
fn publish_date(post: &PostSummary) -> Option<DateTimeUtc> {
    post.created_at
        .as_deref()
        .or(post.updated_at.as_deref())
        .and_then(DateTimeUtc::parse)
}

fn post_to_rss_item(post: &PostSummary, date: DateTimeUtc, site: &SiteInfo) -> rss::Item {
    let link = format!("{}/posts/{}", site.base_url(), encode_segment(&post.slug));
    let categories = post
        .category
        .iter()
        .map(|c| CategoryBuilder::default().name(c.name.clone()).build())
        .collect::<Vec<_>>();

    ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .description(post.summary.clone())
        .pub_date(Some(date.to_rfc2822()))
        .author(normalize_rss_author(post.author.as_ref(), site))
        .categories(categories)
        .build()
}

/// Normalize author field to RSS format: "email (Name)"
///
/// Uses the post author when they have an email, else the site owner.
/// Returns `None` when neither yields a valid address.
fn normalize_rss_author(author: Option<&User>, site: &SiteInfo) -> Option<String> {
    static RE_VALID_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}[ \t]*\([^)]+\)$")
            .expect("static regex")
    });

    let from_post = author.and_then(|user| {
        let email = user.email.as_deref()?;
        Some(format!("{} ({})", email, user.display_name()))
    });
    let from_owner = || {
        let owner = &site.owner;
        Some(format!("{} ({})", owner.email, owner.name))
    };

    from_post
        .filter(|a| RE_VALID_AUTHOR.is_match(a))
        .or_else(|| from_owner().filter(|a| RE_VALID_AUTHOR.is_match(a)))
}
