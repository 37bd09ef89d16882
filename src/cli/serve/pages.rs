//! HTML pages.
//!
//! Markup is a bare semantic skeleton: it carries the nav chrome, the page
//! data and error states, and leaves styling to the site's stylesheet.

use super::context::RequestContext;
use crate::{
    api::{Comment, Paged, Post, PostSummary, User},
    chrome::{Background, NavChrome, NavStyle, Overlay},
    interact::Toasts,
    site::SiteInfo,
    utils::{
        html::{escape, escape_attr},
        url::encode_segment,
    },
};

/// Read-only view of the context a layout renders.
struct Frame<'a> {
    site: &'a SiteInfo,
    locale: &'a str,
    user: Option<&'a User>,
    nav: &'a NavChrome,
    background: &'a Background,
    toasts: &'a Toasts,
}

/// Listing page for `/`, `/page/<n>`: transparent nav over a cover overlay.
pub fn home(ctx: &mut RequestContext, posts: &Paged<PostSummary>) -> String {
    let RequestContext {
        site,
        locales,
        auth,
        chrome,
        toasts,
    } = ctx;

    let nav = chrome.nav.acquire(NavStyle::Transparent, Some(false));
    let background = chrome
        .background
        .acquire(Overlay::html(r#"<div class="bg-overlay bg-cover"></div>"#));

    let mut content = format!(
        r#"<header class="hero"><h1>{}</h1><p>{}</p></header>"#,
        escape(&site.metadata.title),
        escape(&site.metadata.description)
    );
    content.push_str(&post_list(posts, "/page/"));

    let frame = Frame {
        site,
        locale: locales.primary(),
        user: auth.user.as_ref(),
        nav: &nav,
        background: &background,
        toasts,
    };
    let html = layout(&frame, &site.metadata.name, &content);
    background.release();
    nav.release();
    html
}

/// Category or label listing.
pub fn listing(
    ctx: &mut RequestContext,
    kind: &str,
    name: &str,
    base_path: &str,
    posts: &Paged<PostSummary>,
) -> String {
    let RequestContext {
        site,
        locales,
        auth,
        chrome,
        toasts,
    } = ctx;
    let nav = chrome.nav.acquire(NavStyle::Solid, None);

    let mut content = format!(
        r#"<header><p class="kind">{}</p><h1>{}</h1></header>"#,
        escape(kind),
        escape(name)
    );
    content.push_str(&post_list(posts, &format!("{base_path}?page=")));

    let frame = Frame {
        site,
        locale: locales.primary(),
        user: auth.user.as_ref(),
        nav: &nav,
        background: &chrome.background,
        toasts,
    };
    let title = format!("{} · {}", name, site.metadata.name);
    let html = layout(&frame, &title, &content);
    nav.release();
    html
}

/// Single post: solid nav, cover image as background when the post has one.
pub fn post(ctx: &mut RequestContext, post: &Post, comments: Option<&[Comment]>) -> String {
    let RequestContext {
        site,
        locales,
        auth,
        chrome,
        toasts,
    } = ctx;
    let summary = &post.summary;

    let nav = chrome.nav.acquire(NavStyle::Solid, None);
    let background = summary
        .cover
        .as_deref()
        .map(|cover| chrome.background.acquire(Overlay::image(cover)));

    let mut content = format!(
        r#"<article class="post" data-post-id="{}"><header><h1>{}</h1>"#,
        summary.id,
        escape(&summary.title)
    );
    content.push_str(&post_meta(summary));
    content.push_str(&format!(
        r#"</header><div class="content">{}</div>"#,
        post.content
    ));
    content.push_str(&format!(
        r#"<button class="like" data-post-id="{}" data-liked="{}" aria-pressed="{}">♥ <span class="like-count">{}</span></button></article>"#,
        summary.id, post.is_liked, post.is_liked, summary.like_count
    ));
    if let Some(comments) = comments {
        content.push_str(&comment_section(comments));
    }

    let no_background = Background::default();
    let frame = Frame {
        site,
        locale: locales.primary(),
        user: auth.user.as_ref(),
        nav: &nav,
        background: background.as_deref().unwrap_or(&no_background),
        toasts,
    };
    let title = format!("{} · {}", summary.title, site.metadata.name);
    let html = layout(&frame, &title, &content);
    if let Some(lease) = background {
        lease.release();
    }
    nav.release();
    html
}

/// Public profile for `/users/<username>`.
pub fn user(ctx: &mut RequestContext, profile: &User) -> String {
    let RequestContext {
        site,
        locales,
        auth,
        chrome,
        toasts,
    } = ctx;
    let nav = chrome.nav.acquire(NavStyle::Solid, None);

    let mut content = String::from(r#"<section class="profile">"#);
    if let Some(avatar) = profile.avatar.as_deref().filter(|a| !a.is_empty()) {
        content.push_str(&format!(
            r#"<img class="avatar" src="{}" alt="">"#,
            escape_attr(avatar)
        ));
    }
    content.push_str(&format!(
        r#"<h1>{}</h1><p class="username">@{}</p></section>"#,
        escape(profile.display_name()),
        escape(&profile.username)
    ));

    let frame = Frame {
        site,
        locale: locales.primary(),
        user: auth.user.as_ref(),
        nav: &nav,
        background: &chrome.background,
        toasts,
    };
    let title = format!("{} · {}", profile.display_name(), site.metadata.name);
    let html = layout(&frame, &title, &content);
    nav.release();
    html
}

/// Error page in the default chrome.
pub fn error(ctx: &RequestContext, status: u16, message: &str) -> String {
    let frame = Frame {
        site: &ctx.site,
        locale: ctx.locales.primary(),
        user: ctx.auth.user.as_ref(),
        nav: &ctx.chrome.nav,
        background: &ctx.chrome.background,
        toasts: &ctx.toasts,
    };
    let content = format!(
        r#"<section class="error"><h1>{status}</h1><p>{}</p><p><a href="/">Home</a></p></section>"#,
        escape(message)
    );
    layout(&frame, &format!("{status} · {}", ctx.site.metadata.name), &content)
}

fn layout(frame: &Frame<'_>, title: &str, content: &str) -> String {
    let site = frame.site;
    let mut html = String::with_capacity(4096 + content.len());

    html.push_str(&format!(
        r#"<!DOCTYPE html><html lang="{}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{}</title><meta name="description" content="{}">"#,
        escape_attr(frame.locale),
        escape(title),
        escape_attr(&site.metadata.description)
    ));
    if !site.metadata.keywords.is_empty() {
        html.push_str(&format!(
            r#"<meta name="keywords" content="{}">"#,
            escape_attr(&site.metadata.keywords.join(", "))
        ));
    }
    html.push_str(&format!(
        r#"<meta name="theme-color" content="{}" media="(prefers-color-scheme: light)"><meta name="theme-color" content="{}" media="(prefers-color-scheme: dark)"><link rel="alternate" type="application/rss+xml" href="/rss.xml"></head><body>"#,
        escape_attr(&site.color_schemes.light.primary),
        escape_attr(&site.color_schemes.dark.primary)
    ));

    if let Some(overlay) = frame.background.overlay() {
        html.push_str(overlay.as_html());
    }

    html.push_str(&format!(
        r#"<nav class="{}"><a class="brand" href="/">{}</a>"#,
        escape_attr(frame.nav.class_name()),
        escape(&site.metadata.name)
    ));
    match frame.user {
        Some(user) => html.push_str(&format!(
            r#"<a class="user" href="/users/{}">{}</a>"#,
            escape_attr(&encode_segment(&user.username)),
            escape(user.display_name())
        )),
        None => html.push_str(r#"<a class="login" href="/login">Log in</a>"#),
    }
    html.push_str("</nav>");

    let main_class = if frame.nav.has_padding() {
        "with-nav-padding"
    } else {
        "no-nav-padding"
    };
    html.push_str(&format!(r#"<main class="{main_class}">{content}</main>"#));

    html.push_str(&footer(site));

    if !frame.toasts.is_empty() {
        // `</` cannot appear inside serialized JSON strings after this replace
        let json = serde_json::to_string(frame.toasts)
            .unwrap_or_else(|_| "[]".into())
            .replace("</", "<\\/");
        html.push_str(&format!(
            r#"<script type="application/json" id="toasts">{json}</script>"#
        ));
    }

    html.push_str("</body></html>");
    html
}

fn footer(site: &SiteInfo) -> String {
    let footer = &site.footer;
    let mut html = String::from("<footer>");
    if !footer.copyright.is_empty() {
        html.push_str(&format!(r#"<p class="copyright">{}</p>"#, escape(&footer.copyright)));
    }
    if !footer.text.is_empty() {
        html.push_str(&format!("<p>{}</p>", escape(&footer.text)));
    }
    if !footer.links.is_empty() {
        html.push_str("<ul>");
        for link in &footer.links {
            html.push_str(&format!(
                r#"<li><a href="{}">{}</a></li>"#,
                escape_attr(&link.url),
                escape(&link.label)
            ));
        }
        html.push_str("</ul>");
    }
    html.push_str("</footer>");
    html
}

fn post_list(posts: &Paged<PostSummary>, page_prefix: &str) -> String {
    if posts.items.is_empty() {
        return r#"<p class="empty">No posts yet.</p>"#.to_string();
    }

    let mut html = String::from(r#"<ul class="posts">"#);
    for post in &posts.items {
        html.push_str(&format!(
            r#"<li><a href="/posts/{}">{}</a>"#,
            escape_attr(&encode_segment(&post.slug)),
            escape(&post.title)
        ));
        html.push_str(&post_meta(post));
        if let Some(summary) = &post.summary {
            html.push_str(&format!(r#"<p class="summary">{}</p>"#, escape(summary)));
        }
        html.push_str("</li>");
    }
    html.push_str("</ul>");

    let page = posts.page;
    if page > 1 || posts.has_next() {
        html.push_str(r#"<nav class="pagination">"#);
        if page > 1 {
            html.push_str(&format!(r#"<a rel="prev" href="{page_prefix}{}">Newer</a>"#, page - 1));
        }
        if posts.has_next() {
            html.push_str(&format!(r#"<a rel="next" href="{page_prefix}{}">Older</a>"#, page + 1));
        }
        html.push_str("</nav>");
    }
    html
}

fn post_meta(post: &PostSummary) -> String {
    let mut html = String::from(r#"<p class="meta">"#);
    if let Some(created) = &post.created_at {
        html.push_str(&format!(
            r#"<time datetime="{}">{}</time>"#,
            escape_attr(created),
            escape(created.get(..10).unwrap_or(created))
        ));
    }
    if let Some(category) = &post.category {
        html.push_str(&format!(
            r#" <a class="category" href="/categories/{}">{}</a>"#,
            escape_attr(&encode_segment(&category.slug)),
            escape(&category.name)
        ));
    }
    for label in &post.labels {
        html.push_str(&format!(
            r#" <a class="label" href="/labels/{}">#{}</a>"#,
            escape_attr(&encode_segment(&label.slug)),
            escape(&label.name)
        ));
    }
    html.push_str("</p>");
    html
}

fn comment_section(comments: &[Comment]) -> String {
    let mut html = format!(
        r#"<section class="comments"><h2>Comments ({})</h2>"#,
        comments.len()
    );
    html.push_str(&comment_list(comments));
    html.push_str("</section>");
    html
}

fn comment_list(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return String::new();
    }
    let mut html = String::from("<ol>");
    for comment in comments {
        let author = comment
            .author
            .as_ref()
            .map_or("Anonymous", User::display_name);
        html.push_str(&format!(
            r#"<li id="comment-{}"><p class="author">{}</p><p>{}</p>{}</li>"#,
            comment.id,
            escape(author),
            escape(&comment.content),
            comment_list(&comment.replies)
        ));
    }
    html.push_str("</ol>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{Category, Label},
        auth::AuthState,
        chrome::{Chrome, SOLID_NAV, TRANSPARENT_NAV},
        locale::Locales,
    };
    use std::sync::Arc;

    fn ctx() -> RequestContext {
        RequestContext {
            site: Arc::new(SiteInfo::fallback()),
            locales: Locales::default(),
            auth: AuthState {
                cookies: Default::default(),
                user: None,
            },
            chrome: Chrome::default(),
            toasts: Toasts::default(),
        }
    }

    fn summary(slug: &str) -> PostSummary {
        PostSummary {
            id: 7,
            slug: slug.into(),
            title: format!("<{slug}>"),
            category: Some(Category {
                name: "Notes".into(),
                slug: "notes".into(),
                ..Category::default()
            }),
            labels: vec![Label {
                name: "rust".into(),
                slug: "rust".into(),
                ..Label::default()
            }],
            like_count: 3,
            created_at: Some("2024-06-15T14:30:45Z".into()),
            ..PostSummary::default()
        }
    }

    #[test]
    fn test_home_uses_transparent_nav_and_resets() {
        let mut ctx = ctx();
        let initial = ctx.chrome.clone();
        let posts = Paged {
            items: vec![summary("hello")],
            total: 1,
            page: 1,
            page_size: 10,
        };
        let html = home(&mut ctx, &posts);

        assert!(html.contains(&format!(r#"<nav class="site-nav {TRANSPARENT_NAV}">"#)));
        assert!(html.contains(r#"<main class="no-nav-padding">"#));
        assert!(html.contains("bg-cover"));
        assert!(html.contains(r#"<a href="/posts/hello">&lt;hello&gt;</a>"#));
        assert!(html.contains(r#"<time datetime="2024-06-15T14:30:45Z">2024-06-15</time>"#));
        assert_eq!(ctx.chrome, initial);
    }

    #[test]
    fn test_post_page() {
        let mut ctx = ctx();
        let initial = ctx.chrome.clone();
        let mut post_summary = summary("hello");
        post_summary.cover = Some("/img/c.png".into());
        let post_data = Post {
            summary: post_summary,
            content: "<p>body</p>".into(),
            is_liked: true,
        };
        let comments = vec![Comment {
            id: 1,
            content: "nice <b>".into(),
            replies: vec![Comment {
                id: 2,
                content: "thanks".into(),
                ..Comment::default()
            }],
            ..Comment::default()
        }];
        let html = post(&mut ctx, &post_data, Some(&comments));

        assert!(html.contains(&format!(r#"<nav class="site-nav {SOLID_NAV}">"#)));
        assert!(html.contains(r#"<main class="with-nav-padding">"#));
        assert!(html.contains("background-image:url('/img/c.png')"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(r#"data-liked="true""#));
        assert!(html.contains("Comments (1)"));
        assert!(html.contains("nice &lt;b&gt;"));
        assert!(html.contains(r#"<li id="comment-2">"#));
        assert_eq!(ctx.chrome, initial);
    }

    #[test]
    fn test_post_without_cover_has_no_overlay() {
        let mut ctx = ctx();
        let post_data = Post {
            summary: summary("plain"),
            ..Post::default()
        };
        let html = post(&mut ctx, &post_data, None);
        assert!(!html.contains("bg-overlay"));
        assert!(!html.contains("Comments"));
    }

    #[test]
    fn test_listing_pagination_links() {
        let mut ctx = ctx();
        let posts = Paged {
            items: vec![summary("a")],
            total: 25,
            page: 2,
            page_size: 10,
        };
        let html = listing(&mut ctx, "Category", "Notes", "/categories/notes", &posts);
        assert!(html.contains(r#"href="/categories/notes?page=1">Newer"#));
        assert!(html.contains(r#"href="/categories/notes?page=3">Older"#));
        assert!(html.contains("<title>Notes · Blog</title>"));
    }

    #[test]
    fn test_error_page_and_toasts() {
        let mut ctx = ctx();
        ctx.toasts.error("Failed </script>");
        let html = error(&ctx, 404, "Post not found");
        assert!(html.contains("<h1>404</h1>"));
        assert!(html.contains(r#"<nav class="site-nav">"#));
        assert!(html.contains(r#"<script type="application/json" id="toasts">"#));
        assert!(!html.contains("Failed </script>"));
    }

    #[test]
    fn test_logged_in_nav_shows_user() {
        let mut ctx = ctx();
        ctx.auth.user = Some(User {
            username: "alice".into(),
            ..User::default()
        });
        let html = error(&ctx, 403, "Forbidden");
        assert!(html.contains(r#"<a class="user" href="/users/alice">alice</a>"#));
        assert!(!html.contains("Log in"));
    }

    #[test]
    fn test_links_encode_slugs() {
        let mut ctx = ctx();
        let mut odd = summary("hello world café");
        odd.category = Some(Category {
            name: "Q&A".into(),
            slug: "q&a?".into(),
            ..Category::default()
        });
        let posts = Paged {
            items: vec![odd],
            total: 1,
            page: 1,
            page_size: 10,
        };
        let html = home(&mut ctx, &posts);
        assert!(html.contains(r#"href="/posts/hello%20world%20caf%C3%A9""#));
        assert!(html.contains(r#"href="/categories/q%26a%3F""#));
    }

    #[test]
    fn test_user_page() {
        let mut ctx = ctx();
        let initial = ctx.chrome.clone();
        let profile = User {
            username: "alice".into(),
            nickname: Some("Alice <A>".into()),
            avatar: Some("/a.png".into()),
            ..User::default()
        };
        let html = user(&mut ctx, &profile);
        assert!(html.contains("<h1>Alice &lt;A&gt;</h1>"));
        assert!(html.contains(r#"<p class="username">@alice</p>"#));
        assert!(html.contains(r#"<img class="avatar" src="/a.png" alt="">"#));
        assert!(html.contains(&format!(r#"<nav class="site-nav {SOLID_NAV}">"#)));
        assert_eq!(ctx.chrome, initial);
    }
}
