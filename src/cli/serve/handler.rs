//! Request dispatch.
//!
//! Backend failures never crash a page: listings fall back to empty data,
//! a missing post or user is a 404, a forbidden one a 403, anything else a
//! 502.

use super::{
    context::{App, Incoming, RequestContext},
    pages,
    response::Reply,
    route::Route,
};
use crate::{
    api::{ApiError, Paged, PostFilter, PostSummary, fetch_or},
    feed::{FeedSource, robots::render_robots, rss::render_rss, sitemap::render_sitemap},
    interact::{LikeState, Toasts, toggle_like},
    log,
    utils::{mime, url::encode_segment},
};
use serde::Serialize;

/// Body of `POST /api/posts/<id>/like`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeReply {
    #[serde(flatten)]
    pub state: LikeState,
    pub toasts: Toasts,
}

pub fn handle(app: &App, incoming: &Incoming) -> Reply {
    match Route::parse(&incoming.method, &incoming.url, &app.config) {
        Route::Home { page } => home(app, incoming, page),
        Route::Post(slug) => post(app, incoming, &slug),
        Route::Category { slug, page } => listing(app, incoming, Listing::Category, &slug, page),
        Route::Label { slug, page } => listing(app, incoming, Listing::Label, &slug, page),
        Route::User(username) => user(app, incoming, &username),
        Route::Like(id) => like(app, incoming, id),
        Route::SiteInfo => Reply::json(200, &*app.store.current()),
        Route::Sitemap => {
            let source = FeedSource::fetch(app.backend.as_ref());
            let xml = render_sitemap(&app.store.current(), &source, &app.config.sitemap);
            Reply::new(200, mime::XML, xml)
        }
        Route::Rss => {
            let source = FeedSource::fetch(app.backend.as_ref());
            match render_rss(&app.store.current(), &source, &app.config.feed) {
                Ok(xml) => Reply::new(200, mime::RSS, xml),
                Err(e) => {
                    log!("rss"; "{}", e);
                    Reply::text(500, "500 Internal Server Error")
                }
            }
        }
        Route::Robots => Reply::text(
            200,
            render_robots(&app.store.current(), &app.config.sitemap),
        ),
        Route::MethodNotAllowed => Reply::method_not_allowed(),
        Route::NotFound => {
            let ctx = RequestContext::build(app, incoming);
            Reply::html(404, pages::error(&ctx, 404, "Page not found"))
        }
    }
}

fn home(app: &App, incoming: &Incoming, page: u32) -> Reply {
    let mut ctx = RequestContext::build(app, incoming);
    let posts = fetch_page(app, &ctx, PostFilter::All, page);
    Reply::html(200, pages::home(&mut ctx, &posts))
}

/// One listing page, empty when the backend fails.
fn fetch_page(
    app: &App,
    ctx: &RequestContext,
    filter: PostFilter<'_>,
    page: u32,
) -> Paged<PostSummary> {
    let page_size = ctx.site.posts_per_page.max(1);
    fetch_or(
        app.backend.posts(&ctx.auth.cookies, filter, page, page_size),
        Paged::default(),
        "posts",
    )
    .for_request(page, page_size)
}

fn post(app: &App, incoming: &Incoming, slug: &str) -> Reply {
    let mut ctx = RequestContext::build(app, incoming);
    match app.backend.post(&ctx.auth.cookies, slug) {
        Ok(post) => {
            let comments = ctx.site.comments_enabled.then(|| {
                fetch_or(app.backend.comments(post.summary.id), Vec::new(), "comments")
            });
            Reply::html(200, pages::post(&mut ctx, &post, comments.as_deref()))
        }
        Err(e) => error_page(&ctx, &e, "Post"),
    }
}

fn user(app: &App, incoming: &Incoming, username: &str) -> Reply {
    let mut ctx = RequestContext::build(app, incoming);
    match app.backend.user(&ctx.auth.cookies, username) {
        Ok(profile) => Reply::html(200, pages::user(&mut ctx, &profile)),
        Err(e) => error_page(&ctx, &e, "User"),
    }
}

#[derive(Debug, Clone, Copy)]
enum Listing {
    Category,
    Label,
}

fn listing(app: &App, incoming: &Incoming, kind: Listing, slug: &str, page: u32) -> Reply {
    let mut ctx = RequestContext::build(app, incoming);
    let backend = app.backend.as_ref();

    let (lookup, filter, label, base) = match kind {
        Listing::Category => (
            backend
                .categories()
                .map(|all| all.into_iter().find(|c| c.slug == slug).map(|c| c.name)),
            PostFilter::Category(slug),
            "Category",
            "categories",
        ),
        Listing::Label => (
            backend
                .labels()
                .map(|all| all.into_iter().find(|l| l.slug == slug).map(|l| l.name)),
            PostFilter::Label(slug),
            "Label",
            "labels",
        ),
    };
    // A failed lookup renders under the slug; only a known miss is a 404.
    let name = match lookup {
        Ok(found) => found,
        Err(e) => {
            ctx.toasts
                .info(format!("{label} details are unavailable right now"));
            Some(fetch_or(Err(e), slug.to_string(), base))
        }
    };
    let Some(name) = name else {
        return Reply::html(404, pages::error(&ctx, 404, &format!("{label} not found")));
    };

    let posts = fetch_page(app, &ctx, filter, page);
    let base_path = format!("/{base}/{}", encode_segment(slug));
    Reply::html(
        200,
        pages::listing(&mut ctx, label, &name, &base_path, &posts),
    )
}

fn like(app: &App, incoming: &Incoming, post_id: u64) -> Reply {
    let Ok(state) = serde_json::from_str::<LikeState>(&incoming.body) else {
        return Reply::text(400, "400 Bad Request: expected {\"isLiked\", \"likeCount\"}");
    };

    let mut ctx = RequestContext::build(app, incoming);
    let state = toggle_like(
        app.backend.as_ref(),
        &ctx.auth.cookies,
        post_id,
        state,
        &mut ctx.toasts,
    );
    Reply::json(
        200,
        &LikeReply {
            state,
            toasts: ctx.toasts,
        },
    )
}

fn error_page(ctx: &RequestContext, err: &ApiError, what: &str) -> Reply {
    let status = err.page_status();
    let message = match status {
        404 => format!("{what} not found"),
        403 => format!("You do not have access to this {}", what.to_ascii_lowercase()),
        _ => "The blog backend is unavailable, try again later".to_string(),
    };
    if status >= 500 {
        log!("serve"; "backend error: {}", err);
    }
    Reply::html(status, pages::error(ctx, status, &message))
}
