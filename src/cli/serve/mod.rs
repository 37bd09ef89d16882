//! Frontend HTTP server.
//!
//! ```text
//! tiny_http ──► Incoming ──► handler::handle ──► Reply ──► tiny_http
//!                               │
//!                               ├─ RequestContext (site, locales, auth, chrome, toasts)
//!                               └─ Backend
//! ```

mod context;
mod handler;
mod lifecycle;
mod pages;
mod response;
mod route;

pub use context::{App, Incoming, RequestContext};

use crate::{
    api::{Backend, BackendClient, fetch_or},
    config::{FrontendConfig, cfg},
    debug, log,
};
use anyhow::{Context, Result};
use crossbeam::channel;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Request, Server};

/// Largest request body read (like toggles are a few bytes).
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &FrontendConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Start the request loop (blocking).
    pub fn run(self, app: Arc<App>) -> Result<()> {
        let interval = Duration::from_secs(app.config.site.refresh_interval);
        let refresh = lifecycle::spawn_refresh(
            Arc::clone(&app.store),
            Arc::clone(&app.backend),
            interval,
            self.shutdown_rx,
        );

        run_request_loop(&self.server, &app)?;

        // Late refresh results must not land after shutdown
        app.store.close();
        lifecycle::wait_for_shutdown(refresh);
        Ok(())
    }
}

/// `blogfront serve`: seed site info, bind, serve until Ctrl+C.
pub fn serve() -> Result<()> {
    let config = cfg();
    let backend: Arc<dyn Backend> = Arc::new(BackendClient::new(&config.backend)?);
    let app = Arc::new(App::new(Arc::clone(&config), backend));

    // Initial server data; the fallback stays in place if the backend is down
    let seed = fetch_or(app.backend.site_info(), Default::default(), "site info");
    app.store.seed(seed);
    debug!("site"; "serving as {}", app.store.current().metadata.name);

    bind_server(&config)?.run(app)
}

fn run_request_loop(server: &Server, app: &Arc<App>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(app.config.serve.threads)
        .thread_name(|i| format!("blogfront-http-{i}"))
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let app = Arc::clone(app);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &app) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(mut request: Request, app: &App) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::send(request, response::Reply::unavailable());
    }

    let incoming = read_incoming(&mut request)?;
    debug!("serve"; "{} {}", incoming.method, incoming.url);
    let reply = handler::handle(app, &incoming);
    response::send(request, reply)
}

fn read_incoming(request: &mut Request) -> Result<Incoming> {
    let header = |name: &str| {
        request
            .headers()
            .iter()
            .find(|h| h.field.as_str().as_str().eq_ignore_ascii_case(name))
            .map(|h| h.value.to_string())
    };

    let mut incoming = Incoming {
        method: request.method().as_str().to_string(),
        url: request.url().to_string(),
        cookie: header("Cookie"),
        accept_language: header("Accept-Language"),
        body: String::new(),
    };

    request
        .as_reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut incoming.body)
        .context("failed to read request body")?;

    Ok(incoming)
}
