//! Server lifecycle management.

use crate::{api::Backend, core::register_server, debug, log, site::SiteInfoStore};
use anyhow::Result;
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use std::{
    net::SocketAddr,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                // Port 0 asks the OS to pick one
                let bound = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, bound));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Register server for graceful shutdown.
///
/// When Ctrl+C is pressed, the handler unblocks the server and wakes the
/// refresh thread.
pub fn register_server_for_shutdown(server: Arc<Server>, shutdown_tx: Sender<()>) {
    register_server(server, shutdown_tx);
}

/// Refresh the site info store every `interval` until shutdown.
///
/// `None` when refreshing is disabled.
pub fn spawn_refresh(
    store: Arc<SiteInfoStore>,
    backend: Arc<dyn Backend>,
    interval: Duration,
    shutdown_rx: Receiver<()>,
) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        return None;
    }

    Some(thread::spawn(move || {
        run_refresh_loop(&store, backend.as_ref(), interval, &shutdown_rx);
    }))
}

fn run_refresh_loop(
    store: &SiteInfoStore,
    backend: &dyn Backend,
    interval: Duration,
    shutdown_rx: &Receiver<()>,
) {
    loop {
        match shutdown_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
        if !store.is_alive() {
            break;
        }
        if store.refresh_from(backend) {
            debug!("site"; "site info refreshed");
        }
    }
}

/// Wait for the refresh thread to finish (max 2 seconds).
pub fn wait_for_shutdown(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else { return };

    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
}
