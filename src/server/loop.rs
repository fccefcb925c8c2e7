//! Server loop module
//!
//! Accepts connections until shutdown, then waits for open connections to drain

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until `state.shutdown` is cancelled.
///
/// After shutdown the listener is closed and open connections get up to the
/// configured write timeout to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
) -> std::io::Result<()> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = state.shutdown.cancelled() => break,
        }
    }

    drop(listener);

    let grace = Duration::from_secs(state.config.performance.write_timeout);
    let remaining = drain_connections(&active_connections, grace).await;
    logger::log_shutdown(remaining);
    Ok(())
}

/// Wait until the counter reaches zero or `grace` elapses; returns what is left
async fn drain_connections(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + grace;

    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 || tokio::time::Instant::now() >= deadline {
            return remaining;
        }
        tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
    }
}
