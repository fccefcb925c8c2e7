//! Signal handling module
//!
//! Supported signals:
//! - SIGTERM: Graceful shutdown
//! - SIGINT:  Graceful shutdown (Ctrl+C)

use tokio_util::sync::CancellationToken;

use crate::logger;

/// Start the signal listener (Unix)
///
/// Spawns a background task that cancels `shutdown` on the first SIGTERM or
/// SIGINT. Every in-flight upstream call holds a child of that token.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: CancellationToken) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => logger::log_signal("SIGTERM"),
            _ = sigint.recv() => logger::log_signal("SIGINT"),
            () = shutdown.cancelled() => return,
        }
        shutdown.cancel();
    });

    Ok(())
}

/// Fallback for platforms without Unix signals: only Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: CancellationToken) -> std::io::Result<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
                    return;
                }
                logger::log_signal("Ctrl+C");
            }
            () = shutdown.cancelled() => return,
        }
        shutdown.cancel();
    });

    Ok(())
}
