//! Logger module
//!
//! Provides logging utilities for the proxy including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error, warning and upstream failure logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::routing::RouteTable;
use crate::upstream::UpstreamError;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        &config.logging.level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, routes: &RouteTable) {
    write_info("======================================");
    write_info("Tweet proxy started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Upstream API: {}", config.upstream.api_base));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        write_info(&format!("Max connections: {max}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    for entry in routes.entries() {
        let methods: Vec<&str> = entry.methods.iter().map(hyper::Method::as_str).collect();
        write_info(&format!("Route: {} {} -> {:?}", methods.join(","), entry.path, entry.action));
    }
    write_info("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Handler failure, logged once per failed request
pub fn log_upstream_failure(handler: &str, handle: &str, err: &UpstreamError) {
    write_error(&format!(
        "[UPSTREAM] {handler} handle={handle:?} failed ({}): {err}",
        err.code()
    ));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_signal(name: &str) {
    write_info(&format!("\n[SIGNAL] {name} received, shutting down"));
}

pub fn log_shutdown(remaining_connections: usize) {
    if remaining_connections == 0 {
        write_info("[SHUTDOWN] All connections closed");
    } else {
        write_error(&format!(
            "[SHUTDOWN] Grace period over with {remaining_connections} connection(s) still open"
        ));
    }
}
