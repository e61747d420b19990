//! Logger module
//!
//! Logging utilities for the gateway:
//! - Server lifecycle logging
//! - Access logging with timestamps
//! - Error, warning, and security-event logging
//! - File-based logging support

mod format;
pub mod writer;

use crate::config::{Config, GatewaySettings};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup, before the listener binds.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
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

pub fn log_server_start(addr: &SocketAddr, config: &Config, settings: &GatewaySettings) {
    write_info("======================================");
    write_info("Gateway started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Backend base URL: {}", settings.backend_base_url));
    write_info(&format!(
        "Frontend root: {}",
        settings.frontend_dir.display()
    ));
    write_info(&format!("Static root: {}", settings.static_dir.display()));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_request(method: &hyper::Method, uri: &hyper::Uri, version: hyper::Version) {
    write_info(&format::request_line(
        method.as_str(),
        &uri.to_string(),
        &format!("{version:?}"),
    ));
}

pub fn log_response(bytes: usize) {
    write_info(&format!("[Response] {bytes} bytes"));
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

/// Security-relevant events, e.g. blocked path traversal attempts
pub fn log_security(message: &str) {
    write_error(&format!("[SECURITY] {message}"));
}

/// Diagnostics for recoverable configuration problems
pub fn log_config_fallback(message: &str) {
    write_error(&format!("[CONFIG] {message}"));
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        write_info(&format!("[Headers] Count: {count}"));
    }
}

pub fn log_api_request(method: &str, path: &str, status: u16) {
    write_info(&format!("[API] {method} {path} - {status}"));
}

pub fn log_shutdown() {
    write_info("[Shutdown] Stopped accepting connections, exiting");
}
