//! Access log line formatting
//!
//! Common-log-style request lines with local timestamps.

use chrono::{DateTime, Local};

/// Format a request line for the access log:
/// `[05/Aug/2026:14:03:21 +0000] "GET /static/app.css HTTP/1.1"`
pub fn request_line(method: &str, uri: &str, version: &str) -> String {
    timestamped_request_line(Local::now(), method, uri, version)
}

fn timestamped_request_line(
    time: DateTime<Local>,
    method: &str,
    uri: &str,
    version: &str,
) -> String {
    format!(
        "[{}] \"{method} {uri} {version}\"",
        time.format("%d/%b/%Y:%H:%M:%S %z")
    )
}
