// Configuration types module
// All sections are loaded once at startup and never mutated afterwards;
// changing any of them requires a process restart.

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub frontend: FrontendConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    /// Base directory for resolving relative filesystem roots.
    /// Defaults to the executable's parent directory.
    #[serde(default)]
    pub base_dir: Option<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Frontend serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FrontendConfig {
    /// Backend base URL advertised to the frontend. May be overridden by
    /// `frontend-settings.json` in the static root or by the environment.
    pub backend_base_url: String,
    /// Frontend bundle root, relative to the base directory unless absolute
    pub frontend_dir: String,
    /// Fixed asset root, relative to the base directory unless absolute
    pub static_dir: String,
}
