// Configuration module entry point
// Layered loading with documented precedence:
// built-in defaults < config file < frontend-settings.json < environment.

mod settings;
mod state;
mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::builder::{ConfigBuilder, DefaultState};

use crate::error::GatewayError;
use crate::logger;

// Re-export public types
pub use settings::{GatewaySettings, DEFAULT_BACKEND_BASE_URL, FRONTEND_SETTINGS_FILE};
pub use state::AppState;
pub use types::{Config, FrontendConfig, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig};

/// Prefix for environment overrides, e.g. `FASTAI__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "FASTAI";

impl Config {
    /// Load configuration from the specified file path (without extension).
    ///
    /// The file is optional; environment variables override it.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = builder_with_defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Like [`Config::load_from`], but an unusable config file is a
    /// diagnostic, not an error: the gateway falls back to defaults plus
    /// environment overrides.
    pub fn load_or_default(config_path: &str) -> Result<Self, config::ConfigError> {
        match Self::load_from(config_path) {
            Ok(cfg) => Ok(cfg),
            Err(err) => {
                logger::log_config_fallback(&format!(
                    "config file '{config_path}' unusable: {err}; continuing with defaults"
                ));
                let settings = builder_with_defaults()?
                    .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
                    .build()?;
                settings.try_deserialize()
            }
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Application base directory for resolving relative filesystem roots.
///
/// The executable's location, not the process CWD, so behavior does not
/// depend on where the gateway was launched from. `server.base_dir`
/// overrides it.
pub fn base_dir(server: &ServerConfig) -> Result<PathBuf, GatewayError> {
    if let Some(ref dir) = server.base_dir {
        return Ok(PathBuf::from(dir));
    }
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        GatewayError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        ))
    })
}

fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8000)?
        .set_default("logging.level", "info")?
        .set_default("logging.access_log", true)?
        .set_default("logging.show_headers", false)?
        .set_default("performance.keep_alive_timeout", 75)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("http.enable_cors", false)?
        .set_default("http.max_body_size", 10_485_760)? // 10MB
        .set_default("frontend.backend_base_url", DEFAULT_BACKEND_BASE_URL)?
        .set_default("frontend.frontend_dir", "frontend")?
        .set_default("frontend.static_dir", "static")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_config_file() {
        let cfg = Config::load_from("___no_such_config_file").unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.frontend.backend_base_url, DEFAULT_BACKEND_BASE_URL);
        assert_eq!(cfg.frontend.frontend_dir, "frontend");
        assert_eq!(cfg.frontend.static_dir, "static");
        assert!(cfg.logging.access_log);
        assert!(cfg.server.workers.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load_from("___no_such_config_file").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_base_dir_override() {
        let cfg = Config::load_from("___no_such_config_file").unwrap();
        let mut server = cfg.server;
        server.base_dir = Some("/opt/fastai".to_string());
        assert_eq!(base_dir(&server).unwrap(), PathBuf::from("/opt/fastai"));
    }
}
