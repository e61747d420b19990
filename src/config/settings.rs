//! Gateway settings resolver
//!
//! Produces the immutable settings value the rest of the gateway runs on:
//! the backend base URL the frontend should call and the absolute filesystem
//! roots for the two mounts. Built once at bootstrap, never rebuilt without
//! a process restart.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::GatewayError;
use crate::logger;

/// Backend base URL when nothing overrides it
pub const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8000";

/// Overlay file the frontend fetches at load time; the gateway also reads it
/// at startup and serves it verbatim under the static mount.
pub const FRONTEND_SETTINGS_FILE: &str = "frontend-settings.json";

/// Environment variable that outranks the overlay file
const BACKEND_URL_ENV: &str = "FASTAI__FRONTEND__BACKEND_BASE_URL";

/// Immutable resolved settings
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Validated absolute URL the frontend directs API calls to
    pub backend_base_url: String,
    /// Absolute root of the frontend bundle
    pub frontend_dir: PathBuf,
    /// Absolute root of the fixed assets
    pub static_dir: PathBuf,
}

/// On-disk shape of the overlay file
#[derive(Debug, Deserialize)]
struct FrontendSettings {
    #[serde(rename = "backendBaseUrl")]
    backend_base_url: String,
}

impl GatewaySettings {
    /// Resolve the settings from the layered configuration.
    ///
    /// Filesystem roots are made absolute against `base_dir`. The backend
    /// base URL follows the documented precedence: configured value (defaults
    /// or config file) < `frontend-settings.json` < environment. A layer
    /// carrying an invalid URL is skipped with a diagnostic; resolution fails
    /// only when no layer yields a valid absolute URL.
    pub fn resolve(cfg: &Config, base_dir: &Path) -> Result<Self, GatewayError> {
        let frontend_dir = absolutize(base_dir, &cfg.frontend.frontend_dir);
        let static_dir = absolutize(base_dir, &cfg.frontend.static_dir);

        let overlay = read_overlay(&static_dir.join(FRONTEND_SETTINGS_FILE));
        let env_value = std::env::var(BACKEND_URL_ENV).ok();
        let backend_base_url =
            merge_backend_base_url(&cfg.frontend.backend_base_url, overlay, env_value)?;

        Ok(Self {
            backend_base_url,
            frontend_dir,
            static_dir,
        })
    }
}

fn absolutize(base_dir: &Path, dir: &str) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Read the overlay file's backend base URL.
///
/// A missing file is the normal case; an unreadable or malformed file is a
/// diagnostic, never a startup failure.
fn read_overlay(path: &Path) -> Option<String> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            logger::log_config_fallback(&format!("cannot read '{}': {err}", path.display()));
            return None;
        }
    };

    match parse_overlay(&raw) {
        Ok(url) => Some(url),
        Err(err) => {
            logger::log_config_fallback(&format!(
                "malformed '{}': {err}; ignoring overlay",
                path.display()
            ));
            None
        }
    }
}

fn parse_overlay(raw: &str) -> Result<String, serde_json::Error> {
    serde_json::from_str::<FrontendSettings>(raw).map(|s| s.backend_base_url)
}

/// Pick the backend base URL from the highest layer carrying a valid
/// absolute URL. Layers with invalid URLs are skipped with a diagnostic.
fn merge_backend_base_url(
    configured: &str,
    overlay: Option<String>,
    env_value: Option<String>,
) -> Result<String, GatewayError> {
    let layers = [(env_value, "environment"), (overlay, "frontend-settings")];
    for (candidate, origin) in layers {
        if let Some(url) = candidate {
            match validate_backend_url(&url) {
                Ok(()) => return Ok(url),
                Err(err) => {
                    logger::log_config_fallback(&format!("{origin} backend URL ignored: {err}"));
                }
            }
        }
    }

    validate_backend_url(configured)?;
    Ok(configured.to_string())
}

/// A usable backend base URL is absolute: scheme and authority present.
fn validate_backend_url(url: &str) -> Result<(), GatewayError> {
    let uri: hyper::Uri = url.parse().map_err(|e: hyper::http::uri::InvalidUri| {
        GatewayError::InvalidBackendUrl {
            url: url.to_string(),
            reason: e.to_string(),
        }
    })?;

    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(GatewayError::InvalidBackendUrl {
            url: url.to_string(),
            reason: "URL must be absolute (scheme and host required)".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_config(static_dir: &Path) -> Config {
        let mut cfg = Config::load_from("___no_such_config_file").unwrap();
        cfg.frontend.static_dir = static_dir.to_string_lossy().into_owned();
        cfg
    }

    #[test]
    fn test_default_when_no_overlay() {
        let url = merge_backend_base_url(DEFAULT_BACKEND_BASE_URL, None, None).unwrap();
        assert_eq!(url, DEFAULT_BACKEND_BASE_URL);
    }

    #[test]
    fn test_overlay_wins_over_configured() {
        let url = merge_backend_base_url(
            DEFAULT_BACKEND_BASE_URL,
            Some("https://api.example.com".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(url, "https://api.example.com");
    }

    #[test]
    fn test_environment_wins_over_overlay() {
        let url = merge_backend_base_url(
            DEFAULT_BACKEND_BASE_URL,
            Some("https://api.example.com".to_string()),
            Some("https://env.example.com".to_string()),
        )
        .unwrap();
        assert_eq!(url, "https://env.example.com");
    }

    #[test]
    fn test_invalid_layer_falls_through() {
        let url = merge_backend_base_url(
            DEFAULT_BACKEND_BASE_URL,
            Some("/relative/path".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(url, DEFAULT_BACKEND_BASE_URL);
    }

    #[test]
    fn test_no_valid_layer_fails() {
        let result = merge_backend_base_url("not a url at all", None, None);
        assert!(matches!(
            result,
            Err(GatewayError::InvalidBackendUrl { .. })
        ));
    }

    #[test]
    fn test_validate_backend_url() {
        assert!(validate_backend_url("http://localhost:8000").is_ok());
        assert!(validate_backend_url("https://api.example.com/v1").is_ok());
        assert!(validate_backend_url("/api").is_err());
        assert!(validate_backend_url("not a url at all").is_err());
    }

    #[test]
    fn test_parse_overlay() {
        let url = parse_overlay(r#"{"backendBaseUrl": "https://api.example.com"}"#).unwrap();
        assert_eq!(url, "https://api.example.com");

        assert!(parse_overlay("{ not json").is_err());
        assert!(parse_overlay(r#"{"somethingElse": 1}"#).is_err());
    }

    #[test]
    fn test_resolve_reads_overlay_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(FRONTEND_SETTINGS_FILE),
            r#"{"backendBaseUrl": "https://api.example.com"}"#,
        )
        .unwrap();

        let cfg = test_config(dir.path());
        let settings = GatewaySettings::resolve(&cfg, dir.path()).unwrap();
        assert_eq!(settings.backend_base_url, "https://api.example.com");
        assert_eq!(settings.static_dir, dir.path());
    }

    #[test]
    fn test_resolve_defaults_without_overlay_file() {
        let dir = tempdir().unwrap();
        let cfg = test_config(dir.path());
        let settings = GatewaySettings::resolve(&cfg, dir.path()).unwrap();
        assert_eq!(settings.backend_base_url, DEFAULT_BACKEND_BASE_URL);
    }

    #[test]
    fn test_resolve_ignores_malformed_overlay() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(FRONTEND_SETTINGS_FILE), "{ not json").unwrap();

        let cfg = test_config(dir.path());
        let settings = GatewaySettings::resolve(&cfg, dir.path()).unwrap();
        assert_eq!(settings.backend_base_url, DEFAULT_BACKEND_BASE_URL);
    }

    #[test]
    fn test_resolve_absolutizes_relative_roots() {
        let dir = tempdir().unwrap();
        let cfg = Config::load_from("___no_such_config_file").unwrap();
        let settings = GatewaySettings::resolve(&cfg, dir.path()).unwrap();
        assert_eq!(settings.frontend_dir, dir.path().join("frontend"));
        assert_eq!(settings.static_dir, dir.path().join("static"));
    }
}
