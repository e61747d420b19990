//! Error types for the gateway.
//!
//! Bootstrap errors abort the process with a non-zero exit code; request
//! errors are confined to the single request that raised them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while bootstrapping the gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The layered configuration could not be built at all.
    #[error("configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    /// No layer produced a usable absolute URL for the backend base.
    #[error("invalid backend base URL '{url}': {reason}")]
    InvalidBackendUrl { url: String, reason: String },

    /// A mount points at a root that is missing or not a directory.
    #[error("mount root '{}' for prefix '{prefix}' does not exist or is not a directory", root.display())]
    MountValidation { prefix: String, root: PathBuf },

    /// The mount table violates the precedence invariants.
    #[error("mount table: {0}")]
    MountOrdering(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Request-scoped failures from the static asset server.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset not found")]
    NotFound,

    /// The request path tried to escape the mount root.
    #[error("path traversal rejected")]
    TraversalRejected,
}
