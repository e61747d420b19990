//! Gateway module
//!
//! Request dispatch across the API layer and the static mounts, plus the
//! mount table that fixes route precedence.

pub mod mounts;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
