//! HTTP protocol layer module
//!
//! Protocol-level building blocks shared by the static asset server and the
//! API layer: content types, cache validation, and response builders.

pub mod cache;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_413_response,
    build_options_response,
};
