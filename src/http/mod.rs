//! HTTP protocol layer module
//!
//! Provides response builders for the statuses the dispatcher and server emit,
//! decoupled from command handling.

pub mod response;

// Re-export commonly used types
pub use response::{build_404_response, build_empty_response, build_payload_response};
