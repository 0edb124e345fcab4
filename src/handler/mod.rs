//! Request handler module
//!
//! Routing dispatch plus the SPA fallback logic that decides between a
//! literal file and the index document.

pub mod router;
pub mod spa;

// Re-export main entry point
pub use router::handle_request;
