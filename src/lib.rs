//! Single-page application static server.
//!
//! Serves a directory of static files and falls back to a configured index
//! document whenever a request path does not name an existing regular file,
//! so a client-side router can answer any sub-path with HTTP 200.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
