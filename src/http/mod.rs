//! HTTP protocol layer module
//!
//! Protocol-level building blocks for the file transfer contract: content
//! type lookup, conditional request handling, byte ranges, and response
//! builders. Kept free of routing decisions.

pub mod cache;
pub mod mime;
pub mod range;
pub mod response;
