//! HTTP cache control module
//!
//! `ETag` generation, `If-None-Match` evaluation, and HTTP date handling for
//! `Last-Modified` / `If-Modified-Since` conditional requests.

use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// IMF-fixdate layout from RFC 7231, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Generate a strong `ETag` for file content
///
/// The tag combines the content length with a content hash, quoted per
/// RFC 7232, e.g. `"1a2-9f86d081"`.
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}-{:x}\"", content.len(), hasher.finish())
}

/// Check whether the client's `If-None-Match` header matches the `ETag`
///
/// Handles a single tag, a comma-separated list, and the `*` wildcard.
/// Returns true when the client copy is current (respond 304).
pub fn none_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == "*" || candidate == etag)
    })
}

/// Format a filesystem timestamp as an HTTP date for `Last-Modified`
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format(HTTP_DATE_FORMAT)
        .to_string()
}

/// Parse an HTTP date header value
///
/// Only the IMF-fixdate form is accepted; the obsolete RFC 850 and asctime
/// forms are treated as malformed and ignored by callers.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), HTTP_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Check whether the file is unchanged since the client's `If-Modified-Since`
///
/// HTTP dates carry one-second granularity, so both sides are compared as
/// whole seconds. A missing or malformed header never matches (respond with
/// the full content).
pub fn unmodified_since(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Some(since) = parse_http_date(header) else {
        return false;
    };

    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}
