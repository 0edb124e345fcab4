//! SPA fallback handler
//!
//! Maps a request path to a file under the public root. Paths that do not
//! name an existing regular file (missing, directory, stat error of any
//! kind) are answered with the configured index document so the client-side
//! router can take over. The actual transfer implements the static file
//! contract: content type by extension, conditional GET, byte ranges, and
//! the canonical redirect for direct index requests.

use crate::config::SpaConfig;
use crate::handler::router::RequestContext;
use crate::http::range::RangeOutcome;
use crate::http::{cache, mime, range, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Serve one request against the public root
pub async fn serve(ctx: &RequestContext<'_>, spa: &SpaConfig) -> Response<Full<Bytes>> {
    let target = resolve_target(spa, ctx.path).await;
    transfer(ctx, spa, &target).await
}

/// Decide which file a request path maps to
///
/// The request path is normalized before it is joined to the public root,
/// so the resolved path can never escape it. Every stat failure is folded
/// into the index fallback; distinguishing "not found" from permission or
/// I/O errors buys nothing here.
pub async fn resolve_target(spa: &SpaConfig, request_path: &str) -> PathBuf {
    let requested = Path::new(&spa.public_dir).join(normalize_path(request_path));

    match fs::metadata(&requested).await {
        Ok(meta) if meta.is_file() => requested,
        _ => Path::new(&spa.public_dir).join(&spa.index_file),
    }
}

/// Normalize a URL path into a root-relative filesystem path
///
/// `.` and empty segments are dropped; `..` pops a segment and saturates at
/// the top, so traversal sequences cannot climb above the joined root.
pub fn normalize_path(request_path: &str) -> PathBuf {
    let mut clean = PathBuf::new();
    for segment in Path::new(request_path).components() {
        match segment {
            Component::Normal(part) => clean.push(part),
            Component::ParentDir => {
                clean.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }
    clean
}

/// Transfer a file with full static-serving semantics
///
/// Order of decisions mirrors the contract: canonical index redirect first,
/// then conditional GET, then ranges, then the full body. A target that
/// cannot be read yields a plain 404 - when the fallback index itself is
/// missing there is nothing further to fall back to.
async fn transfer(
    ctx: &RequestContext<'_>,
    spa: &SpaConfig,
    target: &Path,
) -> Response<Full<Bytes>> {
    if is_direct_index_request(ctx.path, &spa.index_file) {
        return response::index_redirect_response();
    }

    let Ok(meta) = fs::metadata(target).await else {
        return response::not_found_response();
    };
    let content = match fs::read(target).await {
        Ok(content) => content,
        Err(e) => {
            logger::log_error(&format!("Failed to read '{}': {e}", target.display()));
            return response::not_found_response();
        }
    };

    let etag = cache::generate_etag(&content);
    let last_modified = meta.modified().ok().map(cache::format_http_date);

    // If-None-Match wins over If-Modified-Since when both are present
    if cache::none_match(ctx.if_none_match.as_deref(), &etag) {
        return response::not_modified_response(&etag, last_modified.as_deref());
    }
    if ctx.if_none_match.is_none() {
        if let Ok(mtime) = meta.modified() {
            if cache::unmodified_since(ctx.if_modified_since.as_deref(), mtime) {
                return response::not_modified_response(&etag, last_modified.as_deref());
            }
        }
    }

    let content_type = mime::content_type_for(target);
    match range::evaluate(ctx.range_header.as_deref(), content.len()) {
        RangeOutcome::Satisfiable(byte_range) => response::partial_response(
            Bytes::copy_from_slice(&content[byte_range.start..=byte_range.end]),
            content_type,
            &etag,
            last_modified.as_deref(),
            byte_range.start,
            byte_range.end,
            content.len(),
            ctx.is_head,
        ),
        RangeOutcome::Unsatisfiable => response::range_not_satisfiable_response(content.len()),
        RangeOutcome::Ignored => response::file_response(
            Bytes::from(content),
            content_type,
            &etag,
            last_modified.as_deref(),
            ctx.is_head,
        ),
    }
}

/// Check whether the request names the index document itself
///
/// `/index.html` and `/docs/index.html` both redirect to their directory
/// form; `/reindex.html` does not.
fn is_direct_index_request(request_path: &str, index_file: &str) -> bool {
    request_path
        .strip_suffix(index_file)
        .is_some_and(|prefix| prefix.ends_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_plain_paths() {
        assert_eq!(normalize_path("/"), PathBuf::new());
        assert_eq!(normalize_path("/js/test.js"), PathBuf::from("js/test.js"));
        assert_eq!(normalize_path("login"), PathBuf::from("login"));
    }

    #[test]
    fn test_normalize_collapses_dot_segments() {
        assert_eq!(normalize_path("/a/./b//c"), PathBuf::from("a/b/c"));
        assert_eq!(normalize_path("/a/b/../c"), PathBuf::from("a/c"));
    }

    #[test]
    fn test_normalize_saturates_at_root() {
        assert_eq!(normalize_path("/../../etc/passwd"), PathBuf::from("etc/passwd"));
        assert_eq!(normalize_path("/.."), PathBuf::new());
        assert_eq!(normalize_path("/a/../../../b"), PathBuf::from("b"));
    }

    #[test]
    fn test_direct_index_request() {
        assert!(is_direct_index_request("/index.html", "index.html"));
        assert!(is_direct_index_request("/docs/index.html", "index.html"));
        assert!(!is_direct_index_request("/", "index.html"));
        assert!(!is_direct_index_request("/reindex.html", "index.html"));
        assert!(!is_direct_index_request("/index.html/more", "index.html"));
    }
}
