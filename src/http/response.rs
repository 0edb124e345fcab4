//! HTTP response building module
//!
//! Builders for every status the server emits. Builder failures are logged
//! and degraded to an empty response rather than propagated; the handler
//! contract is that every request gets a response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build a full 200 response for file content
///
/// `Content-Length` always reflects the file size, including for HEAD.
pub fn file_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600");
    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder
        .body(Full::new(body))
        .unwrap_or_else(|e| degraded("200", &e))
}

/// Build a 206 Partial Content response for a byte range
#[allow(clippy::too_many_arguments)]
pub fn partial_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    start: usize,
    end: usize,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = end - start + 1;
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes")
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600");
    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder
        .body(Full::new(body))
        .unwrap_or_else(|e| degraded("206", &e))
}

/// Build a 301 redirect to the directory form of the index document
///
/// Keeps a single canonical URL for the index: `/some/dir/index.html` is
/// answered with `Location: ./` instead of duplicate content.
pub fn index_redirect_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(301)
        .header("Location", "./")
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Moved Permanently")))
        .unwrap_or_else(|e| degraded("301", &e))
}

/// Build a 304 Not Modified response
///
/// Mirrors the validator headers of the 200 it stands in for.
pub fn not_modified_response(etag: &str, last_modified: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=3600");
    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| degraded("304", &e))
}

/// Build a 404 Not Found response
pub fn not_found_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| degraded("404", &e))
}

/// Build a 405 Method Not Allowed response
pub fn method_not_allowed_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| degraded("405", &e))
}

/// Build a 204 response for OPTIONS preflight
pub fn options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| degraded("OPTIONS", &e))
}

/// Build a 416 Range Not Satisfiable response
pub fn range_not_satisfiable_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("Range Not Satisfiable")))
        .unwrap_or_else(|e| degraded("416", &e))
}

/// Log a builder failure and fall back to an empty 200
fn degraded(status: &str, error: &hyper::http::Error) -> Response<Full<Bytes>> {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
    Response::new(Full::new(Bytes::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_response_head_keeps_length() {
        let resp = file_response(
            Bytes::from_static(b"hello"),
            "text/plain; charset=utf-8",
            "\"5-abc\"",
            None,
            true,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "5");
    }

    #[test]
    fn test_index_redirect_is_relative() {
        let resp = index_redirect_response();
        assert_eq!(resp.status(), 301);
        assert_eq!(resp.headers()["Location"], "./");
    }

    #[test]
    fn test_partial_response_content_range() {
        let resp = partial_response(
            Bytes::from_static(b"ell"),
            "text/plain; charset=utf-8",
            "\"5-abc\"",
            Some("Sun, 06 Nov 1994 08:49:37 GMT"),
            1,
            3,
            5,
            false,
        );
        assert_eq!(resp.status(), 206);
        assert_eq!(resp.headers()["Content-Range"], "bytes 1-3/5");
        assert_eq!(resp.headers()["Content-Length"], "3");
    }

    #[test]
    fn test_not_modified_mirrors_validators() {
        let resp = not_modified_response("\"5-abc\"", Some("Sun, 06 Nov 1994 08:49:37 GMT"));
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers()["ETag"], "\"5-abc\"");
        assert_eq!(
            resp.headers()["Last-Modified"],
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );

        let resp = not_modified_response("\"5-abc\"", None);
        assert!(!resp.headers().contains_key("Last-Modified"));
    }

    #[test]
    fn test_options_response() {
        let resp = options_response();
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_method_not_allowed_names_allowed_methods() {
        let resp = method_not_allowed_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[test]
    fn test_range_not_satisfiable_reports_size() {
        let resp = range_not_satisfiable_response(1234);
        assert_eq!(resp.status(), 416);
        assert_eq!(resp.headers()["Content-Range"], "bytes */1234");
    }
}
