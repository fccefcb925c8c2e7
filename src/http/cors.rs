//! CORS handling
//!
//! Preflight answers for OPTIONS requests and the wrapper that stamps the
//! permissive cross-origin headers onto every API endpoint response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, VARY};
use hyper::{HeaderMap, Response};

pub const ALLOWED_METHODS: &str = "GET,HEAD,POST,OPTIONS";
pub const ALLOW_HEADER: &str = "GET, HEAD, POST, OPTIONS";
pub const MAX_AGE: &str = "86400";

/// Answer an OPTIONS request.
///
/// A real preflight carries `Origin`, `Access-Control-Request-Method` and
/// `Access-Control-Request-Headers`; anything else is a plain OPTIONS probe.
pub fn build_preflight_response(headers: &HeaderMap) -> Response<Full<Bytes>> {
    let requested_headers = headers.get("access-control-request-headers");
    let is_preflight = headers.contains_key("origin")
        && headers.contains_key("access-control-request-method")
        && requested_headers.is_some();

    let mut builder = Response::builder().status(204);
    builder = match requested_headers {
        Some(requested) if is_preflight => builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Max-Age", MAX_AGE)
            .header("Access-Control-Allow-Headers", requested.clone()),
        _ => builder.header("Allow", ALLOW_HEADER),
    };

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to build OPTIONS response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}

/// Stamp `Access-Control-Allow-Origin: *` and append `Vary: Origin`
pub fn with_cors(mut resp: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let headers = resp.headers_mut();
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.append(VARY, HeaderValue::from_static("Origin"));
    resp
}
