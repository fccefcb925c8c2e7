//! HTTP response building module
//!
//! Builders for every response shape the proxy produces. Custom status texts
//! are carried as a `ReasonPhrase` extension, which hyper writes on HTTP/1.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::ext::ReasonPhrase;
use hyper::Response;

/// Build 405 Method Not Allowed response (empty body, no CORS headers)
pub fn build_405_response() -> Response<Full<Bytes>> {
    let mut resp = Response::builder()
        .status(405)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::new()))
        });
    resp.extensions_mut()
        .insert(ReasonPhrase::from_static(b"Method Not Allowed"));
    resp
}

/// Build 404 Not Found response, used only when no default route exists
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Not Found")))
        })
}

/// Build a fixed response (root message, health check)
pub fn build_direct_response(status: u16, body: &str, content_type: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response carrying upstream JSON verbatim
pub fn build_json_response(body: Bytes) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 400 handler failure: empty body, fixed status text, machine-readable code
pub fn build_upstream_error_response(reason: &'static str, code: &'static str) -> Response<Full<Bytes>> {
    let mut resp = Response::builder()
        .status(400)
        .header("Content-Type", "application/json")
        .header("X-Error-Code", code)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("400", &e);
            Response::new(Full::new(Bytes::new()))
        });
    resp.extensions_mut()
        .insert(ReasonPhrase::from_static(reason.as_bytes()));
    resp
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
