//! Request handler module
//!
//! The entry dispatcher and the two upstream-backed API handlers.

pub mod latest_tweet;
pub mod profile;
pub mod router;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use serde_json::Value;

use crate::http;
use crate::logger;
use crate::upstream::UpstreamError;

pub use router::handle_request;

/// `handle` query parameter, percent-decoded; empty when absent
pub fn handle_param(query: Option<&str>) -> String {
    query
        .and_then(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .find(|(key, _)| key == "handle")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}

/// Serialize an upstream payload for the response body
fn to_body(value: &Value) -> Result<Bytes, UpstreamError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| UpstreamError::Body(e.to_string()))
}

/// Turn a handler outcome into the CORS-wrapped response.
///
/// Success carries the JSON verbatim; every failure collapses to 400 with `reason`.
fn respond(
    result: Result<Bytes, UpstreamError>,
    handler: &str,
    handle: &str,
    reason: &'static str,
) -> Response<Full<Bytes>> {
    let resp = match result {
        Ok(body) => http::build_json_response(body),
        Err(err) => {
            logger::log_upstream_failure(handler, handle, &err);
            http::build_upstream_error_response(reason, err.code())
        }
    };
    http::with_cors(resp)
}
