//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method branching, route
//! resolution, handler dispatch and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Uri};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use super::{handle_param, latest_tweet, profile};
use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::RouteAction;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let cancel = state.request_token();
    // No endpoint reads the request body
    let (parts, _body) = req.into_parts();

    let response = dispatch(&parts, &state, &cancel).await;

    if state.config.logging.access_log {
        let entry = access_entry(&parts, &response, peer_addr, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Branch on method: preflight, routed endpoints, or 405
async fn dispatch(
    req: &Parts,
    state: &AppState,
    cancel: &CancellationToken,
) -> Response<Full<Bytes>> {
    match req.method {
        Method::OPTIONS => http::build_preflight_response(&req.headers),
        Method::GET | Method::HEAD | Method::POST => {
            route_request(&req.method, &req.uri, state, cancel).await
        }
        _ => {
            logger::log_warning(&format!("Method not allowed: {}", req.method));
            http::build_405_response()
        }
    }
}

/// Resolve the route and run its action
async fn route_request(
    method: &Method,
    uri: &Uri,
    state: &AppState,
    cancel: &CancellationToken,
) -> Response<Full<Bytes>> {
    match state.routes.resolve(method, uri.path()) {
        Some(RouteAction::Profile) => {
            let handle = handle_param(uri.query());
            profile::handle_profile(&handle, &state.upstream, cancel).await
        }
        Some(RouteAction::LatestTweet) => {
            let handle = handle_param(uri.query());
            latest_tweet::handle_latest_tweet(&handle, &state.upstream, cancel).await
        }
        Some(RouteAction::Direct {
            status,
            body,
            content_type,
        }) => http::build_direct_response(*status, body, content_type),
        None => http::build_404_response(),
    }
}

fn access_entry(
    req: &Parts,
    resp: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = match req.version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        _ => "1.1",
    }
    .to_string();
    entry.status = resp.status().as_u16();
    entry.body_bytes = resp.body().size_hint().exact().unwrap_or(0);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.upstream_error = resp
        .headers()
        .get("x-error-code")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}
