//! Application state module
//!
//! Everything a request needs, built once at startup and shared read-only

use tokio_util::sync::CancellationToken;

use super::types::Config;
use crate::routing::RouteTable;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state
pub struct AppState {
    pub config: Config,
    /// Route table, fixed for the process lifetime
    pub routes: RouteTable,
    /// Client for the upstream API
    pub upstream: UpstreamClient,
    /// Root cancellation token; cancelled on shutdown, parent of every request token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::from_config(&config.upstream, config.bearer_token())?;
        let routes = RouteTable::standard(&config.routes);

        Ok(Self {
            config: config.clone(),
            routes,
            upstream,
            shutdown: CancellationToken::new(),
        })
    }

    /// Token for a single request, cancelled when the server shuts down
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
