//! Route matching module
//!
//! Exact-path route table with a single fallback entry.

use hyper::Method;

use crate::config::RoutesConfig;

/// Methods the API endpoints answer on
pub const ROUTED_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::POST];

/// Route action - what to do when a route matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Upstream profile lookup by handle
    Profile,
    /// Two-step latest tweet lookup by handle
    LatestTweet,
    /// Fixed response (root message, health checks)
    Direct {
        status: u16,
        body: String,
        content_type: String,
    },
}

impl RouteAction {
    pub fn text(status: u16, body: &str) -> Self {
        Self::Direct {
            status,
            body: body.to_string(),
            content_type: "text/plain;charset=UTF-8".to_string(),
        }
    }
}

/// A registered (methods, exact path, action) triple
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub methods: Vec<Method>,
    pub path: String,
    pub action: RouteAction,
}

impl RouteEntry {
    fn matches(&self, method: &Method, path: &str) -> bool {
        self.path == path && self.methods.contains(method)
    }
}

/// Route table, built once at startup
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    default: Option<RouteEntry>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The proxy's routes: `/user`, `/latest-tweet`, optional health check, `/` as the fallback
    pub fn standard(config: &RoutesConfig) -> Self {
        let mut table = Self::new();
        table.register(&ROUTED_METHODS, "/user", RouteAction::Profile);
        table.register(&ROUTED_METHODS, "/latest-tweet", RouteAction::LatestTweet);
        if config.health.enabled {
            table.register(&ROUTED_METHODS, &config.health.path, RouteAction::text(200, "ok"));
        }
        table.register_default(&ROUTED_METHODS, "/", RouteAction::text(200, "Invalid route"));
        table
    }

    pub fn register(&mut self, methods: &[Method], path: &str, action: RouteAction) {
        self.entries.push(RouteEntry {
            methods: methods.to_vec(),
            path: path.to_string(),
            action,
        });
    }

    /// Register the fallback entry, also matched exactly at `path`
    pub fn register_default(&mut self, methods: &[Method], path: &str, action: RouteAction) {
        self.default = Some(RouteEntry {
            methods: methods.to_vec(),
            path: path.to_string(),
            action,
        });
    }

    /// First entry whose method and exact path match, else the default, else `None`
    pub fn resolve(&self, method: &Method, path: &str) -> Option<&RouteAction> {
        self.entries
            .iter()
            .find(|entry| entry.matches(method, path))
            .or(self.default.as_ref())
            .map(|entry| &entry.action)
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}
