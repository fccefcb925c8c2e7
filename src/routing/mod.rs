//! Routing module
//!
//! Maps method + path to a route action. Matching is exact-path; anything
//! unmatched falls through to the table's default entry.

mod matcher;

pub use matcher::{RouteAction, RouteEntry, RouteTable, ROUTED_METHODS};
