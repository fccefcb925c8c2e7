//! Upstream API module
//!
//! Authenticated access to the Twitter API: URL builders, the GET client and
//! the failure taxonomy shared by every handler.

mod client;
mod error;
pub mod urls;

pub use client::UpstreamClient;
pub use error::UpstreamError;
