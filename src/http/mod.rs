//! HTTP protocol layer module
//!
//! Response builders and CORS handling, decoupled from the handlers that use them.

pub mod cors;
pub mod response;

pub use cors::{build_preflight_response, with_cors};
pub use response::{
    build_404_response, build_405_response, build_direct_response, build_json_response,
    build_upstream_error_response,
};
