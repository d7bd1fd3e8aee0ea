//! HTTP protocol layer module
//!
//! Response builders, CORS, MIME detection and conditional GET,
//! decoupled from the asset/API logic.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_301_response, build_304_response, build_404_response, build_405_response, build_empty_response,
    build_file_response,
};
