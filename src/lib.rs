//! DIMSum asset dev server
//!
//! Static file server with upload/delete endpoints for the mobile app's
//! offline asset cache, plus the infografis image prefetcher.

pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod prefetch;
pub mod sanitize;
pub mod server;
