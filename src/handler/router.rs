//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: preflight, API dispatch,
//! static serving, CORS headers and access logging.

use crate::api;
use crate::config::AppState;
use crate::handler::static_files::{self, StaticRequest};
use crate::http::{self, cors};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, IF_MODIFIED_SINCE, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
///
/// Generic over the body so tests can drive it with in-memory bodies.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let entry = state.access_log_enabled().then(|| {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            req.uri().path().to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.user_agent = header_str(&req, USER_AGENT).map(ToString::to_string);
        entry
    });

    let mut response = route_request(req, &state).await;
    cors::apply(&mut response);

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();

    // 1. CORS preflight
    if method == Method::OPTIONS {
        return http::build_empty_response(StatusCode::OK);
    }

    // 2. API namespace, plus any write/delete method
    if api::is_api_path(req.uri().path()) || method == Method::POST || method == Method::DELETE {
        if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
            return resp;
        }
        return api::handle_api(req, state).await;
    }

    // 3. Static files
    if method == Method::GET || method == Method::HEAD {
        let static_req = StaticRequest {
            path: req.uri().path(),
            query: req.uri().query(),
            is_head: method == Method::HEAD,
            if_modified_since: header_str(&req, IF_MODIFIED_SINCE),
        };
        return static_files::serve(
            &static_req,
            state.layout.root(),
            &state.config.http.index_files,
        )
        .await;
    }

    logger::log_warning(&format!("Method not allowed: {method}"));
    http::build_405_response()
}

/// Reject a declared Content-Length above the limit before reading the body
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let size_str = header_str(req, CONTENT_LENGTH)?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(api::payload_too_large())
        }
        Ok(_) => None,
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
    }
}

fn header_str<B>(req: &Request<B>, name: hyper::header::HeaderName) -> Option<&str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}
