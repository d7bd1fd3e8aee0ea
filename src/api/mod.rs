// API module entry
// Upload/save/delete endpoints backing the app's offline asset cache

mod handlers;
mod response;
mod types;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};

use crate::assets::UploadTarget;
use crate::config::AppState;
use crate::http;
use crate::logger;

pub use response::payload_too_large;

/// Path prefix reserved for the API
pub const API_PREFIX: &str = "/api/";

/// Whether `path` belongs to the API namespace
pub fn is_api_path(path: &str) -> bool {
    path.starts_with(API_PREFIX) || path == "/api"
}

/// API route handler
///
/// Dispatches on method and exact path. Anything unmatched is a bodiless 404.
pub async fn handle_api<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match (method, path.as_str()) {
        (Method::POST, "/api/sqlite/save") => handlers::save_database(req, state).await,
        (Method::POST, "/api/upload/infografis") => {
            handlers::upload(req, state, UploadTarget::Infografis).await
        }
        (Method::POST, "/api/upload/excel") => {
            handlers::upload(req, state, UploadTarget::Excel).await
        }
        (Method::DELETE, "/api/delete/infografis") => {
            handlers::delete(req.uri().query(), state, UploadTarget::Infografis).await
        }
        (Method::DELETE, "/api/delete/excel") => {
            handlers::delete(req.uri().query(), state, UploadTarget::Excel).await
        }
        (method, _) => {
            logger::log_warning(&format!("Unknown API route: {method} {path}"));
            http::build_empty_response(StatusCode::NOT_FOUND)
        }
    }
}
