// API handlers module
// Save, upload and delete endpoints; each touches exactly one file

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::error::Error as StdError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::response;
use super::types::query_param;
use crate::assets::UploadTarget;
use crate::config::AppState;
use crate::error::StorageError;
use crate::logger;
use crate::sanitize::safe_filename;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure while collecting a request body
#[derive(Debug, thiserror::Error)]
enum BodyError {
    #[error("request body too large")]
    TooLarge,
    #[error("failed to read request body: {0}")]
    Read(BoxError),
}

/// `POST /api/sqlite/save`: overwrite the cached database with the body
pub async fn save_database<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let target = state.layout.database_path();
    match store_body(req.into_body(), &target, state.config.http.max_body_size).await {
        Ok(()) => response::ok_with_message("db saved"),
        Err(resp) => resp,
    }
}

/// `POST /api/upload/{infografis,excel}?filename=...`
pub async fn upload<B>(
    req: Request<B>,
    state: &AppState,
    target: UploadTarget,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let name = query_param(req.uri().query(), "filename")
        .unwrap_or_else(|| target.default_filename().to_string());
    let path = target.dir(&state.layout).join(safe_filename(&name));

    match store_body(req.into_body(), &path, state.config.http.max_body_size).await {
        Ok(()) => response::ok(),
        Err(resp) => resp,
    }
}

/// `DELETE /api/delete/{infografis,excel}?filename=...`
///
/// Succeeds whether or not the file existed.
pub async fn delete(
    query: Option<&str>,
    state: &AppState,
    target: UploadTarget,
) -> Response<Full<Bytes>> {
    let name = query_param(query, "filename").unwrap_or_default();
    let path = target.dir(&state.layout).join(safe_filename(&name));

    match remove_if_file(&path).await {
        Ok(existed) => {
            logger::log_api_delete(&path, existed);
            response::ok()
        }
        Err(e) => response::internal_error(&e),
    }
}

/// Collect the body and write it over `path`, mapping failures to responses
async fn store_body<B>(body: B, path: &Path, max_body_size: u64) -> Result<(), Response<Full<Bytes>>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let bytes = match read_body(body, max_body_size).await {
        Ok(bytes) => bytes,
        Err(BodyError::TooLarge) => {
            logger::log_warning(&format!(
                "Rejected upload to {}: body exceeds {max_body_size} bytes",
                path.display()
            ));
            return Err(response::payload_too_large());
        }
        Err(e) => return Err(response::internal_error(&e)),
    };

    write_file(path, &bytes)
        .await
        .map_err(|e| response::internal_error(&e))?;
    logger::log_api_write(path, bytes.len());
    Ok(())
}

async fn read_body<B>(body: B, max_body_size: u64) -> Result<Bytes, BodyError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<BoxError>,
{
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => Err(BodyError::TooLarge),
        Err(e) => Err(BodyError::Read(e)),
    }
}

/// Whole-file overwrite
async fn write_file(path: &Path, data: &[u8]) -> Result<(), StorageError> {
    fs::write(path, data).await.map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Remove `path` if it is a regular file; returns whether something was removed
async fn remove_if_file(path: &Path) -> Result<bool, StorageError> {
    let is_file = fs::metadata(path).await.is_ok_and(|m| m.is_file());
    if !is_file {
        return Ok(false);
    }

    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        // Lost a race with another delete
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StorageError::Remove {
            path: PathBuf::from(path),
            source,
        }),
    }
}
