//! Static file serving module
//!
//! Serves files under the asset root with index-file support, MIME detection
//! and `Last-Modified` revalidation. Directories asked for without a trailing
//! slash are redirected first.

use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tokio::fs;

/// The parts of a GET/HEAD request static serving looks at
pub struct StaticRequest<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
}

/// A file loaded from the asset root
pub struct StaticFile {
    pub content: Vec<u8>,
    pub content_type: &'static str,
    pub modified: Option<SystemTime>,
}

/// Serve a request path from `root`
pub async fn serve(
    req: &StaticRequest<'_>,
    root: &Path,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    if !req.path.ends_with('/') {
        if let Some(candidate) = resolve_relative(root, req.path) {
            if is_dir(&candidate).await {
                return http::build_301_response(&directory_location(req.path, req.query));
            }
        }
    }

    let Some(file) = load_from_root(root, req.path, index_files).await else {
        return http::build_404_response();
    };

    let last_modified = file.modified.map(cache::format_http_date);
    if let (Some(modified), Some(header)) = (file.modified, last_modified.as_deref()) {
        if cache::is_not_modified(req.if_modified_since, modified) {
            return http::build_304_response(header);
        }
    }

    http::build_file_response(
        file.content,
        file.content_type,
        last_modified.as_deref(),
        req.is_head,
    )
}

/// Resolve a percent-encoded request path under `root` and read the file.
///
/// Directories resolve to the first existing index file. Paths with `..`
/// components, or that canonicalize outside `root` (symlinks), are refused.
pub async fn load_from_root(
    root: &Path,
    request_path: &str,
    index_files: &[String],
) -> Option<StaticFile> {
    let mut file_path = resolve_relative(root, request_path)?;

    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Asset root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    if is_dir(&file_path).await {
        file_path = find_index_file(&file_path, index_files).await?;
    }

    // File not found is common (404), no need to log at warning level
    let canonical = fs::canonicalize(&file_path).await.ok()?;
    if !canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            canonical.display()
        ));
        return None;
    }

    let metadata = fs::metadata(&canonical).await.ok()?;
    if !metadata.is_file() {
        return None;
    }

    let content = match fs::read(&canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                canonical.display()
            ));
            return None;
        }
    };

    Some(StaticFile {
        content,
        content_type: mime::content_type_for(&file_path),
        modified: metadata.modified().ok(),
    })
}

/// Decode `request_path` and join it onto `root`, refusing anything but plain segments
fn resolve_relative(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));

    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return None;
    }
    Some(root.join(relative))
}

fn directory_location(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("{path}/?{q}"),
        None => format!("{path}/"),
    }
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for index_file in index_files {
        let candidate = dir.join(index_file);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}
