//! Logger module
//!
//! Logging utilities shared by the dev server and the prefetcher:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - API write/delete logging
//! - Prefetch progress and summary lines
//!
//! Output goes to stdout/stderr until [`init`] points it at log files.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::assets::AssetLayout;
use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, layout: &AssetLayout) {
    write_info("======================================");
    write_info("[dev_server] DIMSum asset server started");
    write_info(&format!(
        "[dev_server] Serving {} at http://{addr}",
        layout.root().display()
    ));
    write_info(&format!("  - Database:   {}", layout.database_path().display()));
    write_info(&format!("  - Infografis: {}", layout.infografis_dir().display()));
    write_info(&format!("  - Excel:      {}", layout.excel_dir().display()));
    write_info(&format!("  - Max body size: {} bytes", config.http.max_body_size));
    if let Some(workers) = config.server.workers {
        write_info(&format!("  - Worker threads: {workers}"));
    }
    if let Some(max) = config.performance.max_connections {
        write_info(&format!("  - Max connections: {max}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("  - Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("  - Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_shutdown(reason: &str) {
    write_info(&format!("[dev_server] {reason}, closing listener"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

/// A file was written by an upload/save endpoint
pub fn log_api_write(path: &Path, bytes: usize) {
    write_info(&format!("[API] Wrote {bytes} bytes to {}", path.display()));
}

/// A file was removed by a delete endpoint
pub fn log_api_delete(path: &Path, existed: bool) {
    if existed {
        write_info(&format!("[API] Deleted {}", path.display()));
    } else {
        write_info(&format!("[API] Nothing to delete at {}", path.display()));
    }
}

pub fn log_api_failure(message: &str) {
    write_error(&format!("[API ERROR] {message}"));
}

pub fn log_prefetch_db_missing(path: &Path) {
    write_info(&format!("DB not found: {}", path.display()));
}

pub fn log_prefetch_saved(name: &str) {
    write_info(&format!("Saved {name}"));
}

pub fn log_prefetch_failed(url: &str, err: &impl std::fmt::Display) {
    write_info(&format!("Fail {url} {err}"));
}

pub fn log_prefetch_done(downloaded: usize, skipped: usize, failed: usize) {
    write_info(&format!(
        "Done: downloaded {downloaded} skipped {skipped} failed {failed}"
    ));
}
