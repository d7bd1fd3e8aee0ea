//! Conditional GET support
//!
//! Static files carry `Last-Modified`; `If-Modified-Since` revalidation
//! answers 304 when the file has not changed since the client's copy.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

const HTTP_DATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Revalidate on every use; uploads replace files in place
pub const CACHE_CONTROL: &str = "no-cache";

/// Format a timestamp as an IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE).to_string()
}

/// Whether a client's `If-Modified-Since` still covers `modified`
///
/// HTTP dates have second precision, so sub-second mtimes are truncated.
/// Unparseable headers never match.
pub fn is_not_modified(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(since) = if_modified_since.and_then(|v| DateTime::parse_from_rfc2822(v.trim()).ok())
    else {
        return false;
    };
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}
