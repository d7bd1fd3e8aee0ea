//! Filename sanitization
//!
//! Every caller-supplied or URL-derived filename goes through one of these
//! functions before it is joined onto an asset directory. The output never
//! contains `/` or `\`, so the joined path always stays inside that directory.

/// Fallback name for uploads whose name sanitizes to nothing
pub const DEFAULT_UPLOAD_NAME: &str = "file.bin";

/// Fallback name for prefetched images
pub const DEFAULT_IMAGE_NAME: &str = "file.png";

const MAX_UPLOAD_NAME_CHARS: usize = 120;
const MAX_IMAGE_NAME_CHARS: usize = 160;

/// Sanitize an upload/delete filename.
///
/// Keeps the last path segment (splitting on `/` and `\`), retains
/// alphanumerics plus `-`, `_` and `.`, falls back to [`DEFAULT_UPLOAD_NAME`]
/// and truncates to 120 characters. The bare directory names `.` and `..`
/// also fall back to the default.
///
/// # Examples
/// ```
/// use dimsum_devserver::sanitize::safe_filename;
/// assert_eq!(safe_filename("chart#1.png"), "chart1.png");
/// assert_eq!(safe_filename("../../etc/passwd"), "passwd");
/// assert_eq!(safe_filename(""), "file.bin");
/// ```
pub fn safe_filename(name: &str) -> String {
    let segment = last_segment(name);
    let kept: String = segment
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect();
    let kept = if kept.is_empty() || kept == "." || kept == ".." {
        DEFAULT_UPLOAD_NAME.to_string()
    } else {
        kept
    };
    kept.chars().take(MAX_UPLOAD_NAME_CHARS).collect()
}

/// Sanitize a prefetched image name against an ASCII allow-list
/// (letters, digits, `-_.()` and space), truncated to 160 characters.
/// Empty names and the bare directory names fall back to [`DEFAULT_IMAGE_NAME`].
pub fn safe_image_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '(' | ')' | ' '))
        .take(MAX_IMAGE_NAME_CHARS)
        .collect();
    if kept.is_empty() || kept == "." || kept == ".." {
        DEFAULT_IMAGE_NAME.to_string()
    } else {
        kept
    }
}

/// Derive the local filename for an image URL.
///
/// The query string is dropped before the last path segment is taken.
pub fn filename_from_url(url: &str) -> String {
    let without_query = url.split('?').next().unwrap_or_default();
    safe_image_name(last_segment(without_query))
}

fn last_segment(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or_default()
}
