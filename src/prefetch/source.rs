//! Infografis row source
//!
//! Reads the `image_url` column from the cached database, opened read-only.

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

use crate::error::PrefetchError;

const IMAGE_URL_QUERY: &str = "SELECT image_url FROM infografis";

/// Every `image_url` in table order; NULL and blob values come back as `None`
pub fn read_image_urls(db_path: &Path) -> Result<Vec<Option<String>>, PrefetchError> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| PrefetchError::Open {
        path: db_path.to_path_buf(),
        source,
    })?;

    let mut stmt = conn.prepare(IMAGE_URL_QUERY)?;
    let urls = stmt
        .query_map([], |row| Ok(url_from_value(row.get_ref(0)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(urls)
}

fn url_from_value(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Text(text) => Some(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_urls_including_nulls() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("dimsum.db");
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE infografis (id INTEGER PRIMARY KEY, judul TEXT, image_url TEXT);
             INSERT INTO infografis (judul, image_url) VALUES ('a', 'https://x/a.png');
             INSERT INTO infografis (judul, image_url) VALUES ('b', NULL);
             INSERT INTO infografis (judul, image_url) VALUES ('c', '');",
        )
        .unwrap();
        drop(conn);

        let urls = read_image_urls(&db).unwrap();
        assert_eq!(
            urls,
            vec![Some("https://x/a.png".to_string()), None, Some(String::new())]
        );
    }

    #[test]
    fn test_missing_table_is_query_error() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("dimsum.db");
        Connection::open(&db)
            .unwrap()
            .execute_batch("CREATE TABLE other (x TEXT);")
            .unwrap();

        assert!(matches!(read_image_urls(&db), Err(PrefetchError::Query(_))));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_image_urls(&tmp.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, PrefetchError::Open { .. }));
    }
}
