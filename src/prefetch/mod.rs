//! Infografis image prefetcher
//!
//! Single sequential pass over the `infografis` table of the cached
//! database: every image not yet present in `sqlite/infografis/` is
//! downloaded once. Re-runs against an unchanged database do no network I/O.

mod fetcher;
mod source;

pub use fetcher::{Fetch, HttpFetcher};
pub use source::read_image_urls;

use std::path::Path;

use crate::assets::AssetLayout;
use crate::error::{PrefetchError, StorageError};
use crate::logger;
use crate::sanitize::filename_from_url;

/// Outcome counts of one prefetch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PrefetchSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Run one prefetch pass.
///
/// Returns `Ok(None)` when the database file does not exist. Individual
/// download or write failures are counted, never returned.
pub fn run(
    layout: &AssetLayout,
    fetcher: &impl Fetch,
) -> Result<Option<PrefetchSummary>, PrefetchError> {
    let info_dir = layout.infografis_dir();
    std::fs::create_dir_all(&info_dir).map_err(|source| StorageError::CreateDir {
        path: info_dir.clone(),
        source,
    })?;

    let db_path = layout.database_path();
    if !db_path.is_file() {
        logger::log_prefetch_db_missing(&db_path);
        return Ok(None);
    }

    let urls = read_image_urls(&db_path)?;
    let mut summary = PrefetchSummary::default();

    for url in urls {
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            summary.skipped += 1;
            continue;
        };

        let name = filename_from_url(&url);
        let target = info_dir.join(&name);
        if target.is_file() {
            summary.skipped += 1;
            continue;
        }

        match download_to(fetcher, &url, &target) {
            Ok(()) => {
                summary.downloaded += 1;
                logger::log_prefetch_saved(&name);
            }
            Err(e) => {
                summary.failed += 1;
                logger::log_prefetch_failed(&url, &e);
            }
        }
    }

    logger::log_prefetch_done(summary.downloaded, summary.skipped, summary.failed);
    Ok(Some(summary))
}

fn download_to(fetcher: &impl Fetch, url: &str, target: &Path) -> Result<(), PrefetchError> {
    let data = fetcher.fetch(url)?;
    std::fs::write(target, data).map_err(|source| StorageError::Write {
        path: target.to_path_buf(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory fetcher that records every requested URL
    #[derive(Default)]
    struct FakeFetcher {
        responses: HashMap<String, Vec<u8>>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, body: &[u8]) -> Self {
            self.responses.insert(url.to_string(), body.to_vec());
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.borrow().clone()
        }
    }

    impl Fetch for FakeFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, PrefetchError> {
            self.requested.borrow_mut().push(url.to_string());
            self.responses
                .get(url)
                .cloned()
                .ok_or(PrefetchError::Status { status: 404 })
        }
    }

    fn layout_with_rows(rows: &[Option<&str>]) -> (tempfile::TempDir, AssetLayout) {
        let tmp = tempfile::tempdir().unwrap();
        let layout = AssetLayout::new(tmp.path().join("public"));
        layout.ensure_dirs().unwrap();

        let conn = Connection::open(layout.database_path()).unwrap();
        conn.execute_batch("CREATE TABLE infografis (id INTEGER PRIMARY KEY, image_url TEXT)")
            .unwrap();
        for url in rows {
            conn.execute("INSERT INTO infografis (image_url) VALUES (?1)", [url])
                .unwrap();
        }
        (tmp, layout)
    }

    #[test]
    fn test_missing_database_is_early_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = AssetLayout::new(tmp.path());
        let fetcher = FakeFetcher::default();

        assert_eq!(run(&layout, &fetcher).unwrap(), None);
        assert!(layout.infografis_dir().is_dir());
        assert!(fetcher.requested().is_empty());
    }

    #[test]
    fn test_downloads_new_images() {
        let (_tmp, layout) = layout_with_rows(&[
            Some("https://cdn.example.com/img/a.png?v=2"),
            Some("https://cdn.example.com/img/b.jpg"),
        ]);
        let fetcher = FakeFetcher::default()
            .with("https://cdn.example.com/img/a.png?v=2", b"AAA")
            .with("https://cdn.example.com/img/b.jpg", b"BBB");

        let summary = run(&layout, &fetcher).unwrap().unwrap();
        assert_eq!(
            summary,
            PrefetchSummary {
                downloaded: 2,
                skipped: 0,
                failed: 0
            }
        );
        assert_eq!(std::fs::read(layout.infografis_dir().join("a.png")).unwrap(), b"AAA");
        assert_eq!(std::fs::read(layout.infografis_dir().join("b.jpg")).unwrap(), b"BBB");
    }

    #[test]
    fn test_second_run_skips_everything() {
        let (_tmp, layout) = layout_with_rows(&[Some("https://x/a.png"), Some("https://x/b.png")]);
        let fetcher = FakeFetcher::default()
            .with("https://x/a.png", b"a")
            .with("https://x/b.png", b"b");

        run(&layout, &fetcher).unwrap();
        let second = FakeFetcher::default();
        let summary = run(&layout, &second).unwrap().unwrap();

        assert_eq!(summary.downloaded, 0);
        assert_eq!(summary.skipped, 2);
        assert!(second.requested().is_empty());
    }

    #[test]
    fn test_empty_and_null_urls_are_skipped_not_attempted() {
        let (_tmp, layout) = layout_with_rows(&[None, Some(""), Some("https://x/c.png")]);
        let fetcher = FakeFetcher::default().with("https://x/c.png", b"c");

        let summary = run(&layout, &fetcher).unwrap().unwrap();
        assert_eq!(
            summary,
            PrefetchSummary {
                downloaded: 1,
                skipped: 2,
                failed: 0
            }
        );
        assert_eq!(fetcher.requested(), vec!["https://x/c.png".to_string()]);
    }

    #[test]
    fn test_failures_do_not_abort_the_run() {
        let (_tmp, layout) = layout_with_rows(&[
            Some("https://x/broken.png"),
            Some("https://x/ok.png"),
        ]);
        let fetcher = FakeFetcher::default().with("https://x/ok.png", b"ok");

        let summary = run(&layout, &fetcher).unwrap().unwrap();
        assert_eq!(
            summary,
            PrefetchSummary {
                downloaded: 1,
                skipped: 0,
                failed: 1
            }
        );
        assert!(!layout.infografis_dir().join("broken.png").exists());
        assert!(layout.infografis_dir().join("ok.png").is_file());
    }
}
