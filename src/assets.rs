//! Asset root layout
//!
//! ```text
//! <root>/
//!   sqlite/
//!     dimsum.db
//!     infografis/
//!   assets/
//!     excel/
//! ```

use std::path::{Path, PathBuf};

use crate::error::StorageError;

const SQLITE_DIR: &str = "sqlite";
const DATABASE_FILE: &str = "dimsum.db";
const INFOGRAFIS_DIR: &str = "infografis";
const EXCEL_DIR: &str = "assets/excel";

/// Resolved paths under the asset root
#[derive(Debug, Clone)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sqlite_dir(&self) -> PathBuf {
        self.root.join(SQLITE_DIR)
    }

    /// Fixed location of the cached database blob
    pub fn database_path(&self) -> PathBuf {
        self.sqlite_dir().join(DATABASE_FILE)
    }

    pub fn infografis_dir(&self) -> PathBuf {
        self.sqlite_dir().join(INFOGRAFIS_DIR)
    }

    pub fn excel_dir(&self) -> PathBuf {
        self.root.join(EXCEL_DIR)
    }

    /// Create every known subdirectory that does not exist yet
    pub fn ensure_dirs(&self) -> Result<(), StorageError> {
        for dir in [self.sqlite_dir(), self.infografis_dir(), self.excel_dir()] {
            std::fs::create_dir_all(&dir)
                .map_err(|source| StorageError::CreateDir { path: dir, source })?;
        }
        Ok(())
    }
}

/// Upload namespaces exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Infografis,
    Excel,
}

impl UploadTarget {
    pub fn dir(self, layout: &AssetLayout) -> PathBuf {
        match self {
            Self::Infografis => layout.infografis_dir(),
            Self::Excel => layout.excel_dir(),
        }
    }

    /// Filename used when an upload request carries none
    pub const fn default_filename(self) -> &'static str {
        match self {
            Self::Infografis => "file.png",
            Self::Excel => "file.xlsx",
        }
    }
}
