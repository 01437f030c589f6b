//! File-backed bin storage.
//!
//! Each bin is a single `<name>.txt` file under the store root. A bin exists
//! exactly when its file exists; there is no other metadata.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::name::BinName;

/// A store of named text bins rooted at a directory.
///
/// Cloning is cheap and every clone refers to the same directory. The store
/// holds no locks: concurrent updates to one bin are last-writer-wins.
///
/// # Example
/// ```
/// use stringbins::{BinStore, StoreConfig};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = BinStore::open(StoreConfig::new().root(dir.path()).build()).unwrap();
///
/// let name = store.create("notes", false).unwrap();
/// store.update(&name, "hello").unwrap();
/// assert_eq!(store.retrieve(&name).unwrap(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct BinStore {
    root: PathBuf,
}

impl BinStore {
    /// Open a store, creating the root directory if it does not exist.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        let root = config.root;

        if root.is_dir() {
            tracing::info!(root = %root.display(), "bin root already exists");
        } else {
            tracing::info!(root = %root.display(), "bin root does not exist, creating it");
            fs::create_dir_all(&root)?;
        }

        Ok(Self { root })
    }

    /// The directory holding the bin files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create an empty bin and return its resolved identifier.
    ///
    /// With `unique` set, a fresh UUID is appended to `name` (or used alone
    /// when `name` is empty). The file is created exclusively, so two racing
    /// creates for the same identifier cannot both succeed.
    pub fn create(&self, name: &str, unique: bool) -> StoreResult<String> {
        let bin = BinName::resolve(name, unique)?;
        let path = self.path_of(&bin);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                tracing::debug!(bin = %bin, "created bin");
                Ok(bin.into_string())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(StoreError::BinAlreadyExists(bin.into_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Return the full content of a bin.
    pub fn retrieve(&self, name: &str) -> StoreResult<String> {
        let bin = BinName::parse(name)?;

        fs::read_to_string(self.path_of(&bin)).map_err(|e| not_found_or(e, &bin))
    }

    /// Replace the content of an existing bin.
    ///
    /// The previous content is discarded, not appended to. `content` may be
    /// empty.
    pub fn update(&self, name: &str, content: &str) -> StoreResult<()> {
        let bin = BinName::parse(name)?;

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(self.path_of(&bin))
            .map_err(|e| not_found_or(e, &bin))?;

        file.write_all(content.as_bytes())?;
        file.flush()?;

        tracing::debug!(bin = %bin, bytes = content.len(), "updated bin");
        Ok(())
    }

    /// Check whether a bin exists. Invalid names never exist.
    pub fn exists(&self, name: &str) -> bool {
        match BinName::parse(name) {
            Ok(bin) => self.path_of(&bin).is_file(),
            Err(_) => false,
        }
    }

    fn path_of(&self, bin: &BinName) -> PathBuf {
        self.root.join(bin.file_name())
    }
}

/// Map a missing file to `BinNotFound`, keeping any other I/O error.
fn not_found_or(err: io::Error, bin: &BinName) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::BinNotFound(bin.to_string())
    } else {
        StoreError::Io(err)
    }
}
