//! Filesystem-backed response body store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::cache::Locator;
use crate::config::CacheConfig;

/// Maps locators to body files beneath a root directory.
///
/// Filesystem errors are returned as-is; the store never retries.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
    default_filename: String,
}

impl CacheStore {
    /// Open the store at `config.dir`, creating the root if absent and
    /// purging everything beneath it otherwise.
    pub fn open(config: &CacheConfig) -> io::Result<Self> {
        let store = Self {
            root: config.dir.clone(),
            default_filename: config.default_filename.clone(),
        };
        store.clear()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove every file and subdirectory under the root. The root itself
    /// survives (or is created).
    pub fn clear(&self) -> io::Result<()> {
        if !self.root.exists() {
            tracing::debug!(root = %self.root.display(), "Creating cache directory");
            return fs::create_dir_all(&self.root);
        }

        let mut removed = 0usize;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
            removed += 1;
        }
        tracing::info!(root = %self.root.display(), removed, "Cache cleared");
        Ok(())
    }

    /// Absolute location of the body file for `locator`.
    pub fn path_for(&self, locator: &Locator) -> PathBuf {
        self.root.join(locator.relative_path(&self.default_filename))
    }

    /// Whether a body is stored for `locator`.
    pub fn exists(&self, locator: &Locator) -> bool {
        self.path_for(locator).is_file()
    }

    /// Store `body`, replacing any previous entry.
    pub fn write(&self, locator: &Locator, body: &[u8]) -> io::Result<()> {
        let path = self.path_for(locator);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, body)?;
        tracing::debug!(%locator, path = %path.display(), bytes = body.len(), "Cache entry written");
        Ok(())
    }

    /// Read a stored body. Check [`CacheStore::exists`] first; a missing
    /// entry surfaces as `NotFound`.
    pub fn read(&self, locator: &Locator) -> io::Result<Vec<u8>> {
        fs::read(self.path_for(locator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> CacheConfig {
        CacheConfig {
            dir: dir.join("cache"),
            default_filename: "idx".to_string(),
        }
    }

    #[test]
    fn test_open_creates_missing_root() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::open(&config_in(tmp.path())).unwrap();
        assert!(store.root().is_dir());
        assert_eq!(fs::read_dir(store.root()).unwrap().count(), 0);
    }

    #[test]
    fn test_open_purges_previous_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_in(tmp.path());

        let first = CacheStore::open(&config).unwrap();
        first.write(&Locator::new("a.com", "/x/y"), b"one").unwrap();
        first.write(&Locator::new("b.com", "/"), b"two").unwrap();
        fs::write(first.root().join("stray"), b"three").unwrap();

        let second = CacheStore::open(&config).unwrap();
        assert!(second.root().is_dir());
        assert_eq!(fs::read_dir(second.root()).unwrap().count(), 0);
        assert!(!second.exists(&Locator::new("a.com", "/x/y")));
    }

    #[test]
    fn test_write_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::open(&config_in(tmp.path())).unwrap();
        let locator = Locator::new("a.com", "/x/y");

        assert!(!store.exists(&locator));
        store.write(&locator, b"body").unwrap();
        assert!(store.exists(&locator));
        assert_eq!(store.read(&locator).unwrap(), b"body");
        assert!(store.root().join("a.com").join("x").is_dir());
        assert!(store.root().join("a.com/x/y").is_file());
    }

    #[test]
    fn test_overwrite_keeps_last_body() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::open(&config_in(tmp.path())).unwrap();
        let locator = Locator::new("example.com", "/");

        store.write(&locator, b"first").unwrap();
        store.write(&locator, b"second").unwrap();
        assert_eq!(store.read(&locator).unwrap(), b"second");
    }

    #[test]
    fn test_root_and_empty_path_share_default_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::open(&config_in(tmp.path())).unwrap();

        store.write(&Locator::new("example.com", ""), b"index").unwrap();
        assert!(store.exists(&Locator::new("example.com", "/")));
        assert_eq!(
            store.path_for(&Locator::new("example.com", "/")),
            store.root().join("example.com").join("idx")
        );
    }

    #[test]
    fn test_directory_is_not_an_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::open(&config_in(tmp.path())).unwrap();

        store.write(&Locator::new("a.com", "/x/y"), b"nested").unwrap();
        assert!(!store.exists(&Locator::new("a.com", "/x")));
    }

    #[test]
    fn test_read_missing_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CacheStore::open(&config_in(tmp.path())).unwrap();
        let err = store.read(&Locator::new("a.com", "/nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
