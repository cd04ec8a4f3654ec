//! Persistence of the default version pointer

use crate::image::version::Version;
use crate::Result;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Holds at most one version: the one used when none is given explicitly
pub trait DefaultVersionStore {
    /// Current default, if any
    fn get(&self) -> Result<Option<Version>>;

    /// Replace the default
    fn set(&self, version: &Version) -> Result<()>;

    /// Forget the default. Clearing an unset pointer is not an error.
    fn clear(&self) -> Result<()>;
}

/// Stores the default version as the sole content of a text file.
///
/// An absent or empty file means no default is set.
#[derive(Debug, Clone)]
pub struct FileDefaultStore {
    path: PathBuf,
}

impl FileDefaultStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DefaultVersionStore for FileDefaultStore {
    fn get(&self) -> Result<Option<Version>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // Tolerate a single line terminator left by hand editing
        let raw = content
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(&content);

        Ok(Version::parse(raw).ok())
    }

    fn set(&self, version: &Version) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, version.as_str())?;
        tracing::debug!("Wrote default version {} to {}", version, self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryDefaultStore {
    current: RefCell<Option<Version>>,
}

impl MemoryDefaultStore {
    pub fn new(initial: Option<Version>) -> Self {
        Self {
            current: RefCell::new(initial),
        }
    }
}

impl DefaultVersionStore for MemoryDefaultStore {
    fn get(&self) -> Result<Option<Version>> {
        Ok(self.current.borrow().clone())
    }

    fn set(&self, version: &Version) -> Result<()> {
        *self.current.borrow_mut() = Some(version.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.current.borrow_mut() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn v(raw: &str) -> Version {
        Version::parse(raw).unwrap()
    }

    #[test]
    fn test_file_store_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = FileDefaultStore::new(tmp.path().join("nested/default-version"));

        assert_eq!(store.get().unwrap(), None);

        store.set(&v("1.12.0")).unwrap();
        assert_eq!(store.get().unwrap(), Some(v("1.12.0")));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "1.12.0");

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_clear_when_unset() {
        let tmp = TempDir::new().unwrap();
        let store = FileDefaultStore::new(tmp.path().join("default-version"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_empty_file_is_unset() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("default-version");
        fs::write(&path, "").unwrap();

        let store = FileDefaultStore::new(&path);
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_file_store_hand_edited_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("default-version");
        fs::write(&path, "1.0\r\n").unwrap();

        let store = FileDefaultStore::new(&path);
        assert_eq!(store.get().unwrap(), Some(v("1.0")));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryDefaultStore::new(Some(v("1.0")));
        assert_eq!(store.get().unwrap(), Some(v("1.0")));
        store.set(&v("1.1")).unwrap();
        assert_eq!(store.get().unwrap(), Some(v("1.1")));
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }
}
