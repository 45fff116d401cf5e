//! On-disk backend address for the command line
//!
//! Each key is a file `<dir>/<key>.json` holding the raw value text, the
//! same text the browser keeps in `localStorage`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use aichat_shared::{AddressStore, KeyValueStore, StoreError};

/// Directory name under the platform config dir
pub const APP_DIR: &str = "aichat-console";

/// File-per-key store rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<config_dir>/aichat-console`, e.g. `~/.config/aichat-console`
    pub fn default_location() -> Result<Self, StoreError> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(APP_DIR)))
            .ok_or_else(|| StoreError::Unavailable("no config directory on this platform".to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Write(e.to_string()))?;
        fs::write(self.path_for(key), value).map_err(|e| StoreError::Write(e.to_string()))
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Write(e.to_string())),
        }
    }
}

/// Address store in the default config directory
pub fn open_store() -> Result<AddressStore<FileStore>, StoreError> {
    let storage = FileStore::default_location()?;
    tracing::debug!("Settings directory: {}", storage.dir().display());
    Ok(AddressStore::new(storage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aichat_shared::{BackendAddress, BACKEND_CONFIG_KEY};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_absent() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get_item(BACKEND_CONFIG_KEY).unwrap(), None);
        // Removing what is not there is fine
        store.remove_item(BACKEND_CONFIG_KEY).unwrap();
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested").join(APP_DIR);
        let store = AddressStore::new(FileStore::new(&nested));

        store.write(&BackendAddress::new("10.1.2.3", 7000)).unwrap();

        assert!(nested.join("backend_config.json").exists());
        assert_eq!(store.read(), BackendAddress::new("10.1.2.3", 7000));
    }

    #[test]
    fn test_corrupt_file_reads_as_default() {
        let dir = tempdir().unwrap();
        let storage = FileStore::new(dir.path());
        fs::write(storage.path_for(BACKEND_CONFIG_KEY), "port=5555").unwrap();

        let store = AddressStore::new(storage);
        assert_eq!(store.read(), BackendAddress::default());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = AddressStore::new(FileStore::new(dir.path()));
        store.write(&BackendAddress::new("example.org", 80)).unwrap();

        store.reset().unwrap();
        store.reset().unwrap();

        assert_eq!(store.read(), BackendAddress::default());
        assert_eq!(store.resolve_base_url(), "http://127.0.0.1:5555");
    }
}
