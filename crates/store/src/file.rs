use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use wrp_kernel::slot::{PersistenceSlot, SlotError};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory that is then renamed
/// over the target, so a reader sees either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Open a slot rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SlotError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "file slot opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(SlotError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl PersistenceSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|error| error.error)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, SlotError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wrp_kernel::content::bundled_default;
    use wrp_kernel::content_store::{ContentStore, DEFAULT_STORAGE_KEY};

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::open(dir.path()).unwrap();
        assert_eq!(slot.read("absent").unwrap(), None);
        assert!(!slot.remove("absent").unwrap());
    }

    #[test]
    fn values_land_in_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::open(dir.path().join("nested")).unwrap();

        slot.write("wrp_cms_data_v1", "{}").unwrap();

        let path = dir.path().join("nested").join("wrp_cms_data_v1.json");
        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
        assert!(slot.remove("wrp_cms_data_v1").unwrap());
        assert_eq!(slot.read("wrp_cms_data_v1").unwrap(), None);
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::open(dir.path()).unwrap();
        for key in ["../etc", "a/b", "", ".hidden"] {
            assert!(matches!(
                slot.write(key, "x"),
                Err(SlotError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn content_survives_a_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let mut snapshot = bundled_default();
        snapshot.settings.tagline = "Persisted".to_string();

        let first = ContentStore::new(
            Arc::new(FileSlot::open(dir.path()).unwrap()),
            DEFAULT_STORAGE_KEY,
        );
        first.save(&snapshot).unwrap();

        let second = ContentStore::new(
            Arc::new(FileSlot::open(dir.path()).unwrap()),
            DEFAULT_STORAGE_KEY,
        );
        assert_eq!(second.load(), snapshot);
    }

    #[test]
    fn truncated_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wrp_cms_data_v1.json"), "{\"schemaVer").unwrap();

        let store = ContentStore::new(
            Arc::new(FileSlot::open(dir.path()).unwrap()),
            DEFAULT_STORAGE_KEY,
        );
        assert_eq!(store.load(), bundled_default());
    }
}
