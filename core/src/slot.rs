use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// A single-user key-value slot for persisting whole collections as text.
///
/// The store reads and writes one value per key; partial updates are not
/// part of the contract.
pub trait StorageSlot {
    /// The value stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Absent keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed slot: one file per key under a base directory.
///
/// `set` writes a sibling temp file and renames it over the target, so a
/// reader never observes a partially written value.
pub struct FileSlot {
    base_dir: PathBuf,
}

impl FileSlot {
    pub fn new(base_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(base_dir).with_context(|| {
            format!("Failed to create data directory: {}", base_dir.display())
        })?;
        Ok(FileSlot {
            base_dir: base_dir.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

impl StorageSlot for FileSlot {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        // Temp file lives next to the target so the rename stays on one filesystem.
        let tmp_path = path.with_extension(format!("tmp.{}", std::process::id()));
        std::fs::write(&tmp_path, value)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

/// In-memory slot backing ephemeral stores and tests.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: RefCell<HashMap<String, String>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_slot_get_absent() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path()).unwrap();
        assert!(slot.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_file_slot_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path()).unwrap();
        slot.set("records", "[1,2,3]").unwrap();
        assert_eq!(slot.get("records").unwrap().unwrap(), "[1,2,3]");
    }

    #[test]
    fn test_file_slot_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path()).unwrap();
        slot.set("records", "old").unwrap();
        slot.set("records", "new").unwrap();
        assert_eq!(slot.get("records").unwrap().unwrap(), "new");
    }

    #[test]
    fn test_file_slot_remove() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path()).unwrap();
        slot.set("records", "data").unwrap();
        slot.remove("records").unwrap();
        assert!(slot.get("records").unwrap().is_none());
    }

    #[test]
    fn test_file_slot_remove_absent_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path()).unwrap();
        assert!(slot.remove("missing").is_ok());
    }

    #[test]
    fn test_file_slot_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let slot = FileSlot::new(dir.path()).unwrap();
            slot.set("records", "persisted").unwrap();
        }
        let slot = FileSlot::new(dir.path()).unwrap();
        assert_eq!(slot.get("records").unwrap().unwrap(), "persisted");
    }

    #[test]
    fn test_file_slot_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path()).unwrap();
        slot.set("records", "one").unwrap();
        slot.set("records", "two").unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["records".to_string()]);
    }

    #[test]
    fn test_memory_slot_basics() {
        let slot = MemorySlot::new();
        assert!(slot.get("records").unwrap().is_none());
        slot.set("records", "data").unwrap();
        assert_eq!(slot.get("records").unwrap().unwrap(), "data");
        slot.remove("records").unwrap();
        assert!(slot.get("records").unwrap().is_none());
        assert!(slot.remove("records").is_ok());
    }
}
