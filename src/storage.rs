//! Storage layer for tabboard
//!
//! Durable state is a set of named slots, each holding one string blob. The
//! file-backed store keeps one file per slot inside the data directory.
//!
//! # Directory Structure
//!
//! ```text
//! <data_dir>/
//!   tabboard.toml         # Optional configuration
//!   todos.json            # Task collection slot (name configurable)
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use directories::ProjectDirs;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Extension used for slot files
pub const SLOT_EXTENSION: &str = "json";

/// Key-value durable store of string blobs.
pub trait SlotStore {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn get(&self, slot: &str) -> Result<Option<String>>;

    /// Overwrite a slot with `value`.
    fn set(&self, slot: &str, value: &str) -> Result<()>;
}

impl<T: SlotStore + ?Sized> SlotStore for &T {
    fn get(&self, slot: &str) -> Result<Option<String>> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, value: &str) -> Result<()> {
        (**self).set(slot, value)
    }
}

/// Data directory layout
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Use `explicit` when given, otherwise the platform data directory.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(dir) = explicit {
            return Ok(Self::new(dir));
        }
        let dirs = ProjectDirs::from("dev", "tabboard", "tabboard").ok_or_else(|| {
            Error::OperationFailed(
                "could not determine a data directory; pass --data-dir".to_string(),
            )
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn slot_file(&self, slot: &str) -> PathBuf {
        self.data_dir.join(format!("{slot}.{SLOT_EXTENSION}"))
    }

    pub fn slots(&self) -> FileSlotStore {
        FileSlotStore::new(self.clone())
    }
}

/// Write data atomically: temp file in the same directory, then rename.
///
/// Readers see either the previous content or the new one, never a partial
/// write.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(data)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| Error::Io(err.error))?;
    Ok(())
}

/// One file per slot under the data directory.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    storage: Storage,
}

impl FileSlotStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl SlotStore for FileSlotStore {
    fn get(&self, slot: &str) -> Result<Option<String>> {
        let path = self.storage.slot_file(slot);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn set(&self, slot: &str, value: &str) -> Result<()> {
        write_atomic(&self.storage.slot_file(slot), value.as_bytes())
    }
}

/// In-process store. Clones share the same slots, so a second handle can
/// stand in for "the same storage after a reload".
#[derive(Debug, Clone, Default)]
pub struct MemorySlotStore {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw blob currently held by `slot`.
    pub fn raw(&self, slot: &str) -> Option<String> {
        self.slots.borrow().get(slot).cloned()
    }

    pub fn insert_raw(&self, slot: &str, value: impl Into<String>) {
        self.slots.borrow_mut().insert(slot.to_string(), value.into());
    }
}

impl SlotStore for MemorySlotStore {
    fn get(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.raw(slot))
    }

    fn set(&self, slot: &str, value: &str) -> Result<()> {
        self.insert_raw(slot, value);
        Ok(())
    }
}
