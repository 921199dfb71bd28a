use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// One text slot holding the whole serialized collection.
///
/// The store swaps full snapshots through it: one get at startup, one set
/// per mutation. Implementations do not interpret the blob.
pub trait Storage {
    /// The current blob, or `None` when nothing was stored yet.
    fn get(&self) -> Result<Option<String>>;

    /// Replace the blob wholesale.
    fn set(&self, blob: &str) -> Result<()>;
}

/// The slot as a plain file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> FileStore {
        FileStore { path }
    }
}

impl Storage for FileStore {
    fn get(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read the store file."),
        }
    }

    fn set(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create the store directory.")?;
        }
        fs::write(&self.path, blob).context("Failed to write the store file.")?;
        Ok(())
    }
}

/// In-memory slot for tests. Clones share the same cell, so loading a fresh
/// store over a clone simulates a reload.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<Option<String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    /// Peek at the raw stored blob.
    pub fn blob(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

#[cfg(test)]
impl Storage for MemoryStore {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.slot.borrow().clone())
    }

    fn set(&self, blob: &str) -> Result<()> {
        *self.slot.borrow_mut() = Some(blob.to_string());
        Ok(())
    }
}
