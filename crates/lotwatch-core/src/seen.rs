//! Bounded record of listing identifiers that have already been processed.
//!
//! The store keeps insertion order and remembers every identifier added during
//! a run. The capacity bounds what is retained across runs: [`SeenStore::trim`]
//! and [`SeenStore::save_to`] keep only the newest `capacity` identifiers.
//! Persistence goes through [`SeenPersistence`]; loading is fail-open so
//! unreadable state never blocks a run.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SeenStoreError;

/// Storage backend for the seen set.
pub trait SeenPersistence {
    /// Reads the stored identifiers, oldest first. `Ok(None)` means no state
    /// has been written yet.
    ///
    /// # Errors
    ///
    /// Returns [`SeenStoreError`] if state exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<Vec<String>>, SeenStoreError>;

    /// Replaces the stored identifiers with `ids`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`SeenStoreError`] if the state cannot be written.
    fn save(&self, ids: &[String]) -> Result<(), SeenStoreError>;
}

#[derive(Debug, Clone)]
pub struct SeenStore {
    order: VecDeque<String>,
    index: HashSet<String>,
    capacity: usize,
}

impl SeenStore {
    /// An empty store retaining at most `capacity` identifiers (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::new(),
            index: HashSet::new(),
            capacity: capacity.max(1),
        }
    }

    /// A store pre-filled with `ids` in order. Only the newest `capacity`
    /// identifiers are kept.
    #[must_use]
    pub fn from_ids<I>(ids: I, capacity: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut store = Self::new(capacity);
        for id in ids {
            store.add(id);
        }
        store.trim();
        store
    }

    /// Loads the store from `persistence`, falling back to an empty store if
    /// the state is missing or unreadable.
    pub fn load_from<P: SeenPersistence + ?Sized>(persistence: &P, capacity: usize) -> Self {
        match persistence.load() {
            Ok(Some(ids)) => {
                let store = Self::from_ids(ids, capacity);
                tracing::debug!(count = store.len(), "loaded seen-state");
                store
            }
            Ok(None) => {
                tracing::info!("no seen-state found; starting empty");
                Self::new(capacity)
            }
            Err(e) => {
                tracing::warn!(error = %e, "seen-state unreadable; starting empty");
                Self::new(capacity)
            }
        }
    }

    /// Writes the newest `capacity` identifiers to `persistence`, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`SeenStoreError`].
    pub fn save_to<P: SeenPersistence + ?Sized>(
        &self,
        persistence: &P,
    ) -> Result<(), SeenStoreError> {
        let ids: Vec<String> = self.retained().map(str::to_owned).collect();
        persistence.save(&ids)
    }

    /// Evicts the oldest identifiers until at most `capacity` remain.
    pub fn trim(&mut self) {
        while self.order.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.index.remove(&evicted);
            }
        }
    }

    /// The identifiers that survive [`SeenStore::trim`], oldest first.
    pub fn retained(&self) -> impl Iterator<Item = &str> {
        let skip = self.order.len().saturating_sub(self.capacity);
        self.iter().skip(skip)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Records `id`. Returns `true` if it was not already present.
    ///
    /// Re-adding a known identifier is a no-op and does not refresh its
    /// position. Nothing is evicted here, so an identifier stays known for
    /// the rest of the run even when the store grows past its capacity.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.index.contains(&id) {
            return false;
        }
        self.index.insert(id.clone());
        self.order.push_back(id);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Identifiers in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SeenFile {
    #[serde(default)]
    seen_ids: Vec<String>,
}

/// JSON file backend storing `{"seen_ids": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonSeenFile {
    path: PathBuf,
}

impl JsonSeenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> SeenStoreError {
        SeenStoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl SeenPersistence for JsonSeenFile {
    fn load(&self) -> Result<Option<Vec<String>>, SeenStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let file: SeenFile =
            serde_json::from_str(&content).map_err(|e| SeenStoreError::Parse {
                path: self.path.display().to_string(),
                source: e,
            })?;
        Ok(Some(file.seen_ids))
    }

    fn save(&self, ids: &[String]) -> Result<(), SeenStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string(&SeenFile {
            seen_ids: ids.to_vec(),
        })
        .map_err(SeenStoreError::Serialize)?;

        // Write beside the target and rename so a failed write leaves the
        // previous state intact.
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}
