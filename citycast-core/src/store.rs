use parking_lot::Mutex;
use std::{
    collections::HashMap,
    fmt::Debug,
    fs,
    io::{self, Write},
    path::PathBuf,
};
use tempfile::NamedTempFile;

use crate::{
    error::{Error, Result},
    model::WeatherRecord,
};

/// Maximum number of entries kept in the recent-search list.
pub const MAX_RECENT: usize = 5;

/// Durable slot holding the serialized recent-search list.
pub const STORAGE_KEY: &str = "weatherSearches";

/// A named key-value slot that survives restarts.
pub trait SlotStorage: Send + Sync + Debug {
    /// Returns `None` when the slot has never been written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites the slot.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// Keeps each slot as `<dir>/<key>.json`. Writes go to a temp file in the
/// same directory that is then renamed over the slot, so an interrupted write
/// never leaves a truncated slot behind.
#[derive(Debug, Clone)]
pub struct FileSlotStorage {
    dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Storage { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| Error::Storage { path: self.dir.clone(), source })?;

        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|source| Error::Storage { path: self.dir.clone(), source })?;
        tmp.write_all(value.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| Error::Storage { path: tmp.path().to_path_buf(), source })?;

        let path = self.slot_path(key);
        tmp.persist(&path).map_err(|e| Error::Storage { path, source: e.error })?;
        Ok(())
    }
}

/// Process-local slots, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySlotStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn with_slot(key: &str, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.slots.lock().insert(key.to_string(), value.into());
        storage
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Bounded, most-recent-first list of successful searches, mirrored to a
/// durable slot on every change.
#[derive(Debug)]
pub struct RecentSearches {
    storage: Box<dyn SlotStorage>,
    records: Vec<WeatherRecord>,
}

impl RecentSearches {
    /// An empty list. Call [`RecentSearches::load`] to restore the durable copy.
    pub fn new(storage: Box<dyn SlotStorage>) -> Self {
        Self { storage, records: Vec::new() }
    }

    /// Restore the list from the durable slot. An absent slot yields an empty
    /// list; a payload that is not a record array is a `Deserialization` error
    /// and leaves the in-memory list untouched.
    pub fn load(&mut self) -> Result<&[WeatherRecord]> {
        let Some(raw) = self.storage.read(STORAGE_KEY)? else {
            tracing::debug!("no stored recent searches");
            self.records.clear();
            return Ok(&self.records);
        };

        let records: Vec<WeatherRecord> = serde_json::from_str(&raw).map_err(|source| {
            Error::Deserialization { key: STORAGE_KEY.to_string(), source }
        })?;

        tracing::debug!(count = records.len(), "restored recent searches");
        self.records = records;
        Ok(&self.records)
    }

    /// Prepend `record`, drop the oldest entry past [`MAX_RECENT`], and
    /// overwrite the durable slot with the whole list.
    ///
    /// The slot is written before the in-memory list changes, so a failed
    /// write leaves both copies as they were.
    pub fn save(&mut self, record: WeatherRecord) -> Result<&[WeatherRecord]> {
        let mut next = Vec::with_capacity(MAX_RECENT + 1);
        next.push(record);
        next.extend(self.records.iter().cloned());
        next.truncate(MAX_RECENT);

        let payload = serde_json::to_string(&next).map_err(Error::Serialization)?;
        self.storage.write(STORAGE_KEY, &payload)?;

        self.records = next;
        Ok(&self.records)
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&WeatherRecord> {
        self.records.get(index)
    }
}
