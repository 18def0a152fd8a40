//! Persistence port for diagnosis state.
//!
//! The answer store and navigator never touch the filesystem directly; they
//! read and write whole records through a [`Storage`] implementation. Record
//! contents are opaque JSON strings at this layer; validation happens in the
//! callers, which treat any failure here as "no prior state".

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

/// The logical records a diagnosis session persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// The answer set, one slot per question.
    Answers,
    /// The business profile form.
    Business,
    /// The navigation cursor.
    Cursor,
}

impl RecordKey {
    /// File name used by [`FileStorage`].
    pub fn file_name(self) -> &'static str {
        match self {
            RecordKey::Answers => "answers.json",
            RecordKey::Business => "business.json",
            RecordKey::Cursor => "cursor.json",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Answers => write!(f, "answers"),
            RecordKey::Business => write!(f, "business"),
            RecordKey::Cursor => write!(f, "cursor"),
        }
    }
}

/// Load/save port for persisted records.
pub trait Storage {
    /// Read a record. `Ok(None)` means the record has never been written.
    fn read(&self, key: RecordKey) -> Result<Option<String>>;

    /// Replace a record. Must be durable when it returns `Ok`.
    fn write(&self, key: RecordKey, contents: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, key: RecordKey) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: RecordKey, contents: &str) -> Result<()> {
        (**self).write(key, contents)
    }
}

/// Stores each record as a JSON file inside a state directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the state directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: RecordKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl Storage for FileStorage {
    fn read(&self, key: RecordKey) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {key} record from {}", path.display()))?;
        Ok(Some(content))
    }

    fn write(&self, key: RecordKey, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create state dir {}", self.dir.display()))?;
        let path = self.path(key);
        // Write to a sibling file and rename so a crash never leaves a torn record.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("failed to write {key} record to {}", path.display()))?;
        tracing::debug!("saved {key} record to {}", path.display());
        Ok(())
    }
}

/// In-process storage for tests and embedding.
///
/// Reads and writes can be made to fail to exercise fail-soft paths.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<RecordKey, String>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose reads always fail.
    pub fn failing_reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Storage whose writes always fail.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Seed a record.
    pub fn with_record(self, key: RecordKey, contents: impl Into<String>) -> Self {
        self.lock().insert(key, contents.into());
        self
    }

    /// Current contents of a record.
    pub fn get(&self, key: RecordKey) -> Option<String> {
        self.lock().get(&key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<RecordKey, String>> {
        // A poisoned map still holds valid strings.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: RecordKey) -> Result<Option<String>> {
        anyhow::ensure!(!self.fail_reads, "storage unavailable");
        Ok(self.get(key))
    }

    fn write(&self, key: RecordKey, contents: &str) -> Result<()> {
        anyhow::ensure!(!self.fail_writes, "storage unavailable");
        self.lock().insert(key, contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state"));

        assert_eq!(storage.read(RecordKey::Answers).unwrap(), None);
        storage.write(RecordKey::Answers, "[null]").unwrap();
        assert_eq!(
            storage.read(RecordKey::Answers).unwrap().as_deref(),
            Some("[null]")
        );
        assert!(dir.path().join("state/answers.json").exists());
        assert!(!dir.path().join("state/answers.json.tmp").exists());
        assert_eq!(storage.read(RecordKey::Cursor).unwrap(), None);
    }

    #[test]
    fn file_storage_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write(RecordKey::Cursor, "1").unwrap();
        storage.write(RecordKey::Cursor, "2").unwrap();
        assert_eq!(storage.read(RecordKey::Cursor).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn memory_storage_failure_modes() {
        let reads = MemoryStorage::failing_reads().with_record(RecordKey::Answers, "[]");
        assert!(reads.read(RecordKey::Answers).is_err());

        let writes = MemoryStorage::failing_writes();
        assert!(writes.write(RecordKey::Answers, "[]").is_err());
        assert_eq!(writes.get(RecordKey::Answers), None);
    }

    #[test]
    fn storage_through_reference() {
        let storage = MemoryStorage::new();
        let by_ref = &storage;
        by_ref.write(RecordKey::Business, "{}").unwrap();
        assert_eq!(storage.get(RecordKey::Business).as_deref(), Some("{}"));
    }
}
