//! Persisted preferences.
//!
//! The game persists exactly one value: the mute flag, stored as `"1"` or
//! `"0"` under [`MUTE_KEY`]. Storage is optional and every failure is logged
//! and ignored.

use crate::error::StoreError;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage key for the mute flag.
pub const MUTE_KEY: &str = "dd_muted";

/// Minimal string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat TOML table of strings on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_table()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // A corrupt file is replaced rather than blocking the write.
        let mut table = self.read_table().unwrap_or_default();
        table.insert(key.to_string(), value.to_string());
        std::fs::write(&self.path, toml::to_string_pretty(&table)?)?;
        Ok(())
    }
}

/// Parse a stored mute value. Anything unrecognised reads as absent.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// The persisted mute flag.
///
/// Read once on construction, written on every change.
pub struct MuteFlag {
    store: Option<Box<dyn KeyValueStore>>,
    muted: bool,
}

impl std::fmt::Debug for MuteFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MuteFlag")
            .field("muted", &self.muted)
            .field("persistent", &self.store.is_some())
            .finish()
    }
}

impl MuteFlag {
    /// Load the flag from `store`; unmuted if absent or unreadable.
    pub fn load(store: Option<Box<dyn KeyValueStore>>) -> Self {
        let muted = match store.as_deref().map(|s| s.get(MUTE_KEY)) {
            Some(Ok(Some(raw))) => parse_flag(&raw).unwrap_or_else(|| {
                debug!("Ignoring unrecognised {} value {:?}", MUTE_KEY, raw);
                false
            }),
            Some(Ok(None)) | None => false,
            Some(Err(e)) => {
                debug!("Could not read {}: {}", MUTE_KEY, e);
                false
            }
        };
        Self { store, muted }
    }

    /// A flag that is never persisted.
    pub fn transient(muted: bool) -> Self {
        Self { store: None, muted }
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.muted
    }

    /// Update the flag and write it through to storage.
    pub fn set(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.set(MUTE_KEY, if muted { "1" } else { "0" }) {
                debug!("Could not persist {}: {}", MUTE_KEY, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(std::io::Error::other("storage disabled").into())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(std::io::Error::other("storage disabled").into())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sim-storage-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_parse_flag_values() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("yes"), None);
    }

    #[test]
    fn test_missing_store_defaults_unmuted() {
        let mut flag = MuteFlag::load(None);
        assert!(!flag.get());
        flag.set(true);
        assert!(flag.get());
    }

    #[test]
    fn test_broken_store_is_tolerated() {
        let mut flag = MuteFlag::load(Some(Box::new(BrokenStore)));
        assert!(!flag.get());
        flag.set(true);
        assert!(flag.get());
    }

    #[test]
    fn test_memory_store_reads_existing_value() {
        let mut store = MemoryStore::new();
        store.set(MUTE_KEY, "true").unwrap();
        let flag = MuteFlag::load(Some(Box::new(store)));
        assert!(flag.get());
    }

    #[test]
    fn test_garbage_value_reads_unmuted() {
        let mut store = MemoryStore::new();
        store.set(MUTE_KEY, "maybe").unwrap();
        assert!(!MuteFlag::load(Some(Box::new(store))).get());
    }

    #[test]
    fn test_file_store_persists_across_loads() {
        let path = temp_path("persist");
        let _ = std::fs::remove_file(&path);

        let mut flag = MuteFlag::load(Some(Box::new(FileStore::new(&path))));
        assert!(!flag.get());
        flag.set(true);

        let store = FileStore::new(&path);
        assert_eq!(store.get(MUTE_KEY).unwrap().as_deref(), Some("1"));
        assert!(MuteFlag::load(Some(Box::new(store))).get());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_overwrites_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not = [valid").unwrap();

        let mut store = FileStore::new(&path);
        assert!(store.get(MUTE_KEY).is_err());
        store.set(MUTE_KEY, "0").unwrap();
        assert_eq!(store.get(MUTE_KEY).unwrap().as_deref(), Some("0"));

        std::fs::remove_file(&path).unwrap();
    }
}
