use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract high-score storage.
///
/// Lookups and writes must never stall or fail the game: missing
/// values read as 0 and broken backends degrade to logged no-ops.
pub trait ScoreStore {
    fn get_int(&self, key: &str) -> u32;
    fn set_int(&mut self, key: &str, value: u32);
}

/// In-memory store; the default for tests and for hosts that do their
/// own persistence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get_int(&self, key: &str) -> u32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_int(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_owned(), value);
    }
}

/// Store backed by a single JSON object file.
///
/// Reads happen once at open; every write goes through the in-memory
/// map first and then best-effort to disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, u32>,
}

impl JsonFileStore {
    /// Opens the store, reading whatever the file currently holds. A
    /// missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(err) => {
                    log::warn!(
                        "score file {} is not valid JSON, starting empty: {}",
                        path.display(),
                        err
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                log::warn!(
                    "cannot read score file {}, starting empty: {}",
                    path.display(),
                    err
                );
                HashMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        let raw = match serde_json::to_string_pretty(&self.values) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("cannot encode score file {}: {}", self.path.display(), err);
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, raw) {
            log::warn!("cannot write score file {}: {}", self.path.display(), err);
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn get_int(&self, key: &str) -> u32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    fn set_int(&mut self, key: &str, value: u32) {
        self.values.insert(key.to_owned(), value);
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn memory_store_defaults_to_zero() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int("highScore"), 0);

        store.set_int("highScore", 12);
        assert_eq!(store.get_int("highScore"), 12);
        assert_eq!(store.get_int("hardHighScore"), 0);
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let path = std::env::temp_dir().join(format!(
            "strooped-store-{}-roundtrip.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get_int("highScore"), 0);
        store.set_int("highScore", 34);

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get_int("highScore"), 34);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unwritable_file_store_degrades_to_memory_behavior() {
        let mut store = JsonFileStore::open("/nonexistent-dir/scores.json");
        assert_eq!(store.get_int("highScore"), 0);

        // write cannot reach disk but must neither panic nor lose the value
        store.set_int("highScore", 5);
        assert_eq!(store.get_int("highScore"), 5);
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let path = std::env::temp_dir().join(format!(
            "strooped-store-{}-corrupt.json",
            std::process::id()
        ));
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get_int("highScore"), 0);

        let _ = fs::remove_file(&path);
    }
}
