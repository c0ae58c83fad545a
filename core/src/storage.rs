use std::collections::HashMap;

use sweeper_protocol::{LEADERBOARD_KEY, decode_records, encode_records};

use crate::*;

/// Key under which a type is persisted.
pub trait StorageKey {
    const KEY: &'static str;
}

/// Durable string key-value store the host provides, e.g. browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Store kept in process memory, lost on exit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

impl StorageKey for Leaderboard {
    const KEY: &'static str = LEADERBOARD_KEY;
}

impl Leaderboard {
    /// Reads the stored leaderboard. Missing or unreadable data yields an empty one.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, capacity: usize) -> Self {
        let Some(raw) = store.get(Self::KEY) else {
            log::debug!("No stored leaderboard, starting empty");
            return Self::new(capacity);
        };

        match decode_records(&raw) {
            Ok(records) => Self::from_records(records, capacity),
            Err(err) => {
                log::warn!("Could not read stored leaderboard, starting empty: {}", err);
                Self::new(capacity)
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let raw =
            encode_records(&self.to_records()).map_err(|err| GameError::Storage(err.to_string()))?;
        store.set(Self::KEY, raw)
    }
}
