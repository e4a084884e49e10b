use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

/// Storage key of the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("preference storage is corrupt: {0}")]
    Corrupt(String),
}

/// String key-value storage for user preferences.
pub trait PreferenceStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Dark-mode flag read once from a store and written back on every toggle.
///
/// Store failures never surface: a failed read leaves the flag off and a
/// failed write keeps the in-memory value.
#[derive(Debug)]
pub struct DarkMode<S> {
    store: S,
    enabled: bool,
}

impl<S: PreferenceStore> DarkMode<S> {
    pub fn load(store: S) -> Self {
        let enabled = match store.load(DARK_MODE_KEY) {
            Ok(value) => value.as_deref() == Some("1"),
            Err(e) => {
                warn!(error = %e, "failed to read dark mode preference, using default");
                false
            }
        };
        Self { store, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the flag and persist it. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        let value = if self.enabled { "1" } else { "0" };
        if let Err(e) = self.store.save(DARK_MODE_KEY, value) {
            warn!(error = %e, "failed to persist dark mode preference");
        }
        self.enabled
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
