use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use vital_shared::{PreferenceError, PreferenceStore};

/// Preferences kept as a flat JSON object on disk. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                PreferenceError::Corrupt(format!("{}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(PreferenceError::Unavailable(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());

        let unavailable =
            |e: std::io::Error| PreferenceError::Unavailable(format!("{}: {e}", self.path.display()));
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(unavailable)?;
        }
        let json = serde_json::to_vec_pretty(&values)
            .map_err(|e| PreferenceError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(unavailable)
    }
}
