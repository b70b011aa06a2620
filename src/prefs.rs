//! User preferences that outlive the process. Today that is just the DPI.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_DPI, DPI_PREFERENCE_KEY};
use crate::error::PreferenceError;

pub trait PreferenceStore {
    fn get_f32(&self, key: &str) -> Option<f32>;
    fn set_f32(&mut self, key: &str, value: f32) -> Result<(), PreferenceError>;

    fn dpi_setting(&self) -> f32 {
        self.get_f32(DPI_PREFERENCE_KEY).unwrap_or(DEFAULT_DPI)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryPreferences {
    values: BTreeMap<String, f32>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_f32(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn set_f32(&mut self, key: &str, value: f32) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Preferences kept as one flat JSON object on disk, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: BTreeMap<String, f32>,
}

impl JsonFilePreferences {
    /// Load `path`, or start empty when it does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), entries = values.len(), "loaded preferences");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get_f32(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn set_f32(&mut self, key: &str, value: f32) -> Result<(), PreferenceError> {
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dpi_defaults_when_absent() {
        let mut prefs = MemoryPreferences::new();
        assert_eq!(prefs.dpi_setting(), DEFAULT_DPI);
        prefs.set_f32(DPI_PREFERENCE_KEY, 1.25).expect("set");
        assert_eq!(prefs.dpi_setting(), 1.25);
    }

    #[test]
    fn file_preferences_persist_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("prefs.json");
        {
            let mut prefs = JsonFilePreferences::open(&path).expect("open missing file");
            assert_eq!(prefs.dpi_setting(), DEFAULT_DPI);
            prefs.set_f32(DPI_PREFERENCE_KEY, 1.5).expect("save");
        }
        let prefs = JsonFilePreferences::open(&path).expect("reopen");
        assert_eq!(prefs.dpi_setting(), 1.5);
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(
            JsonFilePreferences::open(&path),
            Err(PreferenceError::Json(_))
        ));
    }
}
