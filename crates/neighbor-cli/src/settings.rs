use anyhow::{Context, Result, bail};
use neighbor_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SETTINGS_DIR: &str = "neighbor-entity";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub pred_levels: u32,
    pub succ_levels: u32,
    pub language: String,
    /// Number of fetched graphs kept in memory; 0 disables caching
    pub cache_capacity: usize,
    pub languages_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            pred_levels: 0,
            succ_levels: 1,
            language: "en".to_string(),
            cache_capacity: 64,
            languages_file: None,
        }
    }
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))?;
        if !value.is_object() {
            bail!("Settings in {} must be a JSON object", path.display());
        }
        serde_json::from_value(value)
            .with_context(|| format!("Invalid settings in {}", path.display()))
    }

    /// An explicit path must exist; the per-user default is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_path(&path),
            _ => {
                debug!("No settings file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"language":"fr","cache_capacity":0}"#).unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.language, "fr");
        assert_eq!(settings.cache_capacity, 0);
        assert_eq!(settings.timeout_secs, 60);
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert!(settings.languages_file.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("nope.json"))).is_err());
    }

    #[test]
    fn test_non_object_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        for content in ["[]", "[\"https://example.org\", 5]", "42", "not json"] {
            fs::write(&path, content).unwrap();
            assert!(Settings::from_path(&path).is_err(), "accepted {content}");
        }
    }

    #[test]
    fn test_mistyped_field_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"timeout_secs":"sixty"}"#).unwrap();
        assert!(Settings::from_path(&path).is_err());
    }
}
