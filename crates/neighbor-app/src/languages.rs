use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Display name, e.g. "English"
    pub name: String,
    /// Wikipedia language code, e.g. "en"
    pub code: String,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("language file not found: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode language file: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Languages the user may query, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Like [`LanguageCatalog::from_path`], but a missing or broken file is
    /// logged and yields an empty catalog.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!(path = %path.display(), "Failed to load languages: {e}");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn find(&self, code: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.code == code)
    }

    /// An empty catalog places no restriction on language codes.
    pub fn accepts(&self, code: &str) -> bool {
        self.is_empty() || self.find(code).is_some()
    }

    pub fn first(&self) -> Option<&Language> {
        self.languages.first()
    }
}
