//! Configuration for impress-jats
//!
//! Settings that the importer needs but the article XML does not carry: the
//! journal's default locale, how language tags map to locales, and who the
//! imported files are attributed to.
//!
//! Loaded from TOML, by default from `<config dir>/impress/jats-import.toml`:
//!
//! ```toml
//! default_locale = "en_US"
//! editor_id = 1
//! submission_genre_id = 1
//! storage_root = "/var/lib/journal/files"
//!
//! [locale_aliases]
//! en = "en_US"
//! pt = "pt_BR"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File name looked up in the user config directory
pub const CONFIG_FILE_NAME: &str = "jats-import.toml";

/// Importer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Locale for untagged text and the primary representation
    pub default_locale: String,
    /// User recorded as uploader of the copied PDF
    pub editor_id: i64,
    /// Genre the copied PDF is filed under
    pub submission_genre_id: i64,
    /// Root directory of permanent file storage
    pub storage_root: Option<PathBuf>,
    /// Language tag (lowercase) → locale code
    pub locale_aliases: BTreeMap<String, String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            editor_id: 1,
            submission_genre_id: 1,
            storage_root: None,
            locale_aliases: BTreeMap::new(),
        }
    }
}

impl ImportConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("impress").join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!("Loading import config from {:?}", path);
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_locale.trim().is_empty() {
            return Err(ConfigError::MissingField("default_locale".to_string()));
        }

        if let Some((tag, _)) = self
            .locale_aliases
            .iter()
            .find(|(tag, locale)| tag.trim().is_empty() || locale.trim().is_empty())
        {
            return Err(ConfigError::InvalidAlias(tag.clone()));
        }

        if self.editor_id <= 0 {
            return Err(ConfigError::OutOfRange(
                "editor_id must be positive".to_string(),
            ));
        }

        if self.submission_genre_id <= 0 {
            return Err(ConfigError::OutOfRange(
                "submission_genre_id must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration loading or validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid locale alias: {0:?}")]
    InvalidAlias(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
