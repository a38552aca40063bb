//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON. Every section
//! defaults sensibly so a completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None`, the file does not exist, or it fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if self.storage.read_chunk_size == 0 {
            warnings.push(format!(
                "storage.read_chunk_size is 0; falling back to {DEFAULT_READ_CHUNK_SIZE}"
            ));
        }

        if self.storage.media_dir.as_os_str().is_empty() {
            warnings.push("storage.media_dir is empty; files resolve against the working directory".into());
        } else if !self.storage.media_dir.is_dir() {
            warnings.push(format!(
                "storage.media_dir {} does not exist; filesystem media will return 404",
                self.storage.media_dir.display()
            ));
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            db_path: PathBuf::from("data/mediavault.db"),
        }
    }
}

/// Default size of each read from a media file.
pub const DEFAULT_READ_CHUNK_SIZE: usize = 64 * 1024;

/// One year, the lifetime advertised to caches for published media.
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 31_536_000;

/// Media storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory that filesystem-backed records are resolved against.
    pub media_dir: PathBuf,
    /// Capacity of each chunk read from disk while streaming.
    pub read_chunk_size: usize,
    /// `max-age` of the `Cache-Control` header on served media.
    pub cache_max_age_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_dir: PathBuf::from("uploads/media"),
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
        }
    }
}

impl StorageConfig {
    /// The `Cache-Control` value for served media.
    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age_secs)
    }

    /// Chunk size with the zero case mapped to the default.
    pub fn effective_chunk_size(&self) -> usize {
        if self.read_chunk_size == 0 {
            DEFAULT_READ_CHUNK_SIZE
        } else {
            self.read_chunk_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.media_dir, PathBuf::from("uploads/media"));
        assert_eq!(config.storage.read_chunk_size, 64 * 1024);
        assert_eq!(config.storage.cache_control(), "public, max-age=31536000");
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config =
            Config::from_json(r#"{"storage": {"media_dir": "/srv/media"}, "server": {"port": 9000}}"#)
                .unwrap();
        assert_eq!(config.storage.media_dir, PathBuf::from("/srv/media"));
        assert_eq!(config.storage.cache_max_age_secs, 31_536_000);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.db_path, PathBuf::from("data/mediavault.db"));
    }

    #[test]
    fn invalid_json_is_validation_error() {
        let err = Config::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(Some(&dir.path().join("nope.json")));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn load_or_default_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"server": {"port": 1234}}"#).unwrap();
        assert_eq!(Config::load_or_default(Some(&path)).server.port, 1234);
    }

    #[test]
    fn validate_flags_zero_chunk_and_missing_dir() {
        let mut config = Config::default();
        config.server.port = 0;
        config.storage.read_chunk_size = 0;
        config.storage.media_dir = PathBuf::from("/definitely/not/here");

        let warnings = config.validate();
        assert_eq!(warnings.len(), 3);
        assert_eq!(config.storage.effective_chunk_size(), DEFAULT_READ_CHUNK_SIZE);
    }

    #[test]
    fn validate_clean_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.media_dir = dir.path().to_path_buf();
        assert!(config.validate().is_empty());
    }
}
