//! JSON configuration loading

use std::fs;
use std::path::Path;

use super::core::CacheConfig;
use super::validation::validate_config;
use crate::error::{self, Result};

impl CacheConfig {
    /// Parse a configuration from JSON text
    ///
    /// Missing fields take their default values. Durations are given in
    /// milliseconds.
    ///
    /// # Errors
    ///
    /// Returns a builder error if the JSON is malformed or fails validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CacheConfig = serde_json::from_str(json).map_err(error::configuration)?;
        validate_config(&config).map_err(error::configuration)?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read and a builder error if
    /// its content is invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| error::io(e).with_url(path.display().to_string()))?;
        Self::from_json_str(&json)
    }
}
