//! Configuration validation

use std::time::Duration;

use super::core::CacheConfig;

/// Smallest header cap that still fits a status line and a few headers
const MIN_HEADER_BYTES: usize = 256;

/// Validate a configuration before a client is opened
///
/// # Errors
///
/// Returns a description of the first invalid field.
pub fn validate_config(config: &CacheConfig) -> Result<(), String> {
    if config.cache_dir.as_os_str().is_empty() {
        return Err("Cache directory cannot be empty".to_string());
    }

    if config.catalog_file.as_os_str().is_empty() {
        return Err("Catalog file name cannot be empty".to_string());
    }

    for (name, timeout) in [
        ("Connect timeout", config.connect_timeout),
        ("Read timeout", config.read_timeout),
        ("Write timeout", config.write_timeout),
    ] {
        if timeout == Duration::ZERO {
            return Err(format!("{name} must be greater than zero"));
        }
        if timeout > Duration::from_secs(3600) {
            return Err(format!("{name} must not exceed 1 hour"));
        }
    }

    if config.max_header_bytes < MIN_HEADER_BYTES {
        return Err(format!(
            "Header limit must be at least {MIN_HEADER_BYTES} bytes"
        ));
    }

    if let Some(user_agent) = &config.user_agent {
        if user_agent.is_empty() || user_agent.contains(['\r', '\n']) {
            return Err("User agent must be non-empty and single-line".to_string());
        }
    }

    Ok(())
}
