//! Path utilities for askdb.
//!
//! Per-user files live under `~/.askdb/`:
//! - `~/.askdb/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the askdb home directory (`~/.askdb/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".askdb")
}

/// Returns the default config file path (`~/.askdb/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
