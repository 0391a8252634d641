//! Default values for anytype-cli configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Base URL of the Anytype desktop app's local API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:31009";

/// Seconds allowed for one backend call, snapshot fetches included.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Value of the `Anytype-Version` header sent with every request.
pub const API_VERSION: &str = "2025-05-20";

/// Application name shown in the Anytype app during the auth handshake.
pub const APP_NAME: &str = "anytype-cli";

/// Name of the directory holding the config file, under the home directory.
pub const CONFIG_DIR_NAME: &str = ".anytype-cli";

/// Name of the config file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILENAME: &str = "config.yaml";

/// Returns the default config file path: `~/.anytype-cli/config.yaml`.
///
/// Falls back to `.anytype-cli/config.yaml` in the current directory if the
/// home directory cannot be determined.
///
/// This can be overridden by the `--config` CLI flag or the
/// `ANYTYPE_CONFIG` environment variable.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILENAME)
}
