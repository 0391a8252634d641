//! # Configuration
//!
//! The CLI keeps its settings in a small YAML file, by default
//! `~/.anytype-cli/config.yaml`:
//!
//! ```yaml
//! app_key: "..."
//! session_token: "..."
//! base_url: http://localhost:31009
//! timeout_secs: 30
//! ```
//!
//! ## Precedence
//!
//! Lowest to highest:
//!
//! 1. Built-in defaults ([`crate::defaults`]).
//! 2. The config file. A missing file is created with the defaults.
//! 3. `ANYTYPE_APP_KEY`, `ANYTYPE_SESSION_TOKEN`, `ANYTYPE_BASE_URL` and
//!    `ANYTYPE_TIMEOUT_SECS` environment variables.
//! 4. The `--base-url` command line flag (applied by the binary).
//!
//! The resulting [`Config`] is an explicit value: it is loaded once at start
//! up and passed to whoever needs it.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::{Error, Result};

/// CLI settings and stored credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app_key: String,
    #[serde(default)]
    pub session_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_key: String::new(),
            session_token: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load the config file at `path`, creating it with defaults when absent,
    /// then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            from_file(path)?
        } else {
            debug!("Config file {} not found, writing defaults", path.display());
            let config = Config::default();
            config.save(path)?;
            config
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Apply `ANYTYPE_*` overrides looked up through `lookup`.
    ///
    /// Empty values are ignored, as is a timeout that is not a number.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(app_key) = get("ANYTYPE_APP_KEY") {
            self.app_key = app_key;
        }
        if let Some(token) = get("ANYTYPE_SESSION_TOKEN") {
            self.session_token = token;
        }
        if let Some(base_url) = get("ANYTYPE_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(timeout) = get("ANYTYPE_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => debug!("Ignoring non-numeric ANYTYPE_TIMEOUT_SECS={timeout}"),
            }
        }
    }

    /// Whether both halves of the credential pair are present.
    pub fn is_authenticated(&self) -> bool {
        !self.app_key.is_empty() && !self.session_token.is_empty()
    }

    /// Fail with [`Error::NotAuthenticated`] unless credentials are stored.
    pub fn require_credentials(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(Error::NotAuthenticated)
        }
    }

    /// Per-call timeout for backend requests. Zero means the default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

/// Parse a config file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path.as_ref())?;
    parse(&content)
}

/// Parse config YAML. An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    if yaml_content.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(
            "Fix the YAML or delete the file to regenerate it with defaults".to_string(),
        ),
    })
}
