//! # Output Configuration
//!
//! This module decides how results reach the terminal: the output format
//! selected with `-o/--output`, structured serialization for the non-tabular
//! formats, and color/emoji decorations based on terminal capabilities and
//! user preferences.
//!
//! ## Formats
//!
//! - `table` (default): human-oriented text built by the command's view,
//!   usually an aligned table from [`crate::table`].
//! - `json`: pretty-printed JSON of the raw result.
//! - `yaml`: YAML of the raw result.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! Tables themselves are never colored, so their widths stay exact.

use std::env;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Aligned text tables and detail blocks
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

/// Serialize `data` as pretty JSON followed by a newline.
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

/// Serialize `data` as YAML.
pub fn format_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    Ok(serde_yaml::to_string(data)?)
}

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// # Arguments
    /// * `color_flag` - The value of the --color CLI flag: "always", "never", or "auto"
    ///
    /// # Behavior
    /// - `--color=always`: Force colors on (overrides NO_COLOR)
    /// - `--color=never`: Force colors off
    /// - `--color=auto`: Detect based on environment
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Style `text` as a success message when colors are enabled.
    pub fn success(&self, text: &str) -> String {
        if self.use_color {
            console::style(text).green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the appropriate string based on color configuration.
///
/// When colors are enabled, returns the emoji. When disabled, returns
/// the plain text alternative.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
    }

    #[test]
    fn test_emoji_helper_with_color() {
        let config = OutputConfig::with_color();
        assert_eq!(emoji(&config, "✔", "[OK]"), "✔");
    }

    #[test]
    fn test_emoji_helper_without_color() {
        let config = OutputConfig::without_color();
        assert_eq!(emoji(&config, "✔", "[OK]"), "[OK]");
    }

    #[test]
    fn test_success_without_color_is_plain() {
        let config = OutputConfig::without_color();
        assert_eq!(config.success("done"), "done");
    }

    #[test]
    fn test_format_json_is_pretty() {
        let out = format_json(&json!({"id": "a1", "name": "Alpha"})).unwrap();
        assert!(out.contains("\n  \"id\": \"a1\""));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn test_format_yaml() {
        let out = format_yaml(&json!([{"id": "a1"}])).unwrap();
        assert_eq!(out, "- id: a1\n");
    }
}
