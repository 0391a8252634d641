//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use anytype_cli::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("You are not authenticated");
//!
//! // Use:
//! return Err(suggestions::not_authenticated());
//! ```

use std::path::Path;

use crate::error::Error;

/// Generate an error for a command run before `anytype-cli auth`.
pub fn not_authenticated() -> anyhow::Error {
    anyhow::anyhow!(
        "You are not authenticated\n\n\
         hint: Run 'anytype-cli auth' to pair the CLI with the Anytype app\n\
         hint: Or set ANYTYPE_APP_KEY and ANYTYPE_SESSION_TOKEN"
    )
}

/// Generate an error for credentials the API refused.
pub fn credentials_rejected(message: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Authentication failed: {message}\n\n\
         hint: Run 'anytype-cli auth --force' to pair the CLI again"
    )
}

/// Generate an error for an API that could not be reached.
///
/// Includes hints about starting the app and pointing the CLI elsewhere.
pub fn api_unreachable(base_url: &str, message: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Could not reach the Anytype API at {base_url}\n\
         error: {message}\n\n\
         hint: Make sure the Anytype desktop app is running\n\
         hint: Use --base-url or ANYTYPE_BASE_URL to connect elsewhere"
    )
}

/// Generate an error for a config file that could not be loaded.
pub fn config_unreadable(path: &Path, error: &Error) -> anyhow::Error {
    anyhow::anyhow!(
        "Failed to load config from {path}\n\
         error: {error}\n\n\
         hint: Use --config or ANYTYPE_CONFIG to point at another file",
        path = path.display()
    )
}

/// Attach hints to a library error where one helps.
pub fn explain(error: Error, base_url: &str) -> anyhow::Error {
    match error {
        Error::NotAuthenticated => not_authenticated(),
        Error::Auth { message } => credentials_rejected(&message),
        Error::Transport {
            message,
            unreachable: true,
            ..
        } => api_unreachable(base_url, &message),
        other => other.into(),
    }
}
