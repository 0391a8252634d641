//! # Error Handling
//!
//! This module defines the centralized error type for the `anytype-cli`
//! library. It uses `thiserror` to build a single `Error` enum covering every
//! failure the library can report, each with a descriptive message.
//!
//! ## Taxonomy
//!
//! - **Backend failures** (`Transport`, `Auth`, `NotFound`, `Validation`):
//!   reported by the remote API collaborator. They are never retried here.
//! - **`AmbiguousIdentifier`**: a human-supplied identifier matched several
//!   entities. The message already lists the capped candidate set, so the
//!   caller only has to print it.
//! - **`NotAuthenticated`**: a command needing credentials ran before
//!   `anytype-cli auth`.
//! - **Configuration and serialization** (`ConfigParse`, `Io`, `Yaml`, `Json`,
//!   `UrlParse`): local problems with the config file or output encoding.
//!
//! An identifier that matches nothing is deliberately *not* an error: it is
//! forwarded to the backend as-is (see [`crate::resolve`]).

use thiserror::Error;

/// Main error type for anytype-cli operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be parsed.
    ///
    /// Includes an optional hint about how to fix it.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The remote API could not be reached or returned an unusable answer.
    ///
    /// `unreachable` is set when no answer arrived at all (connection
    /// refused, timed out).
    #[error("Transport error: {url} - {message}")]
    Transport {
        url: String,
        message: String,
        unreachable: bool,
    },

    /// The remote API rejected the credentials.
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// The remote API does not know the requested entity.
    #[error("Not found: {url} - {message}")]
    NotFound { url: String, message: String },

    /// The remote API rejected the request parameters.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A human-supplied identifier matched more than one entity.
    #[error("{message}")]
    AmbiguousIdentifier { message: String },

    /// No credentials are stored yet.
    #[error("You are not authenticated")]
    NotAuthenticated,

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
