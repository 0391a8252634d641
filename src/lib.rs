//! # Anytype CLI Library
//!
//! This library provides the core of the `anytype-cli` command-line tool: a
//! terminal client for the local API of the Anytype desktop app. It can also
//! be used on its own by anything that needs to turn human-friendly names into
//! Anytype identifiers or to print API results as aligned tables.
//!
//! ## Quick Example
//!
//! ```
//! use anytype_cli::resolve::{resolve, NamedEntity, Resolution};
//! use anytype_cli::table::Table;
//!
//! let spaces = vec![
//!     NamedEntity::new("bafy1", "Work"),
//!     NamedEntity::new("bafy2", "Personal"),
//! ];
//! assert_eq!(resolve(&spaces, "work"), Resolution::Resolved("bafy1".to_string()));
//!
//! let mut table = Table::new(["ID", "NAME"]);
//! table.add_row(["bafy1", "Work"]);
//! assert_eq!(table.render(), "ID     NAME \n-----  -----\nbafy1  Work \n");
//! ```
//!
//! ## Core Concepts
//!
//! - **Resolution (`resolve`)**: maps a user-typed identifier to a canonical
//!   ID against a fresh snapshot of candidates: exact ID, then
//!   case-insensitive name, then partial name.
//! - **Tables (`table`)**: column-width computation, truncation and
//!   left-justified rendering.
//! - **Registry (`registry`)**: every remote command as data, with its
//!   arguments, endpoints and result view.
//! - **Dispatch (`dispatch`)**: runs a registry entry against a `Backend`.
//! - **Views (`view`)**: turn JSON results into tables, detail blocks or raw
//!   text, or serialize them as JSON/YAML.
//! - **Backend (`backend`, `client`)**: the remote API seam and its blocking
//!   HTTP implementation.
//!
//! ## Execution Flow
//!
//! 1.  **Configuration**: `config::Config::load` reads the YAML file and
//!     environment overrides.
//! 2.  **Resolution**: identifier arguments are resolved against snapshots
//!     listed by the backend.
//! 3.  **Invocation**: the endpoint matching the resolved identifiers is
//!     called once.
//! 4.  **Rendering**: the command's view formats the result.

pub mod auth;
pub mod backend;
pub mod client;
pub mod config;
pub mod defaults;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod registry;
pub mod resolve;
pub mod suggestions;
pub mod table;
pub mod view;

#[cfg(test)]
mod resolve_proptest;
#[cfg(test)]
mod table_proptest;
