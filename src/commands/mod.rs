//! # CLI Command Implementations
//!
//! This module contains the built-in subcommands of the `anytype-cli`
//! command-line tool. Remote commands (`spaces`, `objects`, `search`, ...) are
//! not listed here: they are generated from the command registry in
//! `anytype_cli::registry` and run by the generic dispatcher.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic.

pub mod auth;
pub mod version;
