//! # Anytype CLI
//!
//! This is the binary entry point for the `anytype-cli` command-line tool.
//!
//! Its primary responsibilities are:
//! - Building the command tree (built-in commands plus the registry) and
//!   parsing command-line arguments with `clap`.
//! - Executing the selected command.
//! - Handling top-level application errors and translating them into
//!   user-friendly output.
//!
//! The core logic lives in the `lib.rs` library crate, so the binary stays a
//! thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
