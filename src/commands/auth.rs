//! # Auth Command Implementation
//!
//! This module implements the `auth` subcommand, which pairs the CLI with the
//! running Anytype desktop app.
//!
//! ## Flow
//!
//! 1. The app is asked to show a four-digit code.
//! 2. The user types the code at the prompt.
//! 3. The code is exchanged for an app key and a session token, which are
//!    written to the config file.
//!
//! Nothing happens when credentials are already stored, unless `--force` is
//! given.

use std::io;

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

use anytype_cli::auth;
use anytype_cli::client::HttpBackend;
use anytype_cli::config;
use anytype_cli::error::Error;
use anytype_cli::output::{emoji, OutputConfig};
use anytype_cli::suggestions;

use crate::cli::GlobalArgs;

/// Authenticate with the Anytype app
#[derive(Args, Debug)]
pub struct AuthArgs {
    /// Re-authenticate even when credentials are already stored
    #[arg(long)]
    pub force: bool,
}

/// Execute the `auth` command.
pub fn execute(args: AuthArgs, globals: &GlobalArgs, output: &OutputConfig) -> Result<()> {
    let (path, config) = globals.load_config()?;

    if config.is_authenticated() && !args.force {
        println!(
            "{} Already authenticated. Use --force to re-authenticate.",
            emoji(output, "✅", "[OK]")
        );
        return Ok(());
    }

    println!("Requesting a code from the Anytype app at {}...", config.base_url);
    let backend = HttpBackend::new(&config.base_url, "")?;
    let credentials = auth::authenticate(&backend, config.timeout(), prompt_for_code)
        .map_err(|e| match e {
            Error::Auth { .. } | Error::Validation { .. } => e.into(),
            other => suggestions::explain(other, &config.base_url),
        })?;

    // Only the credentials change; environment overrides stay out of the file.
    let mut stored = config::from_file(&path)?;
    auth::apply(&mut stored, credentials);
    stored.save(&path)?;

    println!(
        "{}",
        output.success(&format!(
            "{} Successfully authenticated. Credentials saved to {}",
            emoji(output, "🔑", "[OK]"),
            path.display()
        ))
    );
    Ok(())
}

fn prompt_for_code() -> anytype_cli::error::Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter the 4-digit code shown in the Anytype app")
        .interact_text()
        .map_err(|e| Error::Io(io::Error::other(e.to_string())))
}
