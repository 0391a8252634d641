//! # Version Command Implementation

use anyhow::Result;

/// The line printed by `anytype-cli version`.
pub fn version_line() -> String {
    format!("anytype-cli version {}", env!("CARGO_PKG_VERSION"))
}

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    println!("{}", version_line());
    Ok(())
}
