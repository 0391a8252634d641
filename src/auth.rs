//! # Authentication Handshake
//!
//! Pairing the CLI with the Anytype app takes two calls: the app is asked to
//! display a four-digit code, the user types it in, and the code is exchanged
//! for an app key and a session token. The prompt is a closure so the flow can
//! run without a terminal in tests.

use std::time::Duration;

use log::{debug, info};

use crate::client::{AuthApi, Credentials};
use crate::config::Config;
use crate::defaults::APP_NAME;
use crate::error::{Error, Result};

/// Run the handshake, asking `prompt` for the displayed code.
pub fn authenticate<A, P>(api: &A, timeout: Duration, prompt: P) -> Result<Credentials>
where
    A: AuthApi + ?Sized,
    P: FnOnce() -> Result<String>,
{
    let challenge_id = api.create_challenge(APP_NAME, timeout)?;
    debug!("Received challenge {challenge_id}");

    let code = prompt()?;
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::Validation {
            message: "no code entered".to_string(),
        });
    }

    let credentials = api.solve_challenge(&challenge_id, code, timeout)?;
    info!("Authentication succeeded");
    Ok(credentials)
}

/// Store `credentials` in `config`.
pub fn apply(config: &mut Config, credentials: Credentials) {
    config.app_key = credentials.app_key;
    config.session_token = credentials.session_token;
}
