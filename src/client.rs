//! # HTTP Client
//!
//! [`HttpBackend`] talks to the Anytype desktop app's local API with a
//! blocking `reqwest` client. Every request carries the app key as a bearer
//! token and the `Anytype-Version` header.
//!
//! Non-success statuses map onto the crate error taxonomy:
//!
//! | Status      | Error                    |
//! |-------------|--------------------------|
//! | 401, 403    | [`Error::Auth`]          |
//! | 404         | [`Error::NotFound`]      |
//! | 400, 422    | [`Error::Validation`]    |
//! | anything else, or no answer | [`Error::Transport`] |

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::backend::{Backend, Method, Request, Scope};
use crate::defaults::API_VERSION;
use crate::error::{Error, Result};
use crate::resolve::NamedEntity;

/// Credentials issued by the auth handshake.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub app_key: String,
    pub session_token: String,
}

/// The two-step challenge/code handshake.
pub trait AuthApi {
    /// Ask the app to display a code; returns the challenge ID.
    fn create_challenge(&self, app_name: &str, timeout: Duration) -> Result<String>;

    /// Exchange the displayed code for credentials.
    fn solve_challenge(&self, challenge_id: &str, code: &str, timeout: Duration) -> Result<Credentials>;
}

/// Blocking HTTP implementation of [`Backend`] and [`AuthApi`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    app_key: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, app_key: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder().build().map_err(|e| Error::Transport {
            url: base_url.to_string(),
            message: e.to_string(),
            unreachable: false,
        })?;
        Ok(Self {
            base_url,
            app_key: app_key.into(),
            client,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<Value> {
        let url = self.url_for(path);
        debug!("{method} {url}");

        let mut req = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        }
        .timeout(timeout)
        .header("Anytype-Version", API_VERSION);
        if !self.app_key.is_empty() {
            req = req.bearer_auth(&self.app_key);
        }
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let transport = |e: reqwest::Error| Error::Transport {
            url: url.clone(),
            unreachable: e.is_connect() || e.is_timeout(),
            message: e.to_string(),
        };
        let resp = req.send().map_err(transport)?;
        let status = resp.status();
        let text = resp.text().map_err(transport)?;
        debug!("{method} {url} -> {status}");

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &url, &text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| Error::Transport {
            url,
            message: format!("invalid JSON response: {e}"),
            unreachable: false,
        })
    }
}

impl Backend for HttpBackend {
    fn list_named_entities(&self, scope: &Scope, timeout: Duration) -> Result<Vec<NamedEntity>> {
        let listing = self.send(Method::Get, &scope.path(), &[], None, timeout)?;
        match listing.get("data") {
            Some(data) => Ok(serde_json::from_value(data.clone())?),
            None => Ok(Vec::new()),
        }
    }

    fn invoke(&self, request: &Request) -> Result<Value> {
        self.send(
            request.endpoint.method,
            &request.path()?,
            &request.query,
            request.body.as_ref(),
            request.timeout,
        )
    }
}

impl AuthApi for HttpBackend {
    fn create_challenge(&self, app_name: &str, timeout: Duration) -> Result<String> {
        let query = [("app_name".to_string(), app_name.to_string())];
        let resp = self.send(Method::Post, "/v1/auth/display_code", &query, None, timeout)?;
        resp.get("challenge_id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::Auth {
                message: "response carried no challenge_id".to_string(),
            })
    }

    fn solve_challenge(&self, challenge_id: &str, code: &str, timeout: Duration) -> Result<Credentials> {
        let query = [
            ("challenge_id".to_string(), challenge_id.to_string()),
            ("code".to_string(), code.to_string()),
        ];
        let resp = self.send(Method::Post, "/v1/auth/token", &query, None, timeout)?;
        serde_json::from_value(resp).map_err(|e| Error::Auth {
            message: format!("unexpected token response: {e}"),
        })
    }
}

/// Map a non-success status to an error, preferring the API's own message.
fn status_error(status: u16, url: &str, body: &str) -> Error {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string());
    let message = if message.is_empty() {
        format!("HTTP {status}")
    } else {
        message
    };

    match status {
        401 | 403 => Error::Auth { message },
        404 => Error::NotFound {
            url: url.to_string(),
            message,
        },
        400 | 422 => Error::Validation { message },
        _ => Error::Transport {
            url: url.to_string(),
            message: format!("HTTP {status}: {message}"),
            unreachable: false,
        },
    }
}
