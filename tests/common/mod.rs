//! Shared test utilities for E2E tests.
//!
//! This module provides a config fixture and an axum stub server standing in for
//! the Anytype local API, so CLI tests run without the desktop app.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let server = StubServer::start(vec![Route::get("/v1/spaces", r#"{"data": []}"#)]);
//!     let fixture = TestFixture::new().with_credentials(&server.base_url());
//!     fixture.command().args(["spaces", "list"]).assert().success();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use assert_fs::prelude::*;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::responses;
    pub use super::{Route, StubServer, TestFixture};
}

/// Canned API response bodies.
#[allow(dead_code)]
pub mod responses {
    pub const SPACES: &str = r#"{
  "data": [
    {"object": "space", "id": "bafy-work", "name": "Work", "description": "Daily tasks"},
    {"object": "space", "id": "bafy-home", "name": "Home"}
  ],
  "pagination": {"total": 2, "offset": 0, "limit": 100, "has_more": false}
}"#;

    pub const AMBIGUOUS_SPACES: &str = r#"{
  "data": [
    {"id": "bafy-notes", "name": "Work Notes"},
    {"id": "bafy-tasks", "name": "Work Tasks"}
  ]
}"#;

    pub const WORK_SPACE: &str = r#"{
  "space": {"object": "space", "id": "bafy-work", "name": "Work", "description": "Daily tasks", "icon": null}
}"#;
}

/// One canned response of the stub server.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

#[allow(dead_code)]
impl Route {
    pub fn get(path: &'static str, body: &str) -> Self {
        Self::new("GET", path, 200, body)
    }

    pub fn post(path: &'static str, body: &str) -> Self {
        Self::new("POST", path, 200, body)
    }

    pub fn delete(path: &'static str, body: &str) -> Self {
        Self::new("DELETE", path, 200, body)
    }

    pub fn new(method: &'static str, path: &'static str, status: u16, body: &str) -> Self {
        Self {
            method,
            path,
            status,
            body: body.to_string(),
        }
    }
}

/// A request received by the stub server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path including the query string.
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is not JSON")
    }
}

/// An axum server answering from a fixed route table.
///
/// Unknown routes get a 404. Every request is recorded.
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[derive(Clone)]
struct StubState {
    routes: Arc<Vec<Route>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl StubServer {
    pub fn start(routes: Vec<Route>) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
        listener
            .set_nonblocking(true)
            .expect("Failed to make stub listener non-blocking");
        let addr = listener.local_addr().expect("Failed to read stub address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = StubState {
            routes: Arc::new(routes),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(answer).with_state(state);

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build stub runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("Failed to adopt listener");
                axum::serve(listener, app).await.expect("Stub server failed");
            });
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `"METHOD path"` of every request, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path()))
            .collect()
    }
}

async fn answer(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let request = RecordedRequest {
        method: method.to_string(),
        target: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body,
    };

    let (status, payload) = state
        .routes
        .iter()
        .find(|r| r.method == request.method && r.path == request.path())
        .map(|r| (r.status, r.body.clone()))
        .unwrap_or((404, r#"{"message":"no such route"}"#.to_string()));
    // Record before answering so the CLI cannot exit first.
    state.requests.lock().unwrap().push(request);

    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        [(header::CONTENT_TYPE, "application/json")],
        payload,
    )
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to read address");
    drop(listener);
    format!("http://{addr}")
}

/// A temporary home holding the CLI config file.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write the config file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("config.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Write a config holding test credentials for `base_url`.
    pub fn with_credentials(self, base_url: &str) -> Self {
        self.with_config(&format!(
            "app_key: test-key\nsession_token: test-token\nbase_url: {base_url}\ntimeout_secs: 5\n"
        ))
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    /// Create a command isolated from the user's environment and config.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("anytype-cli");
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("ANYTYPE_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("ANYTYPE_APP_KEY")
            .env_remove("ANYTYPE_SESSION_TOKEN")
            .env_remove("ANYTYPE_BASE_URL")
            .env_remove("ANYTYPE_TIMEOUT_SECS")
            .env_remove("RUST_LOG");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip trailing whitespace from each line for stable comparisons.
#[allow(dead_code)]
pub fn normalize_output(output: &str) -> String {
    output
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
