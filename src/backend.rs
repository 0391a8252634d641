//! # Backend Collaborator
//!
//! The remote API is reached through the [`Backend`] trait. Everything above
//! it (resolution, dispatch, rendering) is written against the trait, which
//! keeps the core testable with an in-memory fake; [`crate::client`] provides
//! the HTTP implementation used by the binary.
//!
//! A [`Request`] names an [`Endpoint`] whose path template has one `{}` slot
//! per canonical identifier, plus optional query pairs and a JSON body.

use std::fmt;
use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::resolve::NamedEntity;

/// The listing a resolution snapshot is taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Spaces,
    Types { space_id: String },
    Members { space_id: String },
}

impl Scope {
    /// Plural noun used in messages about this scope.
    pub fn noun(&self) -> &'static str {
        match self {
            Scope::Spaces => "spaces",
            Scope::Types { .. } => "types",
            Scope::Members { .. } => "members",
        }
    }

    /// API path of the listing.
    pub fn path(&self) -> String {
        match self {
            Scope::Spaces => "/v1/spaces".to_string(),
            Scope::Types { space_id } => format!("/v1/spaces/{space_id}/types"),
            Scope::Members { space_id } => format!("/v1/spaces/{space_id}/members"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// A remote operation: HTTP method plus a path template with `{}` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }

    /// Number of identifier slots in the path template.
    pub fn slots(&self) -> usize {
        self.path.matches("{}").count()
    }

    /// Fill the slots with `ids`, in order.
    pub fn fill(&self, ids: &[String]) -> Result<String> {
        if ids.len() != self.slots() {
            return Err(Error::Validation {
                message: format!(
                    "{} {} expects {} identifier(s), got {}",
                    self.method,
                    self.path,
                    self.slots(),
                    ids.len()
                ),
            });
        }
        let mut path = String::with_capacity(self.path.len());
        let mut ids = ids.iter();
        for (i, part) in self.path.split("{}").enumerate() {
            if i > 0 {
                if let Some(id) = ids.next() {
                    path.push_str(id);
                }
            }
            path.push_str(part);
        }
        Ok(path)
    }
}

/// One call against the backend, with identifiers already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub endpoint: Endpoint,
    pub ids: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl Request {
    pub fn new(endpoint: Endpoint, ids: Vec<String>, timeout: Duration) -> Self {
        Self {
            endpoint,
            ids,
            query: Vec::new(),
            body: None,
            timeout,
        }
    }

    /// The concrete path with identifiers substituted.
    pub fn path(&self) -> Result<String> {
        self.endpoint.fill(&self.ids)
    }
}

/// The remote object-graph API.
pub trait Backend {
    /// Fetch a fresh snapshot of the entities in `scope`.
    fn list_named_entities(&self, scope: &Scope, timeout: Duration) -> Result<Vec<NamedEntity>>;

    /// Perform `request` and return the decoded response body.
    fn invoke(&self, request: &Request) -> Result<Value>;
}
