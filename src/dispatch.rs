//! # Command Dispatch
//!
//! [`Dispatcher`] runs any [`CommandSpec`] against a [`Backend`]:
//!
//! 1. Each identifier argument is resolved. Spaces, types and members are
//!    looked up in a fresh snapshot from the backend; literals pass through.
//! 2. Flags are validated and written into the JSON body.
//! 3. The endpoint whose slot count matches the resolved identifiers is
//!    called once.
//! 4. The result is rendered through the command's view.
//!
//! Backend errors surface unchanged. An identifier matching several entities
//! stops the command before the main call with
//! [`Error::AmbiguousIdentifier`].

use std::collections::BTreeMap;
use std::time::Duration;

use log::debug;
use serde_json::{Map, Value};

use crate::backend::{Backend, Method, Request, Scope};
use crate::error::{Error, Result};
use crate::output::OutputFormat;
use crate::registry::{CommandSpec, FlagTarget, IdKind, Target};
use crate::resolve::{describe_ambiguity, resolve, Resolution};

/// Argument values supplied for one command, keyed by argument name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    values: BTreeMap<String, Vec<String>>,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Invocation::set`].
    pub fn with<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(name, values);
        self
    }

    pub fn set<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.values.insert(name.to_string(), values);
        }
    }

    /// First value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// All values of `name`.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Executes registry commands against a backend.
pub struct Dispatcher<'a> {
    backend: &'a dyn Backend,
    timeout: Duration,
    format: OutputFormat,
}

impl<'a> Dispatcher<'a> {
    pub fn new(backend: &'a dyn Backend, timeout: Duration) -> Self {
        Self {
            backend,
            timeout,
            format: OutputFormat::default(),
        }
    }

    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Run `spec` and return the rendered output.
    pub fn run(&self, spec: &CommandSpec, invocation: &Invocation) -> Result<String> {
        let request = self.prepare(spec, invocation)?;
        debug!(
            "{}: {} {}",
            spec.name(),
            request.endpoint.method,
            request.path()?
        );
        let result = self.backend.invoke(&request)?;
        spec.view.render(&request, &result, self.format)
    }

    /// Resolve identifiers and assemble the request for `spec`.
    pub fn prepare(&self, spec: &CommandSpec, invocation: &Invocation) -> Result<Request> {
        let mut ids = Vec::new();
        let mut space: Option<String> = None;
        let mut body = Map::new();

        for positional in spec.positionals {
            match positional.target {
                Target::Path => {
                    let input = invocation
                        .get(positional.name)
                        .ok_or_else(|| missing(positional.name))?;
                    let id = self.resolve_id(positional.kind, input, space.as_deref())?;
                    if positional.kind == IdKind::Space && space.is_none() {
                        space = Some(id.clone());
                    }
                    ids.push(id);
                }
                Target::BodyList(path) => {
                    let values = invocation.get_all(positional.name);
                    if values.is_empty() {
                        return Err(missing(positional.name));
                    }
                    let items = values.iter().cloned().map(Value::String).collect();
                    set_body(&mut body, path, Value::Array(items));
                }
            }
        }

        for flag in spec.flags {
            if let Some(other) = flag.only_with {
                if invocation.get(other).is_none() {
                    debug!("Ignoring --{} without --{}", flag.name, other);
                    continue;
                }
            }
            let value = match invocation.get(flag.name).or(flag.default) {
                Some(value) => value,
                None if flag.required => {
                    return Err(Error::Validation {
                        message: format!("required flag --{} not provided", flag.name),
                    })
                }
                None => continue,
            };
            if !flag.choices.is_empty() && !flag.choices.contains(&value) {
                return Err(Error::Validation {
                    message: format!(
                        "invalid value '{}' for --{} (expected one of: {})",
                        value,
                        flag.name,
                        flag.choices.join(", ")
                    ),
                });
            }

            match flag.target {
                FlagTarget::Body(path) => {
                    set_body(&mut body, path, Value::String(value.to_string()))
                }
                FlagTarget::List(path) => {
                    let items = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| Value::String(s.to_string()))
                        .collect();
                    set_body(&mut body, path, Value::Array(items));
                }
                FlagTarget::Emoji(path) => {
                    let mut icon = Map::new();
                    icon.insert("format".to_string(), Value::from("emoji"));
                    icon.insert("emoji".to_string(), Value::from(value));
                    set_body(&mut body, path, Value::Object(icon));
                }
                FlagTarget::Id(kind) => {
                    let id = self.resolve_id(kind, value, space.as_deref())?;
                    ids.push(id);
                }
            }
        }

        let endpoint = spec.endpoint_for(ids.len()).ok_or_else(|| Error::Validation {
            message: format!(
                "{} has no endpoint taking {} identifier(s)",
                spec.name(),
                ids.len()
            ),
        })?;

        let mut request = Request::new(endpoint, ids, self.timeout);
        if endpoint.method == Method::Post || !body.is_empty() {
            request.body = Some(Value::Object(body));
        }
        Ok(request)
    }

    /// Turn a human-supplied identifier into a canonical one.
    ///
    /// Types and members are looked up inside `space`. Input that matches
    /// nothing is returned unchanged.
    pub fn resolve_id(&self, kind: IdKind, input: &str, space: Option<&str>) -> Result<String> {
        let scope = match (kind, space) {
            (IdKind::Literal, _) => return Ok(input.to_string()),
            (IdKind::Space, _) => Scope::Spaces,
            (IdKind::Type, Some(space_id)) => Scope::Types {
                space_id: space_id.to_string(),
            },
            (IdKind::Member, Some(space_id)) => Scope::Members {
                space_id: space_id.to_string(),
            },
            (_, None) => {
                return Err(Error::Validation {
                    message: format!("cannot resolve '{input}' without a space"),
                })
            }
        };

        let snapshot = self.backend.list_named_entities(&scope, self.timeout)?;
        match resolve(&snapshot, input) {
            Resolution::Resolved(id) => {
                debug!("Resolved {} '{}' to {}", scope.noun(), input, id);
                Ok(id)
            }
            Resolution::Unresolved(raw) => {
                debug!("No {} matched '{}', passing it through", scope.noun(), input);
                Ok(raw)
            }
            Resolution::Ambiguous(candidates) => Err(Error::AmbiguousIdentifier {
                message: describe_ambiguity(scope.noun(), input, &candidates),
            }),
        }
    }
}

fn missing(name: &str) -> Error {
    Error::Validation {
        message: format!("missing required argument <{name}>"),
    }
}

/// Store `value` at the dot-separated `path`, creating intermediate objects.
fn set_body(body: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            body.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let child = body
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            if let Value::Object(map) = child {
                set_body(map, rest, value);
            }
        }
    }
}
