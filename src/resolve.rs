//! # Identifier Resolution
//!
//! Users refer to spaces, types and members by whatever they remember: the
//! opaque ID copied from an earlier listing, the display name, or a fragment
//! of it. [`resolve`] turns such a string into one canonical ID using a
//! snapshot of the entities the backend currently knows about.
//!
//! ## Rules
//!
//! Applied in order, the first rule that produces an answer wins:
//!
//! 1. **Exact ID**: byte-exact, case-sensitive comparison against every ID.
//! 2. **Exact name**: case-insensitive comparison against every name. A single
//!    hit resolves. Several entities sharing a name (ignoring case) produce
//!    [`Resolution::Ambiguous`] so the user picks by ID.
//! 3. **Partial name**: case-insensitive substring search. One hit resolves,
//!    several are ambiguous.
//! 4. **Fallback**: nothing matched, the input is handed back untouched as
//!    [`Resolution::Unresolved`] and the caller forwards it verbatim.
//!
//! The function never fails and performs no I/O; fetching the snapshot is the
//! caller's job.

use serde::{Deserialize, Serialize};

/// Maximum number of candidates listed in a disambiguation message.
pub const DISAMBIGUATION_CAP: usize = 5;

/// The minimal shape of a backend entity that can be referred to by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl NamedEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Outcome of resolving one human-supplied identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one entity matched; carries its canonical ID.
    Resolved(String),
    /// Several entities matched, in snapshot order. Never auto-picked.
    Ambiguous(Vec<NamedEntity>),
    /// Nothing matched; carries the original input for pass-through.
    Unresolved(String),
}

impl Resolution {
    /// The identifier to send to the backend, or `None` when ambiguous.
    pub fn into_id(self) -> Option<String> {
        match self {
            Resolution::Resolved(id) | Resolution::Unresolved(id) => Some(id),
            Resolution::Ambiguous(_) => None,
        }
    }
}

/// Resolve `input` against a snapshot of `candidates`.
pub fn resolve(candidates: &[NamedEntity], input: &str) -> Resolution {
    if input.is_empty() {
        return Resolution::Unresolved(String::new());
    }

    if let Some(entity) = candidates.iter().find(|e| e.id == input) {
        return Resolution::Resolved(entity.id.clone());
    }

    let folded = input.to_lowercase();

    let exact: Vec<&NamedEntity> = candidates
        .iter()
        .filter(|e| e.name.to_lowercase() == folded)
        .collect();
    if let Some(resolution) = decide(&exact) {
        return resolution;
    }

    let partial: Vec<&NamedEntity> = candidates
        .iter()
        .filter(|e| e.name.to_lowercase().contains(&folded))
        .collect();
    if let Some(resolution) = decide(&partial) {
        return resolution;
    }

    Resolution::Unresolved(input.to_string())
}

fn decide(matches: &[&NamedEntity]) -> Option<Resolution> {
    match matches {
        [] => None,
        [single] => Some(Resolution::Resolved(single.id.clone())),
        many => Some(Resolution::Ambiguous(
            many.iter().map(|e| (*e).clone()).collect(),
        )),
    }
}

/// Build the message shown when `input` matched several `candidates`.
///
/// `kind` is the plural noun for the entities ("spaces", "types"). At most
/// [`DISAMBIGUATION_CAP`] candidates are listed; the rest are summarized.
pub fn describe_ambiguity(kind: &str, input: &str, candidates: &[NamedEntity]) -> String {
    let mut message = format!(
        "multiple {kind} matched '{input}', please use an ID or a more specific name. Matched {kind}:"
    );
    for entity in candidates.iter().take(DISAMBIGUATION_CAP) {
        message.push_str(&format!("\n  - '{}' (ID: {})", entity.name, entity.id));
    }
    if candidates.len() > DISAMBIGUATION_CAP {
        message.push_str(&format!(
            "\n  ... and {} more",
            candidates.len() - DISAMBIGUATION_CAP
        ));
    }
    message
}
