//! # Result Views
//!
//! A view describes how the JSON returned by one remote operation becomes
//! text. Views are plain data declared next to each command in
//! [`crate::registry`]; this module interprets them.
//!
//! Values are located with JSON pointers (`/space/name`). A column pointer may
//! list alternatives separated by `|`; the first one present wins, which is
//! how heterogeneous property values (`/text|/number|/select`) share a column.

use serde_json::Value;

use crate::backend::Request;
use crate::error::Result;
use crate::output::{format_json, format_yaml, OutputFormat};
use crate::table::Table;

/// One table column taken from each item of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub pointer: &'static str,
    pub max_width: Option<usize>,
}

impl Column {
    pub const fn new(header: &'static str, pointer: &'static str) -> Self {
        Self {
            header,
            pointer,
            max_width: None,
        }
    }

    /// Cap the column at `width` characters and truncate longer cells.
    pub const fn capped(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// A collection rendered as a table with a totals footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableView {
    /// Pointer to the array of items; empty for a top-level array.
    pub collection: &'static str,
    /// Plural noun used in the footer ("spaces", "objects").
    pub noun: &'static str,
    pub columns: &'static [Column],
}

/// A `Label: value` line in a detail block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub pointer: &'static str,
}

impl Field {
    pub const fn new(label: &'static str, pointer: &'static str) -> Self {
        Self { label, pointer }
    }
}

/// A titled table nested inside a detail block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub table: TableView,
}

/// A single entity rendered as a titled block of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailView {
    pub title: &'static str,
    /// Pointer to the entity inside the response.
    pub subject: &'static str,
    pub fields: &'static [Field],
    pub sections: &'static [Section],
}

/// How a command's result is turned into text.
#[derive(Clone, Copy)]
pub enum View {
    Table(TableView),
    Detail(DetailView),
    /// Print one string field verbatim (exported markdown).
    Text { pointer: &'static str },
    /// A one-off confirmation built from the request, for operations whose
    /// response carries nothing worth showing.
    Summary(fn(&Request, &Value) -> String),
}

impl View {
    /// The part of `result` that structured formats serialize.
    pub fn subject<'a>(&self, result: &'a Value) -> &'a Value {
        let pointer = match self {
            View::Table(table) => table.collection,
            View::Detail(detail) => detail.subject,
            View::Text { .. } | View::Summary(_) => "",
        };
        lookup(result, pointer).unwrap_or(result)
    }

    /// Render `result` in `format`.
    ///
    /// Summaries are plain confirmations and ignore the structured formats.
    pub fn render(&self, request: &Request, result: &Value, format: OutputFormat) -> Result<String> {
        match (self, format) {
            (View::Summary(summary), _) => Ok(summary(request, result)),
            (_, OutputFormat::Json) => format_json(self.subject(result)),
            (_, OutputFormat::Yaml) => format_yaml(self.subject(result)),
            (_, OutputFormat::Table) => Ok(self.render_text(result)),
        }
    }

    fn render_text(&self, result: &Value) -> String {
        match self {
            View::Table(view) => render_collection(view, result),
            View::Detail(view) => render_detail(view, result),
            View::Text { pointer } => {
                let mut text = lookup(result, pointer).map(cell_text).unwrap_or_default();
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                text
            }
            View::Summary(_) => String::new(),
        }
    }
}

/// Build the table for the items at `view.collection`.
pub fn build_table(view: &TableView, result: &Value) -> Table {
    let mut table = Table::new(view.columns.iter().map(|c| c.header));
    for (i, column) in view.columns.iter().enumerate() {
        if let Some(width) = column.max_width {
            table = table.column_width(i, width).column_truncate(i, true);
        }
    }
    for item in items(result, view.collection) {
        table.add_row(
            view.columns
                .iter()
                .map(|c| lookup(item, c.pointer).map(cell_text).unwrap_or_default()),
        );
    }
    table
}

fn render_collection(view: &TableView, result: &Value) -> String {
    let table = build_table(view, result);
    let mut out = table.render();
    out.push_str(&format!("\nTotal {}: {}\n", view.noun, table.len()));

    if lookup(result, "/pagination/has_more").and_then(Value::as_bool) == Some(true) {
        let total = lookup(result, "/pagination/total")
            .map(cell_text)
            .unwrap_or_else(|| "?".to_string());
        out.push_str(&format!(
            "Has more {} (Total: {}, Retrieved: {})\n",
            view.noun,
            total,
            table.len()
        ));
    }
    out
}

fn render_detail(view: &DetailView, result: &Value) -> String {
    let subject = lookup(result, view.subject).unwrap_or(result);
    let mut out = titled(view.title);

    for field in view.fields {
        if let Some(value) = lookup(subject, field.pointer) {
            out.push_str(&format!("{}: {}\n", field.label, cell_text(value)));
        }
    }

    for section in view.sections {
        let table = build_table(&section.table, subject);
        if table.is_empty() {
            continue;
        }
        out.push('\n');
        out.push_str(&titled(section.title));
        out.push_str(&table.render());
    }
    out
}

fn titled(title: &str) -> String {
    format!("{}\n{}\n", title, "-".repeat(title.chars().count()))
}

fn items<'a>(result: &'a Value, pointer: &str) -> &'a [Value] {
    lookup(result, pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Resolve `pointer` in `value`, trying `|`-separated alternatives in order.
///
/// Null counts as absent. The empty pointer is the value itself.
pub fn lookup<'a>(value: &'a Value, pointer: &str) -> Option<&'a Value> {
    pointer
        .split('|')
        .filter_map(|p| value.pointer(p))
        .find(|v| !v.is_null())
}

/// Flatten a JSON value into a single table cell.
///
/// Objects show their `name` when they have one, arrays join their items.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(cell_text).collect::<Vec<_>>().join(", "),
        Value::Object(map) => match map.get("name") {
            Some(name) => cell_text(name),
            None => value.to_string(),
        },
    }
}
