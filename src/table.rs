//! # Adaptive Table Rendering
//!
//! Turns headers and rows of strings into an aligned, column-oriented text
//! block whose widths adapt to the data.
//!
//! ## Column widths
//!
//! For every column:
//!
//! 1. start at the header length;
//! 2. widen to the longest cell;
//! 3. raise to the table's minimum width;
//! 4. clamp to the column's own maximum if one is set, otherwise to the
//!    table-wide maximum.
//!
//! ## Truncation
//!
//! Headers are never truncated. A data cell longer than its column is cut to
//! `width - 3` characters followed by `...` when truncation is enabled for the
//! column (or for the whole table). Columns of three characters or fewer just
//! keep the first `width` characters. When truncation is off the cell is
//! printed whole and the column goes ragged.
//!
//! Lengths are counted in `char`s. Wide glyphs (CJK, emoji) occupy two
//! terminal cells but count as one here, so such columns can misalign.
//!
//! ## Example
//!
//! ```
//! use anytype_cli::table::Table;
//!
//! let mut table = Table::new(["ID", "NAME"])
//!     .column_width(1, 10)
//!     .column_truncate(1, true);
//! table.add_row(["123", "A very long name exceeding width"]);
//!
//! assert_eq!(
//!     table.render(),
//!     "ID     NAME      \n-----  ----------\n123    A very ...\n"
//! );
//! ```

use std::fmt;

/// Minimum width of every column unless overridden.
pub const DEFAULT_MIN_WIDTH: usize = 5;

/// Table-wide maximum column width unless overridden.
pub const DEFAULT_MAX_WIDTH: usize = 80;

/// Spaces between adjacent columns unless overridden.
pub const DEFAULT_PADDING: usize = 2;

const ELLIPSIS: &str = "...";

/// A table of string cells with per-column width constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    min_width: usize,
    max_width: usize,
    padding: usize,
    truncate_long: bool,
    column_max_widths: Vec<Option<usize>>,
    column_truncate: Vec<bool>,
}

impl Table {
    /// Create an empty table with the given headers and default constraints.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let columns = headers.len();
        Self {
            headers,
            rows: Vec::new(),
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            padding: DEFAULT_PADDING,
            truncate_long: false,
            column_max_widths: vec![None; columns],
            column_truncate: vec![false; columns],
        }
    }

    /// Set the minimum width of every column.
    pub fn min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }

    /// Set the table-wide maximum width of a column.
    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the number of spaces between columns.
    pub fn padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Truncate over-long cells in every column.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate_long = truncate;
        self
    }

    /// Cap one column's width. Out-of-range indexes and zero are ignored.
    pub fn column_width(mut self, column: usize, width: usize) -> Self {
        if let Some(slot) = self.column_max_widths.get_mut(column) {
            *slot = (width > 0).then_some(width);
        }
        self
    }

    /// Enable or disable truncation for one column. Out-of-range indexes are
    /// ignored.
    pub fn column_truncate(mut self, column: usize, truncate: bool) -> Self {
        if let Some(slot) = self.column_truncate.get_mut(column) {
            *slot = truncate;
        }
        self
    }

    /// Append a row. It must have exactly one cell per header.
    pub fn add_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        debug_assert_eq!(
            row.len(),
            self.headers.len(),
            "table row has {} cells but the table has {} columns",
            row.len(),
            self.headers.len()
        );
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Final width of every column after all constraints are applied.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| display_len(h)).collect();

        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_len(cell));
            }
        }

        for (i, width) in widths.iter_mut().enumerate() {
            *width = (*width).max(self.min_width);
            // A column cap that does not bind still leaves the table cap in force.
            match self.column_max_widths[i] {
                Some(cap) if *width > cap => *width = cap,
                _ if self.max_width > 0 && *width > self.max_width => *width = self.max_width,
                _ => {}
            }
        }

        widths
    }

    /// Render the table: header, dash separator, then one line per row.
    ///
    /// An empty header list renders as an empty string.
    pub fn render(&self) -> String {
        if self.headers.is_empty() {
            return String::new();
        }

        let widths = self.column_widths();
        let mut out = String::new();

        let header: Vec<&str> = self.headers.iter().map(String::as_str).collect();
        self.write_line(&mut out, &widths, header.iter().copied());

        let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        self.write_line(&mut out, &widths, dashes.iter().map(String::as_str));

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, width))| self.fit(i, cell, *width))
                .collect();
            self.write_line(&mut out, &widths, cells.iter().map(String::as_str));
        }

        out
    }

    fn fit(&self, column: usize, cell: &str, width: usize) -> String {
        let truncating = self.truncate_long || self.column_truncate[column];
        if truncating && display_len(cell) > width {
            truncate(cell, width)
        } else {
            cell.to_string()
        }
    }

    fn write_line<'a>(
        &self,
        out: &mut String,
        widths: &[usize],
        cells: impl Iterator<Item = &'a str>,
    ) {
        for (i, (cell, width)) in cells.zip(widths).enumerate() {
            if i > 0 {
                out.push_str(&" ".repeat(self.padding));
            }
            out.push_str(&format!("{:<width$}", cell, width = *width));
        }
        out.push('\n');
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Length of `s` as the renderer measures it.
pub fn display_len(s: &str) -> usize {
    s.chars().count()
}

/// Cut `s` to `max` characters, ending in `...` when there is room for it.
///
/// Strings already within `max` are returned unchanged.
pub fn truncate(s: &str, max: usize) -> String {
    if display_len(s) <= max {
        return s.to_string();
    }
    if max <= ELLIPSIS.len() {
        return s.chars().take(max).collect();
    }
    let mut cut: String = s.chars().take(max - ELLIPSIS.len()).collect();
    cut.push_str(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_column_capped_and_truncated() {
        let mut table = Table::new(["ID", "NAME"])
            .min_width(5)
            .column_width(1, 10)
            .column_truncate(1, true);
        table.add_row(["123", "A very long name exceeding width"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID     NAME      ");
        assert_eq!(lines[1], "-----  ----------");
        assert_eq!(lines[2], "123    A very ...");

        let name_cell = &lines[2][7..];
        assert_eq!(name_cell.len(), 10);
        assert!(name_cell.ends_with("..."));
        assert_eq!(table.column_widths(), vec![5, 10]);
    }

    #[test]
    fn test_header_is_never_truncated() {
        let mut table = Table::new(["IDENTIFIER", "N"])
            .column_width(0, 4)
            .column_truncate(0, true);
        table.add_row(["abcdefgh", "x"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("IDENTIFIER"));
        assert!(lines[2].starts_with("a..."));
    }

    #[test]
    fn test_zero_rows_emits_header_and_separator() {
        let table = Table::new(["SPACE ID", "NAME"]);
        assert_eq!(table.render(), "SPACE ID  NAME \n--------  -----\n");
    }

    #[test]
    fn test_zero_headers_renders_empty() {
        let table = Table::new(Vec::<String>::new());
        assert_eq!(table.render(), "");
    }

    #[test]
    fn test_min_width_applies() {
        let mut table = Table::new(["A", "B"]).min_width(3).padding(1);
        table.add_row(["x", "y"]);
        assert_eq!(table.render(), "A   B  \n--- ---\nx   y  \n");
    }

    #[test]
    fn test_global_max_width_clamps() {
        let mut table = Table::new(["COL"]).max_width(6).truncate(true);
        table.add_row(["abcdefghij"]);
        assert_eq!(table.column_widths(), vec![6]);
        assert!(table.render().ends_with("abc...\n"));
    }

    #[test]
    fn test_column_cap_overrides_global_cap() {
        let mut table = Table::new(["COL"]).max_width(6).column_width(0, 8);
        table.add_row(["abcdefghij"]);
        assert_eq!(table.column_widths(), vec![8]);
    }

    #[test]
    fn test_unreached_column_cap_leaves_global_cap_in_force() {
        let mut table = Table::new(["COL"]).max_width(80).column_width(0, 100);
        table.add_row(["x".repeat(90)]);
        assert_eq!(table.column_widths(), vec![80]);

        let mut table = Table::new(["COL"]).max_width(80).column_width(0, 100);
        table.add_row(["x".repeat(120)]);
        assert_eq!(table.column_widths(), vec![100]);
    }

    #[test]
    fn test_column_cap_below_min_width_still_caps() {
        let mut table = Table::new(["AB"]).min_width(5).column_width(0, 3);
        table.add_row(["x"]);
        assert_eq!(table.column_widths(), vec![3]);
    }

    #[test]
    fn test_non_truncating_column_goes_ragged() {
        let mut table = Table::new(["ID", "NAME"]).column_width(1, 5);
        table.add_row(["1", "much longer than five"]);
        let rendered = table.render();
        assert!(rendered.contains("much longer than five"));
    }

    #[test]
    fn test_table_wide_truncate_flag() {
        let mut table = Table::new(["A", "B"]).max_width(5).truncate(true);
        table.add_row(["0123456789", "short"]);
        let rendered = table.render();
        assert!(rendered.contains("01..."));
    }

    #[test]
    fn test_narrow_column_truncates_without_ellipsis() {
        let mut table = Table::new(["A"])
            .min_width(1)
            .column_width(0, 2)
            .column_truncate(0, true);
        table.add_row(["abcdef"]);
        let rendered = table.render();
        let last = rendered.lines().last().unwrap();
        assert_eq!(last, "ab");
    }

    #[test]
    fn test_out_of_range_column_settings_are_ignored() {
        let table = Table::new(["A"]).column_width(3, 10).column_truncate(7, true);
        assert_eq!(table.column_widths(), vec![DEFAULT_MIN_WIDTH]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut table = Table::new(["OBJECT ID", "NAME", "TYPE"])
            .column_width(1, 12)
            .column_truncate(1, true);
        table.add_row(["bafy1", "Meeting notes from Tuesday", "ot-note"]);
        table.add_row(["bafy2", "Todo", "ot-task"]);
        assert_eq!(table.render(), table.render());
        assert_eq!(table.to_string(), table.render());
    }

    #[test]
    fn test_multibyte_cells_do_not_panic() {
        let mut table = Table::new(["NAME"]).column_width(0, 6).column_truncate(0, true);
        table.add_row(["Überraschung"]);
        assert!(table.render().contains("Übe..."));
    }

    #[test]
    fn test_truncate_helper() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_accessors() {
        let mut table = Table::new(["A", "B"]);
        assert!(table.is_empty());
        table.add_row(["1", "2"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.headers(), ["A", "B"]);
        assert_eq!(table.rows()[0], vec!["1".to_string(), "2".to_string()]);
    }
}
