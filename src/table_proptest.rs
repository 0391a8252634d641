//! Property-based tests for table rendering.
//!
//! These tests generate random tables and verify the layout invariants hold
//! for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::table::{display_len, Table};
    use proptest::prelude::*;

    /// Headers plus rows of matching arity, ASCII without spaces so that
    /// fields can be located by width.
    fn table_data() -> impl Strategy<Value = (Vec<String>, Vec<Vec<String>>)> {
        (1usize..5).prop_flat_map(|columns| {
            (
                prop::collection::vec("[A-Z]{1,10}", columns),
                prop::collection::vec(prop::collection::vec("[a-z0-9]{0,30}", columns), 0..6),
            )
        })
    }

    fn build(headers: &[String], rows: &[Vec<String>], cap: usize, padding: usize) -> Table {
        let mut table = Table::new(headers.iter().cloned())
            .max_width(cap)
            .padding(padding)
            .truncate(true);
        for row in rows {
            table.add_row(row.iter().cloned());
        }
        table
    }

    proptest! {
        /// Property: rendering the same table twice yields identical output
        #[test]
        fn render_is_idempotent((headers, rows) in table_data(), cap in 1usize..40) {
            let table = build(&headers, &rows, cap, 2);
            prop_assert_eq!(table.render(), table.render());
        }

        /// Property: output has header, separator and one line per row
        #[test]
        fn line_count_matches_rows((headers, rows) in table_data()) {
            let table = build(&headers, &rows, 80, 2);
            prop_assert_eq!(table.render().lines().count(), rows.len() + 2);
        }

        /// Property: with truncation on and headers no wider than their
        /// column, every line is exactly the sum of widths plus padding
        #[test]
        fn every_line_has_n_fixed_width_fields(
            (headers, rows) in table_data(),
            padding in 0usize..4,
        ) {
            // A cap of 40 always exceeds the 10-char headers, so nothing is ragged.
            let table = build(&headers, &rows, 40, padding);
            let widths = table.column_widths();
            let expected: usize = widths.iter().sum::<usize>() + padding * (widths.len() - 1);

            for line in table.render().lines() {
                prop_assert_eq!(display_len(line), expected);
                let mut offset = 0;
                for (i, width) in widths.iter().enumerate() {
                    if i > 0 {
                        prop_assert_eq!(&line[offset..offset + padding], " ".repeat(padding));
                        offset += padding;
                    }
                    offset += width;
                }
            }
        }

        /// Property: no column is narrower than its header or the minimum
        /// width unless capped
        #[test]
        fn widths_respect_bounds((headers, rows) in table_data(), cap in 1usize..40) {
            let table = build(&headers, &rows, cap, 2);
            for (i, width) in table.column_widths().into_iter().enumerate() {
                prop_assert!(width <= cap);
                let natural = rows
                    .iter()
                    .map(|r| r[i].len())
                    .chain(std::iter::once(headers[i].len()))
                    .max()
                    .unwrap_or(0)
                    .max(5);
                prop_assert_eq!(width, natural.min(cap));
            }
        }

        /// Property: a column cap only binds when the column reaches it, and
        /// the table cap still applies below it
        #[test]
        fn column_caps_layer_over_table_cap(
            (headers, rows) in table_data(),
            cap in 1usize..40,
            column_caps in prop::collection::vec(prop::option::of(1usize..60), 4),
        ) {
            let mut table = build(&headers, &rows, cap, 2);
            for (i, column_cap) in column_caps.iter().enumerate() {
                if let Some(width) = column_cap {
                    table = table.column_width(i, *width);
                }
            }

            for (i, width) in table.column_widths().into_iter().enumerate() {
                let natural = rows
                    .iter()
                    .map(|r| r[i].len())
                    .chain(std::iter::once(headers[i].len()))
                    .max()
                    .unwrap_or(0)
                    .max(5);
                let expected = match column_caps[i] {
                    Some(column_cap) if natural > column_cap => column_cap,
                    _ => natural.min(cap),
                };
                prop_assert_eq!(width, expected);
            }
        }
    }
}
