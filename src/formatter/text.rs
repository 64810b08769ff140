//! Plain-text writer

use crate::conversion::ConversionConfig;
use crate::formatter::join_rows;
use crate::model::{Cell, Document};

/// Render the first sheet one row per line (or comma-joined with `no_header`).
///
/// A row's cells are joined with `,`; `ignore_empty` drops rows that render
/// empty or whitespace-only.
pub fn write_text(document: &Document, config: &ConversionConfig) -> String {
    let lines: Vec<String> = document
        .first_rows()
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(Cell::text)
                .collect::<Vec<_>>()
                .join(",")
        })
        .filter(|line| !(config.ignore_empty && line.trim().is_empty()))
        .collect();

    join_rows(&lines, config.no_header)
}
