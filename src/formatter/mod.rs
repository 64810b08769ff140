//! Output writers: intermediate model into the final string

pub mod csv;
pub mod json;
pub mod report;
pub mod text;

pub use self::csv::write_csv;
pub use json::write_json;
pub use report::write_report;
pub use text::write_text;

use crate::conversion::ConversionConfig;
use crate::model::Cell;

/// Per-cell transformations applied before a row is joined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldPolicy {
    pub trim: bool,
    pub ignore_empty: bool,
    pub parse_types: bool,
}

impl FieldPolicy {
    pub fn from_config(config: &ConversionConfig) -> Self {
        Self {
            trim: config.trim,
            ignore_empty: config.ignore_empty,
            parse_types: config.parse_types,
        }
    }

    /// Rendered text of `cell`, or `None` when the cell is dropped
    pub fn apply(&self, cell: &Cell) -> Option<String> {
        let text = if self.trim {
            cell.text().trim()
        } else {
            cell.text()
        };

        if self.ignore_empty && text.is_empty() {
            return None;
        }

        Some(self.coerce(text.to_string()))
    }

    /// Rendered cells of a row; dropped cells shift the remaining ones left
    pub fn apply_all<'a, I>(&self, cells: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        cells.into_iter().filter_map(|cell| self.apply(cell)).collect()
    }

    // Numeric/boolean inference hook; values pass through unchanged until
    // coercion rules are defined.
    fn coerce(&self, text: String) -> String {
        text
    }
}

/// Join rendered rows with newlines, or with commas when `no_header` is set.
///
/// The TXT and CSV writers share this quirk: `no_header` flattens the output
/// onto one line instead of suppressing a header row.
pub fn join_rows(rows: &[String], no_header: bool) -> String {
    rows.join(if no_header { "," } else { "\n" })
}
