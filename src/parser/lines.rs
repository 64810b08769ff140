//! Line-oriented text parsing

use crate::model::{Document, Row, Sheet};

/// Name given to the single sheet of a text document
pub const TEXT_SHEET_NAME: &str = "text";

/// Split `content` into one row per line, each holding the full line as one cell.
///
/// Both `\n` and `\r\n` terminate a line. Empty lines produce no row;
/// whitespace-only lines are kept as written.
pub fn parse_lines(content: &str) -> Document {
    let rows = content
        .lines()
        .filter(|line| !line.is_empty())
        .map(Row::single)
        .collect();
    Document::single(Sheet::new(TEXT_SHEET_NAME, rows))
}
