//! Comma-delimited field splitting for the CSV pipeline

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::model::{Cell, Document, Row, Sheet};
use crate::parser::lines::TEXT_SHEET_NAME;

/// Split `content` into comma-separated records.
///
/// Rows are ragged: each keeps as many fields as its record has. Standard CSV
/// quoting applies, so a quoted field may span lines. Blank lines produce no
/// row. Each row keeps the exact text of its record for lossless output.
pub fn parse_delimited(content: &str) -> ConversionResult<Document> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    loop {
        let has_record = reader.read_record(&mut record).map_err(|e| {
            ConversionError::parse(
                ConversionErrorKind::InvalidSyntax,
                format!("record {}: {}", rows.len() + 1, e),
            )
        })?;
        if !has_record {
            break;
        }

        let mut row = Row::new(record.iter().map(Cell::new).collect());
        if let Some(start) = record.position().map(csv::Position::byte) {
            let end = reader.position().byte();
            if let Some(text) = content.get(start as usize..end as usize) {
                row = row.with_source(record_text(text));
            }
        }
        rows.push(row);
    }

    Ok(Document::single(Sheet::new(TEXT_SHEET_NAME, rows)))
}

// The span between two reader positions also covers skipped blank lines and
// the terminator; neither can belong to a field, quoted fields end in `"`.
fn record_text(span: &str) -> &str {
    span.trim_start_matches(|c: char| c == '\r' || c == '\n')
        .trim_end_matches(|c: char| c == '\r' || c == '\n')
}
