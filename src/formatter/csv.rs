//! CSV writer

use crate::conversion::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};
use crate::formatter::{join_rows, FieldPolicy};
use crate::model::Document;

/// Encode the first sheet as CSV.
///
/// The field policy runs per cell first. A row the policy left untouched is
/// emitted as its original record text; any other row is re-encoded. Rows are
/// joined with `\n`, or all flattened onto one comma-joined line when
/// `no_header` is set.
pub fn write_csv(document: &Document, config: &ConversionConfig) -> ConversionResult<String> {
    let policy = FieldPolicy::from_config(config);
    let mut lines = Vec::with_capacity(document.first_rows().len());

    for row in document.first_rows() {
        let fields = policy.apply_all(&row.cells);
        if fields.is_empty() && policy.ignore_empty {
            continue;
        }
        match row.source.as_deref() {
            Some(source) if row.matches_fields(&fields) => lines.push(source.to_string()),
            _ => lines.push(encode_record(&fields)?),
        }
    }

    Ok(join_rows(&lines, config.no_header))
}

/// One CSV record without its terminator, quoting only where needed
fn encode_record(fields: &[String]) -> ConversionResult<String> {
    // The csv writer renders a lone empty field as `""`; a blank line reads better
    if fields.iter().all(String::is_empty) && fields.len() <= 1 {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| ConversionError::serialize(e.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ConversionError::serialize(e.to_string()))?;

    let mut line =
        String::from_utf8(bytes).map_err(|e| ConversionError::serialize(e.to_string()))?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}
