//! Spreadsheet cells into a multi-sheet document

use crate::model::{Document, Row, Sheet};
use crate::reader::{RawSheet, RawWorkbook};
use tracing::{debug, warn};

/// Resolve every worksheet of `workbook` into a sheet, in workbook order.
///
/// Each cell takes its stored text, else its referenced shared string, else
/// stays absent. A worksheet that could not be located or decoded becomes a
/// placeholder sheet holding a diagnostic row; its siblings are unaffected.
pub fn parse_spreadsheet(workbook: RawWorkbook) -> Document {
    debug!(
        sheets = workbook.sheets.len(),
        shared_strings = workbook.shared_strings.len(),
        "resolving workbook cells"
    );

    let shared = workbook.shared_strings;
    let sheets = workbook
        .sheets
        .into_iter()
        .map(|sheet| resolve_sheet(sheet, &shared))
        .collect();

    Document::new(sheets)
}

fn resolve_sheet(sheet: RawSheet, shared: &[String]) -> Sheet {
    let RawSheet { entry, rows } = sheet;

    if entry.path.is_none() {
        warn!(sheet = %entry.name, "worksheet path does not resolve");
        let diagnostic = format!("Skipped worksheet '{}': Invalid path", entry.name);
        return Sheet::placeholder(entry.name, diagnostic);
    }

    match rows {
        Ok(raw_rows) => {
            let rows = raw_rows
                .into_iter()
                .map(|cells| {
                    Row::new(
                        cells
                            .into_iter()
                            .map(|cell| cell.resolve(shared))
                            .collect(),
                    )
                })
                .collect();
            Sheet::new(entry.name, rows)
        }
        Err(e) => {
            warn!(sheet = %entry.name, error = %e, "failed to decode worksheet");
            let diagnostic = format!("Error parsing worksheet '{}': {}", entry.name, e.detail);
            Sheet::placeholder(entry.name, diagnostic)
        }
    }
}
