//! Human-readable spreadsheet report

use crate::conversion::ConversionConfig;
use crate::formatter::FieldPolicy;
use crate::model::Document;

/// Render each sheet as a `Worksheet: <name>` section followed by a blank line.
///
/// Absent cells are skipped; present cells are joined with `, `. Placeholder
/// sheets render as their diagnostic line instead of a section.
pub fn write_report(document: &Document, config: &ConversionConfig) -> String {
    let policy = FieldPolicy::from_config(config);
    let mut output = String::new();

    for sheet in &document.sheets {
        if let Some(diagnostic) = sheet.diagnostic() {
            output.push_str(&format!("{}\n\n", diagnostic));
            continue;
        }

        output.push_str(&format!("Worksheet: {}\n", sheet.name));
        for row in &sheet.rows {
            let cells = policy.apply_all(row.cells.iter().filter(|cell| !cell.is_absent()));
            if cells.is_empty() && policy.ignore_empty {
                continue;
            }
            output.push_str(&cells.join(", "));
            output.push('\n');
        }
        output.push('\n');
    }

    output
}
