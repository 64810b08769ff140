//! Source readers: raw text files and spreadsheet archives

pub mod archive;

pub use archive::{
    open_archive, read_workbook, RawRow, RawSheet, RawWorkbook, SheetEntry, Workbook,
};

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use std::path::Path;

/// Read the whole file at `path` as UTF-8 text
pub fn read_raw(path: &Path) -> ConversionResult<String> {
    let bytes = std::fs::read(path).map_err(|e| ConversionError::from_io(&e, path))?;

    String::from_utf8(bytes).map_err(|e| {
        ConversionError::read(
            ConversionErrorKind::Unreadable,
            format!(
                "{}: content is not valid UTF-8 (at byte {})",
                path.display(),
                e.utf8_error().valid_up_to()
            ),
        )
    })
}
