//! Spreadsheet archive reader (.xlsx zip containers)
//!
//! A [`Workbook`] owns the open archive; the underlying file handle is released
//! when the workbook is dropped, on success and error paths alike.

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::model::CellValue;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Unresolved cells of one worksheet row
pub type RawRow = Vec<CellValue>;

/// A worksheet listed by the workbook, in workbook order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetEntry {
    pub id: String,
    pub name: String,
    /// Archive part holding the worksheet, when the relationship resolves
    pub path: Option<String>,
}

/// One worksheet as read from the archive, cells not yet resolved
#[derive(Debug)]
pub struct RawSheet {
    pub entry: SheetEntry,
    /// Decoding outcome; kept per sheet so one failure never hides its siblings
    pub rows: ConversionResult<Vec<RawRow>>,
}

/// Everything the spreadsheet parser needs, detached from the archive
#[derive(Debug)]
pub struct RawWorkbook {
    pub sheets: Vec<RawSheet>,
    pub shared_strings: Vec<String>,
}

/// Open spreadsheet archive
pub struct Workbook {
    archive: ZipArchive<File>,
    source: PathBuf,
}

/// Open the archive at `path`
pub fn open_archive(path: &Path) -> ConversionResult<Workbook> {
    let file = File::open(path).map_err(|e| ConversionError::from_io(&e, path))?;
    let archive = ZipArchive::new(file).map_err(|e| {
        ConversionError::read(
            ConversionErrorKind::CorruptArchive,
            format!("{}: {}", path.display(), e),
        )
    })?;

    Ok(Workbook {
        archive,
        source: path.to_path_buf(),
    })
}

/// Read the sheet index, shared strings and every worksheet of the archive at `path`.
///
/// The archive is closed before this returns. Index and shared-string failures
/// abort; worksheet failures are recorded on the affected [`RawSheet`] only.
pub fn read_workbook(path: &Path) -> ConversionResult<RawWorkbook> {
    let mut workbook = open_archive(path)?;
    let entries = workbook.list_sheets()?;
    let shared_strings = workbook.shared_strings()?;

    let sheets = entries
        .into_iter()
        .map(|entry| {
            let rows = match entry.path.as_deref() {
                Some(part) => workbook.read_sheet_rows(part),
                None => Err(workbook.corrupt(format!(
                    "no worksheet part for sheet '{}'",
                    entry.name
                ))),
            };
            RawSheet { entry, rows }
        })
        .collect();

    Ok(RawWorkbook {
        sheets,
        shared_strings,
    })
}

impl Workbook {
    /// Worksheets in workbook order with their archive paths
    pub fn list_sheets(&mut self) -> ConversionResult<Vec<SheetEntry>> {
        let workbook_xml = self
            .read_part(WORKBOOK_PART)?
            .ok_or_else(|| self.corrupt(format!("missing {}", WORKBOOK_PART)))?;
        let declared = parse_workbook(&workbook_xml)
            .map_err(|e| self.corrupt(format!("{}: {}", WORKBOOK_PART, e)))?;

        let targets = match self.read_part(WORKBOOK_RELS_PART)? {
            Some(xml) => parse_relationships(&xml)
                .map_err(|e| self.corrupt(format!("{}: {}", WORKBOOK_RELS_PART, e)))?,
            None => HashMap::new(),
        };

        Ok(declared
            .into_iter()
            .map(|sheet| SheetEntry {
                path: sheet
                    .relationship
                    .as_ref()
                    .and_then(|rel| targets.get(rel))
                    .map(|target| resolve_target(target)),
                id: sheet.id,
                name: sheet.name,
            })
            .collect())
    }

    /// Shared-string table; empty when the archive has none
    pub fn shared_strings(&mut self) -> ConversionResult<Vec<String>> {
        match self.read_part(SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml)
                .map_err(|e| self.corrupt(format!("{}: {}", SHARED_STRINGS_PART, e))),
            None => Ok(Vec::new()),
        }
    }

    /// Rows of the worksheet stored at archive part `part`
    pub fn read_sheet_rows(&mut self, part: &str) -> ConversionResult<Vec<RawRow>> {
        let xml = self
            .read_part(part)?
            .ok_or_else(|| self.corrupt(format!("missing worksheet part {}", part)))?;
        parse_worksheet(&xml).map_err(|e| self.corrupt(format!("{}: {}", part, e)))
    }

    fn read_part(&mut self, name: &str) -> ConversionResult<Option<String>> {
        let mut entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(ConversionError::read(
                    ConversionErrorKind::CorruptArchive,
                    format!("{}: {}: {}", self.source.display(), name, e),
                ))
            }
        };

        let mut content = String::new();
        entry.read_to_string(&mut content).map_err(|e| {
            ConversionError::read(
                ConversionErrorKind::CorruptArchive,
                format!("{}: {}: {}", self.source.display(), name, e),
            )
        })?;
        Ok(Some(content))
    }

    fn corrupt(&self, detail: String) -> ConversionError {
        ConversionError::read(
            ConversionErrorKind::CorruptArchive,
            format!("{}: {}", self.source.display(), detail),
        )
    }
}

struct DeclaredSheet {
    id: String,
    name: String,
    relationship: Option<String>,
}

/// Relationship targets are relative to `xl/` unless absolute within the package
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

fn attributes(element: &BytesStart<'_>) -> Result<HashMap<Vec<u8>, String>, quick_xml::Error> {
    let mut values = HashMap::new();
    for attr in element.attributes() {
        let attr = attr?;
        values.insert(
            attr.key.local_name().as_ref().to_vec(),
            attr.unescape_value()?.into_owned(),
        );
    }
    Ok(values)
}

fn parse_workbook(xml: &str) -> Result<Vec<DeclaredSheet>, quick_xml::Error> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                let mut attrs = attributes(&e)?;
                sheets.push(DeclaredSheet {
                    id: attrs.remove(b"sheetId".as_slice()).unwrap_or_default(),
                    name: attrs.remove(b"name".as_slice()).unwrap_or_default(),
                    relationship: attrs.remove(b"id".as_slice()),
                });
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, quick_xml::Error> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut attrs = attributes(&e)?;
                if let (Some(id), Some(target)) = (
                    attrs.remove(b"Id".as_slice()),
                    attrs.remove(b"Target".as_slice()),
                ) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(targets)
}

fn parse_shared_strings(xml: &str) -> Result<Vec<String>, quick_xml::Error> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    // Phonetic runs (<rPh>) carry reading hints, not cell text
    let mut phonetic_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"rPh" => phonetic_depth += 1,
                b"t" if phonetic_depth == 0 => in_text = current.is_some(),
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(e) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) if in_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"si" => strings.extend(current.take()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// In-progress `<c>` element
#[derive(Default)]
struct PendingCell {
    cell_type: Option<String>,
    stored: Option<String>,
    inline: Option<String>,
}

impl PendingCell {
    fn finish(self) -> CellValue {
        match (self.cell_type.as_deref(), self.stored) {
            (Some("s"), Some(index)) => match index.trim().parse::<usize>() {
                Ok(index) => CellValue::Referenced(index),
                Err(_) => CellValue::Direct(index),
            },
            (_, Some(text)) => CellValue::Direct(text),
            (_, None) => self.inline.map_or(CellValue::Absent, CellValue::Direct),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum TextTarget {
    None,
    Stored,
    Inline,
}

fn parse_worksheet(xml: &str) -> Result<Vec<RawRow>, quick_xml::Error> {
    let mut reader = XmlReader::from_str(xml);
    let mut buf = Vec::new();
    let mut rows = Vec::new();
    let mut row: Option<RawRow> = None;
    let mut cell: Option<PendingCell> = None;
    let mut in_inline = false;
    let mut phonetic_depth = 0usize;
    let mut target = TextTarget::None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row = Some(Vec::new()),
                b"c" => {
                    let mut attrs = attributes(&e)?;
                    cell = Some(PendingCell {
                        cell_type: attrs.remove(b"t".as_slice()),
                        ..Default::default()
                    });
                }
                b"v" => {
                    if let Some(pending) = cell.as_mut() {
                        pending.stored = Some(String::new());
                        target = TextTarget::Stored;
                    }
                }
                b"is" => {
                    if let Some(pending) = cell.as_mut() {
                        pending.inline = Some(String::new());
                        in_inline = true;
                    }
                }
                b"rPh" => phonetic_depth += 1,
                b"t" if in_inline && phonetic_depth == 0 => target = TextTarget::Inline,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => rows.push(Vec::new()),
                b"c" => {
                    if let Some(cells) = row.as_mut() {
                        cells.push(CellValue::Absent);
                    }
                }
                _ => {}
            },
            Event::Text(e) if target != TextTarget::None => {
                let text = e.unescape()?;
                append_text(cell.as_mut(), target, &text);
            }
            Event::CData(e) if target != TextTarget::None => {
                append_text(cell.as_mut(), target, &String::from_utf8_lossy(&e));
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => target = TextTarget::None,
                b"is" => in_inline = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"c" => {
                    if let (Some(pending), Some(cells)) = (cell.take(), row.as_mut()) {
                        cells.push(pending.finish());
                    }
                }
                b"row" => rows.extend(row.take()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

fn append_text(cell: Option<&mut PendingCell>, target: TextTarget, text: &str) {
    let Some(pending) = cell else { return };
    let slot = match target {
        TextTarget::Stored => pending.stored.as_mut(),
        TextTarget::Inline => pending.inline.as_mut(),
        TextTarget::None => None,
    };
    if let Some(slot) = slot {
        slot.push_str(text);
    }
}
