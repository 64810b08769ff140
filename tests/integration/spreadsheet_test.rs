//! Spreadsheet archives rendered as worksheet reports

use formatflex::parser::parse_spreadsheet;
use formatflex::reader::read_workbook;
use formatflex::{convert, ConversionConfig, OutputFormat};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::ZipWriter;

fn build_xlsx(parts: &[(&str, &str)]) -> NamedTempFile {
    let tmp = NamedTempFile::new().unwrap();
    let mut writer = ZipWriter::new(tmp.reopen().unwrap());
    for (name, content) in parts {
        writer.start_file(*name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    tmp
}

fn workbook_xml(sheets: &[(&str, &str)]) -> String {
    let entries: String = sheets
        .iter()
        .enumerate()
        .map(|(i, (name, rid))| {
            format!(
                r#"<sheet name="{}" sheetId="{}" r:id="{}"/>"#,
                name,
                i + 1,
                rid
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{}</sheets></workbook>"#,
        entries
    )
}

fn rels_xml(targets: &[(&str, &str)]) -> String {
    let entries: String = targets
        .iter()
        .map(|(rid, target)| {
            format!(
                r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="{}"/>"#,
                rid, target
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
        entries
    )
}

fn sheet_xml(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        rows
    )
}

const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3"><si><t>Name</t></si><si><t>Total</t></si><si><r><t>Rich </t></r><r><t>text</t></r></si></sst>"#;

#[test]
fn test_empty_and_populated_sheets_in_order() {
    let workbook = workbook_xml(&[("Sheet1", "rId1"), ("Sheet2", "rId2")]);
    let rels = rels_xml(&[
        ("rId1", "worksheets/sheet1.xml"),
        ("rId2", "worksheets/sheet2.xml"),
    ]);
    let empty = sheet_xml("");
    let data = sheet_xml(r#"<row r="1"><c r="A1"><v>1</v></c><c r="B1"><v>2</v></c></row>"#);

    let tmp = build_xlsx(&[
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/worksheets/sheet1.xml", empty.as_str()),
        ("xl/worksheets/sheet2.xml", data.as_str()),
    ]);

    let output = convert(tmp.path(), OutputFormat::Xlsx, &ConversionConfig::default()).unwrap();
    assert_eq!(output, "Worksheet: Sheet1\n\nWorksheet: Sheet2\n1, 2\n\n");
}

#[test]
fn test_shared_and_inline_strings_resolve() {
    let workbook = workbook_xml(&[("Report", "rId1")]);
    let rels = rels_xml(&[("rId1", "worksheets/sheet1.xml")]);
    let data = sheet_xml(concat!(
        r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>"#,
        r#"<row r="2"><c r="A2" t="inlineStr"><is><t>Widget &amp; Co</t></is></c><c r="B2"><v>42.5</v></c></row>"#,
        r#"<row r="3"><c r="A3" t="s"><v>2</v></c></row>"#,
    ));

    let tmp = build_xlsx(&[
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/sharedStrings.xml", SHARED_STRINGS),
        ("xl/worksheets/sheet1.xml", data.as_str()),
    ]);

    let output = convert(tmp.path(), OutputFormat::Xlsx, &ConversionConfig::default()).unwrap();
    assert_eq!(
        output,
        "Worksheet: Report\nName, Total\nWidget & Co, 42.5\nRich text\n\n"
    );
}

#[test]
fn test_absent_cells_are_dropped_from_rows() {
    let workbook = workbook_xml(&[("Gaps", "rId1")]);
    let rels = rels_xml(&[("rId1", "worksheets/sheet1.xml")]);
    let data = sheet_xml(concat!(
        r#"<row r="1"><c r="A1"><v>a</v></c><c r="B1"/><c r="C1"><v>c</v></c></row>"#,
        r#"<row r="2"/>"#,
    ));

    let tmp = build_xlsx(&[
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/worksheets/sheet1.xml", data.as_str()),
    ]);

    let output = convert(tmp.path(), OutputFormat::Xlsx, &ConversionConfig::default()).unwrap();
    assert_eq!(output, "Worksheet: Gaps\na, c\n\n\n");

    let config = ConversionConfig::new().with_ignore_empty(true);
    let output = convert(tmp.path(), OutputFormat::Xlsx, &config).unwrap();
    assert_eq!(output, "Worksheet: Gaps\na, c\n\n");
}

#[test]
fn test_trim_applies_to_cells() {
    let workbook = workbook_xml(&[("Padded", "rId1")]);
    let rels = rels_xml(&[("rId1", "worksheets/sheet1.xml")]);
    let data = sheet_xml(
        r#"<row r="1"><c r="A1" t="inlineStr"><is><t xml:space="preserve">  x  </t></is></c><c r="B1"><v>7</v></c></row>"#,
    );

    let tmp = build_xlsx(&[
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/worksheets/sheet1.xml", data.as_str()),
    ]);

    let untrimmed =
        convert(tmp.path(), OutputFormat::Xlsx, &ConversionConfig::default()).unwrap();
    assert_eq!(untrimmed, "Worksheet: Padded\n  x  , 7\n\n");

    let trimmed = convert(
        tmp.path(),
        OutputFormat::Xlsx,
        &ConversionConfig::new().with_trim(true),
    )
    .unwrap();
    assert_eq!(trimmed, "Worksheet: Padded\nx, 7\n\n");
}

#[test]
fn test_unresolved_sheet_becomes_placeholder() {
    let workbook = workbook_xml(&[("Orphan", "rId9"), ("Good", "rId1")]);
    let rels = rels_xml(&[("rId1", "worksheets/sheet1.xml")]);
    let data = sheet_xml(r#"<row r="1"><c r="A1"><v>ok</v></c></row>"#);

    let tmp = build_xlsx(&[
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/worksheets/sheet1.xml", data.as_str()),
    ]);

    let output = convert(tmp.path(), OutputFormat::Xlsx, &ConversionConfig::default()).unwrap();
    assert_eq!(
        output,
        "Skipped worksheet 'Orphan': Invalid path\n\nWorksheet: Good\nok\n\n"
    );
}

#[test]
fn test_broken_sheet_does_not_abort_siblings() {
    let workbook = workbook_xml(&[("Broken", "rId1"), ("Good", "rId2")]);
    let rels = rels_xml(&[
        ("rId1", "worksheets/sheet1.xml"),
        ("rId2", "worksheets/sheet2.xml"),
    ]);
    let broken = "<worksheet><sheetData><row><c><v>1</v></row></sheetData></worksheet>";
    let good = sheet_xml(r#"<row r="1"><c r="A1"><v>fine</v></c></row>"#);

    let tmp = build_xlsx(&[
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/worksheets/sheet1.xml", broken),
        ("xl/worksheets/sheet2.xml", good.as_str()),
    ]);

    let output = convert(tmp.path(), OutputFormat::Xlsx, &ConversionConfig::default()).unwrap();
    assert!(output.starts_with("Error parsing worksheet 'Broken': "));
    assert!(output.ends_with("\n\nWorksheet: Good\nfine\n\n"));
}

#[test]
fn test_reader_and_parser_compose() {
    let workbook = workbook_xml(&[("Only", "rId1")]);
    let rels = rels_xml(&[("rId1", "/xl/worksheets/sheet1.xml")]);
    let data = sheet_xml(r#"<row r="1"><c r="A1" t="s"><v>1</v></c></row>"#);

    let tmp = build_xlsx(&[
        ("xl/workbook.xml", workbook.as_str()),
        ("xl/_rels/workbook.xml.rels", rels.as_str()),
        ("xl/sharedStrings.xml", SHARED_STRINGS),
        ("xl/worksheets/sheet1.xml", data.as_str()),
    ]);

    let raw = read_workbook(tmp.path()).unwrap();
    assert_eq!(raw.shared_strings, vec!["Name", "Total", "Rich text"]);

    let document = parse_spreadsheet(raw);
    assert_eq!(document.sheets.len(), 1);
    assert_eq!(document.sheets[0].name, "Only");
    assert_eq!(document.sheets[0].rows[0].cells[0].text(), "Total");
}
