//! Independent conversions running on many threads at once

use formatflex::{ConversionConfig, ConversionEngine, OutputFormat};
use std::fs;
use std::io::Write;
use std::thread;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

const THREADS: usize = 8;

fn write_xlsx(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("book.xlsx");
    let mut writer = ZipWriter::new(fs::File::create(&path).unwrap());
    let parts = [
        (
            "xl/workbook.xml",
            r#"<workbook xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="S" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        ),
        (
            "xl/_rels/workbook.xml.rels",
            r#"<Relationships><Relationship Id="rId1" Target="worksheets/sheet1.xml"/></Relationships>"#,
        ),
        (
            "xl/worksheets/sheet1.xml",
            r#"<worksheet><sheetData><row><c><v>1</v></c><c><v>2</v></c></row></sheetData></worksheet>"#,
        ),
    ];
    for (name, content) in parts {
        writer.start_file(name, FileOptions::default()).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
    path
}

#[test]
fn test_shared_engine_across_threads_matches_sequential() {
    let dir = TempDir::new().unwrap();
    let txt = dir.path().join("lines.txt");
    fs::write(&txt, "alpha\nbeta\ngamma\n").unwrap();
    let csv = dir.path().join("table.csv");
    fs::write(&csv, "a,b\n\"c,d\",e\n").unwrap();
    let yaml = dir.path().join("doc.yaml");
    fs::write(&yaml, "items:\n  - 1\n  - two\nflag: true\n").unwrap();
    let xlsx = write_xlsx(&dir);

    let jobs = [
        (txt.clone(), OutputFormat::Json),
        (txt, OutputFormat::Txt),
        (csv, OutputFormat::Csv),
        (yaml, OutputFormat::Yaml),
        (xlsx, OutputFormat::Xlsx),
    ];

    let engine = ConversionEngine::new(ConversionConfig::new().with_trim(true));
    let expected: Vec<String> = jobs
        .iter()
        .map(|(path, format)| engine.convert(path, *format).unwrap())
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    jobs.iter()
                        .map(|(path, format)| engine.convert(path, *format).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_engines_with_different_configs_do_not_interfere() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rows.txt");
    fs::write(&path, "x\n \n\ny\n").unwrap();

    let plain = ConversionEngine::new(ConversionConfig::default());
    let flattened = ConversionEngine::new(
        ConversionConfig::new()
            .with_no_header(true)
            .with_ignore_empty(true),
    );

    thread::scope(|scope| {
        let a = scope.spawn(|| {
            (0..50)
                .map(|_| plain.convert(&path, OutputFormat::Txt).unwrap())
                .collect::<Vec<_>>()
        });
        let b = scope.spawn(|| {
            (0..50)
                .map(|_| flattened.convert(&path, OutputFormat::Txt).unwrap())
                .collect::<Vec<_>>()
        });

        assert!(a.join().unwrap().iter().all(|out| out == "x\n \ny"));
        assert!(b.join().unwrap().iter().all(|out| out == "x,y"));
    });
}
