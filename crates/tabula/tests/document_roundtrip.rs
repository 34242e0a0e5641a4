//! End-to-end editing sessions through the document controller: open, edit,
//! save, reopen, for every supported container format.

use std::io::{Cursor, Write};

use pretty_assertions::assert_eq;
use tabula::prelude::*;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Minimal single-sheet workbook with A1="x" (inline) and B1="y" (shared).
fn sample_xlsx() -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();

    let mut add = |name: &str, content: &str| {
        zip.start_file(name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    };

    add(
        "[Content_Types].xml",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
    );
    add(
        "_rels/.rels",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
    );
    add(
        "xl/workbook.xml",
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheets><sheet name="Sheet1" sheetId="1"/></sheets>
</workbook>"#,
    );
    add(
        "xl/worksheets/sheet1.xml",
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <dimension ref="A1:B1"/>
    <sheetData>
        <row r="1">
            <c r="A1" t="inlineStr"><is><t>x</t></is></c>
            <c r="B1" t="s"><v>0</v></c>
        </row>
    </sheetData>
</worksheet>"#,
    );
    add(
        "xl/sharedStrings.xml",
        r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="1" uniqueCount="1"><si><t>y</t></si></sst>"#,
    );

    zip.finish().unwrap().into_inner()
}

fn grid(spec: &[&[&str]]) -> Grid {
    Grid::from_rows(
        spec.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

#[test]
fn test_csv_session() {
    let mut doc = TableDocument::open(b"name,qty\r\nwidget,3", None, "inventory.csv").unwrap();
    assert_eq!(doc.format(), TableFormat::Csv);
    assert_eq!(doc.grid(), &grid(&[&["name", "qty"], &["widget", "3"]]));

    let edited = doc
        .grid()
        .set_cell(1, 1, "4")
        .unwrap()
        .add_row()
        .set_cell(2, 0, "gadget, deluxe")
        .unwrap();
    doc.update_grid(edited);

    let saved = doc.save().unwrap();
    assert_eq!(saved, b"name,qty\r\nwidget,4\r\n\"gadget, deluxe\",");

    let reopened = TableDocument::open(&saved, Some("text/csv"), "inventory.csv").unwrap();
    assert_eq!(reopened.grid(), doc.grid());
}

#[test]
fn test_tsv_session() {
    let mut doc = TableDocument::open(b"a\tb\r\nc\td", None, "data.tsv").unwrap();
    assert_eq!(doc.format(), TableFormat::Tsv);
    assert_eq!(doc.mime(), "text/tab-separated-values");

    let edited = doc.grid().set_cell(0, 0, "has\ttab").unwrap();
    doc.update_grid(edited);

    let saved = doc.save().unwrap();
    assert_eq!(saved, b"\"has\ttab\"\tb\r\nc\td");

    let reopened = TableDocument::open(&saved, None, "data.tsv").unwrap();
    assert_eq!(reopened.grid(), doc.grid());
}

#[test]
fn test_xlsx_session() {
    let source = sample_xlsx();
    let mut doc = TableDocument::open(&source, Some(XLSX_MIME), "book.xlsx").unwrap();
    assert_eq!(doc.format(), TableFormat::Xlsx);
    assert_eq!(doc.grid(), &grid(&[&["x", "y"]]));

    let edited = doc
        .grid()
        .add_row()
        .set_cell(1, 0, "new")
        .unwrap()
        .set_cell(0, 1, "z & <tag>")
        .unwrap();
    doc.update_grid(edited.clone());

    let saved = doc.save().unwrap();
    let reopened = TableDocument::open(&saved, None, "book.xlsx").unwrap();
    assert_eq!(reopened.grid(), &edited);
}

#[test]
fn test_xlsx_detected_by_extension_alone() {
    let doc = TableDocument::open(&sample_xlsx(), None, "book.xlsx").unwrap();
    assert_eq!(doc.format(), TableFormat::Xlsx);
    assert_eq!(doc.mime(), XLSX_MIME);
}

#[test]
fn test_unsupported_format() {
    let err = TableDocument::open(b"{}", Some("application/json"), "data.json").unwrap_err();
    match err {
        DocumentError::UnsupportedFormat { mime, file_name } => {
            assert_eq!(mime.as_deref(), Some("application/json"));
            assert_eq!(file_name, "data.json");
        }
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }
}

#[test]
fn test_corrupt_xlsx_surfaces_codec_error() {
    let err = TableDocument::open(b"not a zip", None, "book.xlsx").unwrap_err();
    assert!(matches!(err, DocumentError::Xlsx(_)));
}
