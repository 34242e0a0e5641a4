//! End-to-end tests for the single-worksheet load/save cycle.
//!
//! Fixtures are synthetic minimal workbooks built in memory, covering both
//! inline-string and shared-string cells.

use std::io::{Cursor, Read, Write};

use pretty_assertions::assert_eq;
use tabula_core::Grid;
use tabula_xlsx::{XlsxError, XlsxReader, XlsxWriter};

/// Build a minimal valid `.xlsx` buffer with the given worksheet XML and an
/// optional shared-strings part.
fn build_workbook(sheet_xml: &str, shared_strings_xml: Option<&str>) -> Vec<u8> {
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
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
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
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#,
    );
    add(
        "xl/_rels/workbook.xml.rels",
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#,
    );
    add("xl/worksheets/sheet1.xml", sheet_xml);
    if let Some(sst) = shared_strings_xml {
        add("xl/sharedStrings.xml", sst);
    }

    zip.finish().unwrap().into_inner()
}

/// The fixture from the codec contract: A1 inline string "x", B1 shared
/// string "y", dimension A1:B1.
fn mixed_string_workbook() -> Vec<u8> {
    build_workbook(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <dimension ref="A1:B1"/>
    <sheetData>
        <row r="1">
            <c r="A1" t="inlineStr"><is><t>x</t></is></c>
            <c r="B1" t="s"><v>0</v></c>
        </row>
    </sheetData>
</worksheet>"#,
        Some(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="1" uniqueCount="1">
    <si><t>y</t></si>
</sst>"#,
        ),
    )
}

fn read_entry(buf: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(buf)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

fn grid(spec: &[&[&str]]) -> Grid {
    Grid::from_rows(
        spec.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

#[test]
fn test_load_resolves_inline_and_shared_strings() {
    let workbook = XlsxReader::read(&mixed_string_workbook()).unwrap();
    assert_eq!(workbook.grid(), &grid(&[&["x", "y"]]));
    assert_eq!(workbook.sheet_path(), "xl/worksheets/sheet1.xml");
}

#[test]
fn test_save_then_load_is_a_fixed_point() {
    let workbook = XlsxReader::read(&mixed_string_workbook()).unwrap();
    let saved = XlsxWriter::write(&workbook, workbook.grid()).unwrap();

    let reloaded = XlsxReader::read(&saved).unwrap();
    assert_eq!(reloaded.grid(), &grid(&[&["x", "y"]]));

    // One more cycle for good measure: the codec is stable under reload.
    let saved_again = XlsxWriter::write(&reloaded, reloaded.grid()).unwrap();
    let final_load = XlsxReader::read(&saved_again).unwrap();
    assert_eq!(final_load.grid(), &grid(&[&["x", "y"]]));
}

#[test]
fn test_save_rewrites_dimension() {
    let workbook = XlsxReader::read(&mixed_string_workbook()).unwrap();
    let saved = XlsxWriter::write(&workbook, workbook.grid()).unwrap();

    let sheet = read_entry(&saved, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains(r#"<dimension ref="A1:B1"/>"#));

    // An edit that grows the grid moves the dimension along
    let edited = workbook.grid().add_row().add_column();
    let saved = XlsxWriter::write(&workbook, &edited).unwrap();
    let sheet = read_entry(&saved, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains(r#"<dimension ref="A1:C2"/>"#));
}

#[test]
fn test_save_clears_shared_strings() {
    let workbook = XlsxReader::read(&mixed_string_workbook()).unwrap();
    let saved = XlsxWriter::write(&workbook, workbook.grid()).unwrap();

    let sst = read_entry(&saved, "xl/sharedStrings.xml");
    assert!(sst.contains(r#"count="0" uniqueCount="0""#));
    assert!(!sst.contains("<si>"));

    // The cell that used to reference the table is now inline
    let sheet = read_entry(&saved, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains(r#"<c r="B1" t="inlineStr"><is><t>y</t></is></c>"#));
}

#[test]
fn test_save_creates_shared_strings_when_absent() {
    let source = build_workbook(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData><row r="1"><c r="A1"><v>1</v></c></row></sheetData>
</worksheet>"#,
        None,
    );

    let workbook = XlsxReader::read(&source).unwrap();
    let saved = XlsxWriter::write(&workbook, workbook.grid()).unwrap();
    let sst = read_entry(&saved, "xl/sharedStrings.xml");
    assert!(sst.contains(r#"count="0" uniqueCount="0""#));
}

#[test]
fn test_save_preserves_untouched_parts() {
    let workbook = XlsxReader::read(&mixed_string_workbook()).unwrap();
    let saved = XlsxWriter::write(&workbook, workbook.grid()).unwrap();

    let original_rels = read_entry(&mixed_string_workbook(), "xl/_rels/workbook.xml.rels");
    assert_eq!(read_entry(&saved, "xl/_rels/workbook.xml.rels"), original_rels);
    let original_types = read_entry(&mixed_string_workbook(), "[Content_Types].xml");
    assert_eq!(read_entry(&saved, "[Content_Types].xml"), original_types);
}

#[test]
fn test_edited_grid_roundtrip() {
    let workbook = XlsxReader::read(&mixed_string_workbook()).unwrap();

    let edited = workbook
        .grid()
        .add_row()
        .set_cell(1, 0, "new cell")
        .unwrap()
        .set_cell(0, 1, "替换 & <escaped>")
        .unwrap();

    let saved = XlsxWriter::write(&workbook, &edited).unwrap();
    let reloaded = XlsxReader::read(&saved).unwrap();
    assert_eq!(reloaded.grid(), &edited);
}

#[test]
fn test_whitespace_cells_survive_reload() {
    let workbook = XlsxReader::read(&mixed_string_workbook()).unwrap();

    let edited = workbook
        .grid()
        .set_cell(0, 0, " padded ")
        .unwrap()
        .set_cell(0, 1, "   ")
        .unwrap();

    let saved = XlsxWriter::write(&workbook, &edited).unwrap();
    let reloaded = XlsxReader::read(&saved).unwrap();
    assert_eq!(reloaded.grid(), &edited);
}

#[test]
fn test_missing_worksheet_part() {
    // A valid zip with no worksheet at all
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file("xl/workbook.xml", options).unwrap();
    zip.write_all(b"<workbook/>").unwrap();
    let buf = zip.finish().unwrap().into_inner();

    let err = XlsxReader::read(&buf).unwrap_err();
    assert!(matches!(err, XlsxError::MissingPart(_)));
}

#[test]
fn test_empty_sheet_data_loads_canonical_grid() {
    let source = build_workbook(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData/>
</worksheet>"#,
        None,
    );

    let workbook = XlsxReader::read(&source).unwrap();
    assert_eq!(workbook.grid(), &Grid::empty());

    // And it can still be saved: the self-closing sheetData is replaced.
    let saved = XlsxWriter::write(&workbook, workbook.grid()).unwrap();
    let reloaded = XlsxReader::read(&saved).unwrap();
    assert_eq!(reloaded.grid(), &Grid::empty());
}
