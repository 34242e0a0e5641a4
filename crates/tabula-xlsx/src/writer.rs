//! XLSX writer

use std::io::{Cursor, Write};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::error::{XlsxError, XlsxResult};
use crate::reader::SHARED_STRINGS_PATH;
use crate::workbook::XlsxWorkbook;
use crate::SINGLE_SHEET_ONLY;
use tabula_core::{CellAddress, Grid};

/// An empty, valid shared-strings document. Written over the original table
/// on every save, since output cells are always inline strings.
const EMPTY_SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="0" uniqueCount="0"/>"#;

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Serialize an edited grid back into the workbook's archive.
    ///
    /// Only the loaded worksheet part and the shared-strings part are
    /// rewritten; every other entry is carried through unchanged, in the
    /// original order. Fails with [`XlsxError::MissingPart`] if the worksheet
    /// XML has no `sheetData` element to replace.
    pub fn write(workbook: &XlsxWorkbook, grid: &Grid) -> XlsxResult<Vec<u8>> {
        let sheet_xml = Self::patch_worksheet_xml(&workbook.sheet_xml, grid)?;

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        let mut wrote_shared_strings = false;
        for (name, data) in &workbook.parts {
            zip.start_file(name, options)?;
            if name == &workbook.sheet_path {
                zip.write_all(&sheet_xml)?;
            } else if SINGLE_SHEET_ONLY && name == SHARED_STRINGS_PATH {
                zip.write_all(EMPTY_SHARED_STRINGS.as_bytes())?;
                wrote_shared_strings = true;
            } else {
                zip.write_all(data)?;
            }
        }

        // Emit the cleared table even when the source archive had none, so a
        // reload never resolves stale indices.
        if SINGLE_SHEET_ONLY && !wrote_shared_strings {
            zip.start_file(SHARED_STRINGS_PATH, options)?;
            zip.write_all(EMPTY_SHARED_STRINGS.as_bytes())?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Replace `sheetData` and rewrite `dimension@ref` in the worksheet XML,
    /// streaming every other event through untouched.
    fn patch_worksheet_xml(original: &[u8], grid: &Grid) -> XlsxResult<Vec<u8>> {
        let sheet_data_xml = Self::render_sheet_data(grid);

        let mut reader = Reader::from_reader(original);
        let mut buf = Vec::new();
        let mut writer = Writer::new(Vec::with_capacity(original.len() + sheet_data_xml.len()));

        let mut skipping_sheet_data = false;
        let mut replaced_sheet_data = false;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"sheetData" => {
                    skipping_sheet_data = true;
                    replaced_sheet_data = true;
                    writer
                        .get_mut()
                        .extend_from_slice(sheet_data_xml.as_bytes());
                }
                Event::Empty(e) if e.local_name().as_ref() == b"sheetData" => {
                    replaced_sheet_data = true;
                    writer
                        .get_mut()
                        .extend_from_slice(sheet_data_xml.as_bytes());
                    drop(e);
                }
                Event::End(e) if e.local_name().as_ref() == b"sheetData" => {
                    skipping_sheet_data = false;
                    drop(e);
                }
                Event::Eof => break,
                ev if skipping_sheet_data => drop(ev),
                Event::Start(e) if e.local_name().as_ref() == b"dimension" => {
                    writer.write_event(Event::Start(Self::patch_dimension(&e, grid)))?;
                }
                Event::Empty(e) if e.local_name().as_ref() == b"dimension" => {
                    writer.write_event(Event::Empty(Self::patch_dimension(&e, grid)))?;
                }
                ev => writer.write_event(ev.into_owned())?,
            }
            buf.clear();
        }

        if !replaced_sheet_data {
            return Err(XlsxError::MissingPart("sheetData".into()));
        }

        Ok(writer.into_inner())
    }

    /// Rebuild a `dimension` element with its `ref` set to the grid's extent
    fn patch_dimension(original: &BytesStart<'_>, grid: &Grid) -> BytesStart<'static> {
        let dimension = if grid.row_count() == 0 || grid.column_count() == 0 {
            "A1".to_string() // Unreachable with a normalized grid, kept as the documented rule
        } else {
            format!(
                "A1:{}{}",
                CellAddress::column_to_letters(grid.column_count() - 1),
                grid.row_count()
            )
        };

        let mut elem = BytesStart::new("dimension");
        for attr in original.attributes().flatten() {
            if attr.key.as_ref() != b"ref" {
                elem.push_attribute(attr);
            }
        }
        elem.push_attribute(("ref", dimension.as_str()));
        elem
    }

    /// Render `sheetData` from the grid: every cell as an inline string,
    /// empty cells included so the rectangle survives a reload.
    fn render_sheet_data(grid: &Grid) -> String {
        let mut out = String::from("<sheetData>");

        for (i, row) in grid.rows().iter().enumerate() {
            out.push_str(&format!("<row r=\"{}\">", i + 1));
            for (j, value) in row.iter().enumerate() {
                let cell_ref = CellAddress::new(i as u32, j as u32).to_a1_string();
                // Edge whitespace must survive a reload
                let space_attr = if value.starts_with(char::is_whitespace)
                    || value.ends_with(char::is_whitespace)
                {
                    " xml:space=\"preserve\""
                } else {
                    ""
                };
                out.push_str(&format!(
                    "<c r=\"{}\" t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                    cell_ref,
                    space_attr,
                    Self::escape_xml(value)
                ));
            }
            out.push_str("</row>");
        }

        out.push_str("</sheetData>");
        out
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }
}
