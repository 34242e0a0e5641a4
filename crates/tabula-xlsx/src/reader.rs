//! XLSX reader

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::workbook::XlsxWorkbook;
use tabula_core::{CellAddress, Grid};

/// Archive path prefix identifying worksheet parts
const WORKSHEET_PREFIX: &str = "xl/worksheets/sheet";

/// Archive path of the shared-strings part
pub(crate) const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";

/// Excel's own sheet bounds. Cell references beyond them are treated as a
/// corrupt file rather than allocated: the grid is dense, so a single stray
/// ref like `XFD1048576` would otherwise commit gigabytes.
const MAX_ROWS: u32 = 1_048_576;
const MAX_COLS: u32 = 16_384;

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' {
            let mut hex_chars = String::new();
            let mut saw_x = false;
            let mut is_escape = false;

            if chars.peek() == Some(&'x') {
                chars.next(); // consume 'x'
                saw_x = true;

                for _ in 0..4 {
                    if let Some(&ch) = chars.peek() {
                        if ch.is_ascii_hexdigit() {
                            hex_chars.push(ch);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }

                if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                    // Only consume the closing '_' for a decodable code point
                    let decoded = u32::from_str_radix(&hex_chars, 16)
                        .ok()
                        .and_then(char::from_u32);
                    if let Some(decoded) = decoded {
                        chars.next();
                        result.push(decoded);
                        is_escape = true;
                    }
                }
            }

            if !is_escape {
                // Not a valid escape sequence, output what we consumed
                result.push('_');
                if saw_x {
                    result.push('x');
                    result.push_str(&hex_chars);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read an `.xlsx` byte buffer into an editing session.
    ///
    /// Opens the buffer as a zip archive, snapshots every entry in iteration
    /// order, selects the first `xl/worksheets/sheet*` part, and resolves its
    /// cells into a rectangular [`Grid`] of text using the shared-strings
    /// table where cells reference it.
    pub fn read(bytes: &[u8]) -> XlsxResult<XlsxWorkbook> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| XlsxError::InvalidFormat(format!("not a zip archive: {}", e)))?;

        // Snapshot all entries; the save path rewrites the archive wholesale
        // and must preserve every part it does not touch.
        let mut parts: Vec<(String, Vec<u8>)> = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            parts.push((file.name().to_string(), data));
        }

        // First worksheet part in archive order; sheets are not reordered by
        // index, matching the single-sheet scope of this codec.
        let (sheet_path, sheet_xml) = parts
            .iter()
            .find(|(name, _)| name.starts_with(WORKSHEET_PREFIX))
            .map(|(name, data)| (name.clone(), data.clone()))
            .ok_or_else(|| XlsxError::MissingPart("no worksheet found".into()))?;
        log::debug!("editing worksheet part {}", sheet_path);

        let shared_strings = match parts.iter().find(|(name, _)| name == SHARED_STRINGS_PATH) {
            Some((_, data)) => Self::read_shared_strings(data)?,
            None => Vec::new(), // No shared strings is valid
        };

        let grid = Self::read_worksheet(&sheet_xml, &shared_strings)?;

        Ok(XlsxWorkbook {
            grid,
            parts,
            sheet_path,
            sheet_xml,
        })
    }

    /// Read the shared strings table: each `<si>`'s first `<t>` text.
    ///
    /// Text is only collected inside `<t>`, so the reader must not trim: a
    /// string's own leading/trailing whitespace is significant, while the
    /// whitespace between elements never reaches `current_string`.
    fn read_shared_strings(data: &[u8]) -> XlsxResult<Vec<String>> {
        let mut xml_reader = Reader::from_reader(data);

        let mut buf = Vec::new();
        let mut strings = Vec::new();
        let mut current_string: Option<String> = None;
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string = None;
                    }
                    b"t" if in_si && current_string.is_none() => {
                        in_t = true;
                        current_string = Some(String::new());
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        // Decode Excel's _xHHHH_ escape sequences
                        let text = current_string.take().unwrap_or_default();
                        strings.push(decode_excel_escapes(&text));
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let (Ok(text), Some(s)) = (e.unescape(), current_string.as_mut()) {
                        s.push_str(&text);
                    }
                }
                Ok(Event::CData(e)) if in_t => {
                    if let Some(s) = current_string.as_mut() {
                        s.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Parse a worksheet part's `sheetData` into a grid.
    ///
    /// No text trimming: cell text lives only inside `<v>` and `<is><t>`, and
    /// its edge whitespace is user data. Structural whitespace arrives as
    /// text events outside those flags and is dropped.
    fn read_worksheet(data: &[u8], shared_strings: &[String]) -> XlsxResult<Grid> {
        let mut xml_reader = Reader::from_reader(data);

        let mut buf = Vec::new();

        // Sparse cells keyed by (row, col); rows keyed even when empty so
        // that `<row r="3"/>` still occupies a row in the grid.
        let mut rows: BTreeMap<u32, BTreeMap<u32, String>> = BTreeMap::new();
        let mut max_col: Option<u32> = None;

        let mut in_sheet_data = false;
        let mut current_row: Option<u32> = None;

        // Current cell state
        let mut in_cell = false;
        let mut current_cell_ref: Option<String> = None;
        let mut current_cell_type: Option<String> = None;
        let mut current_value: Option<String> = None;
        let mut current_inline: Option<String> = None;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            let event = xml_reader.read_event_into(&mut buf);
            let is_empty = matches!(&event, Ok(Event::Empty(_)));
            match event {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    match e.local_name().as_ref() {
                        b"sheetData" => {
                            if !is_empty {
                                in_sheet_data = true;
                            }
                        }
                        b"row" if in_sheet_data => {
                            let mut row_num: Option<u32> = None;
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"r" {
                                    row_num = attr
                                        .unescape_value()
                                        .ok()
                                        .and_then(|s| s.parse::<u32>().ok());
                                }
                            }
                            // 1-based attribute, else sequential fallback
                            let row_idx = match row_num {
                                Some(r) => r.saturating_sub(1),
                                None => rows.len() as u32,
                            };
                            if row_idx >= MAX_ROWS {
                                return Err(XlsxError::InvalidFormat(format!(
                                    "row {} is outside the supported sheet bounds",
                                    row_idx as u64 + 1
                                )));
                            }
                            rows.entry(row_idx).or_default();
                            current_row = Some(row_idx);
                        }
                        b"c" if in_sheet_data && current_row.is_some() => {
                            let mut cell_ref: Option<String> = None;
                            let mut cell_type: Option<String> = None;
                            for attr in e.attributes().flatten() {
                                match attr.key.as_ref() {
                                    b"r" => {
                                        cell_ref =
                                            attr.unescape_value().ok().map(|s| s.to_string());
                                    }
                                    b"t" => {
                                        cell_type =
                                            attr.unescape_value().ok().map(|s| s.to_string());
                                    }
                                    _ => {}
                                }
                            }

                            if is_empty {
                                // Attribute-only cell: resolves to empty text
                                // but still widens the grid.
                                Self::store_cell(
                                    &mut rows,
                                    &mut max_col,
                                    current_row,
                                    cell_ref.as_deref(),
                                    String::new(),
                                )?;
                            } else {
                                in_cell = true;
                                current_cell_ref = cell_ref;
                                current_cell_type = cell_type;
                                current_value = None;
                                current_inline = None;
                            }
                        }
                        b"v" if in_cell && !is_empty => {
                            in_value = true;
                        }
                        b"is" if in_cell && !is_empty => {
                            in_inline_str = true;
                        }
                        b"t" if in_inline_str && !is_empty => {
                            in_inline_text = true;
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"sheetData" => {
                        in_sheet_data = false;
                    }
                    b"row" => {
                        current_row = None;
                    }
                    b"c" if in_cell => {
                        let text = Self::resolve_cell(
                            current_cell_type.as_deref(),
                            current_value.as_deref(),
                            current_inline.as_deref(),
                            shared_strings,
                        );
                        Self::store_cell(
                            &mut rows,
                            &mut max_col,
                            current_row,
                            current_cell_ref.as_deref(),
                            text,
                        )?;
                        in_cell = false;
                    }
                    b"v" => {
                        in_value = false;
                    }
                    b"is" => {
                        in_inline_str = false;
                    }
                    b"t" if in_inline_str => {
                        in_inline_text = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_value {
                        if let Ok(text) = e.unescape() {
                            current_value.get_or_insert_with(String::new).push_str(&text);
                        }
                    } else if in_inline_text {
                        if let Ok(text) = e.unescape() {
                            current_inline.get_or_insert_with(String::new).push_str(&text);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if in_value {
                        current_value
                            .get_or_insert_with(String::new)
                            .push_str(&String::from_utf8_lossy(&e));
                    } else if in_inline_text {
                        current_inline
                            .get_or_insert_with(String::new)
                            .push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self::build_grid(rows, max_col))
    }

    /// Resolve a cell's text by its `t` type discriminator
    fn resolve_cell(
        cell_type: Option<&str>,
        value: Option<&str>,
        inline: Option<&str>,
        shared_strings: &[String],
    ) -> String {
        match cell_type {
            Some("s") => {
                let index = value.and_then(|v| v.trim().parse::<usize>().ok());
                match index.and_then(|i| shared_strings.get(i)) {
                    Some(s) => s.clone(),
                    None => {
                        log::warn!(
                            "shared string index {:?} out of range (table has {} entries)",
                            value,
                            shared_strings.len()
                        );
                        String::new()
                    }
                }
            }
            Some("inlineStr") => inline.unwrap_or_default().to_string(),
            _ => value.unwrap_or_default().to_string(),
        }
    }

    /// Place resolved cell text into the sparse map
    fn store_cell(
        rows: &mut BTreeMap<u32, BTreeMap<u32, String>>,
        max_col: &mut Option<u32>,
        current_row: Option<u32>,
        cell_ref: Option<&str>,
        text: String,
    ) -> XlsxResult<()> {
        let Some(row_idx) = current_row else {
            return Ok(());
        };

        // Malformed (or missing) refs land at column 0 by convention rather
        // than failing the load; see parse_or_origin.
        let cell_ref = cell_ref.unwrap_or_default();
        let addr = CellAddress::parse_or_origin(cell_ref);
        if CellAddress::parse(cell_ref).is_err() {
            log::warn!("malformed cell reference '{}', placing at A1 column", cell_ref);
        }
        if addr.col >= MAX_COLS {
            return Err(XlsxError::InvalidFormat(format!(
                "cell reference '{}' is outside the supported sheet bounds",
                cell_ref
            )));
        }

        *max_col = Some(max_col.map_or(addr.col, |m| m.max(addr.col)));
        rows.entry(row_idx).or_default().insert(addr.col, text);
        Ok(())
    }

    /// Normalize the sparse cell map into a rectangular grid
    fn build_grid(rows: BTreeMap<u32, BTreeMap<u32, String>>, max_col: Option<u32>) -> Grid {
        let Some(max_row) = rows.keys().next_back().copied() else {
            return Grid::empty();
        };
        let width = max_col.map_or(1, |c| c as usize + 1);

        let mut out: Vec<Vec<String>> = Vec::with_capacity(max_row as usize + 1);
        for row_idx in 0..=max_row {
            let mut row = vec![String::new(); width];
            if let Some(cells) = rows.get(&row_idx) {
                for (&col, text) in cells {
                    row[col as usize] = text.clone();
                }
            }
            out.push(row);
        }

        Grid::from_rows(out)
    }
}
