//! CSV reader

use crate::options::CsvReadOptions;
use tabula_core::Grid;

/// CSV/TSV parser
///
/// This is a hand-rolled single-pass scanner rather than a wrapper around a
/// CSV library: the grid round-trip contract needs every record terminator to
/// produce a row (including blank lines) and an unconditional flush of the
/// final field at end of input, neither of which general CSV readers provide.
pub struct CsvReader;

impl CsvReader {
    /// Parse CSV bytes into a grid, decoding as UTF-8 (lossily)
    pub fn read(bytes: &[u8], options: &CsvReadOptions) -> Grid {
        Self::parse(&String::from_utf8_lossy(bytes), options)
    }

    /// Parse CSV text into a grid
    ///
    /// Rules: a `"` at the start of a field opens a quoted field; inside
    /// quotes `""` is a literal `"` and a lone `"` closes the field; outside
    /// quotes the delimiter ends a field and any of `\r\n`, `\r`, `\n` ends
    /// a record (`\r\n` is consumed as a single terminator). Everything else
    /// is taken verbatim, so quoted fields may contain delimiters and
    /// newlines. The pending field and row are flushed at end of input even
    /// without a trailing terminator.
    ///
    /// Parsing never fails; the result is normalized, so empty input yields
    /// the canonical single empty cell.
    pub fn parse(text: &str, options: &CsvReadOptions) -> Grid {
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut row: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut at_field_start = true;

        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if in_quotes {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        // Escaped literal quote
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    field.push(c);
                }
                continue;
            }

            if c == options.delimiter {
                row.push(std::mem::take(&mut field));
                at_field_start = true;
            } else if c == '\r' || c == '\n' {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                at_field_start = true;
            } else if c == '"' && at_field_start {
                in_quotes = true;
                at_field_start = false;
            } else {
                field.push(c);
                at_field_start = false;
            }
        }

        // Flush the trailing record even without a terminator
        row.push(field);
        rows.push(row);

        Grid::from_rows(rows)
    }
}
