//! CSV writer

use crate::options::CsvWriteOptions;
use tabula_core::Grid;

/// CSV/TSV serializer
pub struct CsvWriter;

impl CsvWriter {
    /// Serialize a grid to CSV text
    ///
    /// Fields containing the delimiter, `"`, `\r`, or `\n` are wrapped in
    /// quotes with internal quotes doubled; all other fields are emitted
    /// unchanged. Fields are joined with the delimiter and rows with `\r\n`,
    /// with no terminator after the last row.
    pub fn write(grid: &Grid, options: &CsvWriteOptions) -> String {
        let mut out = String::new();

        for (i, row) in grid.rows().iter().enumerate() {
            if i > 0 {
                out.push_str("\r\n");
            }
            for (j, field) in row.iter().enumerate() {
                if j > 0 {
                    out.push(options.delimiter);
                }
                Self::write_field(&mut out, field, options.delimiter);
            }
        }

        out
    }

    /// Serialize a grid to CSV bytes (UTF-8)
    pub fn write_bytes(grid: &Grid, options: &CsvWriteOptions) -> Vec<u8> {
        Self::write(grid, options).into_bytes()
    }

    fn write_field(out: &mut String, field: &str, delimiter: char) {
        let needs_quoting = field
            .chars()
            .any(|c| c == delimiter || c == '"' || c == '\r' || c == '\n');

        if !needs_quoting {
            out.push_str(field);
            return;
        }

        out.push('"');
        for c in field.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    }
}
