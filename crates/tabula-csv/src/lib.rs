//! # tabula-csv
//!
//! CSV/TSV reader and writer for tabula.
//!
//! The reader accepts any of `\r\n`, `\r`, or `\n` as a record terminator and
//! tolerates ragged rows (the resulting [`Grid`](tabula_core::Grid) is padded
//! to a rectangle); the writer always emits `\r\n` with no trailing
//! terminator. Together this makes `parse(write(grid)) == grid` hold for
//! every grid. There are no header-row semantics: row 0 is data.

mod options;
mod reader;
mod writer;

pub use options::{CsvReadOptions, CsvWriteOptions};
pub use reader::CsvReader;
pub use writer::CsvWriter;
