//! # tabula
//!
//! Edit small tabular files as a rectangular grid of text.
//!
//! Tabula opens CSV, TSV, and single-sheet XLSX files into one uniform
//! [`Grid`] of strings, applies whole-grid edits, and serializes back to the
//! original container format. For `.xlsx` sources the save path rewrites only
//! the worksheet's cell data and dimension, preserving every other archive
//! part byte-for-byte.
//!
//! ## Example
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! // Open a CSV file from its bytes
//! let mut doc = TableDocument::open(b"a,b\r\nc,d", Some("text/csv"), "data.csv").unwrap();
//!
//! // Edit the grid (every operation returns a new grid)
//! let edited = doc.grid().set_cell(0, 1, "edited").unwrap().add_row();
//! doc.update_grid(edited);
//!
//! // Serialize back to the source format
//! let bytes = doc.save().unwrap();
//! assert_eq!(bytes, b"a,edited\r\nc,d\r\n,");
//! ```

pub mod document;
pub mod error;
pub mod format;
pub mod prelude;

pub use document::TableDocument;
pub use error::{DocumentError, DocumentResult};
pub use format::TableFormat;

// Re-export the component crates' public surface
pub use tabula_core::{CellAddress, Grid};
pub use tabula_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use tabula_xlsx::{XlsxError, XlsxReader, XlsxWorkbook, XlsxWriter};
