//! # tabula-xlsx
//!
//! Single-worksheet XLSX (Office Open XML) reader and writer for tabula.
//!
//! This is deliberately not a general workbook codec. Exactly one worksheet
//! (the first `xl/worksheets/sheet*` part in archive order) is read into a
//! [`Grid`](tabula_core::Grid) of text cells, and only that part plus
//! `xl/sharedStrings.xml` are rewritten on save; every other archive entry is
//! carried through byte-for-byte. Formulas, styles, merged cells, and cell
//! typing are not modeled: every value is text, and saved cells are always
//! inline strings.

pub mod error;
pub mod reader;
pub mod workbook;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use workbook::XlsxWorkbook;
pub use writer::XlsxWriter;

/// Single-sheet editing policy.
///
/// On save the shared-strings part is replaced with an empty table and every
/// cell is written as an inline string. That invalidates shared-string
/// indices used by any *other* worksheet in the archive, which is acceptable
/// only because this codec exposes exactly one worksheet for editing. A
/// general-purpose writer would have to preserve the table instead.
pub const SINGLE_SHEET_ONLY: bool = true;
