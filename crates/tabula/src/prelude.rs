//! Prelude module - common imports for tabula users
//!
//! ```rust
//! use tabula::prelude::*;
//! ```

pub use crate::{
    // Cell addressing
    CellAddress,
    // CSV codec
    CsvReadOptions,
    CsvReader,
    CsvWriteOptions,
    CsvWriter,
    // Error types
    DocumentError,
    DocumentResult,
    // Grid model
    Grid,
    // Document controller
    TableDocument,
    TableFormat,
    // Workbook codec
    XlsxError,
    XlsxReader,
    XlsxWorkbook,
    XlsxWriter,
};
