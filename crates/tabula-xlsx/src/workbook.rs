//! The per-session workbook state carried from load to save

use tabula_core::Grid;

/// One loaded `.xlsx` editing session.
///
/// Holds everything [`XlsxWriter`](crate::XlsxWriter) needs to rewrite the
/// archive: the resolved grid, every archive entry in original iteration
/// order, and the selected worksheet part (path and verbatim XML). The
/// worksheet XML is kept so the save path can patch `sheetData` and
/// `dimension` in place while leaving the rest of the part untouched.
#[derive(Debug, Clone)]
pub struct XlsxWorkbook {
    pub(crate) grid: Grid,
    /// All archive entries, in original order
    pub(crate) parts: Vec<(String, Vec<u8>)>,
    /// Path of the worksheet part being edited
    pub(crate) sheet_path: String,
    /// That part's XML, byte-for-byte as loaded
    pub(crate) sheet_xml: Vec<u8>,
}

impl XlsxWorkbook {
    /// The grid resolved from the worksheet at load time
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Path of the worksheet part inside the archive
    pub fn sheet_path(&self) -> &str {
        &self.sheet_path
    }
}
