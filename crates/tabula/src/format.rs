//! Format sniffing by MIME type and file extension

/// MIME types accepted as CSV
const CSV_MIME_TYPES: &[&str] = &["text/csv", "application/csv"];

/// MIME type of tab-separated values
const TSV_MIME_TYPE: &str = "text/tab-separated-values";

/// MIME type of an OOXML spreadsheet
const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// The container format of a tabular file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
    /// Single-sheet OOXML workbook
    Xlsx,
}

impl TableFormat {
    /// Sniff the format from a declared MIME type and/or file name.
    ///
    /// MIME wins over extension; both comparisons are case-insensitive.
    /// Returns `None` when neither classifies the file.
    pub fn detect(mime: Option<&str>, file_name: &str) -> Option<Self> {
        if let Some(mime) = mime {
            let mime = mime
                .split(';')
                .next()
                .unwrap_or(mime)
                .trim()
                .to_ascii_lowercase();
            if CSV_MIME_TYPES.contains(&mime.as_str()) {
                return Some(Self::Csv);
            }
            if mime == TSV_MIME_TYPE {
                return Some(Self::Tsv);
            }
            if mime == XLSX_MIME_TYPE {
                return Some(Self::Xlsx);
            }
        }

        let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => Some(Self::Csv),
            Some("tsv") => Some(Self::Tsv),
            Some("xlsx") => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// The canonical MIME type for this format, used when the host supplied
    /// none on load
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Tsv => TSV_MIME_TYPE,
            Self::Xlsx => XLSX_MIME_TYPE,
        }
    }
}
