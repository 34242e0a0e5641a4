//! The editable tabular document
//!
//! One [`TableDocument`] spans one editing session: built from source bytes
//! on open, its grid replaced wholesale on each edit, and serialized back to
//! bytes in the original container format on save. Loading and saving are
//! single synchronous passes; there are no partial results.

use crate::error::{DocumentError, DocumentResult};
use crate::format::TableFormat;
use tabula_core::Grid;
use tabula_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use tabula_xlsx::{XlsxReader, XlsxWorkbook, XlsxWriter};

/// A tabular file opened for grid editing
#[derive(Debug, Clone)]
pub struct TableDocument {
    format: TableFormat,
    mime: String,
    grid: Grid,
    /// Load/save session state, present only for xlsx sources
    workbook: Option<XlsxWorkbook>,
}

impl TableDocument {
    /// Open a file from its bytes, declared MIME type, and file name.
    ///
    /// The MIME type and file name are used only for format sniffing;
    /// unclassifiable input is [`DocumentError::UnsupportedFormat`].
    pub fn open(bytes: &[u8], mime: Option<&str>, file_name: &str) -> DocumentResult<Self> {
        let format = TableFormat::detect(mime, file_name).ok_or_else(|| {
            DocumentError::UnsupportedFormat {
                mime: mime.map(str::to_string),
                file_name: file_name.to_string(),
            }
        })?;

        // Persist the MIME type the host declared; fall back to the
        // format's canonical one.
        let mime = mime
            .map(str::to_string)
            .unwrap_or_else(|| format.mime_type().to_string());

        let (grid, workbook) = match format {
            TableFormat::Csv => (CsvReader::read(bytes, &CsvReadOptions::default()), None),
            TableFormat::Tsv => (CsvReader::read(bytes, &CsvReadOptions::tsv()), None),
            TableFormat::Xlsx => {
                let workbook = XlsxReader::read(bytes)?;
                (workbook.grid().clone(), Some(workbook))
            }
        };

        Ok(Self {
            format,
            mime,
            grid,
            workbook,
        })
    }

    /// The sniffed container format
    pub fn format(&self) -> TableFormat {
        self.format
    }

    /// The MIME type to persist alongside the saved bytes
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// The current grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replace the grid wholesale (the edit model: every grid operation
    /// returns a new grid, which the editor installs here)
    pub fn update_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Serialize the current grid back into the original container format
    pub fn save(&self) -> DocumentResult<Vec<u8>> {
        match self.format {
            TableFormat::Csv => Ok(CsvWriter::write_bytes(
                &self.grid,
                &CsvWriteOptions::default(),
            )),
            TableFormat::Tsv => Ok(CsvWriter::write_bytes(&self.grid, &CsvWriteOptions::tsv())),
            TableFormat::Xlsx => {
                // The workbook session always exists for xlsx documents;
                // open() is the only constructor.
                let workbook = self
                    .workbook
                    .as_ref()
                    .ok_or_else(|| tabula_xlsx::XlsxError::MissingPart("workbook session".into()))?;
                Ok(XlsxWriter::write(workbook, &self.grid)?)
            }
        }
    }
}
