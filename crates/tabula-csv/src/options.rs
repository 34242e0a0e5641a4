//! CSV options

/// Options for parsing CSV/TSV text
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: char,
}

impl CsvReadOptions {
    /// Options for tab-separated input
    pub fn tsv() -> Self {
        Self { delimiter: '\t' }
    }
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

/// Options for serializing a grid to CSV/TSV text
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: char,
}

impl CsvWriteOptions {
    /// Options for tab-separated output
    pub fn tsv() -> Self {
        Self { delimiter: '\t' }
    }
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}
