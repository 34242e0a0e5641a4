//! The rectangular grid of text cells being edited
//!
//! A [`Grid`] is an immutable value: every edit operation takes `&self` and
//! returns a new grid, and the editing session replaces its grid wholesale on
//! each edit. This keeps codec work a single synchronous pass with no shared
//! mutable state.

use crate::error::{Error, Result};

/// An ordered collection of rows of text cells, guaranteed rectangular.
///
/// Invariants, maintained by construction:
/// - every row has exactly `column_count()` cells;
/// - there is always at least one row and one column. The canonical empty
///   document is a single row holding a single empty cell.
///
/// The empty string is a valid cell value, distinct from an absent cell only
/// at the codec boundary (absent cells become empty strings on load).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")
)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// The canonical empty document: one row of one empty cell.
    pub fn empty() -> Self {
        Self {
            rows: vec![vec![String::new()]],
        }
    }

    /// Build a grid from rows, normalizing to a rectangle.
    ///
    /// Empty input becomes the canonical empty grid. Ragged rows are padded
    /// on the right with empty cells to the length of the longest row (at
    /// least 1). Normalization is idempotent.
    ///
    /// # Examples
    /// ```
    /// use tabula_core::Grid;
    ///
    /// let grid = Grid::from_rows(vec![
    ///     vec!["a".into(), "b".into()],
    ///     vec!["c".into()],
    /// ]);
    /// assert_eq!(grid.rows()[1], vec!["c".to_string(), String::new()]);
    ///
    /// assert_eq!(Grid::from_rows(vec![]), Grid::empty());
    /// ```
    pub fn from_rows(mut rows: Vec<Vec<String>>) -> Self {
        if rows.is_empty() {
            return Self::empty();
        }

        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for row in &mut rows {
            row.resize(column_count, String::new());
        }

        Self { rows }
    }

    /// Number of rows (always >= 1)
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Number of columns (always >= 1)
    pub fn column_count(&self) -> u32 {
        self.rows[0].len() as u32
    }

    /// Get a cell's text, or `None` if out of bounds
    pub fn cell(&self, row: u32, col: u32) -> Option<&str> {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .map(String::as_str)
    }

    /// Borrow the rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Consume the grid, yielding its rows
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    /// Return a grid with one cell replaced.
    ///
    /// Both coordinates must be within the current bounds; growing the grid
    /// first (via [`add_row`](Self::add_row) / [`add_column`](Self::add_column))
    /// is the editor layer's responsibility.
    pub fn set_cell<S: Into<String>>(&self, row: u32, col: u32, value: S) -> Result<Self> {
        if row >= self.row_count() {
            return Err(Error::RowOutOfBounds(row, self.row_count()));
        }
        if col >= self.column_count() {
            return Err(Error::ColumnOutOfBounds(col, self.column_count()));
        }

        let mut rows = self.rows.clone();
        rows[row as usize][col as usize] = value.into();
        Ok(Self { rows })
    }

    /// Return a grid with one row of empty cells appended
    pub fn add_row(&self) -> Self {
        let mut rows = self.rows.clone();
        rows.push(vec![String::new(); self.column_count() as usize]);
        Self { rows }
    }

    /// Return a grid with the last row dropped.
    ///
    /// No-op if the grid has a single row: a grid never shrinks below 1x1.
    pub fn remove_row(&self) -> Self {
        let mut rows = self.rows.clone();
        if rows.len() > 1 {
            rows.pop();
        }
        Self { rows }
    }

    /// Return a grid with one empty cell appended to every row
    pub fn add_column(&self) -> Self {
        let mut rows = self.rows.clone();
        for row in &mut rows {
            row.push(String::new());
        }
        Self { rows }
    }

    /// Return a grid with the last cell of every row dropped.
    ///
    /// No-op if the grid has a single column.
    pub fn remove_column(&self) -> Self {
        if self.column_count() <= 1 {
            return self.clone();
        }
        let mut rows = self.rows.clone();
        for row in &mut rows {
            row.pop();
        }
        Self { rows }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

/// Normalizing conversion; this is also the deserialization path, so a grid
/// can never be constructed rectangular-unsound from external data.
impl From<Vec<Vec<String>>> for Grid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}
