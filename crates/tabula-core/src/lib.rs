//! # tabula-core
//!
//! Core data structures for the tabula tabular-file editor:
//! - [`Grid`] - the rectangular table of text cells being edited
//! - [`CellAddress`] - zero-based cell addressing with A1-style parsing
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::{CellAddress, Grid};
//!
//! let grid = Grid::from_rows(vec![
//!     vec!["a".into(), "b".into()],
//!     vec!["c".into()], // padded to ["c", ""]
//! ]);
//! assert_eq!(grid.column_count(), 2);
//!
//! let grid = grid.set_cell(1, 1, "d").unwrap();
//! assert_eq!(grid.cell(1, 1), Some("d"));
//!
//! let addr = CellAddress::parse("B2").unwrap();
//! assert_eq!((addr.row, addr.col), (1, 1));
//! ```

pub mod address;
pub mod error;
pub mod grid;

// Re-exports for convenience
pub use address::CellAddress;
pub use error::{Error, Result};
pub use grid::Grid;
