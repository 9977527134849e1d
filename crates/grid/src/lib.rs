//! `adsrecon-grid` — Workbook grid model.
//!
//! Pure in-memory representation of a spreadsheet workbook: cells, sheets,
//! and A1 reference utilities. No file IO dependencies; the io crate maps
//! this model to and from xlsx files.

pub mod cell;
pub mod refs;
pub mod sheet;
pub mod workbook;

pub use cell::{CachedResult, CellValue, NA_ERROR};
pub use refs::{adjust_formula, cell_address, col_to_letters};
pub use sheet::Sheet;
pub use workbook::Workbook;
