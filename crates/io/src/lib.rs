//! `adsrecon-io` — Workbook file IO.
//!
//! Import: xlsx/xls/xlsb/ods via calamine, composing each sheet's value
//! range with its formula range so formulas keep their cached results.
//! Export: xlsx via rust_xlsxwriter, overwriting the target in place (the
//! pipeline's accepted operational risk — no temp-file swap, no versioning).

pub mod xlsx;

pub use xlsx::{load, save, LoadSummary};
