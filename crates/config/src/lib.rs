//! `adsrecon-config` — Static lookup tables for the ads-report pipeline.
//!
//! Month-code mappings, the vendor roster with its caster alias fan-out,
//! and the fixed column layouts of the two workbooks. Everything here is
//! convention: the workbooks are never introspected, so these tables must
//! match the real files exactly.

pub mod columns;
pub mod error;
pub mod months;
pub mod vendors;

pub use error::ConfigError;
pub use months::{month_key, MonthCodes, MonthTable};
pub use vendors::Platform;

/// Master title → SKU → vendor mapping sheet. Excluded from per-vendor
/// processing and targeted by the lookup formulas.
pub const MASTER_SHEET: &str = "ALL SKUS";

/// Sheets taking part in per-vendor processing: everything except the
/// master sheet and underscore-prefixed scratch sheets.
pub fn eligible_sheet(name: &str) -> bool {
    name != MASTER_SHEET && !name.starts_with('_')
}
