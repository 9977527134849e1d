//! `adsrecon-pipeline` — Ads-spend reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded workbook models, mutates them,
//! returns reports. No CLI or file IO dependencies; the CLI loads through
//! `adsrecon-io`, runs these transforms, and saves the results.

pub mod aggregate;
pub mod clean;
pub mod error;
pub mod merge;
pub mod model;
pub mod skus;
pub mod validate;

pub use aggregate::aggregate_spend;
pub use clean::clean_workbook;
pub use error::PipelineError;
pub use merge::merge_into_cbo;
pub use model::{
    AggregateReport, CleanSummary, InjectReport, MergeSummary, NaReport, ResolutionState,
    SpendAggregate, VendorMismatch,
};
pub use skus::{append_titles_to_master, inject_sku_lookups, scan_na_errors};
pub use validate::{validate_totals, SPEND_TOLERANCE};
