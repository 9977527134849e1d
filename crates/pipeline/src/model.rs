//! Report and aggregate types returned by the pipeline stages.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Outcome of one cleaning pass over the ads workbook.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CleanSummary {
    pub sheets_processed: usize,
    /// Rows that received at least one stamp this run (already-populated
    /// cells are skipped, so a second run reports zero).
    pub rows_stamped: usize,
    pub formulas_dragged: usize,
    pub warnings: Vec<String>,
}

/// One row whose SKU cell was blank (or a `-`/`--` placeholder).
#[derive(Debug, Clone, Serialize)]
pub struct BlankSkuRow {
    /// 1-based spreadsheet row number, as a human would see it.
    pub row: usize,
    pub title: String,
    pub previous: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetBlanks {
    pub sheet: String,
    pub rows: Vec<BlankSkuRow>,
}

/// Phase-1 result: lookup formulas written, workbook awaiting a real
/// spreadsheet application's recalculation.
#[derive(Debug, Default, Clone, Serialize)]
pub struct InjectReport {
    pub sheets: Vec<SheetBlanks>,
    pub formulas_added: usize,
}

impl InjectReport {
    pub fn blank_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.rows.len()).sum()
    }
}

/// One row whose lookup came back `#N/A`.
#[derive(Debug, Clone, Serialize)]
pub struct NaRow {
    /// 1-based spreadsheet row number.
    pub row: usize,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SheetNaRows {
    pub sheet: String,
    pub rows: Vec<NaRow>,
}

/// Phase-2 result: what still needs a human before the merge may run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct NaReport {
    /// SKU or Vendor lookups that failed, per sheet.
    pub na_errors: Vec<SheetNaRows>,
    /// Product-category lookups that failed, per sheet.
    pub missing_categories: Vec<SheetNaRows>,
    /// Titles to add to the master sheet, deduplicated by literal equality
    /// in first-seen order.
    pub missing_titles: Vec<String>,
}

impl NaReport {
    /// Nothing unresolved: the workbook is ready for the merge step.
    pub fn is_clear(&self) -> bool {
        self.na_errors.is_empty() && self.missing_categories.is_empty()
    }
}

/// Ad spend grouped vendor → product category, built fresh per run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct SpendAggregate {
    totals: BTreeMap<String, BTreeMap<String, f64>>,
}

impl SpendAggregate {
    pub fn add(&mut self, vendor: &str, category: &str, amount: f64) {
        *self
            .totals
            .entry(vendor.to_string())
            .or_default()
            .entry(category.to_string())
            .or_insert(0.0) += amount;
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, f64>)> {
        self.totals.iter()
    }

    pub fn categories(&self, vendor: &str) -> Option<&BTreeMap<String, f64>> {
        self.totals.get(vendor)
    }

    pub fn vendor_total(&self, vendor: &str) -> f64 {
        self.totals
            .get(vendor)
            .map(|categories| categories.values().sum())
            .unwrap_or(0.0)
    }
}

/// Aggregation outcome plus the vendor sheets that could not be found.
#[derive(Debug, Default, Clone, Serialize)]
pub struct AggregateReport {
    pub aggregate: SpendAggregate,
    pub warnings: Vec<String>,
}

/// Outcome of merging the aggregate into the CBO export.
#[derive(Debug, Default, Clone, Serialize)]
pub struct MergeSummary {
    pub rows_updated: usize,
    pub rows_inserted: usize,
    pub warnings: Vec<String>,
}

/// A vendor whose CBO ad-spend total drifted from the ads workbook by more
/// than the tolerance. Diagnostic only — never fatal.
#[derive(Debug, Clone, Serialize)]
pub struct VendorMismatch {
    pub vendor: String,
    pub ads_total: f64,
    pub cbo_total: f64,
}

impl VendorMismatch {
    pub fn difference(&self) -> f64 {
        (self.ads_total - self.cbo_total).abs()
    }
}

/// Where the ads workbook sits in the human-gated SKU resolution protocol.
/// The `AwaitingRecalculation` transition is the operator opening the file
/// in a real spreadsheet application — this tool never evaluates formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolutionState {
    /// Month/platform/category columns stamped.
    Stamped,
    /// Lookup formulas written and saved.
    FormulasInjected,
    /// Waiting on the operator to open, recalculate, and save.
    AwaitingRecalculation,
    /// A check pass found no `#N/A` results; the merge may proceed.
    Verified,
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stamped => "stamped",
            Self::FormulasInjected => "formulas injected",
            Self::AwaitingRecalculation => "awaiting recalculation",
            Self::Verified => "verified",
        };
        write!(f, "{label}")
    }
}
