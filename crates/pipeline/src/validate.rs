//! Cross-workbook spend validation.

use adsrecon_config::columns::cbo;
use adsrecon_grid::Workbook;

use crate::error::PipelineError;
use crate::model::{SpendAggregate, VendorMismatch};

/// Per-vendor totals may drift by up to a cent before being flagged.
pub const SPEND_TOLERANCE: f64 = 0.01;

/// Compare each vendor's CBO ad-spend total against the ads-workbook
/// aggregate. Mismatches beyond [`SPEND_TOLERANCE`] are returned for the
/// operator; they never fail the run.
pub fn validate_totals(
    cbo_workbook: &Workbook,
    aggregate: &SpendAggregate,
) -> Result<Vec<VendorMismatch>, PipelineError> {
    let sheet = cbo_workbook.sheets().first().ok_or(PipelineError::NoSheets)?;

    let mut mismatches = Vec::new();
    for (vendor, _) in aggregate.iter() {
        let ads_total = aggregate.vendor_total(vendor);
        let needle = vendor.to_lowercase();

        let cbo_total: f64 = (1..sheet.row_count())
            .filter(|&row| {
                sheet
                    .cell(row, cbo::VENDOR)
                    .display()
                    .to_lowercase()
                    .contains(&needle)
            })
            .filter_map(|row| sheet.cell(row, cbo::AD_SPEND).as_number())
            .sum();

        if (ads_total - cbo_total).abs() > SPEND_TOLERANCE {
            mismatches.push(VendorMismatch {
                vendor: vendor.clone(),
                ads_total,
                cbo_total,
            });
        }
    }

    Ok(mismatches)
}
