//! Merge aggregated ad spend into the CBO monthly export.

use adsrecon_config::columns::{cbo, REVIEW_FILL};
use adsrecon_grid::{CellValue, Sheet, Workbook};

use crate::error::PipelineError;
use crate::model::{MergeSummary, SpendAggregate};

/// Write aggregated spend into the CBO workbook's first sheet.
///
/// Existing (vendor, category) rows get their ad-spend cell overwritten;
/// categories with spend but no sales row get a new row inserted after the
/// vendor's last row, with the context and tail columns copied from one of
/// the vendor's existing rows and a light-yellow fill flagging it for
/// manual review. Vendor rows are matched by case-insensitive substring
/// containment — the original's deliberately loose policy.
pub fn merge_into_cbo(
    cbo_workbook: &mut Workbook,
    aggregate: &SpendAggregate,
) -> Result<MergeSummary, PipelineError> {
    let sheet = cbo_workbook
        .sheets_mut()
        .first_mut()
        .ok_or(PipelineError::NoSheets)?;

    let mut summary = MergeSummary::default();

    for (vendor, categories) in aggregate.iter() {
        let mut vendor_rows = rows_for_vendor(sheet, vendor);
        if vendor_rows.is_empty() {
            summary.warnings.push(format!(
                "vendor '{vendor}' has ad spend but no rows in the CBO export"
            ));
            continue;
        }

        for (category, &spend) in categories {
            match vendor_rows
                .iter()
                .copied()
                .find(|&row| sheet.cell(row, cbo::CATEGORY).display().trim() == category)
            {
                Some(row) => {
                    sheet.set_cell(row, cbo::AD_SPEND, CellValue::number(spend));
                    summary.rows_updated += 1;
                }
                None => {
                    let sample = vendor_rows[0];
                    let insert_at = vendor_rows[vendor_rows.len() - 1] + 1;
                    insert_reconciliation_row(sheet, insert_at, sample, vendor, category, spend);
                    vendor_rows.push(insert_at);
                    summary.rows_inserted += 1;
                }
            }
        }
    }

    Ok(summary)
}

/// Rows whose vendor cell contains `vendor`, case-insensitive.
fn rows_for_vendor(sheet: &Sheet, vendor: &str) -> Vec<usize> {
    let needle = vendor.to_lowercase();
    (1..sheet.row_count())
        .filter(|&row| {
            sheet
                .cell(row, cbo::VENDOR)
                .display()
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

fn insert_reconciliation_row(
    sheet: &mut Sheet,
    insert_at: usize,
    sample_row: usize,
    vendor: &str,
    category: &str,
    spend: f64,
) {
    sheet.insert_row(insert_at);
    for &col in cbo::CONTEXT.iter().chain(cbo::TAIL) {
        let value = sheet.cell(sample_row, col).clone();
        sheet.set_cell(insert_at, col, value);
    }
    sheet.set_cell(insert_at, cbo::VENDOR, CellValue::text(vendor));
    sheet.set_cell(insert_at, cbo::CATEGORY, CellValue::text(category));
    sheet.set_cell(insert_at, cbo::AD_SPEND, CellValue::number(spend));
    sheet.set_row_fill(insert_at, REVIEW_FILL);
}
