//! Missing-SKU resolver.
//!
//! Two-phase protocol: this engine cannot evaluate formulas, so phase 1
//! writes the lookups and phase 2 — after the operator has opened the file
//! in a real spreadsheet application, let it recalculate, and saved —
//! reads back the cached results and reports the `#N/A` failures.

use adsrecon_config::columns::{ads, sku_lookup, vendor_lookup};
use adsrecon_config::{eligible_sheet, MASTER_SHEET};
use adsrecon_grid::{cell_address, CellValue, Workbook};

use crate::error::PipelineError;
use crate::model::{BlankSkuRow, InjectReport, NaReport, NaRow, SheetBlanks, SheetNaRows};

/// Blank-SKU markers: an empty cell or a dash placeholder.
fn is_blank_sku(value: &str) -> bool {
    matches!(value.trim(), "" | "-" | "--")
}

/// Phase 1: write SKU and Vendor lookups into every row with a blank SKU,
/// keyed by that row's title-cell address. The cached results start empty;
/// only a real spreadsheet application can fill them in.
pub fn inject_sku_lookups(workbook: &mut Workbook) -> InjectReport {
    let mut report = InjectReport::default();

    for sheet in workbook.sheets_mut() {
        if !eligible_sheet(sheet.name()) {
            continue;
        }

        let mut blanks = Vec::new();
        for row in 1..sheet.row_count() {
            if sheet.row_len(row) == 0 {
                continue;
            }
            let current = sheet.cell(row, ads::SKU).display();
            if !is_blank_sku(&current) {
                continue;
            }

            let title_address = cell_address(row, ads::TITLE);
            sheet.set_cell(row, ads::SKU, CellValue::formula(sku_lookup(&title_address)));
            sheet.set_cell(
                row,
                ads::VENDOR,
                CellValue::formula(vendor_lookup(&title_address)),
            );
            report.formulas_added += 2;

            blanks.push(BlankSkuRow {
                row: row + 1,
                title: sheet.cell(row, ads::TITLE).display(),
                previous: current,
            });
        }

        if !blanks.is_empty() {
            report.sheets.push(SheetBlanks {
                sheet: sheet.name().to_string(),
                rows: blanks,
            });
        }
    }

    report
}

/// Phase 2: collect rows whose SKU or Vendor lookup cached `#N/A`, and
/// separately rows whose product-category cell did. The titles of the
/// SKU/Vendor failures become the list to add to the master sheet,
/// deduplicated by literal equality in first-seen order.
pub fn scan_na_errors(workbook: &Workbook) -> NaReport {
    let mut report = NaReport::default();

    for sheet in workbook.sheets() {
        if !eligible_sheet(sheet.name()) {
            continue;
        }

        let mut sku_rows = Vec::new();
        let mut category_rows = Vec::new();
        for row in 1..sheet.row_count() {
            let title = sheet.cell(row, ads::TITLE).display();

            if sheet.cell(row, ads::SKU).is_na() || sheet.cell(row, ads::VENDOR).is_na() {
                if !title.is_empty() && !report.missing_titles.contains(&title) {
                    report.missing_titles.push(title.clone());
                }
                sku_rows.push(NaRow { row: row + 1, title: title.clone() });
            }

            if sheet.cell(row, ads::PRODUCT_CATEGORY).is_na() {
                category_rows.push(NaRow { row: row + 1, title });
            }
        }

        if !sku_rows.is_empty() {
            report.na_errors.push(SheetNaRows {
                sheet: sheet.name().to_string(),
                rows: sku_rows,
            });
        }
        if !category_rows.is_empty() {
            report.missing_categories.push(SheetNaRows {
                sheet: sheet.name().to_string(),
                rows: category_rows,
            });
        }
    }

    report
}

/// Append titles to the first column of the master sheet, below its last
/// used row. The SKU and Vendor columns stay empty for the human to fill.
/// A workbook without the master sheet is a data error, not retried.
pub fn append_titles_to_master(
    workbook: &mut Workbook,
    titles: &[String],
) -> Result<usize, PipelineError> {
    let sheet = workbook
        .sheet_mut(MASTER_SHEET)
        .ok_or(PipelineError::MasterSheetMissing)?;

    let mut next_row = sheet.row_count();
    for title in titles {
        sheet.set_cell(next_row, 0, CellValue::text(title.clone()));
        next_row += 1;
    }
    Ok(titles.len())
}
