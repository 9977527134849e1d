//! Workbook cleaner: month/letter/platform stamping and product-category
//! formula drag-down.

use chrono::NaiveDate;

use adsrecon_config::columns::ads;
use adsrecon_config::{eligible_sheet, month_key, MonthTable, Platform};
use adsrecon_grid::{adjust_formula, CellValue, Workbook};

use crate::error::PipelineError;
use crate::model::CleanSummary;

/// How far down the sheet to look for the drag-source category formula.
const DRAG_SOURCE_SCAN_ROWS: usize = 10;

/// Stamp month codes and platform into every data row's empty cells, then
/// drag the product-category formula down to rows missing one.
///
/// Cells already populated are left untouched, so a re-run over an
/// already-stamped workbook changes nothing. Fails fast when `today`'s
/// month has no table entry.
pub fn clean_workbook(
    workbook: &mut Workbook,
    months: &MonthTable,
    today: NaiveDate,
) -> Result<CleanSummary, PipelineError> {
    let key = month_key(today);
    let codes = months
        .lookup(&key)
        .ok_or(PipelineError::MonthNotConfigured(key))?
        .clone();

    let mut summary = CleanSummary::default();

    for sheet in workbook.sheets_mut() {
        if !eligible_sheet(sheet.name()) {
            continue;
        }
        summary.sheets_processed += 1;
        let platform = Platform::from_sheet_name(sheet.name());

        for row in 1..sheet.row_count() {
            if sheet.row_len(row) == 0 {
                continue;
            }
            let mut stamped = false;
            if sheet.cell(row, ads::LETTER).is_empty() {
                sheet.set_cell(row, ads::LETTER, CellValue::text(codes.letter.clone()));
                stamped = true;
            }
            if sheet.cell(row, ads::MONTH).is_empty() {
                sheet.set_cell(row, ads::MONTH, CellValue::text(codes.short.clone()));
                stamped = true;
            }
            if sheet.cell(row, ads::PLATFORM).is_empty() {
                sheet.set_cell(row, ads::PLATFORM, CellValue::text(platform.code()));
                stamped = true;
            }
            if stamped {
                summary.rows_stamped += 1;
            }
        }

        match find_drag_source(sheet) {
            None => summary.warnings.push(format!(
                "{}: no product-category formula found to drag down",
                sheet.name()
            )),
            Some((source_row, formula)) => {
                for row in source_row + 1..sheet.row_count() {
                    if sheet.row_len(row) == 0 {
                        continue;
                    }
                    if sheet.cell(row, ads::PRODUCT_CATEGORY).is_empty() {
                        let adjusted = adjust_formula(&formula, source_row, row);
                        sheet.set_cell(row, ads::PRODUCT_CATEGORY, CellValue::formula(adjusted));
                        summary.formulas_dragged += 1;
                    }
                }
            }
        }
    }

    Ok(summary)
}

/// First data row within the scan window carrying a category formula.
fn find_drag_source(sheet: &adsrecon_grid::Sheet) -> Option<(usize, String)> {
    let limit = sheet.row_count().min(DRAG_SOURCE_SCAN_ROWS + 1);
    (1..limit).find_map(|row| {
        sheet
            .cell(row, ads::PRODUCT_CATEGORY)
            .formula_source()
            .map(|f| (row, f.to_string()))
    })
}
