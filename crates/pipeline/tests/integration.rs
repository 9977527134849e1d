//! End-to-end pipeline scenarios over in-memory workbooks: clean →
//! inject lookups → (simulated operator recalculation) → check → merge →
//! validate.

use chrono::NaiveDate;

use adsrecon_config::columns::{ads, cbo, REVIEW_FILL};
use adsrecon_config::{MonthTable, MASTER_SHEET};
use adsrecon_grid::{CachedResult, CellValue, Sheet, Workbook, NA_ERROR};
use adsrecon_pipeline::{
    aggregate_spend, append_titles_to_master, clean_workbook, inject_sku_lookups, merge_into_cbo,
    scan_na_errors, validate_totals,
};

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 3).unwrap()
}

/// Ads workbook with a master sheet and one vendor sheet; rows 2 and 3
/// (spreadsheet numbering) are missing SKUs.
fn ads_workbook() -> Workbook {
    let mut wb = Workbook::new();

    let master = wb.add_sheet(Sheet::new(MASTER_SHEET));
    master.set_cell(0, 0, CellValue::text("Title"));
    master.set_cell(0, 1, CellValue::text("SKU"));
    master.set_cell(0, 2, CellValue::text("Vendor"));
    master.set_cell(1, 0, CellValue::text("APPLIANCE DOLLY"));
    master.set_cell(1, 1, CellValue::text("HI-100"));
    master.set_cell(1, 2, CellValue::text("HANDLE IT"));

    let sheet = wb.add_sheet(Sheet::new("GOOGLE - HANDLE IT"));
    sheet.set_cell(0, ads::SKU, CellValue::text("SKU"));
    sheet.set_cell(0, ads::TITLE, CellValue::text("Title"));

    sheet.set_cell(1, ads::SKU, CellValue::text("-"));
    sheet.set_cell(1, ads::TITLE, CellValue::text("APPLIANCE DOLLY"));
    sheet.set_cell(1, ads::AD_SPEND, CellValue::number(120.0));

    sheet.set_cell(2, ads::SKU, CellValue::text(""));
    sheet.set_cell(2, ads::TITLE, CellValue::text("FOLDING CART"));
    sheet.set_cell(2, ads::AD_SPEND, CellValue::number(80.5));

    sheet.set_cell(3, ads::SKU, CellValue::text("HI-300"));
    sheet.set_cell(3, ads::TITLE, CellValue::text("STAIR CLIMBER"));
    sheet.set_cell(3, ads::AD_SPEND, CellValue::number(-3.0));

    // Drag source for the category column.
    sheet.set_cell(
        1,
        ads::PRODUCT_CATEGORY,
        CellValue::Formula {
            source: "VLOOKUP(C2,'_categories'!A:B,2,FALSE)".into(),
            cached: CachedResult::Text("DOLLIES".into()),
        },
    );

    wb
}

fn cbo_workbook() -> Workbook {
    let mut wb = Workbook::new();
    let sheet = wb.add_sheet(Sheet::new("CBOS TO DASH"));
    sheet.set_cell(0, cbo::VENDOR, CellValue::text("Vendor"));
    sheet.set_cell(1, cbo::MONTH, CellValue::text("JULY 25"));
    sheet.set_cell(1, cbo::LETTER, CellValue::text("ZG"));
    sheet.set_cell(1, cbo::VENDOR, CellValue::text("HANDLE IT"));
    sheet.set_cell(1, cbo::CATEGORY, CellValue::text("DOLLIES"));
    sheet.set_cell(1, 5, CellValue::number(1500.0));
    wb
}

/// Pretend the operator opened the file in a spreadsheet application: every
/// pending formula gets a cached result from the master-sheet data.
fn simulate_recalculation(wb: &mut Workbook, resolves: bool) {
    let names: Vec<String> = wb.sheet_names().iter().map(|s| s.to_string()).collect();
    for name in names {
        if name == MASTER_SHEET {
            continue;
        }
        let sheet = wb.sheet_mut(&name).unwrap();
        for row in 0..sheet.row_count() {
            for col in 0..sheet.row_len(row) {
                if let CellValue::Formula { source, cached } = sheet.cell(row, col).clone() {
                    if !matches!(cached, CachedResult::None) {
                        continue;
                    }
                    let cached = if resolves {
                        CachedResult::Text(format!("RESOLVED-{row}-{col}"))
                    } else {
                        CachedResult::Error(NA_ERROR.into())
                    };
                    sheet.set_cell(row, col, CellValue::Formula { source, cached });
                }
            }
        }
    }
}

#[test]
fn full_workflow_reaches_merge_when_lookups_resolve() {
    let mut ads = ads_workbook();

    // Step 1: clean.
    let summary = clean_workbook(&mut ads, &MonthTable::builtin(), run_date()).unwrap();
    assert_eq!(summary.sheets_processed, 1);
    assert_eq!(summary.rows_stamped, 3);
    // Rows 3 and 4 lacked a category; row 2 held the drag source.
    assert_eq!(summary.formulas_dragged, 2);

    let sheet = ads.sheet("GOOGLE - HANDLE IT").unwrap();
    assert_eq!(sheet.cell(1, ads::LETTER).display(), "ZG");
    assert_eq!(sheet.cell(1, ads::MONTH).display(), "JULY 25");
    assert_eq!(sheet.cell(1, ads::PLATFORM).display(), "GOOGLE");

    // Step 2: inject lookups into the two blank-SKU rows.
    let inject = inject_sku_lookups(&mut ads);
    assert_eq!(inject.blank_rows(), 2);
    assert_eq!(inject.formulas_added, 4);
    let sheet = ads.sheet("GOOGLE - HANDLE IT").unwrap();
    assert_eq!(
        sheet.cell(1, ads::SKU).formula_source(),
        Some("VLOOKUP(C2,'ALL SKUS'!A:C,2,FALSE)")
    );
    assert_eq!(
        sheet.cell(2, ads::VENDOR).formula_source(),
        Some("VLOOKUP(C3,'ALL SKUS'!A:C,3,FALSE)")
    );

    // A check before recalculation reports nothing: cached results are
    // still empty, and empty is not an error.
    assert!(scan_na_errors(&ads).is_clear());

    // Step 3: operator recalculates; every lookup resolves.
    simulate_recalculation(&mut ads, true);
    let check = scan_na_errors(&ads);
    assert!(check.is_clear());
    assert!(check.missing_titles.is_empty());

    // Step 4: aggregate and merge. Negative spend row is excluded.
    let agg_report = aggregate_spend(&ads);
    let aggregate = &agg_report.aggregate;
    assert_eq!(aggregate.vendor_total("HANDLE IT"), 200.5);

    let mut cbo_wb = cbo_workbook();
    let merge = merge_into_cbo(&mut cbo_wb, aggregate).unwrap();
    assert_eq!(merge.rows_updated, 1);
    // The second row's category resolved to synthetic text with no
    // existing CBO row — it inserts as a flagged row.
    assert_eq!(merge.rows_inserted, 1);

    let sheet = &cbo_wb.sheets()[0];
    assert_eq!(sheet.cell(1, cbo::AD_SPEND).as_number(), Some(120.0));
    assert_eq!(sheet.row_fill(2), Some(REVIEW_FILL));
    assert_eq!(sheet.cell(2, cbo::VENDOR).display(), "HANDLE IT");
    // Context columns copied from the vendor's sample row.
    assert_eq!(sheet.cell(2, cbo::MONTH).display(), "JULY 25");
    assert_eq!(sheet.cell(2, cbo::LETTER).display(), "ZG");

    // Step 5: totals agree within a cent.
    let mismatches = validate_totals(&cbo_wb, aggregate).unwrap();
    assert!(mismatches.is_empty());
}

#[test]
fn unresolved_lookups_block_and_feed_the_master_sheet() {
    let mut ads = ads_workbook();
    clean_workbook(&mut ads, &MonthTable::builtin(), run_date()).unwrap();
    inject_sku_lookups(&mut ads);

    // Recalculation comes back with #N/A everywhere.
    simulate_recalculation(&mut ads, false);
    let check = scan_na_errors(&ads);
    assert!(!check.is_clear());
    assert_eq!(check.na_errors.len(), 1);
    assert_eq!(check.na_errors[0].sheet, "GOOGLE - HANDLE IT");
    assert_eq!(check.na_errors[0].rows.len(), 2);
    assert_eq!(
        check.missing_titles,
        vec!["APPLIANCE DOLLY".to_string(), "FOLDING CART".to_string()]
    );

    // The titles land in the master sheet for manual SKU lookup.
    let added = append_titles_to_master(&mut ads, &check.missing_titles).unwrap();
    assert_eq!(added, 2);
    let master = ads.sheet(MASTER_SHEET).unwrap();
    assert_eq!(master.cell(2, 0).display(), "APPLIANCE DOLLY");
    assert_eq!(master.cell(3, 0).display(), "FOLDING CART");
    assert!(master.cell(2, 1).is_empty());
}

#[test]
fn clean_is_idempotent_across_runs() {
    let mut ads = ads_workbook();
    let first = clean_workbook(&mut ads, &MonthTable::builtin(), run_date()).unwrap();
    assert!(first.rows_stamped > 0);

    let snapshot: Vec<String> = dump(&ads);
    let second = clean_workbook(&mut ads, &MonthTable::builtin(), run_date()).unwrap();
    assert_eq!(second.rows_stamped, 0);
    assert_eq!(second.formulas_dragged, 0);
    assert_eq!(dump(&ads), snapshot);
}

fn dump(wb: &Workbook) -> Vec<String> {
    let mut lines = Vec::new();
    for sheet in wb.sheets() {
        for row in 0..sheet.row_count() {
            for col in 0..sheet.row_len(row) {
                let cell = sheet.cell(row, col);
                if !cell.is_empty() {
                    lines.push(format!("{}!{row}:{col}={cell:?}", sheet.name()));
                }
            }
        }
    }
    lines
}
