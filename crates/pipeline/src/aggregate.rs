//! Ad-spend aggregation: vendor → product category → summed spend.

use adsrecon_config::columns::ads;
use adsrecon_config::vendors::{aggregation_vendors, sheet_aliases};
use adsrecon_grid::Workbook;

use crate::model::AggregateReport;

/// Sum the ads workbook's spend column grouped by (vendor, category).
///
/// Each canonical vendor resolves to one or more sheet-name substrings
/// (the caster alias fans out to three); the first sheet containing each
/// substring contributes. A missing sheet is a warning, not an abort —
/// the remaining vendors still aggregate. Zero and negative spend rows
/// are excluded.
pub fn aggregate_spend(workbook: &Workbook) -> AggregateReport {
    let mut report = AggregateReport::default();

    for vendor in aggregation_vendors() {
        for alias in sheet_aliases(vendor) {
            let Some(sheet) = workbook.sheet_containing(alias) else {
                report
                    .warnings
                    .push(format!("no sheet matching '{alias}' for vendor {vendor}"));
                continue;
            };

            for row in 1..sheet.row_count() {
                let Some(spend) = sheet.cell(row, ads::AD_SPEND).as_number() else {
                    continue;
                };
                if spend <= 0.0 {
                    continue;
                }
                let category = sheet.cell(row, ads::PRODUCT_CATEGORY).display();
                report.aggregate.add(vendor, category.trim(), spend);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsrecon_grid::{CellValue, Sheet};

    fn spend_sheet(name: &str, rows: &[(&str, f64)]) -> Sheet {
        let mut sheet = Sheet::new(name);
        sheet.set_cell(0, ads::TITLE, CellValue::text("Title"));
        for (i, (category, spend)) in rows.iter().enumerate() {
            sheet.set_cell(i + 1, ads::AD_SPEND, CellValue::number(*spend));
            sheet.set_cell(i + 1, ads::PRODUCT_CATEGORY, CellValue::text(*category));
        }
        sheet
    }

    #[test]
    fn zero_and_negative_spend_excluded() {
        let mut wb = Workbook::new();
        wb.add_sheet(spend_sheet(
            "GOOGLE - LINCOLN",
            &[("A", 10.0), ("A", -5.0), ("B", 0.0)],
        ));

        let report = aggregate_spend(&wb);
        let categories = report.aggregate.categories("LINCOLN").unwrap();
        assert_eq!(categories.get("A"), Some(&10.0));
        assert!(categories.get("B").is_none());
    }

    #[test]
    fn caster_sheets_accumulate_under_the_alias() {
        let mut wb = Workbook::new();
        wb.add_sheet(spend_sheet("GOOGLE - DURABLE", &[("SWIVEL", 10.0)]));
        wb.add_sheet(spend_sheet(
            "GOOGLE - DH INTERNATIONAL",
            &[("SWIVEL", 7.5), ("RIGID", 2.0)],
        ));
        wb.add_sheet(spend_sheet("GOOGLE - CASTER DEPOT", &[("RIGID", 3.0)]));

        let report = aggregate_spend(&wb);
        let categories = report.aggregate.categories("CASTERS").unwrap();
        assert_eq!(categories.get("SWIVEL"), Some(&17.5));
        assert_eq!(categories.get("RIGID"), Some(&5.0));
        // No standalone entries for the member vendors.
        assert!(report.aggregate.categories("DURABLE").is_none());
        assert!(report.aggregate.categories("CASTER DEPOT").is_none());
    }

    #[test]
    fn missing_vendor_sheet_is_a_warning() {
        let mut wb = Workbook::new();
        wb.add_sheet(spend_sheet("GOOGLE - LINCOLN", &[("A", 4.0)]));

        let report = aggregate_spend(&wb);
        assert_eq!(report.aggregate.vendor_total("LINCOLN"), 4.0);
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("HANDLE IT")));
    }

    #[test]
    fn sheet_match_is_case_insensitive_substring() {
        let mut wb = Workbook::new();
        wb.add_sheet(spend_sheet("google - Handle It (June)", &[("CARTS", 9.0)]));

        let report = aggregate_spend(&wb);
        assert_eq!(report.aggregate.vendor_total("HANDLE IT"), 9.0);
    }

    #[test]
    fn formula_cached_spend_counts() {
        let mut wb = Workbook::new();
        let mut sheet = Sheet::new("GOOGLE - WESCO");
        sheet.set_cell(0, 0, CellValue::text("SKU"));
        sheet.set_cell(
            1,
            ads::AD_SPEND,
            CellValue::Formula {
                source: "I2*0.5".into(),
                cached: adsrecon_grid::CachedResult::Number(12.0),
            },
        );
        sheet.set_cell(1, ads::PRODUCT_CATEGORY, CellValue::text(" DOLLIES "));
        wb.add_sheet(sheet);

        let report = aggregate_spend(&wb);
        let categories = report.aggregate.categories("WESCO").unwrap();
        // Category keys are trimmed.
        assert_eq!(categories.get("DOLLIES"), Some(&12.0));
    }
}
