use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Color, Format, Formula, Workbook as XlsxWorkbook};

use adsrecon_grid::{CachedResult, CellValue, Sheet, Workbook};

/// Per-load statistics, reported to the operator after import.
#[derive(Debug, Default, Clone)]
pub struct LoadSummary {
    pub sheets: usize,
    pub cells: usize,
    pub formulas: usize,
}

impl LoadSummary {
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("{} sheet{}", self.sheets, if self.sheets == 1 { "" } else { "s" }),
            format!("{} cells", self.cells),
        ];
        if self.formulas > 0 {
            parts.push(format!("{} formulas", self.formulas));
        }
        parts.join(" · ")
    }
}

/// Load a workbook file into the grid model.
///
/// Formula cells are composed from the sheet's formula range (source text)
/// and value range (cached result); a cached `#N/A` arrives as a typed
/// error. Cells with a value but no formula become literals.
pub fn load(path: &Path) -> Result<(Workbook, LoadSummary), String> {
    let mut source = open_workbook_auto(path)
        .map_err(|e| format!("failed to open {}: {e}", path.display()))?;

    let sheet_names = source.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(format!("{} contains no sheets", path.display()));
    }

    let mut workbook = Workbook::new();
    let mut summary = LoadSummary::default();

    for sheet_name in &sheet_names {
        let values = source
            .worksheet_range(sheet_name)
            .map_err(|e| format!("failed to read sheet '{sheet_name}': {e}"))?;

        // Formula range is read separately; positions are absolute once the
        // range start offset is applied.
        let mut formulas: HashMap<(usize, usize), String> = HashMap::new();
        if let Ok(formula_range) = source.worksheet_formula(sheet_name) {
            let (start_row, start_col) = formula_range
                .start()
                .map(|(r, c)| (r as usize, c as usize))
                .unwrap_or((0, 0));
            for (row_idx, row) in formula_range.rows().enumerate() {
                for (col_idx, text) in row.iter().enumerate() {
                    if !text.is_empty() {
                        formulas.insert((start_row + row_idx, start_col + col_idx), text.clone());
                    }
                }
            }
        }

        let mut sheet = Sheet::new(sheet_name.clone());
        let (data_start_row, data_start_col) = values
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        for (row_idx, row) in values.rows().enumerate() {
            let target_row = data_start_row + row_idx;
            for (col_idx, data) in row.iter().enumerate() {
                let target_col = data_start_col + col_idx;
                let cell = match formulas.remove(&(target_row, target_col)) {
                    Some(source_text) => {
                        summary.formulas += 1;
                        CellValue::Formula {
                            source: source_text,
                            cached: cached_from_data(data),
                        }
                    }
                    None => match literal_from_data(data) {
                        Some(value) => value,
                        None => continue,
                    },
                };
                summary.cells += 1;
                sheet.set_cell(target_row, target_col, cell);
            }
        }

        // Formula cells calamine had no cached value for at all.
        for ((row, col), source_text) in formulas {
            summary.formulas += 1;
            summary.cells += 1;
            sheet.set_cell(row, col, CellValue::formula(source_text));
        }

        summary.sheets += 1;
        workbook.add_sheet(sheet);
    }

    Ok((workbook, summary))
}

fn literal_from_data(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(CellValue::Text(s.clone()))
            }
        }
        Data::Float(n) => Some(CellValue::Number(*n)),
        Data::Int(n) => Some(CellValue::Number(*n as f64)),
        Data::Bool(b) => Some(CellValue::Text(if *b { "TRUE" } else { "FALSE" }.into())),
        Data::Error(e) => Some(CellValue::Text(e.to_string())),
        Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
    }
}

fn cached_from_data(data: &Data) -> CachedResult {
    match data {
        Data::Empty => CachedResult::None,
        Data::String(s) => CachedResult::Text(s.clone()),
        Data::Float(n) => CachedResult::Number(*n),
        Data::Int(n) => CachedResult::Number(*n as f64),
        Data::Bool(b) => CachedResult::Text(if *b { "TRUE" } else { "FALSE" }.into()),
        Data::Error(e) => CachedResult::Error(e.to_string()),
        Data::DateTime(dt) => CachedResult::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CachedResult::Text(s.clone()),
    }
}

/// Write the workbook back out, overwriting `path`.
///
/// Formulas carry their cached result (empty string when this tool wrote
/// them and nothing has calculated yet); rows with a fill mark get a solid
/// background across their used width.
pub fn save(workbook: &Workbook, path: &Path) -> Result<(), String> {
    let mut out = XlsxWorkbook::new();

    for sheet in workbook.sheets() {
        let worksheet = out.add_worksheet();
        worksheet
            .set_name(sheet.name())
            .map_err(|e| format!("invalid sheet name '{}': {e}", sheet.name()))?;

        for row in 0..sheet.row_count() {
            let fill = sheet
                .row_fill(row)
                .map(|argb| Format::new().set_background_color(Color::RGB(argb & 0x00FF_FFFF)));

            for col in 0..sheet.row_len(row) {
                let r = row as u32;
                let c = col as u16;
                let write_result = match sheet.cell(row, col) {
                    CellValue::Empty => match &fill {
                        Some(format) => worksheet.write_blank(r, c, format).map(|_| ()),
                        None => Ok(()),
                    },
                    CellValue::Text(s) => match &fill {
                        Some(format) => worksheet.write_string_with_format(r, c, s, format).map(|_| ()),
                        None => worksheet.write_string(r, c, s).map(|_| ()),
                    },
                    CellValue::Number(n) => match &fill {
                        Some(format) => worksheet.write_number_with_format(r, c, *n, format).map(|_| ()),
                        None => worksheet.write_number(r, c, *n).map(|_| ()),
                    },
                    CellValue::Formula { source, cached } => {
                        let formula = Formula::new(source.as_str()).set_result(cached_display(cached));
                        match &fill {
                            Some(format) => {
                                worksheet.write_formula_with_format(r, c, formula, format).map(|_| ())
                            }
                            None => worksheet.write_formula(r, c, formula).map(|_| ()),
                        }
                    }
                };
                write_result.map_err(|e| {
                    format!(
                        "failed to write cell {}!{}{}: {e}",
                        sheet.name(),
                        adsrecon_grid::col_to_letters(col),
                        row + 1
                    )
                })?;
            }
        }
    }

    out.save(path)
        .map_err(|e| format!("failed to save {}: {e}", path.display()))
}

fn cached_display(cached: &CachedResult) -> String {
    match cached {
        CachedResult::None => String::new(),
        CachedResult::Text(s) => s.clone(),
        CachedResult::Number(n) => n.to_string(),
        CachedResult::Error(e) => e.clone(),
    }
}
