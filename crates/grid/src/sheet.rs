use std::collections::BTreeMap;

use crate::cell::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A named grid of cells, 0-based (row, col) indexing with row 0 as the
/// header row. Reads outside the used area return `Empty`; writes grow the
/// grid as needed.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
    /// Row index → ARGB fill applied to the whole row, used as the
    /// manual-review flag on inserted rows.
    row_fills: BTreeMap<usize, u32>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            rows: Vec::new(),
            row_fills: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows in the used area.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in the used area of one row.
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |r| r.len())
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let r = &mut self.rows[row];
        if r.len() <= col {
            r.resize_with(col + 1, CellValue::default);
        }
        r[col] = value;
    }

    /// Insert an empty row at `at`, shifting later rows (and their fill
    /// marks) down by one.
    pub fn insert_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            self.rows.resize_with(at + 1, Vec::new);
        } else {
            self.rows.insert(at, Vec::new());
        }
        let shifted: BTreeMap<usize, u32> = self
            .row_fills
            .iter()
            .map(|(&row, &argb)| if row >= at { (row + 1, argb) } else { (row, argb) })
            .collect();
        self.row_fills = shifted;
    }

    pub fn set_row_fill(&mut self, row: usize, argb: u32) {
        self.row_fills.insert(row, argb);
    }

    pub fn row_fill(&self, row: usize) -> Option<u32> {
        self.row_fills.get(&row).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_outside_used_area_are_empty() {
        let sheet = Sheet::new("GOOGLE - HANDLE IT");
        assert!(sheet.cell(100, 100).is_empty());
        assert_eq!(sheet.row_count(), 0);
    }

    #[test]
    fn set_grows_grid() {
        let mut sheet = Sheet::new("test");
        sheet.set_cell(3, 2, CellValue::text("x"));
        assert_eq!(sheet.row_count(), 4);
        assert_eq!(sheet.cell(3, 2).display(), "x");
        assert!(sheet.cell(3, 1).is_empty());
        assert!(sheet.cell(2, 2).is_empty());
    }

    #[test]
    fn insert_row_shifts_cells_and_fills() {
        let mut sheet = Sheet::new("test");
        sheet.set_cell(0, 0, CellValue::text("header"));
        sheet.set_cell(1, 0, CellValue::text("a"));
        sheet.set_cell(2, 0, CellValue::text("b"));
        sheet.set_row_fill(2, 0xFFFFFF00);

        sheet.insert_row(2);
        assert!(sheet.cell(2, 0).is_empty());
        assert_eq!(sheet.cell(3, 0).display(), "b");
        assert_eq!(sheet.row_fill(3), Some(0xFFFFFF00));
        assert_eq!(sheet.row_fill(2), None);
    }

    #[test]
    fn insert_row_past_end_extends() {
        let mut sheet = Sheet::new("test");
        sheet.set_cell(0, 0, CellValue::text("only"));
        sheet.insert_row(5);
        assert_eq!(sheet.row_count(), 6);
        assert_eq!(sheet.cell(0, 0).display(), "only");
    }
}
