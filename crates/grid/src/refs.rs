//! A1 reference utilities and the vertical formula rewriter.

use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Convert a 0-based column index to letters (0 → A, 25 → Z, 26 → AA).
pub fn col_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// A1 address of a 0-based (row, col) position: (122, 2) → "C123".
pub fn cell_address(row: usize, col: usize) -> String {
    format!("{}{}", col_to_letters(col), row + 1)
}

/// Matches one cell reference: optional `$`, column letters, optional `$`,
/// row digits. Group 1 carries the column prefix verbatim (including any
/// `$`), group 2 the row's own `$`, group 3 the row number.
fn cell_ref_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\$?[A-Za-z]{1,3})(\$?)(\d+)").expect("pattern is valid"))
}

/// Rewrite a formula as if dragged vertically from `source_row` to
/// `target_row` (both in the same indexing scheme; only the difference
/// matters).
///
/// Relative row numbers shift by the row difference; rows anchored with `$`
/// stay put, as do column letters. Text without any reference pattern
/// passes through unchanged.
pub fn adjust_formula(formula: &str, source_row: usize, target_row: usize) -> String {
    if source_row == target_row {
        return formula.to_string();
    }
    let diff = target_row as i64 - source_row as i64;

    cell_ref_pattern()
        .replace_all(formula, |caps: &Captures| {
            let column = &caps[1];
            if &caps[2] == "$" {
                return format!("{column}${}", &caps[3]);
            }
            let row: i64 = caps[3].parse().unwrap_or(0);
            let shifted = row + diff;
            if shifted < 1 {
                // Dragging above row 1 has no sensible target; keep the
                // reference as written.
                return caps[0].to_string();
            }
            format!("{column}{shifted}")
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(col_to_letters(0), "A");
        assert_eq!(col_to_letters(2), "C");
        assert_eq!(col_to_letters(25), "Z");
        assert_eq!(col_to_letters(26), "AA");
        assert_eq!(col_to_letters(701), "ZZ");
        assert_eq!(col_to_letters(702), "AAA");
    }

    #[test]
    fn addresses() {
        assert_eq!(cell_address(0, 0), "A1");
        assert_eq!(cell_address(122, 2), "C123");
        assert_eq!(cell_address(9, 27), "AB10");
    }

    #[test]
    fn zero_offset_is_identity() {
        let f = "VLOOKUP(C5,'ALL SKUS'!A:C,2,FALSE)";
        assert_eq!(adjust_formula(f, 5, 5), f);
        assert_eq!(adjust_formula("", 3, 3), "");
    }

    #[test]
    fn relative_rows_shift() {
        assert_eq!(adjust_formula("A5+B5", 5, 8), "A8+B8");
        assert_eq!(adjust_formula("SUM(C2:C10)", 2, 4), "SUM(C4:C12)");
    }

    #[test]
    fn absolute_rows_stay() {
        assert_eq!(adjust_formula("A5+$B$5", 5, 8), "A8+$B$5");
        assert_eq!(adjust_formula("A$5", 5, 8), "A$5");
    }

    #[test]
    fn absolute_column_relative_row() {
        // The $ on the column is preserved while the row shifts.
        assert_eq!(adjust_formula("$A5", 5, 8), "$A8");
        assert_eq!(adjust_formula("$A$5", 5, 8), "$A$5");
    }

    #[test]
    fn negative_offset() {
        assert_eq!(adjust_formula("D10", 10, 4), "D4");
    }

    #[test]
    fn shift_above_row_one_left_alone() {
        assert_eq!(adjust_formula("A2", 5, 2), "A2");
    }

    #[test]
    fn no_references_pass_through() {
        assert_eq!(adjust_formula("1+2", 2, 9), "1+2");
        assert_eq!(adjust_formula("NOW()", 2, 9), "NOW()");
    }

    #[test]
    fn lookup_formula_drag() {
        let f = "VLOOKUP(C2,'ALL SKUS'!A:C,2,FALSE)";
        assert_eq!(
            adjust_formula(f, 1, 6),
            "VLOOKUP(C7,'ALL SKUS'!A:C,2,FALSE)"
        );
    }
}
