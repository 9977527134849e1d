use serde::{Deserialize, Serialize};

/// Spreadsheet error marker for a failed lookup.
pub const NA_ERROR: &str = "#N/A";

/// Result cached alongside a formula from the last time a real spreadsheet
/// application recalculated the workbook.
///
/// `None` means the formula was written by this tool and nothing has
/// evaluated it yet — the workbook engine here does not compute formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CachedResult {
    None,
    Text(String),
    Number(f64),
    /// Spreadsheet error value, e.g. `#N/A` or `#REF!`.
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Formula { source: String, cached: CachedResult },
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn number(n: f64) -> Self {
        CellValue::Number(n)
    }

    /// A freshly written formula with no cached result.
    pub fn formula(source: impl Into<String>) -> Self {
        CellValue::Formula {
            source: source.into(),
            cached: CachedResult::None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn formula_source(&self) -> Option<&str> {
        match self {
            CellValue::Formula { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The value a user would see in the cell: literals directly, formulas
    /// through their cached result (empty when never calculated).
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Formula { cached, .. } => match cached {
                CachedResult::None => String::new(),
                CachedResult::Text(s) => s.clone(),
                CachedResult::Number(n) => format_number(*n),
                CachedResult::Error(e) => e.clone(),
            },
        }
    }

    /// Numeric view of the cell: literal numbers, or a formula's cached
    /// numeric result. Text and errors are not coerced.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Formula {
                cached: CachedResult::Number(n),
                ..
            } => Some(*n),
            _ => None,
        }
    }

    /// True when the visible value is the `#N/A` lookup-failure marker.
    ///
    /// Covers both a typed error result and a literal `#N/A` string: a
    /// cached error round-trips through the xlsx writer as text.
    pub fn is_na(&self) -> bool {
        self.display() == NA_ERROR
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
