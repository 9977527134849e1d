use std::fmt;

/// Fatal configuration and data-shape errors. Partial-data conditions (a
/// vendor sheet not found, no drag-source formula) are warnings carried
/// inside the reports instead — the run continues without them.
#[derive(Debug)]
pub enum PipelineError {
    /// No month mapping configured for the run date's "MONTH YEAR" key.
    MonthNotConfigured(String),
    /// The master `ALL SKUS` sheet is absent from the workbook.
    MasterSheetMissing,
    /// A workbook with no sheets reached the engine.
    NoSheets,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthNotConfigured(key) => {
                write!(f, "no month mapping configured for {key}")
            }
            Self::MasterSheetMissing => {
                write!(f, "sheet \"ALL SKUS\" not found in workbook")
            }
            Self::NoSheets => write!(f, "workbook contains no sheets"),
        }
    }
}

impl std::error::Error for PipelineError {}
