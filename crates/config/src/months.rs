//! Month → letter/short-code table.
//!
//! Every month the pipeline runs in must have an entry; the cleaner fails
//! fast otherwise. The built-in table can be extended (or corrected) with a
//! TOML override file so a new reporting period never requires a rebuild.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Codes stamped into each data row for one reporting month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCodes {
    /// Sequence letter code, e.g. "ZF".
    pub letter: String,
    /// Short month label, e.g. "JUNE 25".
    pub short: String,
}

/// Lookup table keyed by uppercase "MONTH YEAR" strings.
#[derive(Debug, Clone)]
pub struct MonthTable {
    entries: BTreeMap<String, MonthCodes>,
}

/// Uppercase "MONTH YEAR" key for a date, e.g. "AUGUST 2026".
pub fn month_key(date: NaiveDate) -> String {
    format!(
        "{} {}",
        date.format("%B").to_string().to_uppercase(),
        date.year()
    )
}

impl MonthTable {
    /// The built-in table. Letter codes continue the ZF… sequence month by
    /// month; short labels follow the original mixed full/abbreviated style.
    pub fn builtin() -> Self {
        let entries = [
            ("JUNE 2025", "ZF", "JUNE 25"),
            ("JULY 2025", "ZG", "JULY 25"),
            ("AUGUST 2025", "ZH", "AUG 25"),
            ("SEPTEMBER 2025", "ZI", "SEPT 25"),
            ("OCTOBER 2025", "ZJ", "OCT 25"),
            ("NOVEMBER 2025", "ZK", "NOV 25"),
            ("DECEMBER 2025", "ZL", "DEC 25"),
            ("JANUARY 2026", "ZM", "JAN 26"),
            ("FEBRUARY 2026", "ZN", "FEB 26"),
            ("MARCH 2026", "ZO", "MAR 26"),
            ("APRIL 2026", "ZP", "APRIL 26"),
            ("MAY 2026", "ZQ", "MAY 26"),
            ("JUNE 2026", "ZR", "JUNE 26"),
            ("JULY 2026", "ZS", "JULY 26"),
            ("AUGUST 2026", "ZT", "AUG 26"),
            ("SEPTEMBER 2026", "ZU", "SEPT 26"),
            ("OCTOBER 2026", "ZV", "OCT 26"),
            ("NOVEMBER 2026", "ZW", "NOV 26"),
            ("DECEMBER 2026", "ZX", "DEC 26"),
        ]
        .into_iter()
        .map(|(key, letter, short)| {
            (
                key.to_string(),
                MonthCodes {
                    letter: letter.to_string(),
                    short: short.to_string(),
                },
            )
        })
        .collect();

        MonthTable { entries }
    }

    /// Merge an operator-supplied TOML table over the built-ins. Override
    /// format:
    ///
    /// ```toml
    /// ["JANUARY 2027"]
    /// letter = "ZY"
    /// short = "JAN 27"
    /// ```
    pub fn with_toml_overrides(mut self, toml_str: &str) -> Result<Self, ConfigError> {
        let overrides: BTreeMap<String, MonthCodes> =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        for (key, codes) in overrides {
            self.entries.insert(key.to_uppercase(), codes);
        }
        Ok(self)
    }

    pub fn lookup(&self, key: &str) -> Option<&MonthCodes> {
        self.entries.get(key)
    }

    /// Codes for the month containing `date`, if configured.
    pub fn for_date(&self, date: NaiveDate) -> Option<&MonthCodes> {
        self.entries.get(&month_key(date))
    }
}

impl Default for MonthTable {
    fn default() -> Self {
        MonthTable::builtin()
    }
}
