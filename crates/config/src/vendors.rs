//! Vendor roster and the caster alias fan-out.

/// Every vendor carried in the ads workbook, one sheet each (the caster
/// vendors additionally roll up under the `CASTERS` alias).
pub const MAIN_VENDORS: &[&str] = &[
    "HANDLE IT",
    "CASTERS",
    "DURABLE",
    "DH INTERNATIONAL",
    "CASTER DEPOT",
    "LINCOLN",
    "NOBLELIFT",
    "S4 BOLLARDS",
    "EKKO LIFTS",
    "B&P MANUFACTURING",
    "LITTLE GIANT",
    "MECO-OMAHA",
    "VALLEY CRAFT",
    "DUTRO",
    "MERRICK MACHINE",
    "ADRIAN'S",
    "WESCO",
    "APOLLO FORKLIFT",
    "BLUFF",
    "SUNCAST",
    "SENTRY",
    "RELIANCE",
];

/// Canonical name the caster vendors aggregate under.
pub const CASTER_ALIAS: &str = "CASTERS";

/// Sheet-name substrings that roll up into [`CASTER_ALIAS`].
pub const CASTER_VENDORS: &[&str] = &["DURABLE", "DH INTERNATIONAL", "CASTER DEPOT"];

/// Vendors the merge engine aggregates spend for. The caster members are
/// excluded as standalone entries — they only contribute through the
/// `CASTERS` alias, so listing them twice would double-count.
pub fn aggregation_vendors() -> Vec<&'static str> {
    MAIN_VENDORS
        .iter()
        .copied()
        .filter(|v| !CASTER_VENDORS.contains(v))
        .collect()
}

/// Sheet-name substrings to aggregate for one canonical vendor: the caster
/// alias fans out to its member substrings, every other vendor matches its
/// own name.
pub fn sheet_aliases(vendor: &'static str) -> Vec<&'static str> {
    if vendor == CASTER_ALIAS {
        CASTER_VENDORS.to_vec()
    } else {
        vec![vendor]
    }
}

/// Advertising platform a vendor sheet belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Google,
    Bing,
}

impl Platform {
    /// Infer the platform from a sheet name by case-insensitive substring.
    /// Names matching neither default to Google.
    pub fn from_sheet_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("google") {
            Platform::Google
        } else if lower.contains("bing") {
            Platform::Bing
        } else {
            Platform::Google
        }
    }

    /// Code stamped into the platform column.
    pub fn code(&self) -> &'static str {
        match self {
            Platform::Google => "GOOGLE",
            Platform::Bing => "BING",
        }
    }
}
