use crate::sheet::Sheet;

/// An ordered collection of named sheets, reconstructed from a file on
/// every run and persisted by overwriting that file.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Workbook::default()
    }

    pub fn add_sheet(&mut self, sheet: Sheet) -> &mut Sheet {
        self.sheets.push(sheet);
        self.sheets.last_mut().expect("just pushed")
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheets_mut(&mut self) -> &mut [Sheet] {
        &mut self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }

    /// Exact-name lookup.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    /// First sheet whose name contains `fragment`, case-insensitive. This
    /// is how vendor sheets are located from roster substrings.
    pub fn sheet_containing(&self, fragment: &str) -> Option<&Sheet> {
        let needle = fragment.to_lowercase();
        self.sheets
            .iter()
            .find(|s| s.name().to_lowercase().contains(&needle))
    }

    pub fn sheet_containing_mut(&mut self, fragment: &str) -> Option<&mut Sheet> {
        let needle = fragment.to_lowercase();
        self.sheets
            .iter_mut()
            .find(|s| s.name().to_lowercase().contains(&needle))
    }
}
