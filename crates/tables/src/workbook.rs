use crate::error::{Result, SheetError};
use crate::table::Table;
use crate::worksheet::{name_key, Worksheet};
use indexmap::IndexMap;

/// Name of the placeholder sheet every new workbook starts with.
pub const PLACEHOLDER_SHEET_NAME: &str = "Sheet";

/// An ordered set of uniquely named worksheets; never empty.
///
/// Sheet names are unique ignoring case, and lookups ignore case too.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: IndexMap<String, Worksheet>,
    active: usize,
}

impl Workbook {
    /// Create a workbook holding one empty placeholder sheet
    #[must_use]
    pub fn new() -> Self {
        let mut sheets = IndexMap::new();
        sheets.insert(
            name_key(PLACEHOLDER_SHEET_NAME),
            Worksheet::with_name(PLACEHOLDER_SHEET_NAME),
        );
        Workbook { sheets, active: 0 }
    }

    /// Build a workbook from already populated sheets, in order
    pub(crate) fn from_sheets(sheets: Vec<Worksheet>) -> Result<Self> {
        if sheets.is_empty() {
            return Err(SheetError::Xlsx("workbook contains no sheets".to_string()));
        }
        let mut map = IndexMap::with_capacity(sheets.len());
        for sheet in sheets {
            let name = sheet.name().to_string();
            if map.insert(name_key(&name), sheet).is_some() {
                return Err(SheetError::DuplicateSheetName { name });
            }
        }
        Ok(Workbook {
            sheets: map,
            active: 0,
        })
    }

    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.values().map(Worksheet::name).collect()
    }

    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(&name_key(name))
    }

    // ===== Sheet Access =====

    pub fn get_sheet(&self, name: &str) -> Result<&Worksheet> {
        self.sheets
            .get(&name_key(name))
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    pub fn get_sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.sheets
            .get_mut(&name_key(name))
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })
    }

    /// The sheet a spreadsheet application would open on
    #[must_use]
    pub fn active_sheet(&self) -> &Worksheet {
        &self.sheets[self.active]
    }

    pub fn active_sheet_mut(&mut self) -> &mut Worksheet {
        &mut self.sheets[self.active]
    }

    pub fn set_active_sheet(&mut self, name: &str) -> Result<()> {
        self.active = self
            .sheets
            .get_index_of(&name_key(name))
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })?;
        Ok(())
    }

    // ===== Sheet Management =====

    /// Append a new empty sheet and return it
    pub fn create_sheet(&mut self, name: &str) -> Result<&mut Worksheet> {
        let key = name_key(name);
        if self.sheets.contains_key(&key) {
            return Err(SheetError::DuplicateSheetName {
                name: name.to_string(),
            });
        }
        let index = self.sheets.len();
        self.sheets.insert(key, Worksheet::with_name(name));
        Ok(&mut self.sheets[index])
    }

    /// Remove a sheet by name; the last remaining sheet cannot be removed
    pub fn remove_sheet(&mut self, name: &str) -> Result<Worksheet> {
        let index = self
            .sheets
            .get_index_of(&name_key(name))
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })?;
        if self.sheets.len() == 1 {
            return Err(SheetError::LastSheet {
                name: name.to_string(),
            });
        }

        let (_, sheet) = self
            .sheets
            .shift_remove_index(index)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: name.to_string(),
            })?;

        // Keep pointing at the same sheet, or its successor if it was removed
        if self.active > index || self.active == self.sheets.len() {
            self.active -= 1;
        }

        Ok(sheet)
    }

    /// Rename a sheet (preserves position in sheet order). Changing only the
    /// case of a name is allowed.
    pub fn rename_sheet(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let old_key = name_key(old_name);
        let index = self
            .sheets
            .get_index_of(&old_key)
            .ok_or_else(|| SheetError::SheetNotFound {
                name: old_name.to_string(),
            })?;
        let new_key = name_key(new_name);
        if new_key != old_key && self.sheets.contains_key(&new_key) {
            return Err(SheetError::DuplicateSheetName {
                name: new_name.to_string(),
            });
        }

        if let Some((_, mut sheet)) = self.sheets.shift_remove_index(index) {
            sheet.set_name(new_name);
            self.sheets.shift_insert(index, new_key, sheet);
        }

        Ok(())
    }

    /// A sheet name not yet used in this workbook, derived from `base_name`
    #[must_use]
    pub fn unique_sheet_name(&self, base_name: &str) -> String {
        if !self.has_sheet(base_name) {
            return base_name.to_string();
        }
        let mut suffix = 1;
        loop {
            let new_name = format!("{base_name}_{suffix}");
            if !self.has_sheet(&new_name) {
                return new_name;
            }
            suffix += 1;
        }
    }

    // ===== Tables =====

    /// Locate a table by name, ignoring case; the first sheet holding it wins
    #[must_use]
    pub fn find_table(&self, table_name: &str) -> Option<(&Worksheet, &Table)> {
        self.sheets
            .values()
            .find_map(|sheet| sheet.table(table_name).map(|table| (sheet, table)))
    }

    #[must_use]
    pub fn has_table(&self, table_name: &str) -> bool {
        self.find_table(table_name).is_some()
    }

    /// Names of every table in the workbook, in sheet order
    #[must_use]
    pub fn table_names(&self) -> Vec<&str> {
        self.sheets
            .values()
            .flat_map(|sheet| sheet.tables().map(Table::name))
            .collect()
    }

    // ===== Iteration =====

    pub fn sheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.sheets.values()
    }

    pub fn sheets_mut(&mut self) -> impl Iterator<Item = &mut Worksheet> {
        self.sheets.values_mut()
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}
