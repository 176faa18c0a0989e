use crate::a1_notation::parse_a1;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::table::Table;
use indexmap::IndexMap;

static EMPTY: CellValue = CellValue::Null;

/// Registry key for a sheet or table name. Spreadsheet applications compare
/// both case-insensitively.
pub(crate) fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// A named grid of cells (row-major, rows may be ragged) plus the tables
/// registered on it
#[derive(Debug, Clone, Default)]
pub struct Worksheet {
    name: String,
    data: Vec<Vec<CellValue>>,
    tables: IndexMap<String, Table>,
}

impl Worksheet {
    /// Create a new empty worksheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Worksheet {
            name: name.to_string(),
            data: Vec::new(),
            tables: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Number of rows, counting blank rows inside the used area
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Width of the widest row
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // ===== Cell Access =====

    /// Value at a 0-based (row, col); cells outside the used area read as null
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> &CellValue {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Set a 0-based (row, col), growing the grid as needed
    pub fn set<T: Into<CellValue>>(&mut self, row: usize, col: usize, value: T) {
        if self.data.len() <= row {
            self.data.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.data[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Null);
        }
        cells[col] = value.into();
    }

    /// Value at an A1 address such as "B3"
    pub fn get_a1(&self, notation: &str) -> Result<&CellValue> {
        let (row, col) = parse_a1(notation)?;
        Ok(self.get(row, col))
    }

    /// Set the value at an A1 address
    pub fn set_a1<T: Into<CellValue>>(&mut self, notation: &str, value: T) -> Result<()> {
        let (row, col) = parse_a1(notation)?;
        self.set(row, col, value);
        Ok(())
    }

    // ===== Row Operations =====

    /// Append a row after the last existing row
    pub fn append_row<T: Into<CellValue>>(&mut self, values: impl IntoIterator<Item = T>) {
        self.data.push(values.into_iter().map(Into::into).collect());
    }

    /// Row at a 0-based index
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.data.iter().map(Vec::as_slice)
    }

    /// Remove every row, leaving the sheet with zero rows.
    ///
    /// Registered tables are left alone; remove them first if their metadata
    /// should go too.
    pub fn clear_rows(&mut self) {
        tracing::debug!(sheet = %self.name, rows = self.data.len(), "clearing rows");
        self.data.clear();
    }

    // ===== Tables =====

    /// Tables registered on this sheet, in registration order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Table by name, ignoring case
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(&name_key(name))
    }

    #[must_use]
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(&name_key(name))
    }

    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Register table metadata on this sheet
    pub fn add_table(&mut self, table: Table) -> Result<()> {
        let key = name_key(table.name());
        if self.tables.contains_key(&key) {
            return Err(SheetError::DuplicateTableName {
                name: table.name().to_string(),
            });
        }
        self.tables.insert(key, table);
        Ok(())
    }

    /// Detach table metadata without touching any cell
    pub fn detach_table(&mut self, name: &str) -> Option<Table> {
        self.tables.shift_remove(&name_key(name))
    }
}
