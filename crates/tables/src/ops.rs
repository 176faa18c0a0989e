//! Table construction, removal and workbook assembly.

use crate::a1_notation::{column_label, MAX_TABLE_COLUMNS};
use crate::cell::CellValue;
use crate::descriptor::TableDescriptor;
use crate::error::{Result, SheetError};
use crate::row::RowInput;
use crate::table::{CellRange, Table, TableStyle};
use crate::workbook::Workbook;
use crate::worksheet::{name_key, Worksheet};
use std::collections::HashSet;
use std::path::Path;

/// Sheet name used by [`new_workbook_with_table`] when the caller has no preference.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Remove every row from a worksheet. Table metadata is not touched.
pub fn clear_rows(sheet: &mut Worksheet) {
    sheet.clear_rows();
}

/// Write `headers` and `rows` to `sheet` starting at A1 and register them as
/// a table named `table_name` with the default style.
///
/// Existing rows are cleared first, including the cells of any other table
/// registered on the sheet. If a row cannot be resolved the rows written so
/// far stay in place and no table is registered.
pub fn write_table(
    sheet: &mut Worksheet,
    headers: &[String],
    rows: Vec<RowInput>,
    table_name: &str,
) -> Result<()> {
    write_table_with_style(sheet, headers, rows, table_name, TableStyle::default())
}

/// [`write_table`] with an explicit style
pub fn write_table_with_style(
    sheet: &mut Worksheet,
    headers: &[String],
    rows: Vec<RowInput>,
    table_name: &str,
    style: TableStyle,
) -> Result<()> {
    validate_headers(headers)?;
    if sheet.has_table(table_name) {
        return Err(SheetError::DuplicateTableName {
            name: table_name.to_string(),
        });
    }

    let range = table_range(headers, rows.len())?;
    check_overlap(sheet, &range, table_name)?;

    if sheet.table_count() > 0 {
        tracing::warn!(
            sheet = sheet.name(),
            table = table_name,
            tables = sheet.table_count(),
            "clearing rows that other tables on this sheet refer to"
        );
    }
    sheet.clear_rows();
    sheet.append_row(headers.iter().map(String::as_str));
    for (index, row) in rows.into_iter().enumerate() {
        sheet.append_row(row.resolve(headers, index + 1)?);
    }

    tracing::debug!(
        sheet = sheet.name(),
        table = table_name,
        reference = %range,
        "wrote table"
    );

    sheet.add_table(Table::new(table_name, range, headers.to_vec(), style))
}

/// The range a table with `headers` and `row_count` data rows covers from A1
fn table_range(headers: &[String], row_count: usize) -> Result<CellRange> {
    format!("A1:{}{}", column_label(headers.len())?, row_count + 1).parse()
}

/// Reject `range` if it overlaps a table on `sheet` other than `table_name`
fn check_overlap(sheet: &Worksheet, range: &CellRange, table_name: &str) -> Result<()> {
    let key = name_key(table_name);
    match sheet
        .tables()
        .find(|t| name_key(t.name()) != key && t.range().overlaps(range))
    {
        Some(other) => Err(SheetError::TableOverlap {
            name: table_name.to_string(),
            other: other.name().to_string(),
        }),
        None => Ok(()),
    }
}

fn validate_headers(headers: &[String]) -> Result<()> {
    if headers.is_empty() {
        return Err(SheetError::EmptyHeaders);
    }
    if headers.len() > MAX_TABLE_COLUMNS {
        return Err(SheetError::ColumnRangeExceeded {
            count: headers.len(),
            max: MAX_TABLE_COLUMNS,
        });
    }
    let mut seen = HashSet::with_capacity(headers.len());
    for header in headers {
        if !seen.insert(header.as_str()) {
            return Err(SheetError::DuplicateColumnName {
                name: header.clone(),
            });
        }
    }
    Ok(())
}

/// Find `table_name` anywhere in `workbook`, blank the cells it covers and
/// detach its metadata. Returns the worksheet that held it.
///
/// The workbook is left untouched when no such table exists.
pub fn remove_table<'a>(workbook: &'a mut Workbook, table_name: &str) -> Result<&'a mut Worksheet> {
    let sheet = workbook
        .sheets_mut()
        .find(|sheet| sheet.has_table(table_name))
        .ok_or_else(|| SheetError::TableNotFound {
            name: table_name.to_string(),
        })?;

    if let Some(table) = sheet.detach_table(table_name) {
        for (row, col) in table.range().cells() {
            // Cells outside the used area already read as null
            if !sheet.get(row, col).is_null() {
                sheet.set(row, col, CellValue::Null);
            }
        }
        tracing::debug!(
            sheet = sheet.name(),
            table = table_name,
            reference = %table.reference(),
            "removed table"
        );
    }

    Ok(sheet)
}

impl Workbook {
    /// Write a table onto the named sheet, enforcing that table names are
    /// unique across the whole workbook
    pub fn write_table(
        &mut self,
        sheet_name: &str,
        headers: &[String],
        rows: Vec<RowInput>,
        table_name: &str,
        style: TableStyle,
    ) -> Result<()> {
        if self.has_table(table_name) {
            return Err(SheetError::DuplicateTableName {
                name: table_name.to_string(),
            });
        }
        let sheet = self.get_sheet_mut(sheet_name)?;
        write_table_with_style(sheet, headers, rows, table_name, style)
    }

    /// Rebuild an existing table in place: its cells are blanked, its
    /// metadata detached, and the new data is written on the same sheet.
    ///
    /// Headers and the new range are checked before the old table is touched.
    pub fn replace_table(
        &mut self,
        headers: &[String],
        rows: Vec<RowInput>,
        table_name: &str,
    ) -> Result<()> {
        let (sheet, table) = self
            .find_table(table_name)
            .ok_or_else(|| SheetError::TableNotFound {
                name: table_name.to_string(),
            })?;
        let style = table.style().clone();
        validate_headers(headers)?;
        check_overlap(sheet, &table_range(headers, rows.len())?, table_name)?;

        let sheet = remove_table(self, table_name)?;
        write_table_with_style(sheet, headers, rows, table_name, style)
    }
}

/// Create a workbook whose only sheet, `sheet_name`, holds one table
pub fn new_workbook_with_table(
    headers: &[String],
    rows: Vec<RowInput>,
    table_name: &str,
    sheet_name: &str,
) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let placeholder = workbook.active_sheet().name().to_string();
    workbook.rename_sheet(&placeholder, sheet_name)?;
    write_table(workbook.active_sheet_mut(), headers, rows, table_name)?;
    Ok(workbook)
}

/// Create a workbook with one sheet per descriptor, in order, each holding
/// one table. The placeholder sheet of the new workbook is not kept.
pub fn new_workbook_with_tables(descriptors: Vec<TableDescriptor>) -> Result<Workbook> {
    if descriptors.is_empty() {
        return Err(SheetError::NoDescriptors);
    }

    let mut sheet_names = HashSet::new();
    let mut table_names = HashSet::new();
    for descriptor in &descriptors {
        if !sheet_names.insert(name_key(&descriptor.sheet_name)) {
            return Err(SheetError::DuplicateSheetName {
                name: descriptor.sheet_name.clone(),
            });
        }
        if !table_names.insert(name_key(&descriptor.table_name)) {
            return Err(SheetError::DuplicateTableName {
                name: descriptor.table_name.clone(),
            });
        }
    }

    let mut workbook = Workbook::new();
    let mut placeholder = workbook.active_sheet().name().to_string();
    if sheet_names.contains(&name_key(&placeholder)) {
        let mut aside = workbook.unique_sheet_name(&placeholder);
        while sheet_names.contains(&name_key(&aside)) {
            aside = format!("{aside}_");
        }
        workbook.rename_sheet(&placeholder, &aside)?;
        placeholder = aside;
    }

    for descriptor in descriptors {
        let TableDescriptor {
            table_headers,
            table_rows,
            table_name,
            sheet_name,
        } = descriptor;
        let sheet = workbook.create_sheet(&sheet_name)?;
        write_table(sheet, &table_headers, table_rows, &table_name)?;
    }

    workbook.remove_sheet(&placeholder)?;
    Ok(workbook)
}

/// Load the workbook at `path`, rebuild `table_name` with new data on the
/// sheet that holds it, and save the file back.
///
/// Nothing is written unless every step before saving succeeded.
pub fn replace_table_in_file<P: AsRef<Path>>(
    path: P,
    headers: &[String],
    rows: Vec<RowInput>,
    table_name: &str,
) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::from_xlsx(path)?;
    workbook.replace_table(headers, rows, table_name)?;
    workbook.save_as_xlsx(path)?;
    tracing::info!(path = %path.display(), table = table_name, "replaced table");
    Ok(())
}
