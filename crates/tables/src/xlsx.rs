use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::table::{CellRange, Table, TableStyle};
use crate::workbook::Workbook;
use crate::worksheet::Worksheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use zip::ZipArchive;

const TABLE_PART_PREFIX: &str = "xl/tables/";

/// Largest integer an f64 holds exactly
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        // Spreadsheets store every number as a double
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= MAX_EXACT_INT => CellValue::Int(*f as i64),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Table metadata as stored in an `xl/tables/tableN.xml` part
#[derive(Debug, Clone, PartialEq)]
struct TablePart {
    name: String,
    display_name: String,
    reference: String,
    columns: Vec<String>,
    style: TableStyle,
}

impl TablePart {
    fn to_table(&self) -> Result<Table> {
        let range: CellRange = self.reference.parse()?;
        Ok(Table::new(
            &self.display_name,
            range,
            self.columns.clone(),
            self.style.clone(),
        ))
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

fn flag(element: &BytesStart<'_>, name: &str, default: bool) -> Result<bool> {
    Ok(match attribute(element, name)?.as_deref() {
        Some("1" | "true") => true,
        Some("0" | "false") => false,
        _ => default,
    })
}

/// Parse one table part
fn parse_table_part<R: std::io::BufRead>(source: R) -> Result<Option<TablePart>> {
    let mut reader = quick_xml::Reader::from_reader(source);
    reader.config_mut().trim_text(true);

    let mut part: Option<TablePart> = None;
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"table" => {
                    let name = attribute(&e, "name")?.unwrap_or_default();
                    let display_name = attribute(&e, "displayName")?.unwrap_or_else(|| name.clone());
                    let Some(reference) = attribute(&e, "ref")? else {
                        return Ok(None);
                    };
                    part = Some(TablePart {
                        name,
                        display_name,
                        reference,
                        columns: Vec::new(),
                        // Absent style info means no style at all
                        style: TableStyle::default()
                            .with_name("")
                            .with_row_stripes(false)
                            .with_column_stripes(false),
                    });
                }
                b"tableColumn" => {
                    if let (Some(part), Some(column)) = (part.as_mut(), attribute(&e, "name")?) {
                        part.columns.push(column);
                    }
                }
                b"tableStyleInfo" => {
                    if let Some(part) = part.as_mut() {
                        part.style = TableStyle {
                            name: attribute(&e, "name")?.unwrap_or_default(),
                            show_first_column: flag(&e, "showFirstColumn", false)?,
                            show_last_column: flag(&e, "showLastColumn", false)?,
                            show_row_stripes: flag(&e, "showRowStripes", false)?,
                            show_column_stripes: flag(&e, "showColumnStripes", false)?,
                        };
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(part)
}

/// Read every table part of the archive, keyed by both its name and display name
fn read_table_parts(path: &Path) -> Result<HashMap<String, TablePart>> {
    let mut archive = ZipArchive::new(BufReader::new(File::open(path)?))?;
    let part_names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with(TABLE_PART_PREFIX) && name.ends_with(".xml"))
        .map(String::from)
        .collect();

    let mut parts = HashMap::new();
    for part_name in part_names {
        let file = archive.by_name(&part_name)?;
        match parse_table_part(BufReader::new(file))? {
            Some(part) => {
                parts.insert(part.name.clone(), part.clone());
                parts.insert(part.display_name.clone(), part);
            }
            None => tracing::warn!(part = %part_name, "table part has no range, skipping"),
        }
    }
    Ok(parts)
}

/// Map a built-in style name such as "TableStyleMedium9" onto the writer's styles
fn xlsx_table_style(name: &str) -> rust_xlsxwriter::TableStyle {
    use rust_xlsxwriter::TableStyle as S;

    let parsed = name
        .strip_prefix("TableStyle")
        .and_then(|rest| {
            let digits = rest.find(|c: char| c.is_ascii_digit())?;
            let (family, number) = rest.split_at(digits);
            Some((family, number.parse::<u8>().ok()?))
        });

    let style = match parsed {
        Some(("Light", n)) => match n {
            1 => Some(S::Light1),
            2 => Some(S::Light2),
            3 => Some(S::Light3),
            4 => Some(S::Light4),
            5 => Some(S::Light5),
            6 => Some(S::Light6),
            7 => Some(S::Light7),
            8 => Some(S::Light8),
            9 => Some(S::Light9),
            10 => Some(S::Light10),
            11 => Some(S::Light11),
            12 => Some(S::Light12),
            13 => Some(S::Light13),
            14 => Some(S::Light14),
            15 => Some(S::Light15),
            16 => Some(S::Light16),
            17 => Some(S::Light17),
            18 => Some(S::Light18),
            19 => Some(S::Light19),
            20 => Some(S::Light20),
            21 => Some(S::Light21),
            _ => None,
        },
        Some(("Medium", n)) => match n {
            1 => Some(S::Medium1),
            2 => Some(S::Medium2),
            3 => Some(S::Medium3),
            4 => Some(S::Medium4),
            5 => Some(S::Medium5),
            6 => Some(S::Medium6),
            7 => Some(S::Medium7),
            8 => Some(S::Medium8),
            9 => Some(S::Medium9),
            10 => Some(S::Medium10),
            11 => Some(S::Medium11),
            12 => Some(S::Medium12),
            13 => Some(S::Medium13),
            14 => Some(S::Medium14),
            15 => Some(S::Medium15),
            16 => Some(S::Medium16),
            17 => Some(S::Medium17),
            18 => Some(S::Medium18),
            19 => Some(S::Medium19),
            20 => Some(S::Medium20),
            21 => Some(S::Medium21),
            22 => Some(S::Medium22),
            23 => Some(S::Medium23),
            24 => Some(S::Medium24),
            25 => Some(S::Medium25),
            26 => Some(S::Medium26),
            27 => Some(S::Medium27),
            28 => Some(S::Medium28),
            _ => None,
        },
        Some(("Dark", n)) => match n {
            1 => Some(S::Dark1),
            2 => Some(S::Dark2),
            3 => Some(S::Dark3),
            4 => Some(S::Dark4),
            5 => Some(S::Dark5),
            6 => Some(S::Dark6),
            7 => Some(S::Dark7),
            8 => Some(S::Dark8),
            9 => Some(S::Dark9),
            10 => Some(S::Dark10),
            11 => Some(S::Dark11),
            _ => None,
        },
        _ if name.is_empty() => Some(S::None),
        _ => None,
    };

    style.unwrap_or_else(|| {
        tracing::warn!(style = name, "unknown table style, using TableStyleMedium9");
        S::Medium9
    })
}

fn row_index(row: usize) -> Result<u32> {
    u32::try_from(row).map_err(|_| SheetError::Xlsx(format!("row index {row} overflows")))
}

fn col_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| SheetError::Xlsx(format!("column index {col} overflows")))
}

/// Write sheet cells and tables to a writer worksheet
fn write_worksheet(sheet: &Worksheet, worksheet: &mut rust_xlsxwriter::Worksheet) -> Result<()> {
    worksheet.set_name(sheet.name())?;

    for (row_idx, row) in sheet.rows().enumerate() {
        let row_num = row_index(row_idx)?;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = col_index(col_idx)?;
            match cell {
                CellValue::Null => {}
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
                CellValue::Int(i) => {
                    // Stored as f64: integers beyond 2^53 lose precision
                    worksheet.write_number(row_num, col_num, *i as f64)?;
                }
                CellValue::Float(f) => {
                    worksheet.write_number(row_num, col_num, *f)?;
                }
                CellValue::String(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
            }
        }
    }

    for table in sheet.tables() {
        let range = table.range();
        // The writer would put the column names back into a cleared header row
        if (range.start.1..=range.end.1).all(|col| sheet.get(range.start.0, col).is_null()) {
            tracing::warn!(
                sheet = sheet.name(),
                table = table.name(),
                reference = %range,
                "header row is empty, table not saved"
            );
            continue;
        }
        let style = table.style();
        let columns: Vec<rust_xlsxwriter::TableColumn> = table
            .columns()
            .iter()
            .map(|header| rust_xlsxwriter::TableColumn::new().set_header(header))
            .collect();
        let xlsx_table = rust_xlsxwriter::Table::new()
            .set_name(table.name())
            .set_columns(&columns)
            .set_style(xlsx_table_style(&style.name))
            .set_banded_rows(style.show_row_stripes)
            .set_banded_columns(style.show_column_stripes)
            .set_first_column(style.show_first_column)
            .set_last_column(style.show_last_column);

        // A table needs at least one body row
        let last_row = range.end.0.max(range.start.0 + 1);
        worksheet.add_table(
            row_index(range.start.0)?,
            col_index(range.start.1)?,
            row_index(last_row)?,
            col_index(range.end.1)?,
            &xlsx_table,
        )?;
    }

    Ok(())
}

impl Workbook {
    /// Load every sheet of an xlsx file, with the tables registered on it
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or is not a valid workbook.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path)?;
        workbook.load_tables()?;
        let parts = read_table_parts(path)?;

        let sheet_names = workbook.sheet_names();
        let mut sheets = Vec::with_capacity(sheet_names.len());

        for sheet_name in sheet_names {
            let mut sheet = Worksheet::with_name(&sheet_name);

            let range = workbook.worksheet_range(&sheet_name)?;
            if let Some((first_row, first_col)) = range.start() {
                for (row, col, data) in range.used_cells() {
                    sheet.set(
                        first_row as usize + row,
                        first_col as usize + col,
                        data_to_cell_value(data),
                    );
                }
            }

            let table_names: Vec<String> = workbook
                .table_names_in_sheet(&sheet_name)
                .into_iter()
                .cloned()
                .collect();
            for table_name in table_names {
                match parts.get(&table_name) {
                    Some(part) => sheet.add_table(part.to_table()?)?,
                    None => tracing::warn!(
                        sheet = %sheet_name,
                        table = %table_name,
                        "table definition not found, skipping"
                    ),
                }
            }

            sheets.push(sheet);
        }

        tracing::info!(path = %path.display(), sheets = sheets.len(), "loaded workbook");
        Workbook::from_sheets(sheets)
    }

    /// Save the workbook to an xlsx file, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns error if a sheet or table name is rejected by the writer or the
    /// file cannot be written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut workbook = rust_xlsxwriter::Workbook::new();

        for sheet in self.sheets() {
            let worksheet = workbook.add_worksheet();
            write_worksheet(sheet, worksheet)?;
        }

        workbook.save(path)?;
        tracing::info!(path = %path.display(), sheets = self.sheet_count(), "saved workbook");
        Ok(())
    }

    /// Get sheet names from an xlsx file without loading data
    pub fn xlsx_sheet_names<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        let workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())?;
        Ok(workbook.sheet_names())
    }
}
