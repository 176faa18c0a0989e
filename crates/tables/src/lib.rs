//! Named, styled tables inside xlsx workbooks
//!
//! Builds new workbooks holding one or more tables, replaces an existing
//! table's contents in place, and clears worksheets. Reading and writing the
//! file format is delegated to `calamine` and `rust_xlsxwriter`.
//!
//! # Examples
//!
//! ## A workbook with one table
//!
//! ```
//! use xltables::{new_workbook_with_table, CellValue, RowInput};
//!
//! let headers = vec!["Fruit".to_string(), "2011".to_string()];
//! let rows = vec![
//!     RowInput::keyed([("2011", CellValue::from(10000)), ("Fruit", CellValue::from("Apples"))]),
//!     RowInput::positional([CellValue::from("Pears"), CellValue::from(2000)]),
//! ];
//!
//! let book = new_workbook_with_table(&headers, rows, "MY_TABLE", "MY_SHEET").unwrap();
//! let (sheet, table) = book.find_table("MY_TABLE").unwrap();
//!
//! assert_eq!(sheet.name(), "MY_SHEET");
//! assert_eq!(table.reference(), "A1:B3");
//! ```
//!
//! ## Several tables, one sheet each
//!
//! ```
//! use xltables::{new_workbook_with_tables, TableDescriptor};
//!
//! let headers = vec!["Id".to_string()];
//! let book = new_workbook_with_tables(vec![
//!     TableDescriptor::new(&headers, vec![vec![1].into()], "first_table", "first sheet"),
//!     TableDescriptor::new(&headers, vec![vec![2].into()], "second_table", "second sheet"),
//! ])
//! .unwrap();
//!
//! assert_eq!(book.sheet_names(), vec!["first sheet", "second sheet"]);
//! ```
//!
//! ## Replacing a table in a file
//!
//! ```no_run
//! use xltables::{replace_table_in_file, CellValue, RowInput};
//!
//! let headers = vec!["Fruit".to_string(), "2011".to_string()];
//! let rows = vec![RowInput::positional([CellValue::from("Bananas"), CellValue::from(6000)])];
//! replace_table_in_file("table_test.xlsx", &headers, rows, "second_table").unwrap();
//! ```
//!
//! Access to a file is not coordinated between processes; callers that share
//! a workbook file must serialize their updates.

mod a1_notation;
mod cell;
mod descriptor;
mod error;
mod ops;
mod row;
mod table;
mod workbook;
mod worksheet;
mod xlsx;

pub use a1_notation::{column_label, parse_a1, to_a1_notation, MAX_TABLE_COLUMNS};
pub use cell::CellValue;
pub use descriptor::TableDescriptor;
pub use error::{Result, SheetError};
pub use ops::{
    clear_rows, new_workbook_with_table, new_workbook_with_tables, remove_table,
    replace_table_in_file, write_table, write_table_with_style, DEFAULT_SHEET_NAME,
};
pub use row::RowInput;
pub use table::{CellRange, Table, TableStyle, DEFAULT_TABLE_STYLE};
pub use workbook::{Workbook, PLACEHOLDER_SHEET_NAME};
pub use worksheet::Worksheet;
