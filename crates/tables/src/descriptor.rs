use crate::error::Result;
use crate::ops::DEFAULT_SHEET_NAME;
use crate::row::RowInput;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One table of a multi-table workbook, and the sheet it goes on
///
/// # Example
/// ```
/// use xltables::TableDescriptor;
///
/// let descriptors = TableDescriptor::from_json_str(r#"[
///     {
///         "table_headers": ["Fruit", "2011"],
///         "table_rows": [{"Fruit": "Apples", "2011": 10000}, ["Pears", 2000]],
///         "table_name": "first_table",
///         "sheet_name": "first sheet"
///     }
/// ]"#).unwrap();
/// assert_eq!(descriptors[0].table_rows.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub table_headers: Vec<String>,
    #[serde(default)]
    pub table_rows: Vec<RowInput>,
    pub table_name: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

impl TableDescriptor {
    #[must_use]
    pub fn new(headers: &[String], rows: Vec<RowInput>, table_name: &str, sheet_name: &str) -> Self {
        TableDescriptor {
            table_headers: headers.to_vec(),
            table_rows: rows,
            table_name: table_name.to_string(),
            sheet_name: sheet_name.to_string(),
        }
    }

    /// Parse a JSON array of descriptors
    pub fn from_json_str(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON array of descriptors from a file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }
}
