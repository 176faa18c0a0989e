use thiserror::Error;

/// Errors that can occur while building, replacing or persisting tables
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Row {row} has no value for column '{field}'")]
    MissingField { field: String, row: usize },

    #[error("Row {row} has {actual} values but the table has {expected} columns")]
    RowShape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Table not found: {name}")]
    TableNotFound { name: String },

    #[error("Table already exists: {name}")]
    DuplicateTableName { name: String },

    #[error("Table '{name}' would overlap existing table '{other}'")]
    TableOverlap { name: String, other: String },

    #[error("Sheet already exists: {name}")]
    DuplicateSheetName { name: String },

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Cannot remove '{name}': a workbook must keep at least one sheet")]
    LastSheet { name: String },

    #[error("Column count {count} is outside the supported range 1..={max}")]
    ColumnRangeExceeded { count: usize, max: usize },

    #[error("Duplicate column name: {name}")]
    DuplicateColumnName { name: String },

    #[error("A table needs at least one header")]
    EmptyHeaders,

    #[error("No table descriptors given")]
    NoDescriptors,

    #[error("Invalid cell notation: {0}")]
    InvalidCellNotation(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Workbook error: {0}")]
    Xlsx(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<calamine::XlsxError> for SheetError {
    fn from(e: calamine::XlsxError) -> Self {
        SheetError::Xlsx(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SheetError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SheetError::Xlsx(e.to_string())
    }
}

impl From<zip::result::ZipError> for SheetError {
    fn from(e: zip::result::ZipError) -> Self {
        SheetError::Xlsx(e.to_string())
    }
}

impl From<quick_xml::Error> for SheetError {
    fn from(e: quick_xml::Error) -> Self {
        SheetError::Xlsx(e.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for SheetError {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        SheetError::Xlsx(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
