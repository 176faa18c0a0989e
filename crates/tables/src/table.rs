use crate::a1_notation::{parse_a1_range, to_a1_notation};
use crate::error::{Result, SheetError};
use std::fmt;
use std::str::FromStr;

/// Style applied to tables written without an explicit style.
pub const DEFAULT_TABLE_STYLE: &str = "TableStyleMedium9";

/// Rectangular block of cells, 0-based and inclusive on both corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl CellRange {
    /// Create a range from (row, col) corners, normalizing their order
    #[must_use]
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        CellRange {
            start: (start.0.min(end.0), start.1.min(end.1)),
            end: (start.0.max(end.0), start.1.max(end.1)),
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.end.0 - self.start.0 + 1
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        self.end.1 - self.start.1 + 1
    }

    #[must_use]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.start.0..=self.end.0).contains(&row) && (self.start.1..=self.end.1).contains(&col)
    }

    #[must_use]
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.0 <= other.end.0
            && other.start.0 <= self.end.0
            && self.start.1 <= other.end.1
            && other.start.1 <= self.end.1
    }

    /// Iterate over every (row, col) in the range, row by row
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (start, end) = (self.start, self.end);
        (start.0..=end.0).flat_map(move |row| (start.1..=end.1).map(move |col| (row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            to_a1_notation(self.start.0, self.start.1),
            to_a1_notation(self.end.0, self.end.1)
        )
    }
}

impl FromStr for CellRange {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) =
            parse_a1_range(s).map_err(|_| SheetError::InvalidRange(s.to_string()))?;
        Ok(CellRange { start, end })
    }
}

/// Visual style of a table: a named built-in style plus its banding flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    pub name: String,
    pub show_first_column: bool,
    pub show_last_column: bool,
    pub show_row_stripes: bool,
    pub show_column_stripes: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle {
            name: DEFAULT_TABLE_STYLE.to_string(),
            show_first_column: false,
            show_last_column: false,
            show_row_stripes: true,
            show_column_stripes: true,
        }
    }
}

impl TableStyle {
    /// Use another built-in style, e.g. "TableStyleLight1"
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[must_use]
    pub fn with_first_column(mut self, show: bool) -> Self {
        self.show_first_column = show;
        self
    }

    #[must_use]
    pub fn with_last_column(mut self, show: bool) -> Self {
        self.show_last_column = show;
        self
    }

    #[must_use]
    pub fn with_row_stripes(mut self, show: bool) -> Self {
        self.show_row_stripes = show;
        self
    }

    #[must_use]
    pub fn with_column_stripes(mut self, show: bool) -> Self {
        self.show_column_stripes = show;
        self
    }
}

/// A named, styled region of a worksheet whose first row holds the headers
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    range: CellRange,
    columns: Vec<String>,
    style: TableStyle,
}

impl Table {
    #[must_use]
    pub fn new(name: &str, range: CellRange, columns: Vec<String>, style: TableStyle) -> Self {
        Table {
            name: name.to_string(),
            range,
            columns,
            style,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn range(&self) -> CellRange {
        self.range
    }

    /// The range in A1 notation, e.g. "A1:E5"
    #[must_use]
    pub fn reference(&self) -> String {
        self.range.to_string()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Number of body rows under the header
    #[must_use]
    pub fn data_row_count(&self) -> usize {
        self.range.row_count() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_display_and_parse() {
        let range: CellRange = "A1:E5".parse().unwrap();
        assert_eq!(range.start, (0, 0));
        assert_eq!(range.end, (4, 4));
        assert_eq!(range.to_string(), "A1:E5");
        assert_eq!(range.row_count(), 5);
        assert_eq!(range.col_count(), 5);

        assert!("A1:".parse::<CellRange>().is_err());
    }

    #[test]
    fn test_range_overlap() {
        let a = CellRange::new((0, 0), (2, 2));
        let b = CellRange::new((2, 2), (4, 4));
        let c = CellRange::new((3, 0), (4, 1));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_range_contains() {
        let range: CellRange = "B2:C4".parse().unwrap();
        assert!(range.contains(1, 1));
        assert!(range.contains(3, 2));
        assert!(!range.contains(0, 1));
        assert!(!range.contains(3, 3));
    }

    #[test]
    fn test_range_cells() {
        let cells: Vec<_> = CellRange::new((1, 1), (2, 2)).cells().collect();
        assert_eq!(cells, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_default_style() {
        let style = TableStyle::default();
        assert_eq!(style.name, "TableStyleMedium9");
        assert!(style.show_row_stripes);
        assert!(style.show_column_stripes);
        assert!(!style.show_first_column);
        assert!(!style.show_last_column);

        let light = TableStyle::default()
            .with_name("TableStyleLight1")
            .with_column_stripes(false);
        assert_eq!(light.name, "TableStyleLight1");
        assert!(!light.show_column_stripes);
    }
}
