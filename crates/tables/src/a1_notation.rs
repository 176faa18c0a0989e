use crate::error::{Result, SheetError};
use std::sync::OnceLock;

/// Highest column a table may span: "ZZ".
pub const MAX_TABLE_COLUMNS: usize = 26 + 26 * 26;

static COLUMN_LABELS: OnceLock<Vec<String>> = OnceLock::new();

fn column_labels() -> &'static [String] {
    COLUMN_LABELS.get_or_init(|| {
        let letters: Vec<char> = ('A'..='Z').collect();
        let mut labels: Vec<String> = letters.iter().map(|c| c.to_string()).collect();
        for first in &letters {
            for second in &letters {
                labels.push(format!("{first}{second}"));
            }
        }
        labels
    })
}

/// Label of the 1-based column `n` ("A" for 1, "ZZ" for 702).
///
/// Only one and two letter labels are available; anything past "ZZ" is
/// rejected rather than wrapped.
pub fn column_label(n: usize) -> Result<&'static str> {
    if n == 0 || n > MAX_TABLE_COLUMNS {
        return Err(SheetError::ColumnRangeExceeded {
            count: n,
            max: MAX_TABLE_COLUMNS,
        });
    }
    Ok(&column_labels()[n - 1])
}

/// Parse A1-style cell notation (e.g., "A1", "Z99", "AA1")
/// Returns (row, column) as 0-based indices
pub fn parse_a1(notation: &str) -> Result<(usize, usize)> {
    let notation = notation.trim().replace('$', "").to_uppercase();
    let split_pos = notation
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.clone()))?;

    let (col_part, row_part) = notation.split_at(split_pos);
    if col_part.is_empty() {
        return Err(SheetError::InvalidCellNotation(notation));
    }

    let col = parse_column_letters(col_part)
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.clone()))?;
    let row = row_part
        .parse::<usize>()
        .map_err(|_| SheetError::InvalidCellNotation(notation.clone()))?;

    if row == 0 {
        return Err(SheetError::InvalidCellNotation(notation));
    }

    Ok((row - 1, col))
}

/// Parse A1-style range notation (e.g., "A1:C3")
/// Returns ((start_row, start_col), (end_row, end_col)) as 0-based indices
pub fn parse_a1_range(notation: &str) -> Result<((usize, usize), (usize, usize))> {
    let Some((start, end)) = notation.split_once(':') else {
        let cell = parse_a1(notation)?;
        return Ok((cell, cell));
    };

    let (start_row, start_col) = parse_a1(start)?;
    let (end_row, end_col) = parse_a1(end)?;

    Ok((
        (start_row.min(end_row), start_col.min(end_col)),
        (start_row.max(end_row), start_col.max(end_col)),
    ))
}

/// A=0, B=1, ... Z=25, AA=26
fn parse_column_letters(col_str: &str) -> Option<usize> {
    let mut col = 0usize;
    for b in col_str.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        col = col.checked_mul(26)? + (b - b'A') as usize + 1;
    }
    col.checked_sub(1)
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_index_to_letters(mut col: usize) -> String {
    let mut result = String::new();
    col += 1;

    while col > 0 {
        col -= 1;
        result.insert(0, ((col % 26) as u8 + b'A') as char);
        col /= 26;
    }

    result
}

/// Convert (row, col) to A1 notation
/// (0, 0) = "A1", (0, 1) = "B1", etc.
pub fn to_a1_notation(row: usize, col: usize) -> String {
    format!("{}{}", column_index_to_letters(col), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_label_bounds() {
        assert_eq!(column_label(1).unwrap(), "A");
        assert_eq!(column_label(26).unwrap(), "Z");
        assert_eq!(column_label(27).unwrap(), "AA");
        assert_eq!(column_label(52).unwrap(), "AZ");
        assert_eq!(column_label(53).unwrap(), "BA");
        assert_eq!(column_label(702).unwrap(), "ZZ");

        assert!(matches!(
            column_label(0),
            Err(SheetError::ColumnRangeExceeded { count: 0, .. })
        ));
        assert!(matches!(
            column_label(703),
            Err(SheetError::ColumnRangeExceeded {
                count: 703,
                max: 702
            })
        ));
    }

    #[test]
    fn test_column_label_matches_bijective_base26() {
        for n in 1..=MAX_TABLE_COLUMNS {
            assert_eq!(column_label(n).unwrap(), column_index_to_letters(n - 1));
        }
    }

    #[test]
    fn test_parse_a1() {
        assert_eq!(parse_a1("A1").unwrap(), (0, 0));
        assert_eq!(parse_a1("B1").unwrap(), (0, 1));
        assert_eq!(parse_a1("A2").unwrap(), (1, 0));
        assert_eq!(parse_a1("AA1").unwrap(), (0, 26));
        assert_eq!(parse_a1("ZZ1").unwrap(), (0, 701));
        assert_eq!(parse_a1("$C$4").unwrap(), (3, 2));
        assert_eq!(parse_a1("aA1").unwrap(), (0, 26));
    }

    #[test]
    fn test_parse_a1_errors() {
        assert!(parse_a1("").is_err());
        assert!(parse_a1("A").is_err());
        assert!(parse_a1("1").is_err());
        assert!(parse_a1("A0").is_err());
        assert!(parse_a1("A1B").is_err());
    }

    #[test]
    fn test_parse_a1_range() {
        assert_eq!(parse_a1_range("A1:C3").unwrap(), ((0, 0), (2, 2)));
        assert_eq!(parse_a1_range("C3:A1").unwrap(), ((0, 0), (2, 2)));
        assert_eq!(parse_a1_range("B2").unwrap(), ((1, 1), (1, 1)));
    }

    #[test]
    fn test_to_a1_notation() {
        assert_eq!(to_a1_notation(0, 0), "A1");
        assert_eq!(to_a1_notation(99, 25), "Z100");
        assert_eq!(to_a1_notation(0, 702), "AAA1");
    }
}
