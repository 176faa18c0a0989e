use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Caller-supplied data for one table row.
///
/// Deserializes from a JSON array (positional) or a JSON object (keyed by
/// header name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowInput {
    Positional(Vec<CellValue>),
    Keyed(IndexMap<String, CellValue>),
}

impl RowInput {
    /// Build a positional row from anything convertible into cell values
    pub fn positional<T: Into<CellValue>>(values: impl IntoIterator<Item = T>) -> Self {
        RowInput::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Build a keyed row from (header, value) pairs
    pub fn keyed<K: Into<String>, T: Into<CellValue>>(
        pairs: impl IntoIterator<Item = (K, T)>,
    ) -> Self {
        RowInput::Keyed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Resolve into values ordered like `headers`.
    ///
    /// `row` is the 1-based data row number, used only for error reporting.
    /// Keyed rows may carry extra keys; they are ignored.
    pub fn resolve(self, headers: &[String], row: usize) -> Result<Vec<CellValue>> {
        match self {
            RowInput::Positional(values) => {
                if values.len() != headers.len() {
                    return Err(SheetError::RowShape {
                        row,
                        expected: headers.len(),
                        actual: values.len(),
                    });
                }
                Ok(values)
            }
            RowInput::Keyed(mut map) => headers
                .iter()
                .map(|header| {
                    map.swap_remove(header)
                        .ok_or_else(|| SheetError::MissingField {
                            field: header.clone(),
                            row,
                        })
                })
                .collect(),
        }
    }
}

impl<T: Into<CellValue>> From<Vec<T>> for RowInput {
    fn from(values: Vec<T>) -> Self {
        RowInput::positional(values)
    }
}

impl From<IndexMap<String, CellValue>> for RowInput {
    fn from(map: IndexMap<String, CellValue>) -> Self {
        RowInput::Keyed(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyed_follows_header_order() {
        let row = RowInput::keyed([("Y", 2), ("X", 1)]);
        let values = row.resolve(&headers(&["X", "Y"]), 1).unwrap();
        assert_eq!(values, vec![CellValue::Int(1), CellValue::Int(2)]);
    }

    #[test]
    fn test_keyed_missing_field() {
        let row = RowInput::keyed([("X", 1)]);
        let err = row.resolve(&headers(&["X", "Y"]), 3).unwrap_err();
        assert!(matches!(
            err,
            SheetError::MissingField { ref field, row: 3 } if field == "Y"
        ));
    }

    #[test]
    fn test_keyed_extra_keys_ignored() {
        let row = RowInput::keyed([("X", 1), ("Z", 9)]);
        let values = row.resolve(&headers(&["X"]), 1).unwrap();
        assert_eq!(values, vec![CellValue::Int(1)]);
    }

    #[test]
    fn test_positional_length_checked() {
        let row = RowInput::positional([1, 2, 3]);
        let err = row.resolve(&headers(&["A", "B"]), 2).unwrap_err();
        assert!(matches!(
            err,
            SheetError::RowShape {
                row: 2,
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_deserialize_either_shape() {
        let rows: Vec<RowInput> =
            serde_json::from_str(r#"[["Apples", 10], {"Fruit": "Pears", "2011": 20}]"#).unwrap();
        assert!(matches!(rows[0], RowInput::Positional(ref v) if v.len() == 2));
        assert!(matches!(rows[1], RowInput::Keyed(ref m) if m.len() == 2));
    }
}
