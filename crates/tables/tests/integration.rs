use xltables::{
    clear_rows, column_label, new_workbook_with_table, new_workbook_with_tables, remove_table,
    replace_table_in_file, write_table, CellValue, RowInput, SheetError, TableDescriptor,
    Workbook,
};
use tempfile::tempdir;

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn fruit_headers() -> Vec<String> {
    headers(&["Fruit", "2011", "2012", "2013", "2014"])
}

fn fruit_row(fruit: &str, values: [i64; 4]) -> RowInput {
    RowInput::keyed([
        ("Fruit", CellValue::from(fruit)),
        ("2011", CellValue::from(values[0])),
        ("2012", CellValue::from(values[1])),
        ("2013", CellValue::from(values[2])),
        ("2014", CellValue::from(values[3])),
    ])
}

fn fruit_rows() -> Vec<RowInput> {
    vec![
        fruit_row("Apples", [10000, 5000, 8000, 6000]),
        fruit_row("Pears", [2000, 3000, 4000, 5000]),
        fruit_row("Bananas", [6000, 6000, 6500, 6000]),
        fruit_row("Oranges", [500, 300, 200, 700_000]),
    ]
}

// ===== Column Labels =====

#[test]
fn test_column_labels_closed_form() {
    for n in 1..=702usize {
        let expected = if n <= 26 {
            char::from(b'A' + (n - 1) as u8).to_string()
        } else {
            let first = (n - 27) / 26;
            let second = (n - 27) % 26;
            format!(
                "{}{}",
                char::from(b'A' + first as u8),
                char::from(b'A' + second as u8)
            )
        };
        assert_eq!(column_label(n).unwrap(), expected, "column {n}");
    }
    assert!(column_label(703).is_err());
}

// ===== Single Table =====

#[test]
fn test_new_workbook_with_table_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roundtrip.xlsx");

    let book = new_workbook_with_table(
        &headers(&["A", "B"]),
        vec![vec![1, 2].into(), vec![3, 4].into()],
        "T",
        "Sheet1",
    )
    .unwrap();
    book.save_as_xlsx(&path).unwrap();

    let loaded = Workbook::from_xlsx(&path).unwrap();
    let sheet = loaded.get_sheet("Sheet1").unwrap();

    assert_eq!(sheet.row_count(), 3);
    assert_eq!(sheet.row(0).unwrap(), &[CellValue::from("A"), CellValue::from("B")]);
    assert_eq!(sheet.row(1).unwrap(), &[CellValue::Int(1), CellValue::Int(2)]);
    assert_eq!(sheet.row(2).unwrap(), &[CellValue::Int(3), CellValue::Int(4)]);
    assert_eq!(sheet.table("T").unwrap().reference(), "A1:B3");
}

#[test]
fn test_keyed_rows_follow_header_order() {
    let book = new_workbook_with_table(
        &headers(&["X", "Y"]),
        vec![RowInput::keyed([("Y", 2), ("X", 1)])],
        "T",
        "Sheet1",
    )
    .unwrap();

    let sheet = book.get_sheet("Sheet1").unwrap();
    assert_eq!(sheet.row(1).unwrap(), &[CellValue::Int(1), CellValue::Int(2)]);
}

#[test]
fn test_missing_field_names_header() {
    let result = new_workbook_with_table(
        &headers(&["X", "Y"]),
        vec![RowInput::keyed([("X", 1)])],
        "T",
        "Sheet1",
    );

    match result {
        Err(SheetError::MissingField { field, row }) => {
            assert_eq!(field, "Y");
            assert_eq!(row, 1);
        }
        other => panic!("expected MissingField, got {other:?}"),
    }
}

#[test]
fn test_fruit_table_shape() {
    let book = new_workbook_with_table(&fruit_headers(), fruit_rows(), "MY_TABLE", "MY_SHEET")
        .unwrap();
    let (sheet, table) = book.find_table("MY_TABLE").unwrap();

    assert_eq!(sheet.name(), "MY_SHEET");
    assert_eq!(table.reference(), "A1:E5");
    assert_eq!(table.data_row_count(), 4);
    assert_eq!(sheet.get_a1("E5").unwrap(), &CellValue::Int(700_000));
}

// ===== Clear Rows =====

#[test]
fn test_clear_rows_on_saved_sheet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("clear.xlsx");

    new_workbook_with_table(&fruit_headers(), fruit_rows(), "MY_TABLE", "MY_SHEET")
        .unwrap()
        .save_as_xlsx(&path)
        .unwrap();

    let mut book = Workbook::from_xlsx(&path).unwrap();
    let sheet = book.get_sheet_mut("MY_SHEET").unwrap();
    clear_rows(sheet);
    assert_eq!(sheet.row_count(), 0);
    clear_rows(sheet);
    assert_eq!(sheet.row_count(), 0);
    assert!(sheet.has_table("MY_TABLE"));
}

// ===== Remove And Rewrite =====

#[test]
fn test_remove_then_rewrite_has_no_residue() {
    let mut book = new_workbook_with_table(&fruit_headers(), fruit_rows(), "MY_TABLE", "MY_SHEET")
        .unwrap();

    let sheet = remove_table(&mut book, "MY_TABLE").unwrap();
    write_table(
        sheet,
        &headers(&["Fruit", "Total"]),
        vec![vec![CellValue::from("Kiwis"), CellValue::from(12)].into()],
        "MY_TABLE",
    )
    .unwrap();

    let (sheet, table) = book.find_table("MY_TABLE").unwrap();
    assert_eq!(table.reference(), "A1:B2");
    assert_eq!(sheet.row_count(), 2);
    assert_eq!(sheet.col_count(), 2);
    assert_eq!(sheet.get_a1("A2").unwrap(), &CellValue::from("Kiwis"));
    assert!(sheet.get_a1("E5").unwrap().is_null());
}

#[test]
fn test_remove_missing_table_leaves_workbook_alone() {
    let mut book = new_workbook_with_table(&fruit_headers(), fruit_rows(), "MY_TABLE", "MY_SHEET")
        .unwrap();

    let err = remove_table(&mut book, "NOPE").unwrap_err();
    assert!(matches!(err, SheetError::TableNotFound { ref name } if name == "NOPE"));

    let sheet = book.get_sheet("MY_SHEET").unwrap();
    assert_eq!(sheet.row_count(), 5);
    assert!(sheet.has_table("MY_TABLE"));
}

// ===== Multiple Tables =====

#[test]
fn test_new_workbook_with_tables_saves_two_sheets() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("multi.xlsx");

    let book = new_workbook_with_tables(vec![
        TableDescriptor::new(&fruit_headers(), fruit_rows(), "first_table", "first sheet"),
        TableDescriptor::new(&fruit_headers(), fruit_rows(), "second_table", "second sheet"),
    ])
    .unwrap();
    assert_eq!(book.sheet_count(), 2);
    book.save_as_xlsx(&path).unwrap();

    let loaded = Workbook::from_xlsx(&path).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["first sheet", "second sheet"]);
    assert_eq!(
        loaded.get_sheet("second sheet").unwrap().table("second_table").unwrap().reference(),
        "A1:E5"
    );
}

#[test]
fn test_new_workbook_with_tables_from_json() {
    let descriptors = TableDescriptor::from_json_str(
        r#"[
            {
                "table_headers": ["Fruit", "2011"],
                "table_rows": [{"Fruit": "Apples", "2011": 10000}, ["Pears", 2000]],
                "sheet_name": "first sheet",
                "table_name": "first_table"
            },
            {
                "table_headers": ["Fruit"],
                "table_rows": [["Bananas"]],
                "table_name": "second_table"
            }
        ]"#,
    )
    .unwrap();

    let book = new_workbook_with_tables(descriptors).unwrap();
    assert_eq!(book.sheet_names(), vec!["first sheet", "Sheet1"]);
    let sheet = book.get_sheet("first sheet").unwrap();
    assert_eq!(sheet.get_a1("B3").unwrap(), &CellValue::Int(2000));
}

// ===== Replace In File =====

#[test]
fn test_replace_table_in_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("replace.xlsx");

    new_workbook_with_tables(vec![
        TableDescriptor::new(&fruit_headers(), fruit_rows(), "first_table", "first sheet"),
        TableDescriptor::new(&fruit_headers(), fruit_rows(), "second_table", "second sheet"),
    ])
    .unwrap()
    .save_as_xlsx(&path)
    .unwrap();

    let mut rows = fruit_rows();
    rows.extend(fruit_rows());
    rows.extend(fruit_rows());
    replace_table_in_file(&path, &fruit_headers(), rows, "second_table").unwrap();

    let loaded = Workbook::from_xlsx(&path).unwrap();
    let (sheet, table) = loaded.find_table("second_table").unwrap();
    assert_eq!(sheet.name(), "second sheet");
    assert_eq!(table.reference(), "A1:E13");
    assert_eq!(sheet.row_count(), 13);
    assert_eq!(sheet.get_a1("A13").unwrap(), &CellValue::from("Oranges"));

    // The other sheet is untouched
    let (first, table) = loaded.find_table("first_table").unwrap();
    assert_eq!(first.name(), "first sheet");
    assert_eq!(table.reference(), "A1:E5");
}

#[test]
fn test_replace_missing_table_does_not_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("untouched.xlsx");

    new_workbook_with_table(&fruit_headers(), fruit_rows(), "MY_TABLE", "MY_SHEET")
        .unwrap()
        .save_as_xlsx(&path)
        .unwrap();
    let before = std::fs::read(&path).unwrap();

    let err = replace_table_in_file(&path, &fruit_headers(), fruit_rows(), "NOPE").unwrap_err();
    assert!(matches!(err, SheetError::TableNotFound { .. }));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_replace_with_bad_row_does_not_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad_row.xlsx");

    new_workbook_with_table(&fruit_headers(), fruit_rows(), "MY_TABLE", "MY_SHEET")
        .unwrap()
        .save_as_xlsx(&path)
        .unwrap();
    let before = std::fs::read(&path).unwrap();

    let rows = vec![RowInput::positional([CellValue::from("Apples")])];
    let err = replace_table_in_file(&path, &fruit_headers(), rows, "MY_TABLE").unwrap_err();
    assert!(matches!(err, SheetError::RowShape { expected: 5, actual: 1, .. }));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}
