//! Walk through building, clearing and replacing tables in an xlsx file
//!
//! Run with: cargo run --example table_demo -p xltables
//! Set RUST_LOG=debug to see each table being written.

use std::env;
use tracing_subscriber::EnvFilter;
use xltables::{
    clear_rows, new_workbook_with_table, new_workbook_with_tables, replace_table_in_file,
    CellValue, RowInput, TableDescriptor, Workbook,
};

fn fruit_headers() -> Vec<String> {
    ["Fruit", "2011", "2012", "2013", "2014"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn fruit_rows() -> Vec<RowInput> {
    [
        ("Apples", [10000, 5000, 8000, 6000]),
        ("Pears", [2000, 3000, 4000, 5000]),
        ("Bananas", [6000, 6000, 6500, 6000]),
        ("Oranges", [500, 300, 200, 700_000]),
    ]
    .into_iter()
    .map(|(fruit, years)| {
        let mut row = vec![("Fruit".to_string(), CellValue::from(fruit))];
        for (year, value) in ["2011", "2012", "2013", "2014"].iter().zip(years) {
            row.push((year.to_string(), CellValue::from(value)));
        }
        RowInput::keyed(row)
    })
    .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = env::temp_dir().join("table_test.xlsx");

    // One table on a named sheet
    let book = new_workbook_with_table(&fruit_headers(), fruit_rows(), "MY_TABLE", "MY_SHEET")?;
    book.save_as_xlsx(&path)?;
    println!("Wrote MY_TABLE to {}", path.display());

    // Empty the sheet again
    let mut book = Workbook::from_xlsx(&path)?;
    clear_rows(book.get_sheet_mut("MY_SHEET")?);
    book.save_as_xlsx(&path)?;
    println!("Cleared MY_SHEET");

    // Two sheets, one table each
    let book = new_workbook_with_tables(vec![
        TableDescriptor::new(&fruit_headers(), fruit_rows(), "first_table", "first sheet"),
        TableDescriptor::new(&fruit_headers(), fruit_rows(), "second_table", "second sheet"),
    ])?;
    book.save_as_xlsx(&path)?;
    println!("Wrote sheets {:?}", book.sheet_names());

    // Grow the second table in place
    let rows: Vec<RowInput> = (0..4).flat_map(|_| fruit_rows()).collect();
    replace_table_in_file(&path, &fruit_headers(), rows, "second_table")?;

    let book = Workbook::from_xlsx(&path)?;
    if let Some((sheet, table)) = book.find_table("second_table") {
        println!(
            "second_table now spans {} on '{}' ({} data rows)",
            table.reference(),
            sheet.name(),
            table.data_row_count()
        );
    }

    Ok(())
}
