//! Aligned table output

use crate::ReportRow;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{CellAlignment, Table};

/// Formats rows as a left-aligned table, first row as header
pub fn format_table(rows: &[ReportRow]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_header(header.clone());
    for row in body {
        table.add_row(row.clone());
    }
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Left);
    }

    table.to_string()
}

/// Prints rows as a table to stdout
pub fn print_table(rows: &[ReportRow]) {
    println!("{}", format_table(rows));
}
