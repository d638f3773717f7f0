//! Plain console output: one line per row, cells separated by spaces

use crate::ReportRow;

/// Formats rows as space-separated lines
pub fn format_plain(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Prints rows to stdout
pub fn print_plain(rows: &[ReportRow]) {
    print!("{}", format_plain(rows));
}
