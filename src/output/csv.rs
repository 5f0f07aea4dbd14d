//! CSV dump of the report rows to stdout.

use crate::processing::{count_rows, ReportLine};
use colored::Colorize;

/// Print report lines as CSV; separators print as empty lines.
pub fn print_report(lines: &[ReportLine]) {
    log::info!("#Start print_report() rows={}", count_rows(lines));
    println!(
        r#"{subnet},{rule},{source},{action},{ports}"#,
        subnet = format_field("subnet", 40),
        rule = format_field("rule", 30),
        source = format_field("source", 40),
        action = format_field("action", 8),
        ports = format_field("ports", 12),
    );
    for line in lines {
        match line {
            ReportLine::Row(row) => println!("{}", csv_line(row.cells(), &[40, 30, 40, 8, 12])),
            ReportLine::Separator => println!(),
        }
    }
    println!(
        "#{}# {} rows, sources resolved to subnet names where the range is a known subnet",
        "NOTE".on_blue(),
        count_rows(lines)
    );
}

fn csv_line(cells: [&str; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format_field(cell, *width))
        .collect::<Vec<String>>()
        .join(",")
}

/// Quote a value for CSV and right-align it to `width`.
///
/// Embedded double quotes are doubled.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let escaped = value.to_string().replace('"', "\"\"");
    let quoted = format!("\"{escaped}\"");

    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}
