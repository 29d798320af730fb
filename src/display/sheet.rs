//! Terminal rendering of report sheets
//!
//! Heading rows print as plain lines; the header and everything after it
//! become a `tabled` table with numeric columns right-aligned.

use tabled::builder::Builder;
use tabled::settings::{object::Columns, Alignment, Style};

use crate::reports::{RowKind, Sheet};

/// Render a sheet for the terminal
pub fn render_sheet(sheet: &Sheet) -> String {
    let mut output = String::new();
    let mut builder = Builder::default();
    let mut in_table = false;

    for row in sheet.rows() {
        match row.kind {
            RowKind::Title => {
                output.push_str(&row.cell(0).to_string());
                output.push('\n');
            }
            RowKind::Blank if !in_table => {}
            RowKind::Header => {
                in_table = true;
                builder.push_record(row.values());
            }
            _ => builder.push_record(row.values()),
        }
    }

    if !in_table {
        return output;
    }

    let mut table = builder.build();
    table.with(Style::psql());
    for index in numeric_columns(sheet) {
        table.modify(Columns::single(index), Alignment::right());
    }

    if !output.is_empty() {
        output.push('\n');
    }
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

fn numeric_columns(sheet: &Sheet) -> Vec<usize> {
    (0..sheet.column_count())
        .filter(|&index| {
            sheet
                .rows_of(RowKind::Data)
                .any(|row| row.cell(index).as_f64().is_some())
        })
        .collect()
}
