//! CSV export
//!
//! Writes report sheets and the faculty directory through the `csv` crate.
//! Every record has the sheet's full column count, so heading rows come out
//! as the heading text followed by empty fields.

use std::io::Write;

use crate::error::{BillingError, BillingResult};
use crate::models::FacultyRecord;
use crate::reports::{Cell, Column, RowKind, Sheet};

const DIRECTORY_COLUMNS: [Column; 9] = [
    Column { title: "Name", width: 20 },
    Column { title: "Email", width: 20 },
    Column { title: "Phone", width: 20 },
    Column { title: "Bank Account", width: 20 },
    Column { title: "IFSC Code", width: 20 },
    Column { title: "Bank Name", width: 20 },
    Column { title: "PAN Number", width: 20 },
    Column { title: "Aadhar Number", width: 20 },
    Column { title: "Registered On", width: 20 },
];

/// Write every row of `sheet` as a CSV record
pub fn write_sheet_csv<W: Write>(sheet: &Sheet, writer: W) -> BillingResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(false)
        .from_writer(writer);

    for row in sheet.rows() {
        csv_writer.write_record(row.values())?;
    }

    csv_writer
        .flush()
        .map_err(|e| BillingError::Export(format!("Failed to flush CSV: {}", e)))
}

/// The faculty directory as a sheet, one row per faculty member
pub fn faculty_directory_sheet(faculty: &[FacultyRecord]) -> Sheet {
    let mut sheet = Sheet::new("Faculty List", &DIRECTORY_COLUMNS);
    sheet.push_header();

    for f in faculty {
        sheet.push_row(
            RowKind::Data,
            vec![
                Cell::text(&f.name),
                Cell::text(&f.email),
                Cell::text(&f.phone),
                Cell::text(&f.bank_account_number),
                Cell::text(&f.ifsc_code),
                Cell::text(&f.bank_name),
                Cell::text(&f.pan_number),
                Cell::text(&f.aadhar_number),
                Cell::Text(f.created_at.format("%d/%m/%Y").to_string()),
            ],
        );
    }

    sheet
}

/// Export the faculty directory to CSV
pub fn export_faculty_csv<W: Write>(faculty: &[FacultyRecord], writer: W) -> BillingResult<()> {
    write_sheet_csv(&faculty_directory_sheet(faculty), writer)
}
