//! Personal summary of honorarium
//!
//! One row per faculty member with their summed amount over a month range,
//! followed by a TOTAL row.

use std::io::Write;

use crate::config::ReportHeadings;
use crate::error::BillingResult;
use crate::models::{BillEntry, FacultyRecord, MonthRange, User};
use crate::services::{BillFilter, BillService};
use crate::storage::Storage;

use super::aggregate::{group_for_personal_summary, PeriodTotals, Totals};
use super::sheet::{Cell, Column, RowKind, Sheet};

pub const SUMMARY_COLUMNS: [Column; 7] = [
    Column { title: "S.No", width: 8 },
    Column { title: "Name of Faculty", width: 25 },
    Column { title: "Bank Details", width: 15 },
    Column { title: "PAN Number", width: 15 },
    Column { title: "Amount Paid (in Rupees)", width: 22 },
    Column { title: "TAX Deduction (10%)", width: 20 },
    Column { title: "Total Pay Amount", width: 18 },
];

/// Faculty-wise honorarium summary for a period
#[derive(Debug, Clone)]
pub struct PersonalSummaryReport {
    pub headings: ReportHeadings,
    pub period: PeriodTotals,
}

impl PersonalSummaryReport {
    pub fn build(
        bills: &[BillEntry],
        faculty: &[FacultyRecord],
        headings: &ReportHeadings,
        range: MonthRange,
    ) -> Self {
        Self {
            headings: headings.clone(),
            period: group_for_personal_summary(bills, faculty, range),
        }
    }

    /// Build the summary from the bills visible to `user`
    pub fn generate(
        storage: &Storage,
        user: &User,
        headings: &ReportHeadings,
        range: MonthRange,
    ) -> BillingResult<Self> {
        let filter = BillFilter {
            year: Some(range.year),
            ..BillFilter::default()
        };
        let bills = BillService::new(storage).list(user, &filter)?;
        let faculty = storage.faculty.get_all()?;
        Ok(Self::build(&bills, &faculty, headings, range))
    }

    pub fn grand_total(&self) -> Totals {
        self.period.grand_total
    }

    pub fn is_empty(&self) -> bool {
        self.period.faculty.is_empty()
    }

    /// Lay the summary out as a 7-column sheet
    pub fn to_sheet(&self) -> Sheet {
        let range = &self.period.range;
        let mut sheet = Sheet::new("Personal Summary", &SUMMARY_COLUMNS);
        sheet.push_title(&self.headings.summary_organization);
        sheet.push_title("Summary of Honorarium of Visiting Faculty");
        sheet.push_title(format!("for the Period of {}", range.label()));
        sheet.push_title(&self.headings.summary_bank);
        sheet.push_blank();
        sheet.push_header();

        for (serial, row) in (1..).zip(&self.period.faculty) {
            sheet.push_row(
                RowKind::Data,
                vec![
                    Cell::Int(serial),
                    Cell::Text(row.name.to_uppercase()),
                    Cell::text(&row.bank_name),
                    Cell::text(&row.pan_number),
                    Cell::Money(row.totals.amount),
                    Cell::Money(row.totals.tax),
                    Cell::Money(row.totals.pay),
                ],
            );
        }

        let total = self.period.grand_total;
        sheet.push_row(
            RowKind::Total,
            vec![
                Cell::text("TOTAL"),
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Money(total.amount),
                Cell::Money(total.tax),
                Cell::Money(total.pay),
            ],
        );

        sheet
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = crate::display::render_sheet(&self.to_sheet());
        output.push('\n');
        output.push_str(&format!(
            "{} faculty, {} bills\n",
            self.period.faculty.len(),
            self.period.faculty.iter().map(|f| f.bill_count).sum::<usize>()
        ));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> BillingResult<()> {
        crate::export::write_sheet_csv(&self.to_sheet(), writer)
    }
}
