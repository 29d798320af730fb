//! Detailed salary ledger
//!
//! One block per (faculty, subject, class) group. The first three rows of a
//! block carry the faculty name, then the subject, then the class in the
//! Name/Class column; each block ends with a subtotal row and a blank row.

use std::io::Write;

use crate::config::ReportHeadings;
use crate::error::BillingResult;
use crate::models::{month_year_label, BillEntry, FacultyRecord, Month, User};
use crate::services::{BillFilter, BillService};
use crate::storage::Storage;

use super::aggregate::{group_for_ledger, LedgerGroup, Totals};
use super::sheet::{Cell, Column, RowKind, Sheet};

pub const LEDGER_COLUMNS: [Column; 10] = [
    Column { title: "S.No.", width: 6 },
    Column { title: "Name/Class", width: 25 },
    Column { title: "Month", width: 10 },
    Column { title: "No. of Lectures", width: 15 },
    Column { title: "Rate", width: 8 },
    Column { title: "Amount", width: 10 },
    Column { title: "PAN No.", width: 15 },
    Column { title: "10% Tax Deduction", width: 18 },
    Column { title: "Total Pay Amount", width: 18 },
    Column { title: "Bills ref. page", width: 15 },
];

/// Detailed ledger of grouped bills
#[derive(Debug, Clone)]
pub struct LedgerReport {
    /// Third heading line ("Visiting Faculty Salary Bill 2024")
    pub title: String,
    pub headings: ReportHeadings,
    pub groups: Vec<LedgerGroup>,
    pub total_hours: f64,
    pub grand_total: Totals,
}

impl LedgerReport {
    /// Build a ledger over `bills` in their given order
    pub fn build(
        bills: &[BillEntry],
        faculty: &[FacultyRecord],
        headings: &ReportHeadings,
        title: impl Into<String>,
    ) -> Self {
        let groups = group_for_ledger(bills, faculty);
        let total_hours = groups.iter().map(|g| g.hours).sum();
        let grand_total = groups.iter().map(|g| g.subtotal).sum();

        Self {
            title: title.into(),
            headings: headings.clone(),
            groups,
            total_hours,
            grand_total,
        }
    }

    /// Ledger titled with a year
    pub fn for_year(
        bills: &[BillEntry],
        faculty: &[FacultyRecord],
        headings: &ReportHeadings,
        year: i32,
    ) -> Self {
        Self::build(
            bills,
            faculty,
            headings,
            format!("Visiting Faculty Salary Bill {}", year),
        )
    }

    /// Ledger restricted to one month of one year
    pub fn monthly(
        bills: &[BillEntry],
        faculty: &[FacultyRecord],
        headings: &ReportHeadings,
        month: Month,
        year: i32,
    ) -> Self {
        let in_month: Vec<BillEntry> = bills
            .iter()
            .filter(|b| b.month == month && b.year == year)
            .cloned()
            .collect();
        Self::build(
            &in_month,
            faculty,
            headings,
            format!("Visiting Faculty Salary Bill {} {}", month, year),
        )
    }

    /// Load the bills visible to `user` matching `filter` and build the ledger
    ///
    /// With `monthly` set the ledger is restricted to that month and titled
    /// with it; otherwise the title carries `title_year`.
    pub fn generate(
        storage: &Storage,
        user: &User,
        headings: &ReportHeadings,
        filter: &BillFilter,
        monthly: Option<(Month, i32)>,
        title_year: i32,
    ) -> BillingResult<Self> {
        let bills = BillService::new(storage).list(user, filter)?;
        let faculty = storage.faculty.get_all()?;

        Ok(match monthly {
            Some((month, year)) => Self::monthly(&bills, &faculty, headings, month, year),
            None => Self::for_year(&bills, &faculty, headings, title_year),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Lay the ledger out as a 10-column sheet
    pub fn to_sheet(&self) -> Sheet {
        let mut sheet = Sheet::new("Bills", &LEDGER_COLUMNS);
        sheet.push_title(&self.headings.organization);
        sheet.push_title(&self.headings.department);
        sheet.push_title(&self.title);
        sheet.push_blank();
        sheet.push_header();

        let mut page_ref = 1;
        for (serial, group) in (1..).zip(&self.groups) {
            for (index, line) in group.lines.iter().enumerate() {
                let bill = &line.bill;
                let (serial_cell, name_cell, pan_cell) = match index {
                    0 => (
                        Cell::Int(serial),
                        Cell::text(&group.faculty_name),
                        if group.pan_number.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::text(&group.pan_number)
                        },
                    ),
                    1 => (Cell::Empty, Cell::text(&group.subject), Cell::Empty),
                    2 => (Cell::Empty, Cell::text(&group.class_name), Cell::Empty),
                    _ => (Cell::Empty, Cell::Empty, Cell::Empty),
                };

                sheet.push_row(
                    RowKind::Data,
                    vec![
                        serial_cell,
                        name_cell,
                        Cell::Text(month_year_label(bill.month, bill.year)),
                        Cell::Number(bill.total_hours),
                        Cell::Money(bill.rate_per_hour),
                        Cell::Money(line.totals.amount),
                        pan_cell,
                        Cell::Money(line.totals.tax),
                        Cell::Money(line.totals.pay),
                        Cell::Int(page_ref),
                    ],
                );
                page_ref += 1;
            }

            sheet.push_row(
                RowKind::Subtotal,
                vec![
                    Cell::Empty,
                    Cell::Empty,
                    Cell::Empty,
                    Cell::Number(group.hours),
                    Cell::Empty,
                    Cell::Money(group.subtotal.amount),
                    Cell::Empty,
                    Cell::Money(group.subtotal.tax),
                    Cell::Money(group.subtotal.pay),
                ],
            );
            sheet.push_blank();
        }

        sheet
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = crate::display::render_sheet(&self.to_sheet());
        output.push('\n');
        output.push_str(&format!(
            "Groups: {}  Hours: {}  Amount: {}  Tax: {}  Pay: {}\n",
            self.groups.len(),
            super::sheet::format_quantity(self.total_hours),
            self.grand_total.amount.format_with_symbol(currency_symbol),
            self.grand_total.tax.format_with_symbol(currency_symbol),
            self.grand_total.pay.format_with_symbol(currency_symbol),
        ));
        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> BillingResult<()> {
        crate::export::write_sheet_csv(&self.to_sheet(), writer)
    }
}
