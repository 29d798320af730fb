//! Reports module for vf-billing
//!
//! Aggregates bills into the detailed salary ledger and the personal
//! honorarium summary, and lays both out as spreadsheet-style sheets.

pub mod aggregate;
pub mod ledger;
pub mod personal_summary;
pub mod sheet;

pub use aggregate::{
    group_for_ledger, group_for_personal_summary, tax_on, FacultyTotal, LedgerGroup, LedgerLine,
    PeriodTotals, Totals, TAX_PERCENT,
};
pub use ledger::{LedgerReport, LEDGER_COLUMNS};
pub use personal_summary::{PersonalSummaryReport, SUMMARY_COLUMNS};
pub use sheet::{Cell, Column, Merge, RowKind, Sheet, SheetRow};
