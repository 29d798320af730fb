//! Display formatting for terminal output
//!
//! Formats faculty, bills, statistics and report sheets for the terminal.

pub mod bill;
pub mod faculty;
pub mod sheet;

pub use bill::{format_bill_list, format_bill_stats};
pub use faculty::{format_faculty_details, format_faculty_list};
pub use sheet::render_sheet;
