//! Export module for vf-billing
//!
//! - CSV: report sheets and the faculty directory (spreadsheet-compatible)
//! - JSON: machine-readable full data export
//! - YAML: human-readable full data export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_faculty_csv, faculty_directory_sheet, write_sheet_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
