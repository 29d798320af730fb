//! Configuration module for vf-billing
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence (report headings, default rate, log level)

pub mod paths;
pub mod settings;

pub use paths::BillingPaths;
pub use settings::{ReportHeadings, Settings};
