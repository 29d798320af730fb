//! vf-billing - visiting faculty lecture billing
//!
//! This library records the lectures visiting faculty deliver, prices them at
//! a single hourly rate, and aggregates the bills into two reports: a detailed
//! salary ledger grouped by faculty, subject and class, and a faculty-wise
//! honorarium summary for a range of months. Both reports carry a 10% tax
//! deduction rounded to whole rupees.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (faculty, bills, rate, money, months)
//! - `storage`: JSON file storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer with role checks
//! - `reports`: Aggregation engine and report sheets
//! - `export`: CSV, JSON and YAML writers
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `vfbill` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use vf_billing::config::{paths::BillingPaths, settings::Settings};
//! use vf_billing::storage::Storage;
//!
//! let paths = BillingPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BillingError, BillingResult};
