//! Core data models for vf-billing
//!
//! Faculty records, bill entries, the hourly rate, the acting user, and the
//! month/money value types they are built from.

pub mod bill;
pub mod faculty;
pub mod ids;
pub mod money;
pub mod period;
pub mod rate;
pub mod user;

pub use bill::{parse_dates, BillDraft, BillEntry, BillStatus, BillValidationError};
pub use faculty::{FacultyProfile, FacultyRecord, FacultyValidationError};
pub use ids::{BillId, FacultyId};
pub use money::{Money, MoneyParseError};
pub use period::{month_year_label, Month, MonthRange, PeriodError};
pub use rate::{RateConfig, RateValidationError};
pub use user::{Role, User};
