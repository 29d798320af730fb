//! Bill entry model
//!
//! One billable teaching record. The amount is computed once from the hours
//! and the rate in force at creation, then never recomputed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::faculty::FacultyRecord;
use super::ids::{BillId, FacultyId};
use super::money::Money;
use super::period::Month;

/// Most hours one bill can claim: every hour of a 31-day month
pub const MAX_BILL_HOURS: f64 = 744.0;

/// Largest amount a single bill may carry (₹1 crore)
pub const MAX_BILL_AMOUNT: Money = Money::from_rupees(10_000_000);

/// Payment status of a bill
///
/// Any status may be set to any other; no transition order is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Approved,
    Paid,
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Paid => write!(f, "paid"),
        }
    }
}

impl FromStr for BillStatus {
    type Err = BillValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "paid" => Ok(Self::Paid),
            other => Err(BillValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Lecture details submitted for a new bill
#[derive(Debug, Clone, PartialEq)]
pub struct BillDraft {
    pub class_name: String,
    pub subject: String,
    pub dates: Vec<String>,
    pub total_hours: f64,
    pub month: Month,
    pub year: i32,
}

impl BillDraft {
    /// Validate the draft before a bill is created from it
    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.class_name.trim().is_empty() {
            return Err(BillValidationError::EmptyClassName);
        }
        if self.subject.trim().is_empty() {
            return Err(BillValidationError::EmptySubject);
        }
        if self.dates.iter().all(|d| d.trim().is_empty()) {
            return Err(BillValidationError::NoDates);
        }
        if !self.total_hours.is_finite()
            || self.total_hours <= 0.0
            || self.total_hours > MAX_BILL_HOURS
            || !has_at_most_four_decimals(self.total_hours)
        {
            return Err(BillValidationError::InvalidHours(self.total_hours));
        }
        Ok(())
    }

    /// The amount this draft bills at `rate_per_hour`, bounded by [`MAX_BILL_AMOUNT`]
    pub fn amount_at(&self, rate_per_hour: Money) -> Result<Money, BillValidationError> {
        let amount = rate_per_hour.times_hours(self.total_hours);
        if amount > MAX_BILL_AMOUNT {
            return Err(BillValidationError::AmountTooLarge(amount));
        }
        Ok(amount)
    }
}

fn has_at_most_four_decimals(hours: f64) -> bool {
    let scaled = hours * 10_000.0;
    (scaled - scaled.round()).abs() < 1e-6
}

/// Split a comma-separated list of lecture date labels ("1st, 5th, 10th")
pub fn parse_dates(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

/// A billable teaching record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillEntry {
    /// Unique identifier
    pub id: BillId,

    /// Owning faculty member
    pub faculty_id: FacultyId,

    /// Faculty name at creation time (not re-synced)
    pub faculty_name: String,

    pub class_name: String,
    pub subject: String,

    /// Free-text lecture date labels
    #[serde(default)]
    pub dates: Vec<String>,

    pub total_hours: f64,

    /// Rate snapshot at creation
    pub rate_per_hour: Money,

    /// hours × rate, fixed at creation
    pub total_amount: Money,

    pub month: Month,
    pub year: i32,

    #[serde(default)]
    pub status: BillStatus,

    pub created_at: DateTime<Utc>,
}

impl BillEntry {
    /// Create a pending bill for `faculty` at the given hourly rate
    pub fn new(faculty: &FacultyRecord, draft: BillDraft, rate_per_hour: Money) -> Self {
        let total_amount = rate_per_hour.times_hours(draft.total_hours);
        Self {
            id: BillId::new(),
            faculty_id: faculty.id.clone(),
            faculty_name: faculty.name.clone(),
            class_name: draft.class_name.trim().to_string(),
            subject: draft.subject.trim().to_string(),
            dates: draft
                .dates
                .into_iter()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty())
                .collect(),
            total_hours: draft.total_hours,
            rate_per_hour,
            total_amount,
            month: draft.month,
            year: draft.year,
            status: BillStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Number of lecture date labels recorded
    pub fn lecture_count(&self) -> usize {
        self.dates.len()
    }

    /// Case-insensitive match on faculty name or faculty id
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.faculty_name.to_lowercase().contains(&query)
            || self.faculty_id.as_str().to_lowercase().contains(&query)
    }
}

impl fmt::Display for BillEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} ({})",
            self.faculty_name, self.subject, self.month, self.year, self.total_amount, self.status
        )
    }
}

/// Validation errors for bills
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BillValidationError {
    #[error("Class name is required")]
    EmptyClassName,
    #[error("Subject is required")]
    EmptySubject,
    #[error("Lecture dates are required")]
    NoDates,
    #[error("Total hours must be above 0, at most 744, with up to four decimals (got {0})")]
    InvalidHours(f64),
    #[error("Bill amount {0} exceeds the ₹1,00,00,000 limit")]
    AmountTooLarge(Money),
    #[error("Unknown bill status '{0}' (expected pending, approved or paid)")]
    UnknownStatus(String),
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A valid draft for the given subject/class/month
    pub fn draft(subject: &str, class_name: &str, hours: f64, month: Month, year: i32) -> BillDraft {
        BillDraft {
            class_name: class_name.to_string(),
            subject: subject.to_string(),
            dates: parse_dates("1st, 5th, 10th"),
            total_hours: hours,
            month,
            year,
        }
    }

    /// A bill whose amount is exactly `amount` rupees at a rate of ₹100/hour
    pub fn bill(
        faculty: &FacultyRecord,
        subject: &str,
        class_name: &str,
        amount: i64,
        month: Month,
        year: i32,
    ) -> BillEntry {
        let mut bill = BillEntry::new(
            faculty,
            draft(subject, class_name, amount as f64 / 100.0, month, year),
            Money::from_rupees(100),
        );
        bill.total_amount = Money::from_rupees(amount);
        bill
    }
}
