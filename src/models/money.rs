//! Money type for representing rupee amounts
//!
//! Internally stores amounts in paise (i64) to avoid floating-point drift when
//! summing bills. Provides arithmetic, the hours × rate product, and the
//! whole-rupee percentage used for tax withholding.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const PAISE_PER_RUPEE: i64 = 100;

/// A monetary amount stored as paise (hundredths of a rupee)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from paise
    ///
    /// # Examples
    /// ```
    /// use vf_billing::models::Money;
    /// let amount = Money::from_paise(1050); // ₹10.50
    /// ```
    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    /// Create a Money amount from whole rupees
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees * PAISE_PER_RUPEE)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in paise
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Get the whole rupees portion (truncated toward zero)
    pub const fn rupees(&self) -> i64 {
        self.0 / PAISE_PER_RUPEE
    }

    /// Get the paise portion (0-99)
    pub const fn paise_part(&self) -> i64 {
        (self.0 % PAISE_PER_RUPEE).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Check if the amount has no paise part
    pub const fn is_whole(&self) -> bool {
        self.0 % PAISE_PER_RUPEE == 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Amount as a rupee float, for spreadsheet cells
    pub fn as_rupees_f64(&self) -> f64 {
        self.0 as f64 / PAISE_PER_RUPEE as f64
    }

    /// Multiply a per-hour rate by a number of hours, rounding to the nearest paisa
    pub fn times_hours(&self, hours: f64) -> Self {
        Self((self.0 as f64 * hours).round() as i64)
    }

    /// `percent`% of this amount rounded to a whole rupee, halves away from zero
    ///
    /// ```
    /// use vf_billing::models::Money;
    /// assert_eq!(Money::from_rupees(4505).percent_whole_rupees(10), Money::from_rupees(451));
    /// ```
    pub fn percent_whole_rupees(&self, percent: i64) -> Self {
        // paise * percent / 100 gives paise, a further / 100 gives rupees
        let rupees = div_round_half_away(
            i128::from(self.0) * i128::from(percent),
            i128::from(100 * PAISE_PER_RUPEE),
        );
        Self(saturate(rupees.saturating_mul(i128::from(PAISE_PER_RUPEE))))
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "500", "500.5", "500.50", "₹500", "Rs. 500", "-12.25"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let s = s
            .strip_prefix('₹')
            .or_else(|| s.strip_prefix("Rs."))
            .or_else(|| s.strip_prefix("Rs"))
            .unwrap_or(s)
            .trim();

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if s.is_empty() || s == "." || s.starts_with(['-', '+']) {
            return Err(invalid());
        }

        let paise = if let Some((whole, frac)) = s.split_once('.') {
            if !digits_only(whole) || !digits_only(frac) {
                return Err(invalid());
            }
            let rupees: i64 = if whole.is_empty() {
                0
            } else {
                whole.parse().map_err(|_| invalid())?
            };
            let paise: i64 = match frac.len() {
                0 => 0,
                1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => frac[..2].parse().map_err(|_| invalid())?,
            };
            rupees
                .checked_mul(PAISE_PER_RUPEE)
                .and_then(|p| p.checked_add(paise))
                .ok_or_else(invalid)?
        } else {
            if !digits_only(s) {
                return Err(invalid());
            }
            s.parse::<i64>()
                .ok()
                .and_then(|r| r.checked_mul(PAISE_PER_RUPEE))
                .ok_or_else(invalid)?
        };

        Ok(Self(if negative { -paise } else { paise }))
    }

    /// Format with a currency symbol, dropping ".00" for whole amounts
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        if self.is_whole() {
            format!("{}{}{}", sign, symbol, self.rupees().abs())
        } else {
            format!(
                "{}{}{}.{:02}",
                sign,
                symbol,
                self.rupees().abs(),
                self.paise_part()
            )
        }
    }

    /// Plain number without symbol ("4500", "4500.50")
    pub fn format_plain(&self) -> String {
        self.format_with_symbol("")
    }
}

fn div_round_half_away(numerator: i128, denominator: i128) -> i128 {
    let half = denominator / 2;
    if numerator >= 0 {
        (numerator + half) / denominator
    } else {
        -((-numerator + half) / denominator)
    }
}

fn saturate(paise: i128) -> i64 {
    i64::try_from(paise).unwrap_or(if paise < 0 { i64::MIN } else { i64::MAX })
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-₹{}.{:02}", self.rupees().abs(), self.paise_part())
        } else {
            write!(f, "₹{}.{:02}", self.rupees(), self.paise_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
}
