//! Faculty model
//!
//! Profile and payment details for one visiting faculty member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::FacultyId;

/// Registration details supplied by the faculty member or an admin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub bank_account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub pan_number: String,
    pub aadhar_number: String,
}

impl FacultyProfile {
    /// Trim surrounding whitespace from every field
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            bank_account_number: self.bank_account_number.trim().to_string(),
            ifsc_code: self.ifsc_code.trim().to_uppercase(),
            bank_name: self.bank_name.trim().to_string(),
            pan_number: self.pan_number.trim().to_uppercase(),
            aadhar_number: self.aadhar_number.trim().to_string(),
        }
    }

    /// Validate field shapes
    pub fn validate(&self) -> Result<(), FacultyValidationError> {
        if self.name.trim().is_empty() {
            return Err(FacultyValidationError::EmptyName);
        }
        if !self.email.contains('@') {
            return Err(FacultyValidationError::InvalidEmail(self.email.clone()));
        }
        if self.phone.chars().count() < 10 {
            return Err(FacultyValidationError::InvalidPhone);
        }
        if self.bank_account_number.chars().count() < 9 {
            return Err(FacultyValidationError::InvalidBankAccount);
        }
        if self.ifsc_code.chars().count() != 11 {
            return Err(FacultyValidationError::InvalidIfsc);
        }
        if self.bank_name.trim().is_empty() {
            return Err(FacultyValidationError::EmptyBankName);
        }
        if self.pan_number.chars().count() != 10 {
            return Err(FacultyValidationError::InvalidPan);
        }
        if self.aadhar_number.chars().count() != 12 {
            return Err(FacultyValidationError::InvalidAadhar);
        }
        Ok(())
    }
}

/// A registered faculty member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacultyRecord {
    /// Unique, immutable identifier
    pub id: FacultyId,

    pub name: String,
    pub email: String,
    pub phone: String,
    pub bank_account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub pan_number: String,
    pub aadhar_number: String,

    /// Argon2 hash of the login secret, if one was set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_hash: Option<String>,

    /// When the faculty member registered
    pub created_at: DateTime<Utc>,
}

impl FacultyRecord {
    /// Create a record from a profile, stamping id and creation time
    pub fn new(profile: FacultyProfile) -> Self {
        let now = Utc::now();
        Self::with_id(FacultyId::from_timestamp(now), profile, now)
    }

    /// Create a record with an explicit identifier
    pub fn with_id(id: FacultyId, profile: FacultyProfile, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            bank_account_number: profile.bank_account_number,
            ifsc_code: profile.ifsc_code,
            bank_name: profile.bank_name,
            pan_number: profile.pan_number,
            aadhar_number: profile.aadhar_number,
            secret_hash: None,
            created_at,
        }
    }

    /// Whether a login secret has been set
    pub fn has_secret(&self) -> bool {
        self.secret_hash.is_some()
    }

    /// Case-insensitive match on name, id, or email
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.id.as_str().to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }

    /// Whether the email matches, ignoring case
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

impl fmt::Display for FacultyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Validation errors for faculty profiles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FacultyValidationError {
    #[error("Name is required")]
    EmptyName,
    #[error("Valid email is required (got '{0}')")]
    InvalidEmail(String),
    #[error("Valid phone number is required")]
    InvalidPhone,
    #[error("Valid bank account number is required")]
    InvalidBankAccount,
    #[error("IFSC code must be 11 characters")]
    InvalidIfsc,
    #[error("Bank name is required")]
    EmptyBankName,
    #[error("PAN number must be 10 characters")]
    InvalidPan,
    #[error("Aadhar number must be 12 digits")]
    InvalidAadhar,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A profile that passes validation
    pub fn profile(name: &str, email: &str) -> FacultyProfile {
        FacultyProfile {
            name: name.to_string(),
            email: email.to_string(),
            phone: "9876543210".to_string(),
            bank_account_number: "123456789012".to_string(),
            ifsc_code: "SBIN0001234".to_string(),
            bank_name: "State Bank of India".to_string(),
            pan_number: "ABCDE1234F".to_string(),
            aadhar_number: "123412341234".to_string(),
        }
    }

    /// A record with a fixed identifier
    pub fn record(id: &str, name: &str) -> FacultyRecord {
        let email = format!("{}@example.com", id.to_lowercase());
        FacultyRecord::with_id(FacultyId::new(id), profile(name, &email), Utc::now())
    }
}
