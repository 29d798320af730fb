//! Acting user and role
//!
//! Faculty users see only their own bills. Admins see everything and are the
//! only role allowed to change statuses, the rate, or the faculty set.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::faculty::FacultyRecord;
use super::ids::FacultyId;

/// Role of the acting user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Faculty,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Faculty => write!(f, "faculty"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// The user on whose behalf a command runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// The local administrator
    pub fn admin() -> Self {
        Self {
            id: "admin-001".to_string(),
            name: "Admin".to_string(),
            email: "admin@billing.local".to_string(),
            role: Role::Admin,
        }
    }

    /// A faculty session for a registered faculty member
    pub fn faculty(record: &FacultyRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: Role::Faculty,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The faculty id this user is scoped to, if any
    pub fn faculty_scope(&self) -> Option<FacultyId> {
        match self.role {
            Role::Faculty => Some(FacultyId::new(self.id.clone())),
            Role::Admin => None,
        }
    }
}
