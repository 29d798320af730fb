//! Faculty service
//!
//! Registration, lookup, and the cascading delete that removes a faculty
//! member together with every bill they filed.

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::credentials::{hash_secret, verify_secret};
use crate::error::{BillingError, BillingResult};
use crate::models::{BillEntry, FacultyId, FacultyProfile, FacultyRecord, User};
use crate::storage::Storage;

/// Service for faculty management
pub struct FacultyService<'a> {
    storage: &'a Storage,
}

/// What a cascading delete removed
#[derive(Debug, Clone)]
pub struct RemovedFaculty {
    pub faculty: FacultyRecord,
    pub bills: Vec<BillEntry>,
}

impl<'a> FacultyService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new faculty member
    ///
    /// The profile is trimmed and validated, the email must not already be
    /// registered, and an optional secret is stored as an Argon2 hash.
    pub fn register(
        &self,
        profile: FacultyProfile,
        secret: Option<&str>,
    ) -> BillingResult<FacultyRecord> {
        let profile = profile.trimmed();
        profile
            .validate()
            .map_err(|e| BillingError::Validation(e.to_string()))?;

        if self.storage.faculty.find_by_email(&profile.email)?.is_some() {
            return Err(BillingError::Duplicate {
                entity_type: "Faculty",
                identifier: profile.email,
            });
        }

        let secret_hash = secret.map(hash_secret).transpose()?;

        let mut registered_at = Utc::now();
        let mut id = FacultyId::from_timestamp(registered_at);
        while self.storage.faculty.contains(&id)? {
            registered_at += Duration::milliseconds(1);
            id = FacultyId::from_timestamp(registered_at);
        }

        let mut record = FacultyRecord::with_id(id, profile, registered_at);
        record.secret_hash = secret_hash;

        self.storage.faculty.upsert(record.clone())?;
        self.storage.faculty.save()?;
        self.storage.log_create(
            EntityType::Faculty,
            record.id.to_string(),
            Some(record.name.clone()),
            &record,
        )?;

        info!(faculty_id = %record.id, name = %record.name, "faculty registered");
        Ok(record)
    }

    /// Get a faculty member by id
    pub fn get(&self, id: &FacultyId) -> BillingResult<FacultyRecord> {
        self.storage
            .faculty
            .get(id)?
            .ok_or_else(|| BillingError::faculty_not_found(id.as_str()))
    }

    /// All faculty, oldest registration first
    pub fn list(&self) -> BillingResult<Vec<FacultyRecord>> {
        self.storage.faculty.get_all()
    }

    /// Case-insensitive search on name, id or email
    pub fn search(&self, query: &str) -> BillingResult<Vec<FacultyRecord>> {
        let found = self.storage.faculty.search(query)?;
        debug!(query, matches = found.len(), "faculty search");
        Ok(found)
    }

    /// Start a session for a faculty member
    ///
    /// A record with a stored secret requires the matching secret. A record
    /// without one accepts any session.
    pub fn authenticate(&self, id: &FacultyId, secret: Option<&str>) -> BillingResult<User> {
        let record = self.get(id)?;

        if let Some(stored) = &record.secret_hash {
            let secret = secret.ok_or_else(|| {
                BillingError::Forbidden(format!("password required for {}", record.id))
            })?;
            if !verify_secret(secret, stored)? {
                return Err(BillingError::Forbidden(format!(
                    "wrong password for {}",
                    record.id
                )));
            }
        }

        debug!(faculty_id = %record.id, "faculty session started");
        Ok(User::faculty(&record))
    }

    /// Delete a faculty member and every bill that references them
    ///
    /// Admin only. The bills file is written before the faculty file; if
    /// either write fails, both records are put back and the error returned.
    pub fn delete(&self, user: &User, id: &FacultyId) -> BillingResult<RemovedFaculty> {
        if !user.is_admin() {
            return Err(BillingError::Forbidden(
                "only admins can delete faculty".into(),
            ));
        }

        let faculty = self.get(id)?;
        let bills = self.storage.bills.delete_by_faculty(id)?;
        self.storage.faculty.delete(id)?;

        let saved = self
            .storage
            .bills
            .save()
            .and_then(|()| self.storage.faculty.save());
        if let Err(err) = saved {
            self.restore(&faculty, &bills);
            return Err(err);
        }

        let mut entries: Vec<AuditEntry> = bills
            .iter()
            .map(|bill| {
                AuditEntry::delete(
                    EntityType::Bill,
                    bill.id.to_string(),
                    Some(format!("{} / {}", bill.faculty_name, bill.subject)),
                    bill,
                )
            })
            .collect();
        entries.push(AuditEntry::delete(
            EntityType::Faculty,
            faculty.id.to_string(),
            Some(faculty.name.clone()),
            &faculty,
        ));
        self.storage.log_batch(&entries)?;

        info!(
            faculty_id = %faculty.id,
            bills_removed = bills.len(),
            "faculty deleted"
        );
        Ok(RemovedFaculty { faculty, bills })
    }

    /// Undo the in-memory half of a failed delete and rewrite both files
    fn restore(&self, faculty: &FacultyRecord, bills: &[BillEntry]) {
        let restored = self
            .storage
            .faculty
            .upsert(faculty.clone())
            .and_then(|()| {
                bills
                    .iter()
                    .try_for_each(|bill| self.storage.bills.upsert(bill.clone()))
            })
            .and_then(|()| self.storage.bills.save())
            .and_then(|()| self.storage.faculty.save());

        if let Err(err) = restored {
            warn!(faculty_id = %faculty.id, error = %err, "faculty delete rollback incomplete");
        }
    }
}
