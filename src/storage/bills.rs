//! Bill repository for JSON storage
//!
//! Manages loading and saving bill entries to bills.json, with an index
//! from faculty id to that faculty's bills.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BillingError;
use crate::models::{BillEntry, BillId, FacultyId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable bill data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BillData {
    bills: Vec<BillEntry>,
}

/// Repository for bill persistence with a per-faculty index
pub struct BillRepository {
    path: PathBuf,
    data: RwLock<HashMap<BillId, BillEntry>>,
    /// Index: faculty_id -> bill ids
    by_faculty: RwLock<HashMap<FacultyId, Vec<BillId>>>,
}

fn lock_err(e: impl std::fmt::Display) -> BillingError {
    BillingError::Storage(format!("Failed to acquire lock: {}", e))
}

fn creation_order(bills: &mut [BillEntry]) {
    bills.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}

impl BillRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_faculty: RwLock::new(HashMap::new()),
        }
    }

    /// Load bills from disk and rebuild the faculty index
    pub fn load(&self) -> Result<(), BillingError> {
        let file_data: BillData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_faculty = self.by_faculty.write().map_err(lock_err)?;
        data.clear();
        by_faculty.clear();

        for bill in file_data.bills {
            by_faculty
                .entry(bill.faculty_id.clone())
                .or_default()
                .push(bill.id);
            data.insert(bill.id, bill);
        }

        Ok(())
    }

    /// Save bills to disk in creation order
    pub fn save(&self) -> Result<(), BillingError> {
        let bills = self.get_all()?;
        write_json_atomic(&self.path, &BillData { bills })
    }

    pub fn get(&self, id: BillId) -> Result<Option<BillEntry>, BillingError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    /// All bills, oldest first
    pub fn get_all(&self) -> Result<Vec<BillEntry>, BillingError> {
        let data = self.data.read().map_err(lock_err)?;
        let mut bills: Vec<_> = data.values().cloned().collect();
        creation_order(&mut bills);
        Ok(bills)
    }

    /// Bills belonging to one faculty member, oldest first
    pub fn get_by_faculty(&self, faculty_id: &FacultyId) -> Result<Vec<BillEntry>, BillingError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_faculty = self.by_faculty.read().map_err(lock_err)?;

        let mut bills: Vec<_> = by_faculty
            .get(faculty_id)
            .map(|ids| ids.iter().filter_map(|id| data.get(id).cloned()).collect())
            .unwrap_or_default();
        creation_order(&mut bills);
        Ok(bills)
    }

    /// Insert or replace a bill
    pub fn upsert(&self, bill: BillEntry) -> Result<(), BillingError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_faculty = self.by_faculty.write().map_err(lock_err)?;

        if let Some(old) = data.get(&bill.id) {
            if let Some(ids) = by_faculty.get_mut(&old.faculty_id) {
                ids.retain(|id| *id != bill.id);
            }
        }
        by_faculty
            .entry(bill.faculty_id.clone())
            .or_default()
            .push(bill.id);
        data.insert(bill.id, bill);

        Ok(())
    }

    /// Remove every bill of a faculty member, returning the removed bills
    pub fn delete_by_faculty(&self, faculty_id: &FacultyId) -> Result<Vec<BillEntry>, BillingError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_faculty = self.by_faculty.write().map_err(lock_err)?;

        let mut removed: Vec<_> = by_faculty
            .remove(faculty_id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| data.remove(&id))
            .collect();
        creation_order(&mut removed);
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, BillingError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.len())
    }
}
