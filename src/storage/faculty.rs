//! Faculty repository for JSON storage
//!
//! Manages loading and saving faculty records to faculty.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BillingError;
use crate::models::{FacultyId, FacultyRecord};

use super::file_io::{read_json, write_json_atomic};

/// Serializable faculty data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct FacultyData {
    faculty: Vec<FacultyRecord>,
}

/// Repository for faculty persistence
pub struct FacultyRepository {
    path: PathBuf,
    data: RwLock<HashMap<FacultyId, FacultyRecord>>,
}

impl FacultyRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<FacultyId, FacultyRecord>>, BillingError> {
        self.data
            .read()
            .map_err(|e| BillingError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<FacultyId, FacultyRecord>>, BillingError> {
        self.data
            .write()
            .map_err(|e| BillingError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load faculty from disk
    pub fn load(&self) -> Result<(), BillingError> {
        let file_data: FacultyData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for record in file_data.faculty {
            data.insert(record.id.clone(), record);
        }

        Ok(())
    }

    /// Save faculty to disk in registration order
    pub fn save(&self) -> Result<(), BillingError> {
        let faculty = self.get_all()?;
        write_json_atomic(&self.path, &FacultyData { faculty })
    }

    pub fn get(&self, id: &FacultyId) -> Result<Option<FacultyRecord>, BillingError> {
        Ok(self.read()?.get(id).cloned())
    }

    /// All faculty, oldest registration first
    pub fn get_all(&self) -> Result<Vec<FacultyRecord>, BillingError> {
        let mut faculty: Vec<_> = self.read()?.values().cloned().collect();
        faculty.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(faculty)
    }

    /// Find a faculty member by email (case-insensitive)
    pub fn find_by_email(&self, email: &str) -> Result<Option<FacultyRecord>, BillingError> {
        Ok(self.read()?.values().find(|f| f.has_email(email)).cloned())
    }

    /// Faculty whose name, id or email contains `query`
    pub fn search(&self, query: &str) -> Result<Vec<FacultyRecord>, BillingError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|f| f.matches_search(query))
            .collect())
    }

    pub fn contains(&self, id: &FacultyId) -> Result<bool, BillingError> {
        Ok(self.read()?.contains_key(id))
    }

    pub fn upsert(&self, record: FacultyRecord) -> Result<(), BillingError> {
        self.write()?.insert(record.id.clone(), record);
        Ok(())
    }

    /// Remove a faculty record, returning it if it existed
    pub fn delete(&self, id: &FacultyId) -> Result<Option<FacultyRecord>, BillingError> {
        Ok(self.write()?.remove(id))
    }

    pub fn count(&self) -> Result<usize, BillingError> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::faculty::fixtures::{profile, record};
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, FacultyRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = FacultyRepository::new(temp_dir.path().join("faculty.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_repo() {
        let (_temp, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_save_load() {
        let (temp, repo) = create_test_repo();
        let asha = record("FAC-1", "Asha Rao");
        repo.upsert(asha.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = FacultyRepository::new(temp.path().join("faculty.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(&asha.id).unwrap(), Some(asha));
    }

    #[test]
    fn test_listing_is_registration_order() {
        let (_temp, repo) = create_test_repo();
        let now = Utc::now();
        let later = FacultyRecord::with_id(
            FacultyId::new("FAC-2"),
            profile("Zed", "zed@example.com"),
            now,
        );
        let earlier = FacultyRecord::with_id(
            FacultyId::new("FAC-9"),
            profile("Amy", "amy@example.com"),
            now - Duration::minutes(5),
        );
        repo.upsert(later).unwrap();
        repo.upsert(earlier).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);
    }

    #[test]
    fn test_find_by_email_ignores_case() {
        let (_temp, repo) = create_test_repo();
        repo.upsert(record("FAC-1", "Asha Rao")).unwrap();

        assert!(repo.find_by_email("FAC-1@Example.com").unwrap().is_some());
        assert!(repo.find_by_email("other@example.com").unwrap().is_none());
    }

    #[test]
    fn test_search_and_delete() {
        let (_temp, repo) = create_test_repo();
        repo.upsert(record("FAC-1", "Asha Rao")).unwrap();
        repo.upsert(record("FAC-2", "Vikram Singh")).unwrap();

        assert_eq!(repo.search("vik").unwrap().len(), 1);

        let removed = repo.delete(&FacultyId::new("FAC-2")).unwrap();
        assert_eq!(removed.map(|f| f.name), Some("Vikram Singh".to_string()));
        assert!(repo.delete(&FacultyId::new("FAC-2")).unwrap().is_none());
        assert!(!repo.contains(&FacultyId::new("FAC-2")).unwrap());
    }
}
