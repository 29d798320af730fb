//! Bill service
//!
//! Bill submission, role-scoped listing, status changes, and the dashboard
//! statistics shown above a bill list.

use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{BillingError, BillingResult};
use crate::models::{BillDraft, BillEntry, BillId, BillStatus, FacultyId, Money, Month, User};
use crate::storage::Storage;

/// Filters applied when listing bills
#[derive(Debug, Clone, Default)]
pub struct BillFilter {
    pub faculty_id: Option<FacultyId>,
    pub month: Option<Month>,
    pub year: Option<i32>,
    /// Matched against faculty name and faculty id
    pub search: Option<String>,
}

impl BillFilter {
    /// Bills for one month of one year
    pub fn period(month: Month, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn matches(&self, bill: &BillEntry) -> bool {
        self.faculty_id.as_ref().map_or(true, |id| &bill.faculty_id == id)
            && self.month.map_or(true, |m| bill.month == m)
            && self.year.map_or(true, |y| bill.year == y)
            && self
                .search
                .as_deref()
                .map_or(true, |q| bill.matches_search(q))
    }
}

/// Totals over a set of bills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BillStats {
    pub bill_count: usize,
    pub total_amount: Money,
    pub pending_count: usize,
    pub pending_amount: Money,
    pub approved_count: usize,
    pub paid_count: usize,
    pub paid_amount: Money,
}

impl BillStats {
    pub fn from_bills<'b>(bills: impl IntoIterator<Item = &'b BillEntry>) -> Self {
        bills.into_iter().fold(Self::default(), |mut stats, bill| {
            stats.bill_count += 1;
            stats.total_amount += bill.total_amount;
            match bill.status {
                BillStatus::Pending => {
                    stats.pending_count += 1;
                    stats.pending_amount += bill.total_amount;
                }
                BillStatus::Approved => stats.approved_count += 1,
                BillStatus::Paid => {
                    stats.paid_count += 1;
                    stats.paid_amount += bill.total_amount;
                }
            }
            stats
        })
    }
}

/// Service for bill management
pub struct BillService<'a> {
    storage: &'a Storage,
}

impl<'a> BillService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Submit a bill for `faculty_id` at `rate_per_hour`
    ///
    /// Faculty users may only submit their own bills.
    pub fn create(
        &self,
        user: &User,
        faculty_id: &FacultyId,
        draft: BillDraft,
        rate_per_hour: Money,
    ) -> BillingResult<BillEntry> {
        if let Some(scope) = user.faculty_scope() {
            if &scope != faculty_id {
                return Err(BillingError::Forbidden(
                    "faculty can only submit their own bills".into(),
                ));
            }
        }

        draft
            .validate()
            .map_err(|e| BillingError::Validation(e.to_string()))?;
        if !rate_per_hour.is_positive() {
            return Err(BillingError::Validation(format!(
                "Hourly rate must be positive (got {})",
                rate_per_hour
            )));
        }
        draft
            .amount_at(rate_per_hour)
            .map_err(|e| BillingError::Validation(e.to_string()))?;

        let faculty = self
            .storage
            .faculty
            .get(faculty_id)?
            .ok_or_else(|| BillingError::faculty_not_found(faculty_id.as_str()))?;

        let bill = BillEntry::new(&faculty, draft, rate_per_hour);

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;
        self.storage.log_create(
            EntityType::Bill,
            bill.id.to_string(),
            Some(format!("{} / {}", bill.faculty_name, bill.subject)),
            &bill,
        )?;

        info!(
            bill_id = %bill.id.short(),
            faculty_id = %bill.faculty_id,
            amount = %bill.total_amount,
            "bill submitted"
        );
        Ok(bill)
    }

    /// Get one bill, respecting the user's visibility
    pub fn get(&self, user: &User, id: BillId) -> BillingResult<BillEntry> {
        let bill = self
            .storage
            .bills
            .get(id)?
            .ok_or_else(|| BillingError::bill_not_found(id.short()))?;

        match user.faculty_scope() {
            Some(scope) if scope != bill.faculty_id => {
                Err(BillingError::bill_not_found(id.short()))
            }
            _ => Ok(bill),
        }
    }

    /// Bills visible to `user` that match `filter`, oldest first
    ///
    /// A faculty user's own id always overrides the filter's faculty id.
    pub fn list(&self, user: &User, filter: &BillFilter) -> BillingResult<Vec<BillEntry>> {
        let mut filter = filter.clone();
        if let Some(scope) = user.faculty_scope() {
            filter.faculty_id = Some(scope);
        }

        let bills = match &filter.faculty_id {
            Some(id) => self.storage.bills.get_by_faculty(id)?,
            None => self.storage.bills.get_all()?,
        };

        let visible: Vec<_> = bills.into_iter().filter(|b| filter.matches(b)).collect();
        debug!(role = %user.role, count = visible.len(), "bills listed");
        Ok(visible)
    }

    /// Set a bill's status (admin only)
    pub fn update_status(
        &self,
        user: &User,
        id: BillId,
        status: BillStatus,
    ) -> BillingResult<BillEntry> {
        if !user.is_admin() {
            return Err(BillingError::Forbidden(
                "only admins can change bill status".into(),
            ));
        }

        let before = self.get(user, id)?;
        if before.status == status {
            return Ok(before);
        }

        let mut bill = before.clone();
        bill.status = status;

        self.storage.bills.upsert(bill.clone())?;
        self.storage.bills.save()?;
        self.storage.log_update(
            EntityType::Bill,
            bill.id.to_string(),
            Some(format!("{} / {}", bill.faculty_name, bill.subject)),
            &before,
            &bill,
        )?;

        info!(bill_id = %bill.id.short(), from = %before.status, to = %status, "bill status changed");
        Ok(bill)
    }

    /// Statistics over the bills visible to `user`
    pub fn stats(&self, user: &User, filter: &BillFilter) -> BillingResult<BillStats> {
        let bills = self.list(user, filter)?;
        Ok(BillStats::from_bills(&bills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::BillingPaths;
    use crate::models::bill::fixtures::draft;
    use crate::models::faculty::fixtures::record;
    use crate::models::FacultyRecord;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, FacultyRecord, FacultyRecord) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BillingPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        let asha = record("FAC-1", "Asha Rao");
        let vikram = record("FAC-2", "Vikram Singh");
        storage.faculty.upsert(asha.clone()).unwrap();
        storage.faculty.upsert(vikram.clone()).unwrap();
        (temp_dir, storage, asha, vikram)
    }

    fn rate() -> Money {
        Money::from_rupees(500)
    }

    #[test]
    fn test_create_snapshots_rate() {
        let (_temp, storage, asha, _) = create_test_storage();
        let service = BillService::new(&storage);

        let bill = service
            .create(
                &User::faculty(&asha),
                &asha.id,
                draft("DS", "Theory", 9.0, Month::March, 2024),
                rate(),
            )
            .unwrap();

        assert_eq!(bill.total_amount, Money::from_rupees(4500));
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(storage.bills.count().unwrap(), 1);
    }

    #[test]
    fn test_create_for_other_faculty_forbidden() {
        let (_temp, storage, asha, vikram) = create_test_storage();
        let service = BillService::new(&storage);

        let err = service
            .create(
                &User::faculty(&asha),
                &vikram.id,
                draft("DS", "Theory", 1.0, Month::March, 2024),
                rate(),
            )
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_create_validation() {
        let (_temp, storage, asha, _) = create_test_storage();
        let service = BillService::new(&storage);

        let err = service
            .create(
                &User::admin(),
                &asha.id,
                draft("DS", "Theory", 0.0, Month::March, 2024),
                rate(),
            )
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(
                &User::admin(),
                &FacultyId::new("FAC-404"),
                draft("DS", "Theory", 2.0, Month::March, 2024),
                rate(),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_create_rejects_oversized_bills() {
        let (_temp, storage, asha, _) = create_test_storage();
        let service = BillService::new(&storage);

        let err = service
            .create(
                &User::admin(),
                &asha.id,
                draft("DS", "Theory", 1e20, Month::March, 2024),
                rate(),
            )
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(
                &User::admin(),
                &asha.id,
                draft("DS", "Theory", 744.0, Month::March, 2024),
                Money::from_rupees(100_000),
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.bills.count().unwrap(), 0);
    }

    #[test]
    fn test_list_is_scoped_for_faculty() {
        let (_temp, storage, asha, vikram) = create_test_storage();
        let service = BillService::new(&storage);
        let admin = User::admin();
        service
            .create(&admin, &asha.id, draft("DS", "Theory", 2.0, Month::March, 2024), rate())
            .unwrap();
        service
            .create(&admin, &vikram.id, draft("OS", "Lab", 3.0, Month::March, 2024), rate())
            .unwrap();

        assert_eq!(service.list(&admin, &BillFilter::default()).unwrap().len(), 2);

        let mut sneaky = BillFilter::default();
        sneaky.faculty_id = Some(vikram.id.clone());
        let own = service.list(&User::faculty(&asha), &sneaky).unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].faculty_id, asha.id);
    }

    #[test]
    fn test_list_filters() {
        let (_temp, storage, asha, vikram) = create_test_storage();
        let service = BillService::new(&storage);
        let admin = User::admin();
        service
            .create(&admin, &asha.id, draft("DS", "Theory", 2.0, Month::March, 2024), rate())
            .unwrap();
        service
            .create(&admin, &asha.id, draft("DS", "Theory", 2.0, Month::April, 2024), rate())
            .unwrap();
        service
            .create(&admin, &vikram.id, draft("OS", "Lab", 2.0, Month::March, 2023), rate())
            .unwrap();

        let march_2024 = service
            .list(&admin, &BillFilter::period(Month::March, 2024))
            .unwrap();
        assert_eq!(march_2024.len(), 1);

        let search = BillFilter {
            search: Some("vikram".into()),
            ..BillFilter::default()
        };
        assert_eq!(service.list(&admin, &search).unwrap().len(), 1);
    }

    #[test]
    fn test_update_status() {
        let (_temp, storage, asha, _) = create_test_storage();
        let service = BillService::new(&storage);
        let admin = User::admin();
        let bill = service
            .create(&admin, &asha.id, draft("DS", "Theory", 2.0, Month::March, 2024), rate())
            .unwrap();

        let updated = service
            .update_status(&admin, bill.id, BillStatus::Paid)
            .unwrap();
        assert_eq!(updated.status, BillStatus::Paid);
        assert_eq!(updated.total_amount, bill.total_amount);

        let back = service
            .update_status(&admin, bill.id, BillStatus::Pending)
            .unwrap();
        assert_eq!(back.status, BillStatus::Pending);

        let log = storage.audit().read_all().unwrap();
        let last = log.last().unwrap();
        assert_eq!(last.operation, Operation::Update);
        assert_eq!(
            last.diff_summary.as_deref(),
            Some("status: \"paid\" -> \"pending\"")
        );
    }

    #[test]
    fn test_update_status_requires_admin() {
        let (_temp, storage, asha, _) = create_test_storage();
        let service = BillService::new(&storage);
        let bill = service
            .create(
                &User::admin(),
                &asha.id,
                draft("DS", "Theory", 2.0, Month::March, 2024),
                rate(),
            )
            .unwrap();

        let err = service
            .update_status(&User::faculty(&asha), bill.id, BillStatus::Paid)
            .unwrap_err();
        assert!(err.is_forbidden());
    }

    #[test]
    fn test_stats() {
        let (_temp, storage, asha, _) = create_test_storage();
        let service = BillService::new(&storage);
        let admin = User::admin();
        let first = service
            .create(&admin, &asha.id, draft("DS", "Theory", 2.0, Month::March, 2024), rate())
            .unwrap();
        service
            .create(&admin, &asha.id, draft("DS", "Theory", 4.0, Month::April, 2024), rate())
            .unwrap();
        service
            .update_status(&admin, first.id, BillStatus::Paid)
            .unwrap();

        let stats = service
            .stats(&User::faculty(&asha), &BillFilter::default())
            .unwrap();
        assert_eq!(stats.bill_count, 2);
        assert_eq!(stats.total_amount, Money::from_rupees(3000));
        assert_eq!(stats.paid_count, 1);
        assert_eq!(stats.paid_amount, Money::from_rupees(1000));
        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.pending_amount, Money::from_rupees(2000));
    }
}
