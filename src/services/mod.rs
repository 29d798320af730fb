//! Service layer for vf-billing
//!
//! Business rules on top of the storage layer: validation, role checks,
//! cascades, and audit logging.

pub mod bill;
pub mod faculty;
pub mod rate;

pub use bill::{BillFilter, BillService, BillStats};
pub use faculty::{FacultyService, RemovedFaculty};
pub use rate::RateService;
