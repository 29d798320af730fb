//! Audit log viewer

use crate::error::{BillingError, BillingResult};
use crate::models::User;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first (admin only)
pub fn handle_audit_command(storage: &Storage, user: &User, limit: usize) -> BillingResult<()> {
    if !user.is_admin() {
        return Err(BillingError::Forbidden("only admins can read the audit log".into()));
    }

    let audit = storage.audit();
    if !audit.exists() {
        println!("No audit entries yet.");
        return Ok(());
    }

    let entries = audit.read_recent(limit)?;
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!("\n{} entries from {}", entries.len(), audit.path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BillingPaths;
    use crate::models::faculty::fixtures::record;
    use tempfile::TempDir;

    #[test]
    fn test_audit_is_admin_only() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(BillingPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();

        assert!(handle_audit_command(&storage, &User::admin(), 10).is_ok());
        let err = handle_audit_command(&storage, &User::faculty(&record("FAC-1", "Asha")), 10)
            .unwrap_err();
        assert!(err.is_forbidden());
    }
}
