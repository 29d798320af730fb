//! YAML export
//!
//! The same snapshot as the JSON export, for human reading.

use std::io::Write;

use crate::error::{BillingError, BillingResult};
use crate::export::json::FullExport;
use crate::models::User;
use crate::storage::Storage;

/// Export all data as YAML with a short comment header
pub fn export_full_yaml<W: Write>(storage: &Storage, user: &User, mut writer: W) -> BillingResult<()> {
    let export = FullExport::from_storage(storage, user)?;

    writeln!(
        writer,
        "# vf-billing data export\n# Generated: {}\n# App Version: {}\n",
        export.exported_at, export.app_version
    )
    .map_err(|e| BillingError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BillingPaths;
    use crate::models::faculty::fixtures::record;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_export() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(BillingPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage.faculty.upsert(record("FAC-1", "Asha Rao")).unwrap();

        let mut buffer = Vec::new();
        export_full_yaml(&storage, &User::admin(), &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();

        assert!(yaml.starts_with("# vf-billing data export"));
        assert!(yaml.contains("schema_version:"));
        assert!(yaml.contains("name: Asha Rao"));
        assert!(yaml.contains("faculty_count: 1"));
    }
}
