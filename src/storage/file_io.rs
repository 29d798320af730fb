//! JSON file helpers with atomic writes
//!
//! Writes go to a sibling temp file that is synced and renamed over the
//! target, so a data file is either the old version or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::BillingError;

/// Read JSON from a file, returning `T::default()` if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, BillingError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| BillingError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| BillingError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write pretty JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BillingError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BillingError::Storage(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let storage_err = |what: &str, e: &dyn std::fmt::Display| {
        BillingError::Storage(format!("Failed to {} {}: {}", what, path.display(), e))
    };

    let file = File::create(&temp_path).map_err(|e| storage_err("stage", &e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data).map_err(|e| storage_err("serialize", &e))?;
    writer.flush().map_err(|e| storage_err("flush", &e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", &e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Slot {
        rate: i64,
    }

    #[test]
    fn test_missing_file_reads_default() {
        let temp_dir = TempDir::new().unwrap();
        let slot: Slot = read_json(temp_dir.path().join("rate.json")).unwrap();
        assert_eq!(slot, Slot::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("rate.json");

        write_json_atomic(&path, &Slot { rate: 50000 }).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        let slot: Slot = read_json(&path).unwrap();
        assert_eq!(slot.rate, 50000);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bills.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Slot, _>(&path).unwrap_err();
        assert!(matches!(err, BillingError::Storage(_)));
    }
}
