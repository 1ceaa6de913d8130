use std::fs;
use std::path::{Path, PathBuf};

use crate::models::LedgerState;
use crate::store::StoreError;

/// Fixed storage key; the whole application state lives in one file named
/// after it.
pub const STORAGE_KEY: &str = "lumina-ledger-v3";

const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for the process-wide state blob.
#[derive(Debug, Clone)]
pub struct JsonStateStorage {
    path: PathBuf,
}

impl JsonStateStorage {
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        Ok(JsonStateStorage {
            path: data_dir.join(format!("{}.json", STORAGE_KEY)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted state, falling back to the fresh-start default when
    /// the file is absent or unparsable.
    pub fn load(&self) -> LedgerState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return LedgerState::default(),
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "unparsable state blob, starting fresh");
                LedgerState::default()
            }
        }
    }

    /// Serializes the state to a temp file and renames it into place, so a
    /// crash mid-write never corrupts the previous blob.
    pub fn save(&self, state: &LedgerState) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp_path = self.path.with_extension(TMP_SUFFIX);
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Invoice;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_default_state() {
        let dir = tempdir().expect("tempdir");
        let storage = JsonStateStorage::new(dir.path()).expect("storage");
        let state = storage.load();
        assert!(state.invoices.is_empty());
        assert_eq!(state.company_settings.currency, "SAR");
    }

    #[test]
    fn garbage_file_loads_default_state() {
        let dir = tempdir().expect("tempdir");
        let storage = JsonStateStorage::new(dir.path()).expect("storage");
        fs::write(storage.path(), "{not json").expect("write");
        let state = storage.load();
        assert!(state.invoices.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().expect("tempdir");
        let storage = JsonStateStorage::new(dir.path()).expect("storage");

        let mut state = LedgerState::default();
        state.invoices.push(Invoice {
            id: "INV-2025-0001".to_string(),
            client_name: "Acme".to_string(),
            client_email: "billing@acme.test".to_string(),
            client_address: None,
            date: "2025-01-15".to_string(),
            due_date: "2025-02-15".to_string(),
            items: Vec::new(),
            tax_rate: 15.0,
            discount: 0.0,
            status: crate::models::InvoiceStatus::Pending,
            currency: "SAR".to_string(),
            notes: None,
            payment_terms: None,
        });
        storage.save(&state).expect("save");

        let loaded = storage.load();
        assert_eq!(loaded.invoices.len(), 1);
        assert_eq!(loaded.invoices[0].id, "INV-2025-0001");
        assert!(storage.path().exists());
    }
}
