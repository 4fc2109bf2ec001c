use super::error::StoreError;
use super::settings::SettingsStore;
use crate::config;
use crate::models::DiagnosisRecord;

/// Ordered, durable list of saved diagnosis records.
///
/// Loaded once at construction. Every mutation rewrites the whole list under
/// one settings key; there is no incremental log and no partial-write recovery.
pub struct RecordStore {
    settings: Box<dyn SettingsStore>,
    key: String,
    records: Vec<DiagnosisRecord>,
}

impl RecordStore {
    /// Load the history from `settings` under the default history key.
    pub fn load(settings: Box<dyn SettingsStore>) -> Self {
        Self::load_with_key(settings, config::HISTORY_KEY)
    }

    /// Load the history stored under `key`.
    ///
    /// A missing key is an empty history. A key that cannot be read or
    /// decoded is logged and also treated as empty.
    pub fn load_with_key(settings: Box<dyn SettingsStore>, key: &str) -> Self {
        let records = match read_records(settings.as_ref(), key) {
            Ok(records) => {
                tracing::debug!(key, count = records.len(), "Diagnosis history loaded");
                records
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to load diagnosis history, starting empty");
                Vec::new()
            }
        };
        Self {
            settings,
            key: key.to_string(),
            records,
        }
    }

    /// Records in insertion order (oldest first).
    pub fn records(&self) -> &[DiagnosisRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record and persist the whole history.
    pub fn add(&mut self, record: DiagnosisRecord) {
        self.records.push(record);
        self.persist();
    }

    /// Drop every record and persist the empty history.
    pub fn clear(&mut self) {
        self.records.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = write_records(self.settings.as_ref(), &self.key, &self.records) {
            tracing::warn!(
                key = %self.key,
                count = self.records.len(),
                error = %e,
                "Failed to persist diagnosis history"
            );
        }
    }
}

fn read_records(
    settings: &dyn SettingsStore,
    key: &str,
) -> Result<Vec<DiagnosisRecord>, StoreError> {
    match settings.get(key)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

fn write_records(
    settings: &dyn SettingsStore,
    key: &str,
    records: &[DiagnosisRecord],
) -> Result<(), StoreError> {
    let json = serde_json::to_string(records)?;
    settings.set(key, &json)
}
