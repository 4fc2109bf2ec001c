//! Application state, built once at startup and passed to every consumer.
//!
//! Owns the one upload pipeline and the one history store; nothing in the
//! crate reaches for a global instance.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config;
use crate::db::DatabaseError;
use crate::history::{RecordStore, SettingsStore, SqliteSettingsStore, StoreError};
use crate::models::DiagnosisRecord;
use crate::pipeline::{DiagnosisPipeline, SharedRecordStore};
use crate::upload::{HttpTransport, ReqwestTransport, UploadClient, UploadError};

/// Errors while assembling the application state.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Cannot open settings database: {0}")]
    Database(#[from] DatabaseError),

    #[error("Cannot create upload client: {0}")]
    Upload(#[from] UploadError),
}

pub struct CoreState<T: HttpTransport = ReqwestTransport> {
    pipeline: DiagnosisPipeline<T>,
    records: SharedRecordStore,
}

impl CoreState<ReqwestTransport> {
    /// Production state: settings database at `config::database_path()`,
    /// reqwest transport.
    pub fn open_default() -> Result<Self, StartupError> {
        Self::open(&config::database_path())
    }

    /// Production transport with the settings database at `db_path`.
    pub fn open(db_path: &Path) -> Result<Self, StartupError> {
        let settings = SqliteSettingsStore::open(db_path)?;
        let client = UploadClient::default_remote()?;
        tracing::info!(db = %db_path.display(), "Application state ready");
        Ok(Self::new(client, Box::new(settings)))
    }
}

impl<T: HttpTransport> CoreState<T> {
    /// Assemble from explicit parts. Loads the history once, here.
    pub fn new(client: UploadClient<T>, settings: Box<dyn SettingsStore>) -> Self {
        let records: SharedRecordStore = Arc::new(Mutex::new(RecordStore::load(settings)));
        let pipeline = DiagnosisPipeline::new(client, Arc::clone(&records));
        Self { pipeline, records }
    }

    pub fn pipeline(&self) -> &DiagnosisPipeline<T> {
        &self.pipeline
    }

    /// Snapshot of the history, oldest first.
    pub fn history(&self) -> Result<Vec<DiagnosisRecord>, StoreError> {
        let records = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.records().to_vec())
    }

    /// Remove every saved record.
    pub fn clear_history(&self) -> Result<(), StoreError> {
        let mut records = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        let removed = records.len();
        records.clear();
        tracing::info!(removed, "Diagnosis history cleared");
        Ok(())
    }
}
