//! Diagnosis orchestrator: upload → decode → (explicit) save.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::decode::decode_verdict;
use crate::history::{RecordStore, StoreError};
use crate::models::{DiagnosisModel, DiagnosisRecord, DiagnosisVerdict};
use crate::upload::{HttpTransport, ReqwestTransport, UploadClient, UploadError};

/// History handle shared between the pipeline and the rest of the app.
pub type SharedRecordStore = Arc<Mutex<RecordStore>>;

/// Runs one diagnose-a-video cycle per call.
///
/// `run` never touches the history; saving is a separate, explicit `save`
/// so the caller decides which verdicts are kept.
pub struct DiagnosisPipeline<T: HttpTransport = ReqwestTransport> {
    client: UploadClient<T>,
    records: SharedRecordStore,
}

impl<T: HttpTransport> DiagnosisPipeline<T> {
    pub fn new(client: UploadClient<T>, records: SharedRecordStore) -> Self {
        Self { client, records }
    }

    pub fn client(&self) -> &UploadClient<T> {
        &self.client
    }

    pub fn records(&self) -> &SharedRecordStore {
        &self.records
    }

    /// Upload `file` to `endpoint` and decode the reply into a verdict.
    ///
    /// Upload failures are returned unchanged. Missing or malformed reply
    /// fields are not failures; they take their defaults.
    pub async fn run(&self, file: &Path, endpoint: &str) -> Result<DiagnosisVerdict, UploadError> {
        let fields = self.client.upload(file, endpoint).await?;
        let verdict = decode_verdict(fields);
        tracing::info!(
            probability_percent = verdict.probability_percent,
            diagnosis = %verdict.diagnosis_label,
            band = %verdict.band(),
            "Diagnosis verdict received"
        );
        Ok(verdict)
    }

    /// `run` against the configured endpoint of `model`.
    pub async fn run_model(
        &self,
        file: &Path,
        model: DiagnosisModel,
    ) -> Result<DiagnosisVerdict, UploadError> {
        let endpoint = model.endpoint();
        tracing::debug!(model = %model, endpoint = %endpoint, "Resolved model endpoint");
        self.run(file, &endpoint).await
    }

    /// Store `verdict` in the history under `patient_name`, stamped now.
    ///
    /// The name is trimmed and replaced by the anonymous placeholder if empty.
    /// Persistence problems are logged by the store, not returned; the only
    /// error here is a poisoned history lock.
    pub fn save(
        &self,
        verdict: &DiagnosisVerdict,
        patient_name: &str,
    ) -> Result<DiagnosisRecord, StoreError> {
        let record = DiagnosisRecord::new(patient_name, verdict, Utc::now());
        let mut records = self.records.lock().map_err(|_| StoreError::LockPoisoned)?;
        records.add(record.clone());
        tracing::info!(
            patient = %record.patient_name,
            total = records.len(),
            "Diagnosis saved to history"
        );
        Ok(record)
    }
}
