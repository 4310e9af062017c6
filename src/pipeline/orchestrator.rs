//! Drives one diagnostic case from raw input to a persisted
//! [`Diagnosis`], front to back. Every case walks the same stages:
//!
//! ```text
//! CREATED -> PACKAGED -> IMAGES_STORED -> ANALYZING -> DONE
//! ```
//!
//! Failures split into two classes. Anything before analysis
//! (packaging, image writes, storage) is fatal and propagates to the
//! caller. Analysis and extraction failures become data: they are
//! written to the store as a failure [`Diagnosis`] and returned as the
//! case's terminal result. A case is run exactly once; retrying means
//! submitting it again, which produces a fresh case id.

use chrono::Local;
use thiserror::Error;

use crate::models::{Diagnosis, ImageUpload, LabResults, PatientData, SymptomRecord};
use crate::store::{ArtifactKind, CaseStore, StorageError};

use super::analysis::AnalysisGateway;
use super::extract::extract_report;
use super::intake::{store_images, IntakeError};
use super::packager::package_case;

/// Milestones a case passes through, in order. Logged, not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStage {
    Created,
    Packaged,
    ImagesStored,
    Analyzing,
    Done,
}

impl CaseStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Packaged => "PACKAGED",
            Self::ImagesStored => "IMAGES_STORED",
            Self::Analyzing => "ANALYZING",
            Self::Done => "DONE",
        }
    }
}

impl std::fmt::Display for CaseStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct DiagnosticPipeline {
    store: CaseStore,
    gateway: AnalysisGateway,
}

impl DiagnosticPipeline {
    pub fn new(store: CaseStore, gateway: AnalysisGateway) -> Self {
        Self { store, gateway }
    }

    /// Pipeline over the default on-disk store and a local Ollama
    /// server.
    pub fn default_local() -> Self {
        Self::new(CaseStore::default_local(), AnalysisGateway::default_local())
    }

    pub fn store(&self) -> &CaseStore {
        &self.store
    }

    pub fn gateway(&self) -> &AnalysisGateway {
        &self.gateway
    }

    /// Run one case start to finish and return its terminal
    /// [`Diagnosis`]. The returned record, success or failure, has
    /// already been persisted under the new case id.
    pub fn run_case(
        &self,
        patient: &PatientData,
        symptoms: &SymptomRecord,
        labs: &LabResults,
        uploads: &[ImageUpload],
    ) -> Result<Diagnosis, PipelineError> {
        let _span = tracing::info_span!("diagnostic_case").entered();
        tracing::info!(stage = %CaseStage::Created, images = uploads.len(), "Case received");

        let case = package_case(&self.store, patient, symptoms, labs, uploads.len())?;
        tracing::info!(stage = %CaseStage::Packaged, case_id = %case.case_id, "Case packaged");

        store_images(&self.store, &case.case_id, uploads)?;
        tracing::info!(stage = %CaseStage::ImagesStored, case_id = %case.case_id, "Images stored");

        tracing::info!(stage = %CaseStage::Analyzing, case_id = %case.case_id, "Analysis started");
        let analysis = self
            .gateway
            .analyze_images(uploads)
            .and_then(|findings| self.gateway.run_analysts(&case, &findings));

        // Result timestamp is stamped here, after analysis returns.
        // Whatever the model put under case_id/timestamp is discarded.
        let stamped_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let diagnosis = match analysis {
            Ok(raw) => match extract_report(&raw) {
                Ok(fields) => Diagnosis::report(&case.case_id, &stamped_at, fields),
                Err(e) => {
                    tracing::warn!(case_id = %case.case_id, error = %e, "Analysis output not parseable");
                    Diagnosis::failure(&case.case_id, &stamped_at, e.to_string(), Some(raw))
                }
            },
            Err(e) => {
                tracing::warn!(case_id = %case.case_id, error = %e, "Analysis stage failed");
                Diagnosis::failure(
                    &case.case_id,
                    &stamped_at,
                    format!("An error occurred while running the diagnosis: {e}"),
                    None,
                )
            }
        };

        self.store
            .save(&case.case_id, ArtifactKind::Diagnosis, &diagnosis)?;

        tracing::info!(
            stage = %CaseStage::Done,
            case_id = %case.case_id,
            success = !diagnosis.is_failure(),
            "Case complete"
        );
        Ok(diagnosis)
    }
}

/// Fatal pipeline failures. Analysis and extraction problems never
/// surface here; they come back as a failure [`Diagnosis`] instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Intake(#[from] IntakeError),
}
