//! Case packaging: turn validated intake into an immutable, persisted
//! case record before any analysis runs.

use chrono::Local;

use crate::models::{CaseRecord, LabResults, PatientData, SymptomRecord};
use crate::store::{ArtifactKind, CaseStore, StorageError};

/// Assemble and persist a new case.
///
/// The case id is `CASE_<YYYYMMDD_HHMMSS>_<patient id>`, falling back
/// to the literal `UNKNOWN` when the patient record has no `id` key.
/// Two UNKNOWN cases packaged within the same second therefore share an
/// id, and the later one overwrites the earlier one's artifacts;
/// callers that need distinct ids must supply patient identifiers.
///
/// The record is written under the input-package kind before this
/// returns; a case that cannot be persisted is never handed onward.
pub fn package_case(
    store: &CaseStore,
    patient: &PatientData,
    symptoms: &SymptomRecord,
    labs: &LabResults,
    image_count: usize,
) -> Result<CaseRecord, StorageError> {
    let now = Local::now();
    let case_id = format!(
        "CASE_{}_{}",
        now.format("%Y%m%d_%H%M%S"),
        patient.identifier_or_unknown()
    );

    let case = CaseRecord {
        case_id,
        created_at: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        patient: patient.clone(),
        symptom_record: symptoms.clone(),
        lab_results: labs.clone(),
        image_count,
    };

    store.save(&case.case_id, ArtifactKind::InputPackage, &case)?;
    tracing::info!(case_id = %case.case_id, image_count, "Packaged new case");
    Ok(case)
}
