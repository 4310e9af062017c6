use serde::{Deserialize, Serialize};

use super::labs::LabResults;
use super::patient::PatientData;
use super::symptoms::SymptomRecord;

/// The packaged unit of work. Immutable once built: `case_id` never
/// changes, and every downstream artifact (image metadata, diagnosis)
/// is keyed by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub case_id: String,
    pub created_at: String, // YYYY-MM-DD HH:MM:SS, local time
    pub patient: PatientData,
    pub symptom_record: SymptomRecord,
    pub lab_results: LabResults,
    pub image_count: usize,
}
