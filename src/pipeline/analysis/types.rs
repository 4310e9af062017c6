use serde::{Deserialize, Serialize};

use super::AnalysisError;
use crate::models::CaseRecord;

/// Findings text for one analyzed image, in upload order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageFinding {
    pub index: usize,
    #[serde(rename = "type")]
    pub image_type: String,
    pub region: String,
    pub findings: String,
}

/// The flat payload handed to the two-step analyst pipeline. Each
/// entry is an already-serialized JSON document; the agent interface
/// takes named strings, not nested structures.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPayload {
    pub patient_data: String,
    pub symptoms: String,
    pub lab_results: String,
    pub image_results: String,
}

impl AnalysisPayload {
    pub fn from_case(
        case: &CaseRecord,
        findings: &[ImageFinding],
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            patient_data: serde_json::to_string(&case.patient)?,
            symptoms: serde_json::to_string(&case.symptom_record)?,
            lab_results: serde_json::to_string(&case.lab_results)?,
            image_results: serde_json::to_string(findings)?,
        })
    }
}

/// Text model abstraction (allows mocking)
pub trait LlmClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, AnalysisError>;

    fn is_model_available(&self, model: &str) -> Result<bool, AnalysisError>;

    fn list_models(&self) -> Result<Vec<String>, AnalysisError>;
}

/// Vision model abstraction (allows mocking)
pub trait VisionClient {
    fn chat_with_images(
        &self,
        model: &str,
        prompt: &str,
        images: &[String],
        system: Option<&str>,
    ) -> Result<String, AnalysisError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LabResults, PatientData, SymptomRecord};

    #[test]
    fn payload_entries_are_serialized_json() {
        let mut patient = PatientData::new();
        patient.set("id", "P-31");
        patient.set("age", 45);

        let mut labs = LabResults::new();
        labs.record("Complete Blood Count", "WBC", "11.2");

        let case = CaseRecord {
            case_id: "CASE_X".into(),
            created_at: "2024-03-11 14:23:55".into(),
            patient,
            symptom_record: SymptomRecord {
                chief_complaint: Some("Chest pain".into()),
                ..Default::default()
            },
            lab_results: labs,
            image_count: 1,
        };
        let findings = vec![ImageFinding {
            index: 0,
            image_type: "Chest X-ray".into(),
            region: "Chest/Thorax".into(),
            findings: "Left lower lobe opacity.".into(),
        }];

        let payload = AnalysisPayload::from_case(&case, &findings).unwrap();

        let patient_back: serde_json::Value =
            serde_json::from_str(&payload.patient_data).unwrap();
        assert_eq!(patient_back["age"], 45);

        let symptoms_back: serde_json::Value = serde_json::from_str(&payload.symptoms).unwrap();
        assert_eq!(symptoms_back["chief_complaint"], "Chest pain");

        let labs_back: serde_json::Value = serde_json::from_str(&payload.lab_results).unwrap();
        assert_eq!(labs_back["Complete Blood Count"]["WBC"], "11.2");

        let findings_back: serde_json::Value =
            serde_json::from_str(&payload.image_results).unwrap();
        assert_eq!(findings_back[0]["type"], "Chest X-ray");
        assert_eq!(findings_back[0]["findings"], "Left lower lobe opacity.");
    }

    #[test]
    fn empty_findings_serialize_as_empty_list() {
        let case = CaseRecord {
            case_id: "CASE_X".into(),
            created_at: "2024-03-11 14:23:55".into(),
            patient: PatientData::new(),
            symptom_record: SymptomRecord::default(),
            lab_results: LabResults::new(),
            image_count: 0,
        };

        let payload = AnalysisPayload::from_case(&case, &[]).unwrap();
        assert_eq!(payload.image_results, "[]");
    }
}
