//! UI-facing draft of a case under construction.
//!
//! The form pages mutate one [`CaseDraft`] passed by reference; the
//! pipeline never sees it, only the validated pieces handed over when
//! the user submits. No ambient globals: whoever owns the session owns
//! the draft.

use crate::models::{Diagnosis, ImageUpload, LabResults, PatientData, SymptomRecord};
use crate::pipeline::{DiagnosticPipeline, PipelineError};

/// Everything the wizard pages collect before a case is packaged.
/// All fields start empty; `last_diagnosis` holds the terminal result
/// of the most recent run for redisplay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseDraft {
    pub patient: PatientData,
    pub symptoms: SymptomRecord,
    pub labs: LabResults,
    pub uploads: Vec<ImageUpload>,
    pub last_diagnosis: Option<Diagnosis>,
}

impl CaseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been entered yet.
    pub fn is_empty(&self) -> bool {
        self.patient.is_empty()
            && self.symptoms == SymptomRecord::default()
            && self.labs.is_empty()
            && self.uploads.is_empty()
            && self.last_diagnosis.is_none()
    }

    /// Run the collected input through the pipeline and keep the
    /// terminal result in `last_diagnosis` for redisplay. Inputs are
    /// left untouched; resubmitting packages a fresh case.
    pub fn submit(&mut self, pipeline: &DiagnosticPipeline) -> Result<Diagnosis, PipelineError> {
        let diagnosis =
            pipeline.run_case(&self.patient, &self.symptoms, &self.labs, &self.uploads)?;
        self.last_diagnosis = Some(diagnosis.clone());
        Ok(diagnosis)
    }

    /// Discard all collected input and any previous result. Called
    /// when the user starts a new case after completing or abandoning
    /// one; every field returns to its initial empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_is_empty() {
        let draft = CaseDraft::new();
        assert!(draft.is_empty());
        assert!(draft.uploads.is_empty());
        assert!(draft.last_diagnosis.is_none());
    }

    #[test]
    fn reset_returns_every_field_to_default() {
        let mut draft = CaseDraft::new();
        draft.patient.set("id", "P-9");
        draft.symptoms.symptom_list.push("Fever".into());
        draft.labs.record("Lipid Panel", "LDL", "130");
        draft.uploads.push(ImageUpload {
            bytes: vec![1, 2, 3],
            image_type: "Chest X-ray".into(),
            region: "Chest/Thorax".into(),
            date: "2024-03-11".into(),
            notes: String::new(),
        });
        draft.last_diagnosis = Some(Diagnosis::failure(
            "CASE_X",
            "2024-03-11 14:24:02",
            "boom",
            None,
        ));
        assert!(!draft.is_empty());

        draft.reset();
        assert!(draft.is_empty());
        assert_eq!(draft, CaseDraft::default());
    }

    #[test]
    fn submit_keeps_the_result_and_the_inputs() {
        use crate::pipeline::analysis::{AnalysisGateway, MockLlmClient, MockVisionClient};
        use crate::store::CaseStore;

        let dir = tempfile::tempdir().unwrap();
        let pipeline = DiagnosticPipeline::new(
            CaseStore::open(dir.path()),
            AnalysisGateway::new(
                Box::new(MockVisionClient::new("clear lung fields")),
                "medgemma",
                Box::new(MockLlmClient::new("no fenced block here")),
                "medgemma",
            ),
        );

        let mut draft = CaseDraft::new();
        draft.patient.set("id", "P-9");
        draft.symptoms.chief_complaint = Some("Fever".into());

        let diagnosis = draft.submit(&pipeline).unwrap();
        assert_eq!(draft.last_diagnosis.as_ref(), Some(&diagnosis));
        assert!(!draft.is_empty());
        assert_eq!(draft.patient.identifier(), Some("P-9"));
    }
}
