//! The sequential two-step analyst pipeline: symptom analysis first,
//! report synthesis second, always in that order. From the outside it
//! is atomic; callers hand in one payload and get one text blob back,
//! with no visibility into the intermediate analysis.

use super::prompt;
use super::types::{AnalysisPayload, LlmClient};
use super::AnalysisError;

pub struct AnalystPipeline {
    llm: Box<dyn LlmClient + Send + Sync>,
    model: String,
}

impl AnalystPipeline {
    pub fn new(llm: Box<dyn LlmClient + Send + Sync>, model: &str) -> Self {
        Self {
            llm,
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_model_available(&self) -> Result<bool, AnalysisError> {
        self.llm.is_model_available(&self.model)
    }

    /// Run both analyst steps. The second step consumes the first
    /// step's output plus the original payload; its text is returned
    /// unmodified, markdown fences and all.
    pub fn run(&self, payload: &AnalysisPayload) -> Result<String, AnalysisError> {
        let analysis_prompt = prompt::build_symptom_analysis_prompt(payload);
        let analysis =
            self.llm
                .generate(&self.model, &analysis_prompt, prompt::SYMPTOM_ANALYST_SYSTEM)?;
        tracing::debug!(chars = analysis.len(), "Symptom analysis step complete");

        let report_prompt = prompt::build_report_prompt(payload, &analysis);
        let report =
            self.llm
                .generate(&self.model, &report_prompt, prompt::REPORT_SYNTHESIS_SYSTEM)?;
        tracing::debug!(chars = report.len(), "Report synthesis step complete");

        Ok(report)
    }
}
