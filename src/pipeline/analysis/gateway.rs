//! Entry point for the external analysis stage. Stage A sends each
//! stored image to the vision model one at a time and stops at the
//! first failure. Stage B hands the assembled case payload to the
//! analyst pipeline and returns its raw text.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::models::{CaseRecord, ImageUpload};

use super::analysts::AnalystPipeline;
use super::ollama::OllamaClient;
use super::prompt;
use super::types::{AnalysisPayload, ImageFinding, LlmClient, VisionClient};
use super::AnalysisError;

/// Model used on both seams when nothing else is configured.
pub const DEFAULT_MODEL: &str = "medgemma";

pub struct AnalysisGateway {
    vision: Box<dyn VisionClient + Send + Sync>,
    vision_model: String,
    analysts: AnalystPipeline,
}

impl AnalysisGateway {
    pub fn new(
        vision: Box<dyn VisionClient + Send + Sync>,
        vision_model: &str,
        llm: Box<dyn LlmClient + Send + Sync>,
        analyst_model: &str,
    ) -> Self {
        Self {
            vision,
            vision_model: vision_model.to_string(),
            analysts: AnalystPipeline::new(llm, analyst_model),
        }
    }

    /// Gateway wired to a local Ollama server with [`DEFAULT_MODEL`]
    /// on both seams.
    pub fn default_local() -> Self {
        Self::new(
            Box::new(OllamaClient::default_local()),
            DEFAULT_MODEL,
            Box::new(OllamaClient::default_local()),
            DEFAULT_MODEL,
        )
    }

    pub fn vision_model(&self) -> &str {
        &self.vision_model
    }

    pub fn analyst_model(&self) -> &str {
        self.analysts.model()
    }

    pub fn is_model_available(&self) -> Result<bool, AnalysisError> {
        self.analysts.is_model_available()
    }

    /// Analyze stored images in index order, one vision call per image.
    /// The first failing call aborts the whole stage; findings for
    /// earlier images are dropped with it.
    pub fn analyze_images(
        &self,
        uploads: &[ImageUpload],
    ) -> Result<Vec<ImageFinding>, AnalysisError> {
        if uploads.is_empty() {
            return Ok(Vec::new());
        }

        let _span = tracing::info_span!("image_analysis", count = uploads.len()).entered();

        let mut findings = Vec::with_capacity(uploads.len());
        for (index, upload) in uploads.iter().enumerate() {
            let image_prompt =
                prompt::build_image_prompt(&upload.image_type, &upload.region, &upload.notes);
            let encoded = BASE64.encode(&upload.bytes);

            let text = self.vision.chat_with_images(
                &self.vision_model,
                &image_prompt,
                &[encoded],
                Some(prompt::IMAGE_ANALYST_SYSTEM),
            )?;

            tracing::info!(index, image_type = %upload.image_type, "Image analyzed");
            findings.push(ImageFinding {
                index,
                image_type: upload.image_type.clone(),
                region: upload.region.clone(),
                findings: text,
            });
        }

        Ok(findings)
    }

    /// Run the two-step analyst pipeline over the packaged case and
    /// the per-image findings. Returns the raw synthesis text; callers
    /// extract the structured report from it separately.
    pub fn run_analysts(
        &self,
        case: &CaseRecord,
        findings: &[ImageFinding],
    ) -> Result<String, AnalysisError> {
        let payload = AnalysisPayload::from_case(case, findings)?;
        tracing::info!(
            case_id = %case.case_id,
            model = %self.analysts.model(),
            "Running analyst pipeline"
        );
        self.analysts.run(&payload)
    }
}
