use serde::{Deserialize, Serialize};

use super::types::{LlmClient, VisionClient};
use super::AnalysisError;

/// Preferred analysis models in order of preference. MedGemma is
/// multimodal, so one model serves both the vision and the analyst
/// steps on a default install.
pub const ANALYSIS_MODELS: &[&str] = &[
    "medgemma",
    "medgemma:27b",
    "medgemma:4b",
    "medgemma:latest",
];

/// Ollama HTTP client for local model inference. Implements both the
/// text and the vision seams; calls are blocking round-trips.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a new OllamaClient pointing at a local Ollama instance.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default Ollama instance at localhost:11434 with 5-minute timeout.
    pub fn default_local() -> Self {
        Self::new("http://localhost:11434", 300)
    }

    /// Find the best available analysis model.
    pub fn find_best_model(&self) -> Result<String, AnalysisError> {
        let available = self.list_models()?;
        for preferred in ANALYSIS_MODELS {
            if available.iter().any(|m| m.starts_with(preferred)) {
                return Ok(preferred.to_string());
            }
        }
        Err(AnalysisError::NoModelAvailable)
    }

    fn send_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_connect() {
            AnalysisError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            AnalysisError::HttpClient(format!("Request timed out after {}s", self.timeout_secs))
        } else {
            AnalysisError::HttpClient(e.to_string())
        }
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Request body for Ollama /api/chat (vision calls carry images)
#[derive(Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct OllamaChatMessage<'a> {
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<&'a [String]>,
}

/// Response body from Ollama /api/chat
#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatResponseMessage,
}

#[derive(Deserialize)]
struct OllamaChatResponseMessage {
    content: String,
}

/// Response body from Ollama /api/tags
#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

impl LlmClient for OllamaClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model,
            prompt,
            system,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }

    fn is_model_available(&self, model: &str) -> Result<bool, AnalysisError> {
        let models = self.list_models()?;
        Ok(models.iter().any(|m| m.starts_with(model)))
    }

    fn list_models(&self) -> Result<Vec<String>, AnalysisError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaTagsResponse = response
            .json()
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }
}

impl VisionClient for OllamaClient {
    fn chat_with_images(
        &self,
        model: &str,
        prompt: &str,
        images: &[String],
        system: Option<&str>,
    ) -> Result<String, AnalysisError> {
        let url = format!("{}/api/chat", self.base_url);

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(OllamaChatMessage {
                role: "system",
                content: system,
                images: None,
            });
        }
        messages.push(OllamaChatMessage {
            role: "user",
            content: prompt,
            images: Some(images),
        });

        let body = OllamaChatRequest {
            model,
            messages,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: OllamaChatResponse = response
            .json()
            .map_err(|e| AnalysisError::ResponseParsing(e.to_string()))?;

        Ok(parsed.message.content)
    }
}

/// Mock text client for testing, returns a configurable response.
pub struct MockLlmClient {
    response: String,
    available_models: Vec<String>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            available_models: vec!["medgemma:latest".to_string()],
        }
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.available_models = models;
        self
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, _model: &str, _prompt: &str, _system: &str) -> Result<String, AnalysisError> {
        Ok(self.response.clone())
    }

    fn is_model_available(&self, model: &str) -> Result<bool, AnalysisError> {
        Ok(self.available_models.iter().any(|m| m.starts_with(model)))
    }

    fn list_models(&self) -> Result<Vec<String>, AnalysisError> {
        Ok(self.available_models.clone())
    }
}

/// Mock vision client for testing, returns a configurable findings text.
pub struct MockVisionClient {
    response: String,
}

impl MockVisionClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl VisionClient for MockVisionClient {
    fn chat_with_images(
        &self,
        _model: &str,
        _prompt: &str,
        _images: &[String],
        _system: Option<&str>,
    ) -> Result<String, AnalysisError> {
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_llm_replays_the_scripted_text() {
        let client = MockLlmClient::new("The labs point to a metabolic cause.");
        let text = client
            .generate("medgemma", "analyze this case", "you are a diagnostician")
            .unwrap();
        assert_eq!(text, "The labs point to a metabolic cause.");
    }

    #[test]
    fn installed_tags_match_by_prefix() {
        let client = MockLlmClient::new("").with_models(vec![
            "medgemma:4b".into(),
            "qwen2.5:7b".into(),
            "nomic-embed-text:latest".into(),
        ]);
        assert_eq!(client.list_models().unwrap().len(), 3);
        assert!(client.is_model_available("medgemma").unwrap());
        assert!(client.is_model_available("qwen2.5").unwrap());
        assert!(!client.is_model_available("llava").unwrap());
    }

    #[test]
    fn mock_vision_replays_the_scripted_findings() {
        let client = MockVisionClient::new("Left lower lobe opacity.");
        let findings = client
            .chat_with_images("medgemma", "describe the image", &["aGk=".into()], None)
            .unwrap();
        assert_eq!(findings, "Left lower lobe opacity.");
    }

    #[test]
    fn base_url_keeps_no_trailing_slash() {
        let trimmed = OllamaClient::new("http://127.0.0.1:11434/", 60);
        assert_eq!(trimmed.base_url, "http://127.0.0.1:11434");

        let untouched = OllamaClient::new("http://192.168.1.40:11434", 60);
        assert_eq!(untouched.base_url, "http://192.168.1.40:11434");
    }

    #[test]
    fn default_local_targets_the_standard_ollama_port() {
        let client = OllamaClient::default_local();
        assert!(client.base_url.ends_with(":11434"));
        assert_eq!(client.timeout_secs, 300);
    }

    #[test]
    fn preference_list_leads_with_the_bare_tag() {
        assert_eq!(ANALYSIS_MODELS[0], "medgemma");
        assert!(ANALYSIS_MODELS.iter().all(|m| m.starts_with("medgemma")));
    }
}
