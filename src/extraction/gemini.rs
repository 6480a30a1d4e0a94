//! Extraction client for the Generative Language API.
//!
//! Each operation is a single `generateContent` call: no retries, no
//! streaming.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::ExtractionSettings;
use crate::error::{AdminError, AdminResult};
use crate::models::ExtractedDeduction;

use super::DeductionExtractor;
use super::prompt::{candidates_schema, code_prompt, extraction_prompt};

/// Longest error body echoed back in an `ExtractionFailed` message.
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// [`DeductionExtractor`] backed by a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiExtractor {
    client: Client,
    settings: ExtractionSettings,
}

impl GeminiExtractor {
    /// Creates a client using the given settings.
    ///
    /// A missing API key is not an error here; calls fail with
    /// `ExtractionUnavailable` instead, so the rest of the service keeps
    /// working without one.
    pub fn new(settings: ExtractionSettings) -> AdminResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AdminError::ExtractionFailed {
                message: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        )
    }

    async fn generate(&self, request: &GenerateContentRequest) -> AdminResult<String> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| AdminError::ExtractionUnavailable {
                message: "no API key configured".to_string(),
            })?;

        let start = Instant::now();
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AdminError::ExtractionFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            warn!(status = %status, model = %self.settings.model, "Model call rejected");
            return Err(AdminError::ExtractionFailed {
                message: format!("model returned {}: {}", status, body),
            });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| AdminError::ExtractionFailed {
                message: format!("unreadable model response: {}", e),
            })?;

        info!(
            model = %self.settings.model,
            duration_ms = start.elapsed().as_millis() as u64,
            "Model call completed"
        );
        Ok(parsed.text())
    }
}

fn user_request(prompt: String, generation_config: Option<GenerationConfig>) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config,
    }
}

/// Parses the model's JSON text into candidates.
///
/// Text that is not a JSON array of candidates yields an empty list.
pub fn parse_candidates(text: &str) -> Vec<ExtractedDeduction> {
    match serde_json::from_str::<Vec<ExtractedDeduction>>(text.trim()) {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(error = %e, "Failed to parse extraction response");
            Vec::new()
        }
    }
}

#[async_trait]
impl DeductionExtractor for GeminiExtractor {
    async fn extract_deductions(&self, text: &str) -> AdminResult<Vec<ExtractedDeduction>> {
        let request = user_request(
            extraction_prompt(text),
            Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: candidates_schema(),
            }),
        );
        let body = self.generate(&request).await?;
        let candidates = parse_candidates(&body);
        info!(candidates = candidates.len(), "Extracted deduction candidates");
        Ok(candidates)
    }

    async fn suggest_code(
        &self,
        plan_name: &str,
        provider_name: &str,
        category: &str,
    ) -> AdminResult<String> {
        let request = user_request(code_prompt(plan_name, provider_name, category), None);
        let body = self.generate(&request).await?;
        Ok(body.trim().to_uppercase())
    }
}
