//! Google Gemini generateContent adapter

use crate::provider::{GenerativeTransport, TransportError, TransportErrorKind, TransportResult};
use crate::types::{GenerateRequest, GenerateResponse};
use cosmiclens_core::config::{Config, DEFAULT_BASE_URL};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};

pub struct GeminiTransport {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiTransport {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Build from config. `None` when no usable key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let key = config.api_key()?;
        Some(
            Self::new(key, config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.request_timeout()),
        )
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        match Client::builder().timeout(timeout).build() {
            Ok(client) => self.client = client,
            Err(e) => warn!("Could not apply {}ms request timeout ({}); keeping default client", timeout.as_millis(), e),
        }
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait::async_trait]
impl GenerativeTransport for GeminiTransport {
    fn name(&self) -> &str { "gemini" }

    fn model(&self) -> &str { &self.model }

    async fn generate(&self, request: GenerateRequest) -> TransportResult<GenerateResponse> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart { text: request.prompt.clone() }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: request.response_schema.as_ref().map(|_| "application/json"),
                response_schema: request.response_schema.clone(),
                max_output_tokens: request.max_output_tokens,
                temperature: request.temperature,
            },
        };

        debug!(
            "Gemini request: model={} prompt_len={} json={}",
            self.model,
            request.prompt.len(),
            request.wants_json()
        );

        let response = self.client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Gemini error {}: {}", status, error_text);
            let kind = classify_failure(status.as_u16(), &error_text);
            return Err(TransportError::new(kind, format!("{}: {}", status, error_message(&error_text))));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| TransportError::other(format!("unreadable response body: {}", e)))?;

        let candidate = parsed.candidates.into_iter().next();
        let finish_reason = candidate.as_ref().and_then(|c| c.finish_reason.clone());
        let text = candidate
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        Ok(GenerateResponse { text, finish_reason })
    }
}

/// Map an HTTP failure to a transport error kind using the status code and the
/// structured `error` object Google APIs return.
pub fn classify_failure(status: u16, body: &str) -> TransportErrorKind {
    let detail = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .ok()
        .map(|e| e.error);
    let api_status = detail.as_ref().and_then(|d| d.status.as_deref()).unwrap_or("");
    let key_invalid = detail
        .as_ref()
        .map(|d| d.details.iter().any(|x| x.reason.as_deref() == Some("API_KEY_INVALID")))
        .unwrap_or(false);

    if status == 429 || api_status == "RESOURCE_EXHAUSTED" {
        TransportErrorKind::RateLimited
    } else if status == 401
        || status == 403
        || key_invalid
        || api_status == "PERMISSION_DENIED"
        || api_status == "UNAUTHENTICATED"
    {
        TransportErrorKind::Unauthorized
    } else if status == 404 || api_status == "NOT_FOUND" {
        TransportErrorKind::NotFound
    } else {
        TransportErrorKind::Other
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<GeminiErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorDetail,
}

#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: Option<String>,
    status: Option<String>,
    #[serde(default)]
    details: Vec<GeminiErrorInfo>,
}

#[derive(Deserialize)]
struct GeminiErrorInfo {
    reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_status_code() {
        assert_eq!(classify_failure(429, ""), TransportErrorKind::RateLimited);
        assert_eq!(classify_failure(401, ""), TransportErrorKind::Unauthorized);
        assert_eq!(classify_failure(403, ""), TransportErrorKind::Unauthorized);
        assert_eq!(classify_failure(404, ""), TransportErrorKind::NotFound);
        assert_eq!(classify_failure(500, "oops"), TransportErrorKind::Other);
    }

    #[test]
    fn classify_invalid_key_sent_as_400() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT",
            "details":[{"@type":"type.googleapis.com/google.rpc.ErrorInfo","reason":"API_KEY_INVALID"}]}}"#;
        assert_eq!(classify_failure(400, body), TransportErrorKind::Unauthorized);
        assert_eq!(error_message(body), "API key not valid.");
    }

    #[test]
    fn classify_by_api_status() {
        let exhausted = r#"{"error":{"code":400,"status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(classify_failure(400, exhausted), TransportErrorKind::RateLimited);
        let missing = r#"{"error":{"code":400,"status":"NOT_FOUND"}}"#;
        assert_eq!(classify_failure(400, missing), TransportErrorKind::NotFound);
    }

    #[test]
    fn with_timeout_keeps_model_and_base_url() {
        let t = GeminiTransport::new("k", "gemini-2.5-flash")
            .with_base_url("http://x/v1beta")
            .with_timeout(Duration::from_millis(50));
        assert_eq!(t.model(), "gemini-2.5-flash");
        assert_eq!(t.endpoint(), "http://x/v1beta/models/gemini-2.5-flash:generateContent");
    }

    #[test]
    fn endpoint_joins_model() {
        let t = GeminiTransport::new("k", "gemini-2.5-flash").with_base_url("http://x/v1beta/");
        assert_eq!(t.endpoint(), "http://x/v1beta/models/gemini-2.5-flash:generateContent");
    }
}
