//! # Gemini Collaborator
//!
//! HTTP client for the Gemini `generateContent` endpoint using structured
//! JSON output.
//!
//! ```text
//! POST {base_url}/models/{model}:generateContent?key=...
//! {
//!   "systemInstruction": { "parts": [{ "text": ... }] },
//!   "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
//!   "generationConfig": {
//!     "responseMimeType": "application/json",
//!     "responseSchema": { ... }
//!   }
//! }
//! ```
//!
//! The model's JSON comes back as text in `candidates[0].content.parts[*].text`.

use crate::action::SectionAction;
use crate::error::AiError;
use crate::prompts;
use crate::provider::Collaborator;
use async_trait::async_trait;
use drafter_schema::{Outline, SectionData};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-latest";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the API key from `var`
    pub fn from_env(var: &str) -> Result<Self, AiError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(AiError::MissingApiKey(var.to_string())),
        }
    }
}

pub struct GeminiCollaborator {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiCollaborator {
    pub fn new(config: GeminiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(&self, payload: &Value) -> Result<String, AiError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(payload)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(map_error(status.as_u16(), &text));
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| AiError::Malformed(e.to_string()))?;
        extract_text(&body)
    }
}

#[async_trait]
impl Collaborator for GeminiCollaborator {
    fn id(&self) -> &str {
        "gemini"
    }

    async fn generate_draft(&self, prompt: &str) -> Result<Outline, AiError> {
        tracing::debug!(model = %self.config.model, "Requesting draft");
        let payload = build_payload(
            Some(prompts::DRAFT_SYSTEM_INSTRUCTION),
            prompt,
            prompts::outline_schema(),
        );

        let text = self.generate(&payload).await?;
        parse_json(&text)
    }

    async fn edit_section(&self, action: SectionAction, section: &SectionData) -> Result<SectionData, AiError> {
        tracing::debug!(model = %self.config.model, %action, "Requesting section edit");
        let prompt = prompts::section_action_prompt(action, section);
        let payload = build_payload(None, &prompt, prompts::section_schema());

        let text = self.generate(&payload).await?;
        parse_json(&text)
    }
}

pub fn build_payload(system_instruction: Option<&str>, prompt: &str, schema: Value) -> Value {
    let mut payload = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema
        }
    });

    if let Some(instruction) = system_instruction {
        payload["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
    }

    payload
}

/// Concatenated text of the first candidate
pub fn extract_text(body: &Value) -> Result<String, AiError> {
    let text: String = body
        .get("candidates")
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|v| v.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    serde_json::from_str(text.trim()).map_err(|e| AiError::Malformed(e.to_string()))
}

fn map_error(status: u16, body: &str) -> AiError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string());

    AiError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(parts: Value) -> Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": parts },
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = response(json!([{ "text": "{\"title\":" }, { "text": "\"A\",\"content\":[]}" }]));
        let text = extract_text(&body).unwrap();
        let section: SectionData = parse_json(&text).unwrap();
        assert_eq!(section, SectionData::new("A", vec![]));
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(extract_text(&json!({})), Err(AiError::EmptyResponse));
        assert_eq!(extract_text(&response(json!([]))), Err(AiError::EmptyResponse));
        assert_eq!(extract_text(&response(json!([{ "text": "  " }]))), Err(AiError::EmptyResponse));
    }

    #[test]
    fn test_malformed_outline() {
        assert!(matches!(parse_json::<Outline>("not json"), Err(AiError::Malformed(_))));
        // `sections` is required
        assert!(matches!(parse_json::<Outline>("{}"), Err(AiError::Malformed(_))));
    }

    #[test]
    fn test_outline_missing_fields_default() {
        let outline: Outline = parse_json(r#"{"sections":[{"title":"Only title"}]}"#).unwrap();
        assert_eq!(outline.sections[0].title, "Only title");
        assert!(outline.sections[0].paragraphs.is_empty());
    }

    #[test]
    fn test_payload_shape() {
        let payload = build_payload(Some("be brief"), "Draft an NDA", prompts::outline_schema());

        assert_eq!(payload["contents"][0]["parts"][0]["text"], "Draft an NDA");
        assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(payload["generationConfig"]["responseMimeType"], "application/json");

        let edit = build_payload(None, "x", prompts::section_schema());
        assert!(edit.get("systemInstruction").is_none());
    }

    #[test]
    fn test_api_error_message() {
        let err = map_error(400, r#"{"error":{"code":400,"message":"API key not valid"}}"#);
        assert_eq!(
            err,
            AiError::Api {
                status: 400,
                message: "API key not valid".into()
            }
        );
        assert_eq!(map_error(502, "Bad Gateway"), AiError::Api { status: 502, message: "Bad Gateway".into() });
    }

    #[test]
    fn test_endpoint() {
        let mut config = GeminiConfig::new("k");
        config.base_url = "http://localhost:8080/v1beta/".into();
        let gemini = GeminiCollaborator::new(config).unwrap();
        assert_eq!(
            gemini.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash-latest:generateContent"
        );
    }
}
