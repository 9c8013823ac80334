//! Gemini chat implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::persona;
use super::provider::ChatProvider;
use crate::error::FlowError;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeminiConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

pub struct GeminiChat {
    config: GeminiConfig,
    client: Client,
    system_prompt: String,
}

impl GeminiChat {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            system_prompt: persona::SYSTEM_PROMPT.to_string(),
        }
    }
}

// Gemini generateContent wire types

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentBody<'a>,
    contents: Vec<ContentBody<'a>>,
}

#[derive(Serialize)]
struct ContentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl ChatProvider for GeminiChat {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn respond(&self, prompt: &str) -> Result<String, FlowError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let request = GenerateContentRequest {
            system_instruction: ContentBody {
                role: None,
                parts: vec![Part {
                    text: &self.system_prompt,
                }],
            },
            contents: vec![ContentBody {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(model = %self.config.model, "sending chat prompt");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FlowError::transport(format!("chat request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FlowError::transport(format!("failed to read chat response: {e}")))?;

        if !status.is_success() {
            debug!(%status, %body, "chat model returned an error");
            return Err(FlowError::upstream(
                Some(status.as_u16()),
                format!("chat request failed with {status}: {body}"),
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            FlowError::upstream(None, format!("unparseable chat response: {e} - {body}"))
        })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(FlowError::upstream(
                None,
                "chat model produced no output text",
            ));
        }

        Ok(text)
    }
}
