//! All-Voice-Lab text-to-speech implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::SpeechSynthesizer;
use crate::error::FlowError;
use crate::voice::audio::AudioPayload;
use crate::voice::ALL_VOICE_LAB_BASE_URL;

#[derive(Debug, Clone)]
pub struct AllVoiceLabTtsConfig {
    pub api_key: String,
    pub base_url: String,
}

impl AllVoiceLabTtsConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: ALL_VOICE_LAB_BASE_URL.to_string(),
        }
    }
}

pub struct AllVoiceLabTts {
    config: AllVoiceLabTtsConfig,
    client: Client,
}

impl AllVoiceLabTts {
    pub fn new(config: AllVoiceLabTtsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    // Omitted entirely when no cloned voice is held; the upstream then
    // falls back to its default voice.
    #[serde(rename = "voiceId", skip_serializing_if = "Option::is_none")]
    voice_id: Option<&'a str>,
    text: &'a str,
}

#[derive(Deserialize)]
struct SynthesizeResponse {
    audio: Option<String>,
}

#[async_trait]
impl SpeechSynthesizer for AllVoiceLabTts {
    fn name(&self) -> &'static str {
        "all_voice_lab"
    }

    async fn synthesize(
        &self,
        voice_id: Option<&str>,
        text: &str,
    ) -> Result<AudioPayload, FlowError> {
        let url = format!("{}/tts", self.config.base_url);
        debug!(?voice_id, chars = text.len(), "requesting speech synthesis");

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.config.api_key)
            .json(&SynthesizeRequest { voice_id, text })
            .send()
            .await
            .map_err(|e| FlowError::transport(format!("speech synthesis request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FlowError::transport(format!("failed to read synthesis response: {e}")))?;

        if !status.is_success() {
            debug!(%status, %body, "synthesis endpoint returned an error");
            return Err(FlowError::upstream(
                Some(status.as_u16()),
                format!("speech synthesis failed with {status}: {body}"),
            ));
        }

        let parsed: SynthesizeResponse = serde_json::from_str(&body).map_err(|e| {
            FlowError::upstream(None, format!("unparseable synthesis response: {e} - {body}"))
        })?;

        let audio = parsed
            .audio
            .ok_or_else(|| FlowError::upstream(None, "synthesis response contained no audio"))?;

        // The upstream encodes the container itself; pass it through as-is.
        Ok(AudioPayload::Encoded(audio))
    }
}
