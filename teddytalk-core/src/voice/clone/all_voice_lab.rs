//! All-Voice-Lab voice cloning implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::VoiceCloner;
use crate::error::FlowError;
use crate::voice::audio::DataUri;
use crate::voice::ALL_VOICE_LAB_BASE_URL;

#[derive(Debug, Clone)]
pub struct AllVoiceLabCloneConfig {
    pub api_key: String,
    pub base_url: String,
}

impl AllVoiceLabCloneConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: ALL_VOICE_LAB_BASE_URL.to_string(),
        }
    }
}

pub struct AllVoiceLabCloner {
    config: AllVoiceLabCloneConfig,
    client: Client,
}

impl AllVoiceLabCloner {
    pub fn new(config: AllVoiceLabCloneConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[derive(Serialize)]
struct CloneRequest<'a> {
    audio: &'a str,
}

#[derive(Deserialize)]
struct CloneResponse {
    #[serde(rename = "voiceId")]
    voice_id: Option<String>,
}

#[async_trait]
impl VoiceCloner for AllVoiceLabCloner {
    fn name(&self) -> &'static str {
        "all_voice_lab"
    }

    async fn clone_voice(&self, sample: &DataUri) -> Result<String, FlowError> {
        let url = format!("{}/clone", self.config.base_url);
        debug!(mime = sample.mime(), "submitting voice sample for cloning");

        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.config.api_key)
            .json(&CloneRequest {
                audio: sample.as_str(),
            })
            .send()
            .await
            .map_err(|e| FlowError::transport(format!("voice cloning request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FlowError::transport(format!("failed to read cloning response: {e}")))?;

        if !status.is_success() {
            debug!(%status, %body, "cloning endpoint returned an error");
            return Err(FlowError::upstream(
                Some(status.as_u16()),
                format!("voice cloning failed with {status}: {body}"),
            ));
        }

        let parsed: CloneResponse = serde_json::from_str(&body).map_err(|e| {
            FlowError::upstream(None, format!("unparseable cloning response: {e} - {body}"))
        })?;

        parsed
            .voice_id
            .ok_or_else(|| FlowError::upstream(None, "cloning response contained no voiceId"))
    }
}
