//! Voice cloning and speech synthesis.

pub mod audio;
pub mod clone;
pub mod tts;

pub use clone::VoiceCloner;
pub use tts::SpeechSynthesizer;

use std::sync::Arc;
use std::time::Duration;

use crate::error::FlowError;
use crate::settings::config::{self, VoiceProviderConfig};

/// Production endpoint for the All-Voice-Lab HTTP API.
pub const ALL_VOICE_LAB_BASE_URL: &str = "https://api.allvoicelab.com";

/// Build the configured voice cloner.
///
/// Real providers resolve their API key here, at construction; a missing
/// key fails with a configuration error before any request exists.
pub fn build_cloner(cfg: &VoiceProviderConfig) -> Result<Arc<dyn VoiceCloner>, FlowError> {
    match cfg {
        VoiceProviderConfig::AllVoiceLab { api_key, base_url } => {
            let api_key = config::resolve_api_key(
                api_key.as_ref(),
                config::ALL_VOICE_LAB_API_KEY_ENV,
                "voice cloning",
            )?;
            let mut clone_config = clone::AllVoiceLabCloneConfig::new(api_key);
            if let Some(base_url) = base_url {
                clone_config.base_url = base_url.clone();
            }
            Ok(Arc::new(clone::AllVoiceLabCloner::new(clone_config)))
        }
        VoiceProviderConfig::Mock { clone_delay_ms } => Ok(Arc::new(clone::MockCloner::new(
            Duration::from_millis(*clone_delay_ms),
        ))),
    }
}

/// Build the configured speech synthesizer. Key handling matches
/// [`build_cloner`].
pub fn build_synthesizer(
    cfg: &VoiceProviderConfig,
) -> Result<Arc<dyn SpeechSynthesizer>, FlowError> {
    match cfg {
        VoiceProviderConfig::AllVoiceLab { api_key, base_url } => {
            let api_key = config::resolve_api_key(
                api_key.as_ref(),
                config::ALL_VOICE_LAB_API_KEY_ENV,
                "speech synthesis",
            )?;
            let mut tts_config = tts::AllVoiceLabTtsConfig::new(api_key);
            if let Some(base_url) = base_url {
                tts_config.base_url = base_url.clone();
            }
            Ok(Arc::new(tts::AllVoiceLabTts::new(tts_config)))
        }
        VoiceProviderConfig::Mock { .. } => Ok(Arc::new(tts::MockTts::new())),
    }
}
