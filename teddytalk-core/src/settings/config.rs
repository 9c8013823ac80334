use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ai::mock::MockChatBehavior;
use crate::error::FlowError;

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const ALL_VOICE_LAB_API_KEY_ENV: &str = "ALL_VOICE_LAB_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Directory where synthesized replies are written. The CLI picks a
    /// default under the user's data directory when unset.
    #[serde(default)]
    pub audio_dir: Option<PathBuf>,

    /// Chat model configuration
    #[serde(default)]
    pub chat_provider: ChatProviderConfig,

    /// Voice cloning / speech synthesis configuration
    #[serde(default)]
    pub voice_provider: VoiceProviderConfig,
}

impl Settings {
    /// Switch both providers to their offline mock implementations.
    pub fn use_mocks(&mut self) {
        self.chat_provider = ChatProviderConfig::Mock {
            behavior: MockChatBehavior::default(),
        };
        self.voice_provider = VoiceProviderConfig::Mock {
            clone_delay_ms: default_clone_delay_ms(),
        };
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ChatProviderConfig {
    #[serde(rename = "gemini")]
    Gemini {
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default)]
        model: Option<String>,
        #[serde(default)]
        base_url: Option<String>,
    },
    #[serde(rename = "mock")]
    Mock {
        #[serde(default)]
        behavior: MockChatBehavior,
    },
}

impl Default for ChatProviderConfig {
    fn default() -> Self {
        Self::Gemini {
            api_key: None,
            model: None,
            base_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VoiceProviderConfig {
    #[serde(rename = "all_voice_lab")]
    AllVoiceLab {
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default)]
        base_url: Option<String>,
    },
    #[serde(rename = "mock")]
    Mock {
        #[serde(default = "default_clone_delay_ms")]
        clone_delay_ms: u64,
    },
}

impl Default for VoiceProviderConfig {
    fn default() -> Self {
        Self::AllVoiceLab {
            api_key: None,
            base_url: None,
        }
    }
}

fn default_clone_delay_ms() -> u64 {
    1_200
}

/// Resolve an API key: the settings file wins, the environment is the
/// fallback. Called once per provider, at construction.
pub(crate) fn resolve_api_key(
    explicit: Option<&String>,
    env_var: &str,
    what: &str,
) -> Result<String, FlowError> {
    if let Some(key) = explicit {
        if !key.is_empty() {
            return Ok(key.clone());
        }
    }

    match std::env::var(env_var) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(FlowError::configuration(format!(
            "{what} requires an API key: set it in settings.toml or export {env_var}"
        ))),
    }
}
