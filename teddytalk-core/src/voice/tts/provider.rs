use async_trait::async_trait;

use crate::error::FlowError;
use crate::voice::audio::AudioPayload;

/// Trait for text-to-speech providers.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Synthesize speech for `text`. `voice_id` selects a cloned voice;
    /// `None` must still succeed using the provider's default voice.
    async fn synthesize(&self, voice_id: Option<&str>, text: &str)
        -> Result<AudioPayload, FlowError>;
}
