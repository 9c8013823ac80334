use async_trait::async_trait;

use crate::error::FlowError;
use crate::voice::audio::DataUri;

/// Trait for voice cloning providers.
#[async_trait]
pub trait VoiceCloner: Send + Sync {
    fn name(&self) -> &'static str;

    /// Create a voice profile from a recorded sample.
    ///
    /// Each call yields exactly one voice identifier or fails. Identifiers
    /// are provider-assigned and not stable across calls, even for
    /// identical audio.
    async fn clone_voice(&self, sample: &DataUri) -> Result<String, FlowError>;
}
