//! Offline voice cloner for demo runs and tests.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use super::provider::VoiceCloner;
use crate::error::FlowError;
use crate::voice::audio::DataUri;

/// Identifier every mock clone resolves to.
pub const MOCK_VOICE_ID: &str = "mock-cloned-voice-id";

/// Cloner that never touches the network. Sleeps for at least the
/// configured delay, then hands back the fixed identifier.
pub struct MockCloner {
    min_delay: Duration,
}

impl MockCloner {
    pub fn new(min_delay: Duration) -> Self {
        Self { min_delay }
    }
}

#[async_trait]
impl VoiceCloner for MockCloner {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn clone_voice(&self, sample: &DataUri) -> Result<String, FlowError> {
        info!(
            mime = sample.mime(),
            bytes = sample.bytes().len(),
            "mock-cloning voice sample"
        );
        tokio::time::sleep(self.min_delay).await;
        Ok(MOCK_VOICE_ID.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn returns_the_fixed_identifier_after_the_configured_delay() {
        let min_delay = Duration::from_millis(50);
        let cloner = MockCloner::new(min_delay);
        let sample = DataUri::parse("data:audio/wav;base64,AAAA").unwrap();

        let start = Instant::now();
        let voice_id = cloner.clone_voice(&sample).await.unwrap();

        assert_eq!(voice_id, MOCK_VOICE_ID);
        assert!(start.elapsed() >= min_delay);
    }
}
