//! Offline speech synthesizer for demo runs and tests.

use std::f32::consts::TAU;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::provider::SpeechSynthesizer;
use crate::error::FlowError;
use crate::voice::audio::{AudioPayload, PcmAudio};

const TONE_HZ: f32 = 440.0;
const SAMPLE_RATE: u32 = 24_000;

/// Synthesis call as seen by the mock, recorded for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisCall {
    pub voice_id: Option<String>,
    pub text: String,
}

/// Synthesizer that renders a short sine tone instead of speech, sized to
/// the length of the text.
#[derive(Clone, Default)]
pub struct MockTts {
    calls: Arc<Mutex<Vec<SynthesisCall>>>,
}

impl MockTts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SynthesisCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockTts {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn synthesize(
        &self,
        voice_id: Option<&str>,
        text: &str,
    ) -> Result<AudioPayload, FlowError> {
        self.calls.lock().unwrap().push(SynthesisCall {
            voice_id: voice_id.map(str::to_string),
            text: text.to_string(),
        });

        let millis = (200 + text.chars().count() as u64 * 30).min(2_000);
        let sample_count = SAMPLE_RATE as u64 * millis / 1_000;

        let data: Vec<u8> = (0..sample_count)
            .flat_map(|i| {
                let t = i as f32 / SAMPLE_RATE as f32;
                let amplitude = (t * TONE_HZ * TAU).sin() * 0.25;
                ((amplitude * f32::from(i16::MAX)) as i16).to_le_bytes()
            })
            .collect();

        Ok(AudioPayload::Pcm(PcmAudio {
            data,
            sample_rate: SAMPLE_RATE,
            channels: 1,
        }))
    }
}
