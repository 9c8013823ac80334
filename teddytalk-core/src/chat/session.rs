use std::sync::Arc;

use tracing::{debug, warn};

use super::types::ChatTurn;
use crate::ai::provider::ChatProvider;
use crate::error::FlowError;
use crate::voice::audio::DataUri;
use crate::voice::clone::VoiceCloner;
use crate::voice::tts::SpeechSynthesizer;

/// Outcome of one user turn: the assistant's text plus the synthesized
/// speech for it. Synthesis failures are surfaced separately so a late
/// audio problem never loses an already-generated reply.
#[derive(Debug)]
pub struct Reply {
    pub text: String,
    pub speech: Result<String, FlowError>,
}

/// A single chat session.
///
/// Owns the transcript and the optional cloned-voice identifier; both live
/// only as long as the session. Each turn runs strictly sequentially: the
/// chat call first, then, only once it has resolved, the synthesis call.
pub struct Session {
    chat: Arc<dyn ChatProvider>,
    cloner: Arc<dyn VoiceCloner>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    transcript: Vec<ChatTurn>,
    voice_id: Option<String>,
}

impl Session {
    pub fn new(
        chat: Arc<dyn ChatProvider>,
        cloner: Arc<dyn VoiceCloner>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            chat,
            cloner,
            synthesizer,
            transcript: Vec::new(),
            voice_id: None,
        }
    }

    /// Submit one user turn.
    ///
    /// The turn only lands in the transcript once the chat call has
    /// succeeded; a failed turn leaves the session exactly as it was.
    pub async fn send(&mut self, prompt: &str) -> Result<Reply, FlowError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(FlowError::validation("prompt must not be empty"));
        }

        let text = self.chat.respond(prompt).await?;

        self.transcript.push(ChatTurn::user(prompt));
        self.transcript.push(ChatTurn::assistant(&text));

        let speech = self
            .synthesizer
            .synthesize(self.voice_id.as_deref(), &text)
            .await
            .map(|payload| payload.into_media());
        if let Err(e) = &speech {
            warn!(error = %e, "speech synthesis failed; returning text only");
        }

        Ok(Reply { text, speech })
    }

    /// Clone a voice from a raw data-URI string and hold the identifier
    /// for every subsequent turn. Validation happens here, before the
    /// provider is involved.
    pub async fn clone_voice(&mut self, audio_data_uri: &str) -> Result<String, FlowError> {
        let sample = DataUri::parse(audio_data_uri)?;
        let voice_id = self.cloner.clone_voice(&sample).await?;
        debug!(%voice_id, "voice cloned and stored for this session");
        self.voice_id = Some(voice_id.clone());
        Ok(voice_id)
    }

    /// Adopt an existing voice identifier (e.g. one saved from an earlier
    /// session).
    pub fn set_voice(&mut self, voice_id: impl Into<String>) {
        self.voice_id = Some(voice_id.into());
    }

    pub fn voice_id(&self) -> Option<&str> {
        self.voice_id.as_deref()
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        &self.transcript
    }
}
