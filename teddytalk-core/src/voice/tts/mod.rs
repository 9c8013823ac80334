pub mod all_voice_lab;
pub mod mock;
pub mod provider;

pub use all_voice_lab::{AllVoiceLabTts, AllVoiceLabTtsConfig};
pub use mock::MockTts;
pub use provider::SpeechSynthesizer;
