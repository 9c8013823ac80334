pub mod ai;
pub mod chat;
pub mod error;
pub mod settings;
pub mod voice;

pub use ai::provider::ChatProvider;
pub use chat::{ChatTurn, Reply, Session, TurnRole};
pub use error::FlowError;
pub use settings::{Settings, SettingsManager};
pub use voice::audio::{AudioPayload, DataUri, PcmAudio};
pub use voice::clone::VoiceCloner;
pub use voice::tts::SpeechSynthesizer;
