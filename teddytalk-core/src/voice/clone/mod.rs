pub mod all_voice_lab;
pub mod mock;
pub mod provider;

pub use all_voice_lab::{AllVoiceLabCloneConfig, AllVoiceLabCloner};
pub use mock::{MockCloner, MOCK_VOICE_ID};
pub use provider::VoiceCloner;
