//! The chat responder: one prompt in, one persona-framed reply out.

pub mod gemini;
pub mod mock;
pub mod persona;
pub mod provider;

pub use gemini::{GeminiChat, GeminiConfig};
pub use mock::{MockChat, MockChatBehavior};
pub use provider::ChatProvider;

use std::sync::Arc;

use crate::error::FlowError;
use crate::settings::config::{self, ChatProviderConfig};

/// Build the configured chat provider.
///
/// A missing API key for the real provider fails with a configuration
/// error before any request exists.
pub fn build_provider(cfg: &ChatProviderConfig) -> Result<Arc<dyn ChatProvider>, FlowError> {
    match cfg {
        ChatProviderConfig::Gemini {
            api_key,
            model,
            base_url,
        } => {
            let api_key =
                config::resolve_api_key(api_key.as_ref(), config::GEMINI_API_KEY_ENV, "chat")?;
            let mut gemini_config = GeminiConfig::new(api_key);
            if let Some(model) = model {
                gemini_config.model = model.clone();
            }
            if let Some(base_url) = base_url {
                gemini_config.base_url = base_url.clone();
            }
            Ok(Arc::new(GeminiChat::new(gemini_config)))
        }
        ChatProviderConfig::Mock { behavior } => Ok(Arc::new(MockChat::new(behavior.clone()))),
    }
}
