use async_trait::async_trait;

use crate::error::FlowError;

/// Trait for chat model providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Generate a reply to a single prompt. One blocking round trip: no
    /// retries, no streaming, no partial output. Implementations apply the
    /// persona framing appropriate to their API and must fail with an
    /// upstream error when the model produces no text.
    async fn respond(&self, prompt: &str) -> Result<String, FlowError>;
}
