use thiserror::Error;

/// Failure taxonomy shared by every chat and voice operation.
///
/// Each operation performs exactly one round trip and either fully succeeds
/// or fails with one of these variants; nothing is retried automatically.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Malformed input rejected before any work happens.
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// A required setting (typically an API key) is absent. Raised at
    /// provider construction, before any request exists.
    #[error("missing configuration: {message}")]
    Configuration { message: String },

    /// The upstream service answered with a non-2xx status, or with a body
    /// that lacks the expected field. `status` is present for the former.
    #[error("upstream failure: {message}")]
    Upstream { status: Option<u16>, message: String },

    /// The HTTP client failed before a response was produced.
    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl FlowError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// HTTP status carried by an upstream failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}
