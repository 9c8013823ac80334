//! Scripted chat provider for tests and offline demo runs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::ChatProvider;
use crate::error::FlowError;

const DEFAULT_REPLY: &str =
    "*gives you a warm bear hug* I'm all ears, friend! Tell me more about that.";

/// Behavior for the mock chat provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MockChatBehavior {
    /// Reply with the canned default text
    #[default]
    Success,
    /// Reply with a fixed text
    Scripted { reply: String },
    /// Fail with an upstream error N times, then succeed
    UpstreamErrorThenSuccess { remaining_errors: usize },
    /// Always fail with an upstream error
    AlwaysUpstreamError,
}

/// Mock chat provider
#[derive(Clone)]
pub struct MockChat {
    behavior: Arc<Mutex<MockChatBehavior>>,
    captured_prompts: Arc<Mutex<Vec<String>>>,
}

impl MockChat {
    pub fn new(behavior: MockChatBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            captured_prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, in call order.
    pub fn captured_prompts(&self) -> Vec<String> {
        self.captured_prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn respond(&self, prompt: &str) -> Result<String, FlowError> {
        self.captured_prompts
            .lock()
            .unwrap()
            .push(prompt.to_string());

        let mut behavior = self.behavior.lock().unwrap();
        match &mut *behavior {
            MockChatBehavior::Success => Ok(DEFAULT_REPLY.to_string()),
            MockChatBehavior::Scripted { reply } => Ok(reply.clone()),
            MockChatBehavior::UpstreamErrorThenSuccess { remaining_errors } => {
                if *remaining_errors == 0 {
                    Ok(DEFAULT_REPLY.to_string())
                } else {
                    *remaining_errors -= 1;
                    Err(FlowError::upstream(Some(503), "mock chat outage"))
                }
            }
            MockChatBehavior::AlwaysUpstreamError => {
                Err(FlowError::upstream(Some(500), "mock chat failure"))
            }
        }
    }
}
