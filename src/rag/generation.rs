use std::sync::Arc;

use crate::core::errors::ApiError;
use crate::llm::{ChatMessage, ModelProvider};

/// Binds the shared model provider to a fixed chat model. Non-streaming;
/// a single response is taken.
#[derive(Clone)]
pub struct GenerationGateway {
    provider: Arc<dyn ModelProvider>,
    model_id: String,
}

impl GenerationGateway {
    pub fn new(provider: Arc<dyn ModelProvider>, model_id: &str) -> Self {
        Self {
            provider,
            model_id: model_id.to_string(),
        }
    }

    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ApiError> {
        self.provider.chat(messages, &self.model_id).await
    }
}
