use std::sync::Arc;

use crate::config::Settings;
use crate::llm::OpenAiProvider;
use crate::rag::RagEngine;

pub mod error;

use error::InitializationError;

/// Shared application state: one engine instance behind an `Arc`, passed
/// explicitly to every handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub engine: Arc<RagEngine>,
}

impl AppState {
    /// Build the model provider and the engine. Seeding the base knowledge
    /// pool happens here, once; a failed seed aborts startup.
    pub async fn initialize(settings: Settings) -> Result<Arc<Self>, InitializationError> {
        let provider = Arc::new(OpenAiProvider::new(
            settings.base_url.clone(),
            settings.api_key.clone(),
        ));

        let engine = RagEngine::new(provider, &settings.embedding_model, &settings.chat_model)
            .await
            .map_err(InitializationError::Engine)?;

        Ok(Arc::new(AppState {
            settings,
            engine: Arc::new(engine),
        }))
    }
}
