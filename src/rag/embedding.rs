use std::sync::Arc;

use crate::core::errors::ApiError;
use crate::llm::ModelProvider;

const NORM_EPSILON: f32 = 1e-10;

/// Binds the shared model provider to a fixed embedding model and
/// guarantees that every vector handed to callers is unit length.
#[derive(Clone)]
pub struct EmbeddingGateway {
    provider: Arc<dyn ModelProvider>,
    model_id: String,
}

impl EmbeddingGateway {
    pub fn new(provider: Arc<dyn ModelProvider>, model_id: &str) -> Self {
        Self {
            provider,
            model_id: model_id.to_string(),
        }
    }

    pub async fn embed_text(&self, text: &str) -> Result<Vec<f32>, ApiError> {
        let mut vectors = self
            .provider
            .embed(&[text.to_string()], &self.model_id)
            .await?;

        let vector = vectors
            .pop()
            .ok_or_else(|| ApiError::Internal("provider returned no embedding".to_string()))?;

        Ok(normalize(vector))
    }

    /// Embed a batch in one provider call, preserving input order.
    /// An empty batch returns empty without touching the provider.
    pub async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ApiError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self.provider.embed(texts, &self.model_id).await?;

        if vectors.len() != texts.len() {
            return Err(ApiError::Internal(format!(
                "embedding count mismatch: {} inputs, {} vectors",
                texts.len(),
                vectors.len()
            )));
        }

        Ok(vectors.into_iter().map(normalize).collect())
    }
}

/// L2-normalize a vector. The epsilon keeps a zero vector at zero instead
/// of dividing by zero.
pub fn normalize(vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm + NORM_EPSILON;
    vector.into_iter().map(|x| x / denom).collect()
}
