use std::sync::Arc;

use uuid::Uuid;

use crate::core::errors::ApiError;
use crate::knowledge;
use crate::llm::{ChatMessage, ModelProvider};

use super::chunker::{chunk_text, CHUNK_OVERLAP, MAX_CHUNK_CHARS};
use super::embedding::EmbeddingGateway;
use super::generation::GenerationGateway;
use super::pool::{Document, DocumentPool};
use super::prompt;
use super::retriever::Retriever;

/// A generated answer plus one human-readable source string per context
/// block, in block order.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<String>,
}

/// Orchestrates chunking, embedding, retrieval, prompt assembly and
/// generation over the two document pools.
pub struct RagEngine {
    provider: Arc<dyn ModelProvider>,
    embeddings: EmbeddingGateway,
    retriever: Retriever,
    generation: GenerationGateway,
    base_pool: Arc<DocumentPool>,
    report_pool: Arc<DocumentPool>,
}

impl RagEngine {
    /// Build the engine and seed the base pool from the fixed knowledge
    /// catalog in one batched embed call. Construction fails if that call
    /// fails; the base pool is read-only afterwards.
    pub async fn new(
        provider: Arc<dyn ModelProvider>,
        embedding_model: &str,
        chat_model: &str,
    ) -> Result<Self, ApiError> {
        let embeddings = EmbeddingGateway::new(provider.clone(), embedding_model);
        let generation = GenerationGateway::new(provider.clone(), chat_model);

        let base_pool = Arc::new(DocumentPool::new());
        let report_pool = Arc::new(DocumentPool::new());

        let catalog = knowledge::base_catalog();
        let texts: Vec<String> = catalog.iter().map(|doc| doc.text.clone()).collect();
        let vectors = embeddings.embed_many(&texts).await?;
        base_pool.add_batch(catalog.into_iter().zip(vectors).collect());

        tracing::info!(
            "Seeded base knowledge pool with {} documents",
            base_pool.len()
        );

        let retriever = Retriever::new(embeddings.clone(), base_pool.clone(), report_pool.clone());

        Ok(Self {
            provider,
            embeddings,
            retriever,
            generation,
            base_pool,
            report_pool,
        })
    }

    /// Chunk, embed and store a report's text under a fresh report id.
    ///
    /// Zero chunks (e.g. whitespace-only text) is a legal, inert
    /// ingestion: the id is returned and nothing is embedded or stored.
    pub async fn ingest_report(&self, filename: &str, text: &str) -> Result<String, ApiError> {
        let report_id = Uuid::new_v4().to_string();

        let chunks = chunk_text(text, MAX_CHUNK_CHARS, CHUNK_OVERLAP);
        if chunks.is_empty() {
            tracing::info!("Report {} produced no chunks; nothing stored", filename);
            return Ok(report_id);
        }

        let vectors = self.embeddings.embed_many(&chunks).await?;

        let items: Vec<(Document, Vec<f32>)> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| {
                (
                    Document {
                        id: Uuid::new_v4().to_string(),
                        title: format!("Report: {}", filename),
                        text: chunk,
                        report_id: Some(report_id.clone()),
                        filename: Some(filename.to_string()),
                    },
                    vector,
                )
            })
            .collect();

        tracing::info!("Ingested {} chunks from {}", items.len(), filename);
        self.report_pool.add_batch(items);

        Ok(report_id)
    }

    /// Retrieve grounding context, assemble the prompt and generate an
    /// answer. `sources[n]` describes the document behind context block n.
    pub async fn answer(
        &self,
        question: &str,
        history: &[ChatMessage],
        report_id: Option<&str>,
    ) -> Result<Answer, ApiError> {
        let merged = self.retriever.retrieve(question, report_id).await?;

        let sources = merged
            .iter()
            .map(|result| describe_source(&result.document))
            .collect();

        let messages = prompt::build_messages(question, history, &merged, report_id.is_some());
        let text = self.generation.complete(&messages).await?;

        Ok(Answer { text, sources })
    }

    pub async fn provider_reachable(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }

    pub fn base_len(&self) -> usize {
        self.base_pool.len()
    }

    pub fn report_len(&self) -> usize {
        self.report_pool.len()
    }
}

fn describe_source(document: &Document) -> String {
    match (&document.filename, &document.report_id) {
        (Some(filename), Some(report_id)) => format!("{} (report_id={})", filename, report_id),
        _ => format!("{} (id={})", document.title, document.id),
    }
}
