use std::sync::Arc;

use crate::core::errors::ApiError;

use super::embedding::EmbeddingGateway;
use super::pool::{DocumentPool, ScoredDocument};

/// Report chunks retrieved per scoped query.
pub const REPORT_TOP_K: usize = 4;
/// Base knowledge documents retrieved per query.
pub const BASE_TOP_K: usize = 2;

/// Queries the report and base pools and merges the results.
pub struct Retriever {
    embeddings: EmbeddingGateway,
    base_pool: Arc<DocumentPool>,
    report_pool: Arc<DocumentPool>,
}

impl Retriever {
    pub fn new(
        embeddings: EmbeddingGateway,
        base_pool: Arc<DocumentPool>,
        report_pool: Arc<DocumentPool>,
    ) -> Self {
        Self {
            embeddings,
            base_pool,
            report_pool,
        }
    }

    /// Embed the question once, search the report pool when a report id is
    /// given, and always search the base pool. Report matches come first in
    /// the merged sequence; the two pools are never re-ranked against each
    /// other.
    pub async fn retrieve(
        &self,
        question: &str,
        report_id: Option<&str>,
    ) -> Result<Vec<ScoredDocument>, ApiError> {
        let query_vec = self.embeddings.embed_text(question).await?;

        let mut merged = Vec::new();
        if let Some(report_id) = report_id {
            merged.extend(
                self.report_pool
                    .search(&query_vec, REPORT_TOP_K, Some(report_id)),
            );
        }
        merged.extend(self.base_pool.search(&query_vec, BASE_TOP_K, None));

        Ok(merged)
    }
}
