use std::cmp::Ordering;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// A retrievable document: a fixed knowledge entry, or one chunk of an
/// uploaded report. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// A document paired with its similarity to a query. Transient; only lives
/// for the duration of one retrieval.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

#[derive(Default)]
struct PoolInner {
    docs: Vec<Document>,
    embeddings: Vec<Vec<f32>>,
}

/// Append-only collection of documents with index-aligned embedding
/// vectors (`docs.len() == embeddings.len()` always).
///
/// All access goes through one lock, so a reader never observes a
/// partially appended pair and concurrent ingest/search is safe.
#[derive(Default)]
pub struct DocumentPool {
    inner: RwLock<PoolInner>,
}

impl DocumentPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, document: Document, embedding: Vec<f32>) {
        let mut inner = self.inner.write().expect("pool lock poisoned");
        inner.docs.push(document);
        inner.embeddings.push(embedding);
    }

    /// Append a batch under one write lock.
    pub fn add_batch(&self, items: Vec<(Document, Vec<f32>)>) {
        let mut inner = self.inner.write().expect("pool lock poisoned");
        for (document, embedding) in items {
            inner.docs.push(document);
            inner.embeddings.push(embedding);
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("pool lock poisoned").docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear-scan similarity search: dot product against every stored
    /// vector (unit length on both sides, so this is cosine similarity),
    /// descending by score, at most `top_k` results.
    ///
    /// With `report_id` set, only documents tagged with that exact report
    /// id are considered; untagged documents never match a filter. Equal
    /// scores keep insertion order (stable sort).
    pub fn search(
        &self,
        query: &[f32],
        top_k: usize,
        report_id: Option<&str>,
    ) -> Vec<ScoredDocument> {
        let inner = self.inner.read().expect("pool lock poisoned");

        let mut scored: Vec<ScoredDocument> = inner
            .docs
            .iter()
            .zip(inner.embeddings.iter())
            .filter(|(doc, _)| match report_id {
                Some(filter) => doc.report_id.as_deref() == Some(filter),
                None => true,
            })
            .map(|(doc, embedding)| ScoredDocument {
                document: doc.clone(),
                score: dot(query, embedding),
            })
            .collect();

        scored.sort_by(|left, right| {
            right
                .score
                .partial_cmp(&left.score)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_k);
        scored
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
