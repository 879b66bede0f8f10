//! Retrieval-augmented generation core.
//!
//! This module provides:
//! - `chunker`: fixed-window overlapping text chunking
//! - `DocumentPool`: in-memory documents with index-aligned embeddings
//! - `Retriever`: merged report-scoped and base-knowledge retrieval
//! - `RagEngine`: report ingestion and grounded question answering

pub mod chunker;
pub mod embedding;
pub mod engine;
pub mod generation;
pub mod pool;
pub mod prompt;
pub mod retriever;

pub use engine::{Answer, RagEngine};
pub use pool::{Document, DocumentPool, ScoredDocument};
