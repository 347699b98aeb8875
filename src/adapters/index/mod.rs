//! Retrieval index adapters.

mod embedding_index;

pub use embedding_index::EmbeddingIndex;
