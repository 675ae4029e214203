//! Retrieval seam for ranked-document search.
//!
//! The vector/retrieval tools treat search as an external collaborator
//! with a single operation: a query string in, ranked documents out.
//! What sits behind it (a Neo4j vector index, a fulltext index, an
//! embedding pipeline) is the implementation's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// A single ranked document returned by a retriever.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// Document text content.
    pub content: String,

    /// Relevance score, if the backend reports one (higher is better).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Arbitrary document metadata.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl ScoredDocument {
    /// Create a document with content only.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            score: None,
            metadata: Map::new(),
        }
    }

    /// Attach a relevance score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Abstract ranked-document retriever.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Search for documents relevant to `query`, returning at most
    /// `top_k` results ordered by descending relevance.
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredDocument>>;

    /// Retriever name for diagnostics.
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scored_document_builder() {
        let doc = ScoredDocument::new("a movie about sharks")
            .with_score(0.92)
            .with_metadata("title", json!("Jaws"));
        assert_eq!(doc.content, "a movie about sharks");
        assert_eq!(doc.score, Some(0.92));
        assert_eq!(doc.metadata["title"], "Jaws");
    }

    #[test]
    fn test_scored_document_skips_empty_fields() {
        let doc = ScoredDocument::new("text");
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("score").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_trait_object_safety() {
        fn _assert_object_safe(_: &dyn Retriever) {}
    }
}
