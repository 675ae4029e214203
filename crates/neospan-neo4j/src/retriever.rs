//! Fulltext-index retriever.
//!
//! Runs `db.index.fulltext.queryNodes` through the [`GraphExecutor`]
//! read path and maps each hit to a [`ScoredDocument`]. Going through
//! the executor rather than the driver keeps the retriever testable
//! against mocks and gives it the same timeout discipline as every
//! other query.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Duration;

use neospan_core::{GraphExecutor, Params, Result, Retriever, ScoredDocument};

const SEARCH_QUERY: &str = "CALL db.index.fulltext.queryNodes($index_name, $search) \
     YIELD node, score \
     RETURN properties(node) AS document, score \
     LIMIT $top_k";

/// [`Retriever`] over a Neo4j fulltext index.
pub struct FulltextRetriever {
    executor: Arc<dyn GraphExecutor>,
    index_name: String,
    content_property: String,
    timeout: Duration,
}

impl FulltextRetriever {
    /// Create a retriever over `index_name`, reading document text
    /// from `content_property` on each matched node.
    pub fn new(
        executor: Arc<dyn GraphExecutor>,
        index_name: impl Into<String>,
        content_property: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            executor,
            index_name: index_name.into(),
            content_property: content_property.into(),
            timeout,
        }
    }

    fn to_document(&self, row: &Value) -> ScoredDocument {
        let score = row.get("score").and_then(Value::as_f64);

        let mut properties: Map<String, Value> = row
            .get("document")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let content = match properties.remove(&self.content_property) {
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        let mut doc = ScoredDocument::new(content);
        doc.metadata = properties;
        doc.score = score;
        doc
    }
}

#[async_trait]
impl Retriever for FulltextRetriever {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredDocument>> {
        let mut params = Params::new();
        params.insert("index_name".to_string(), json!(self.index_name));
        params.insert("search".to_string(), json!(query));
        params.insert("top_k".to_string(), json!(top_k as u64));

        let rows = self
            .executor
            .read(SEARCH_QUERY, &params, self.timeout)
            .await?;

        Ok(rows.iter().map(|row| self.to_document(row)).collect())
    }

    fn name(&self) -> &str {
        "fulltext"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    use neospan_core::WriteCounters;

    struct RecordingExecutor {
        rows: Vec<Value>,
        seen: Mutex<Vec<(String, Params)>>,
    }

    impl RecordingExecutor {
        fn with_rows(rows: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                rows,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl GraphExecutor for RecordingExecutor {
        async fn read(
            &self,
            query: &str,
            params: &Params,
            _timeout: Duration,
        ) -> Result<Vec<Value>> {
            self.seen
                .lock()
                .unwrap()
                .push((query.to_string(), params.clone()));
            Ok(self.rows.clone())
        }

        async fn write(
            &self,
            _query: &str,
            _params: &Params,
            _timeout: Duration,
        ) -> Result<WriteCounters> {
            unreachable!("retriever never writes")
        }
    }

    fn retriever(executor: Arc<RecordingExecutor>) -> FulltextRetriever {
        FulltextRetriever::new(
            executor,
            "movieFulltext",
            "plot",
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn test_search_parameters_are_bound() {
        let executor = RecordingExecutor::with_rows(vec![]);
        let r = retriever(Arc::clone(&executor));

        r.search("shark attack", 4).await.unwrap();

        let seen = executor.seen.lock().unwrap();
        let (query, params) = &seen[0];
        assert!(query.contains("db.index.fulltext.queryNodes"));
        assert_eq!(params["index_name"], "movieFulltext");
        assert_eq!(params["search"], "shark attack");
        assert_eq!(params["top_k"], 4);
    }

    #[tokio::test]
    async fn test_rows_map_to_documents() {
        let executor = RecordingExecutor::with_rows(vec![json!({
            "document": { "plot": "a shark terrorizes a beach town", "title": "Jaws" },
            "score": 2.5
        })]);
        let r = retriever(executor);

        let docs = r.search("shark", 4).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "a shark terrorizes a beach town");
        assert_eq!(docs[0].score, Some(2.5));
        // The content property is lifted out of the metadata.
        assert_eq!(docs[0].metadata["title"], "Jaws");
        assert!(!docs[0].metadata.contains_key("plot"));
    }

    #[tokio::test]
    async fn test_missing_content_property_yields_empty_content() {
        let executor = RecordingExecutor::with_rows(vec![json!({
            "document": { "title": "Jaws" },
            "score": 1.0
        })]);
        let r = retriever(executor);

        let docs = r.search("shark", 4).await.unwrap();
        assert_eq!(docs[0].content, "");
        assert_eq!(docs[0].metadata["title"], "Jaws");
    }
}
