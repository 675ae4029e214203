//! Retrieval tool gateway.

use neospan_core::Retriever;
use neospan_mcp::error::McpErrorExt;
use neospan_mcp::model::{CallToolResult, Content, ErrorData, Tool};
use neospan_mcp::registry::{ToolRegistry, ToolResult};

use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::xml::format_as_xml;

/// Default number of documents returned per search.
pub const DEFAULT_TOP_K: usize = 4;

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Arguments for the vector search tool.
#[derive(Debug, Deserialize)]
pub struct SearchArgs {
    /// Natural language question to search with.
    pub query: String,
    /// Maximum number of documents to return.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

/// MCP tool for ranked-document retrieval.
///
/// A thin pass-through: no classification, sanitization, or token
/// clipping happens here. The retriever ranks, this crate formats.
pub struct VectorTools {
    retriever: Arc<dyn Retriever>,
}

impl VectorTools {
    /// Create the retrieval tool over a retriever backend.
    pub fn new<R: Retriever + 'static>(retriever: R) -> Self {
        Self {
            retriever: Arc::new(retriever),
        }
    }

    /// Create the retrieval tool sharing an existing retriever handle.
    pub fn with_shared(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

impl ToolRegistry for VectorTools {
    fn tools(&self) -> Vec<Tool> {
        let schema = json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Natural language question to find relevant documents"
                },
                "top_k": {
                    "type": "integer",
                    "description": "Maximum number of documents to return",
                    "default": DEFAULT_TOP_K
                }
            },
            "required": ["query"]
        });

        let input_schema = match schema {
            Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        };

        vec![Tool::new(
            "neo4j_vector",
            "Find documents in the Neo4j database based on natural language input",
            input_schema,
        )]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        if name != "neo4j_vector" {
            return None;
        }

        let retriever = Arc::clone(&self.retriever);
        Some(Box::pin(async move {
            let args: SearchArgs = serde_json::from_value(args)
                .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;

            let documents = retriever
                .search(&args.query, args.top_k)
                .await
                .map_err(|e| {
                    tracing::error!(
                        error = %e,
                        query = %args.query,
                        retriever = retriever.name(),
                        "error executing retrieval query"
                    );
                    e.to_mcp_error()
                })?;

            tracing::debug!(
                documents = documents.len(),
                retriever = retriever.name(),
                "retrieval query returned documents"
            );

            let xml = format_as_xml(&documents, &args.query);
            Ok(CallToolResult::success(vec![Content::text(xml)]))
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use neospan_core::{Error, Result as CoreResult, ScoredDocument};
    use neospan_mcp::model::RawContent;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubRetriever {
        documents: Vec<ScoredDocument>,
        seen: Mutex<Vec<(String, usize)>>,
        fail: bool,
    }

    impl StubRetriever {
        fn with_documents(documents: Vec<ScoredDocument>) -> Self {
            Self {
                documents,
                seen: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                documents: Vec::new(),
                seen: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl Retriever for StubRetriever {
        async fn search(&self, query: &str, top_k: usize) -> CoreResult<Vec<ScoredDocument>> {
            self.seen.lock().unwrap().push((query.to_string(), top_k));
            if self.fail {
                return Err(Error::Database {
                    code: "Neo.DatabaseError.General.UnknownError".to_string(),
                    message: "index unavailable".to_string(),
                });
            }
            Ok(self.documents.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn result_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn test_single_tool_registered() {
        let tools = VectorTools::new(StubRetriever::with_documents(vec![]));
        let listed = tools.tools();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "neo4j_vector");
    }

    #[test]
    fn test_unknown_tool_returns_none() {
        let tools = VectorTools::new(StubRetriever::with_documents(vec![]));
        assert!(tools.call("neo4j_schema", json!({})).is_none());
    }

    #[tokio::test]
    async fn test_documents_returned_as_xml() {
        let tools = VectorTools::new(StubRetriever::with_documents(vec![
            ScoredDocument::new("a shark movie").with_metadata("title", json!("Jaws")),
        ]));

        let result = tools
            .call("neo4j_vector", json!({"query": "shark movie"}))
            .unwrap()
            .await
            .unwrap();

        let xml = result_text(&result);
        assert!(xml.contains("<query>shark movie</query>"));
        assert!(xml.contains("<content>a shark movie</content>"));
        assert!(xml.contains("<title>Jaws</title>"));
    }

    #[tokio::test]
    async fn test_empty_results_message() {
        let tools = VectorTools::new(StubRetriever::with_documents(vec![]));
        let result = tools
            .call("neo4j_vector", json!({"query": "nothing matches"}))
            .unwrap()
            .await
            .unwrap();
        assert_eq!(
            result_text(&result),
            "<results>No relevant documents found.</results>"
        );
    }

    #[tokio::test]
    async fn test_top_k_defaults_and_passes_through() {
        let retriever = Arc::new(StubRetriever::with_documents(vec![]));
        let tools = VectorTools::with_shared(Arc::clone(&retriever) as Arc<dyn Retriever>);

        tools
            .call("neo4j_vector", json!({"query": "a"}))
            .unwrap()
            .await
            .unwrap();
        tools
            .call("neo4j_vector", json!({"query": "b", "top_k": 10}))
            .unwrap()
            .await
            .unwrap();

        let seen = retriever.seen.lock().unwrap();
        assert_eq!(seen[0], ("a".to_string(), DEFAULT_TOP_K));
        assert_eq!(seen[1], ("b".to_string(), 10));
    }

    #[tokio::test]
    async fn test_retriever_error_surfaces() {
        let tools = VectorTools::new(StubRetriever::failing());
        let err = tools
            .call("neo4j_vector", json!({"query": "q"}))
            .unwrap()
            .await
            .unwrap_err();
        assert!(err.message.contains("index unavailable"));
    }

    #[tokio::test]
    async fn test_missing_query_is_invalid_params() {
        let tools = VectorTools::new(StubRetriever::with_documents(vec![]));
        let err = tools
            .call("neo4j_vector", json!({}))
            .unwrap()
            .await
            .unwrap_err();
        assert_eq!(err.code, neospan_mcp::model::ErrorCode::INVALID_PARAMS);
    }
}
