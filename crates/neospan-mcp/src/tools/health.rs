//! Built-in health tool.
//!
//! Reports server identity, the target database, and the number of
//! registered tools. Useful as a connectivity smoke test from MCP
//! clients without touching Neo4j.

use crate::registry::{ToolRegistry, ToolResult};
use rmcp::model::{CallToolResult, Content, ErrorData, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"healthy"`: if the server answers at all, it is up.
    pub status: String,
    /// Server name.
    pub server_name: String,
    /// Server version.
    pub version: String,
    /// Target Neo4j database name.
    pub database: String,
    /// Number of registered tools (including this one).
    pub tool_count: usize,
}

/// Registry providing the `health` tool.
pub struct HealthTools {
    server_name: String,
    version: String,
    database: String,
    total_tool_count: usize,
}

impl HealthTools {
    /// Create health tools with server metadata.
    ///
    /// `total_tool_count` should include the health tool itself.
    pub fn new(
        server_name: impl Into<String>,
        version: impl Into<String>,
        database: impl Into<String>,
        total_tool_count: usize,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            version: version.into(),
            database: database.into(),
            total_tool_count,
        }
    }
}

impl ToolRegistry for HealthTools {
    fn tools(&self) -> Vec<Tool> {
        vec![Tool::new(
            "health",
            "Check server health and status",
            Arc::new(serde_json::Map::new()),
        )]
    }

    fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
        if name != "health" {
            return None;
        }

        let response = HealthResponse {
            status: "healthy".to_string(),
            server_name: self.server_name.clone(),
            version: self.version.clone(),
            database: self.database.clone(),
            tool_count: self.total_tool_count,
        };

        Some(Box::pin(async move {
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_tools_registration() {
        let tools = HealthTools::new("neospan-mcp", "0.1.0", "neo4j", 5);
        assert_eq!(tools.tool_count(), 1);
        assert!(tools.has_tool("health"));
        assert!(!tools.has_tool("read_neo4j_cypher"));
    }

    #[tokio::test]
    async fn test_health_call_reports_metadata() {
        let tools = HealthTools::new("neospan-mcp", "0.1.0", "movies", 4);
        let result = tools.call("health", json!({})).unwrap().await.unwrap();
        assert_eq!(result.is_error, Some(false));

        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => t.text.clone(),
            _ => panic!("expected text content"),
        };
        let response: HealthResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(response.status, "healthy");
        assert_eq!(response.database, "movies");
        assert_eq!(response.tool_count, 4);
    }

    #[test]
    fn test_health_unknown_tool() {
        let tools = HealthTools::new("s", "1.0", "neo4j", 1);
        assert!(tools.call("unknown", json!({})).is_none());
    }
}
