//! Cypher tool gateway.
//!
//! Provides `CypherTools`, the registry behind the three Cypher tools:
//!
//! - `get_neo4j_schema`: APOC schema introspection, pruned
//! - `read_neo4j_cypher`: read query, sanitized and token-clipped
//! - `write_neo4j_cypher`: write query, mutation counters back
//!
//! Each invocation runs the same pipeline: classify the query's
//! lexical intent against the invoked operation, reject mismatches
//! before the driver is contacted, execute through the
//! [`GraphExecutor`] seam, shape the result, and wrap it in a tool
//! envelope. Driver failures are logged with full query context and
//! re-signaled as typed tool errors. No stage retries.

use neospan_core::{Error, GraphExecutor, Params};
use neospan_guard::{classify, sanitize_with_limit, truncate_to_tokens};
use neospan_mcp::error::McpErrorExt;
use neospan_mcp::model::{CallToolResult, Content, ErrorData, Tool};
use neospan_mcp::registry::{ToolRegistry, ToolResult};

use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use crate::schema::clean_schema;

/// The introspection query behind `get_neo4j_schema`.
const SCHEMA_QUERY: &str = "CALL apoc.meta.schema();";

/// Remediation message for instances without APOC.
const APOC_HINT: &str = "This instance of Neo4j does not have the APOC plugin installed. \
     Please install and enable the APOC plugin to use the `get_neo4j_schema` tool.";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn json_schema(value: Value) -> Arc<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

fn make_tool(name: &str, description: &str, schema: Value) -> Tool {
    Tool::new(name.to_string(), description.to_string(), json_schema(schema))
}

fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Convert a driver failure to a protocol error, appending the query
/// text and parameters so the caller can diagnose without server logs.
fn with_query_context(error: &Error, query: &str, params: &Params) -> ErrorData {
    let base = error.to_mcp_error();
    let params = serde_json::to_string(params).unwrap_or_else(|_| "{}".to_string());
    ErrorData::new(base.code, format!("{}\n{query}\n{params}", base.message), None)
}

// ---------------------------------------------------------------------------
// Argument and configuration types
// ---------------------------------------------------------------------------

/// Arguments shared by the read and write Cypher tools.
#[derive(Debug, Deserialize)]
pub struct CypherArgs {
    /// The Cypher query to execute.
    pub query: String,
    /// Named parameters to pass to the query.
    #[serde(default)]
    pub params: Params,
}

/// Result-shaping knobs for the read path.
#[derive(Clone, Debug)]
pub struct ShapingConfig {
    /// Sequences of this original length or more are elided.
    pub list_size_limit: usize,
    /// Token budget for serialized read results.
    pub token_limit: usize,
    /// Tokenizer model the budget is measured in.
    pub model: String,
}

impl Default for ShapingConfig {
    fn default() -> Self {
        Self {
            list_size_limit: neospan_guard::DEFAULT_LIST_SIZE_LIMIT,
            token_limit: neospan_guard::DEFAULT_TOKEN_LIMIT,
            model: neospan_guard::DEFAULT_MODEL.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// CypherTools
// ---------------------------------------------------------------------------

/// MCP tools for Cypher query execution.
///
/// Stateless across invocations; the only shared resource is the
/// executor's connection pool, owned by the driver.
pub struct CypherTools {
    executor: Arc<dyn GraphExecutor>,
    timeout: Duration,
    shaping: ShapingConfig,
}

impl CypherTools {
    /// Create Cypher tools over an executor with a per-query timeout.
    pub fn new<E: GraphExecutor + 'static>(executor: E, timeout: Duration) -> Self {
        Self {
            executor: Arc::new(executor),
            timeout,
            shaping: ShapingConfig::default(),
        }
    }

    /// Create Cypher tools sharing an existing executor handle.
    pub fn with_shared(executor: Arc<dyn GraphExecutor>, timeout: Duration) -> Self {
        Self {
            executor,
            timeout,
            shaping: ShapingConfig::default(),
        }
    }

    /// Override the result-shaping configuration.
    pub fn with_shaping(mut self, shaping: ShapingConfig) -> Self {
        self.shaping = shaping;
        self
    }
}

impl ToolRegistry for CypherTools {
    fn tools(&self) -> Vec<Tool> {
        vec![
            make_tool(
                "get_neo4j_schema",
                "List all node labels, their attributes, and their relationships \
                 in the Neo4j database. Requires the APOC plugin.",
                json!({
                    "type": "object",
                    "properties": {}
                }),
            ),
            make_tool(
                "read_neo4j_cypher",
                "Execute a read Cypher query on the Neo4j database",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The Cypher query to execute"
                        },
                        "params": {
                            "type": "object",
                            "description": "Parameters to pass to the Cypher query"
                        }
                    },
                    "required": ["query"]
                }),
            ),
            make_tool(
                "write_neo4j_cypher",
                "Execute a write Cypher query on the Neo4j database",
                json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The Cypher query to execute"
                        },
                        "params": {
                            "type": "object",
                            "description": "Parameters to pass to the Cypher query"
                        }
                    },
                    "required": ["query"]
                }),
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let executor = Arc::clone(&self.executor);
        let timeout = self.timeout;
        let shaping = self.shaping.clone();

        match name {
            "get_neo4j_schema" => Some(Box::pin(async move {
                let rows = executor
                    .read(SCHEMA_QUERY, &Params::new(), timeout)
                    .await
                    .map_err(|e| {
                        if e.is_procedure_not_found() {
                            let e = Error::MissingCapability(APOC_HINT.to_string());
                            tracing::error!(error = %e, "schema introspection failed");
                            e.to_mcp_error()
                        } else {
                            tracing::error!(error = %e, "schema introspection failed");
                            with_query_context(&e, SCHEMA_QUERY, &Params::new())
                        }
                    })?;

                let raw = rows
                    .first()
                    .and_then(|row| row.get("value"))
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();

                let cleaned = clean_schema(&raw);
                let text = serde_json::to_string(&cleaned)
                    .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
                Ok(text_result(text))
            })),

            "read_neo4j_cypher" => Some(Box::pin(async move {
                let args: CypherArgs = serde_json::from_value(args)
                    .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;

                if classify(&args.query).is_write() {
                    let err = Error::InvalidArgument(
                        "Only MATCH queries are allowed for read-query".to_string(),
                    );
                    tracing::warn!(query = %args.query, "write keyword in read call");
                    return Err(err.to_mcp_error());
                }

                let rows = executor
                    .read(&args.query, &args.params, timeout)
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            error = %e,
                            query = %args.query,
                            params = ?args.params,
                            "error executing read query"
                        );
                        with_query_context(&e, &args.query, &args.params)
                    })?;

                tracing::debug!(rows = rows.len(), "read query returned rows");

                let sanitized: Vec<Value> = rows
                    .iter()
                    .filter_map(|row| sanitize_with_limit(row, shaping.list_size_limit))
                    .collect();
                let serialized = serde_json::to_string(&sanitized)
                    .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
                let text =
                    truncate_to_tokens(&serialized, shaping.token_limit, &shaping.model)
                        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;

                Ok(text_result(text))
            })),

            "write_neo4j_cypher" => Some(Box::pin(async move {
                let args: CypherArgs = serde_json::from_value(args)
                    .map_err(|e| ErrorData::invalid_params(e.to_string(), None))?;

                if !classify(&args.query).is_write() {
                    let err = Error::InvalidArgument(
                        "Only write queries are allowed for write-query".to_string(),
                    );
                    tracing::warn!(query = %args.query, "read-only query in write call");
                    return Err(err.to_mcp_error());
                }

                let counters = executor
                    .write(&args.query, &args.params, timeout)
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            error = %e,
                            query = %args.query,
                            params = ?args.params,
                            "error executing write query"
                        );
                        with_query_context(&e, &args.query, &args.params)
                    })?;

                let text = serde_json::to_string(&counters)
                    .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;

                tracing::debug!(counters = %text, "write query applied");

                Ok(text_result(text))
            })),

            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
