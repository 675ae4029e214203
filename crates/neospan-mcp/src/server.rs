//! MCP server handler.
//!
//! [`NeospanMcpServer`] implements the rmcp [`ServerHandler`] by
//! delegating tool listing and dispatch to a [`ToolRegistry`]. It also
//! owns tool namespacing: an optional namespace string prefixes every
//! advertised tool name (`movies` → `movies-read_neo4j_cypher`) and is
//! stripped again before dispatch, so registries never see prefixes.

use crate::registry::ToolRegistry;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, ErrorData, ListToolsResult, PaginatedRequestParam,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;

/// Server identity and behavior settings.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Server name advertised to clients.
    pub name: String,
    /// Server version advertised to clients.
    pub version: String,
    /// Instructions shown to connecting clients.
    pub instructions: Option<String>,
    /// Tool namespace; empty means no prefixing.
    pub namespace: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "neospan-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
            namespace: String::new(),
        }
    }
}

/// Normalize a namespace into a tool-name prefix.
///
/// A non-empty namespace gains a trailing `-` unless it already has
/// one; an empty namespace stays empty (no prefixing).
pub fn format_namespace(namespace: &str) -> String {
    if namespace.is_empty() {
        String::new()
    } else if namespace.ends_with('-') {
        namespace.to_string()
    } else {
        format!("{namespace}-")
    }
}

/// Generic MCP server over a [`ToolRegistry`].
#[derive(Clone)]
pub struct NeospanMcpServer {
    registry: Arc<dyn ToolRegistry>,
    config: ServerConfig,
    prefix: String,
}

impl NeospanMcpServer {
    /// Create a server over the given registry with default config.
    pub fn new<R: ToolRegistry + 'static>(registry: R) -> Self {
        Self::with_config(registry, ServerConfig::default())
    }

    /// Create a server with explicit configuration.
    pub fn with_config<R: ToolRegistry + 'static>(registry: R, config: ServerConfig) -> Self {
        let prefix = format_namespace(&config.namespace);
        Self {
            registry: Arc::new(registry),
            config,
            prefix,
        }
    }

    /// The active tool-name prefix (may be empty).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Strip the namespace prefix from an inbound tool name.
    ///
    /// Unprefixed names pass through so clients that cache bare names
    /// keep working.
    fn strip_prefix<'a>(&self, name: &'a str) -> &'a str {
        name.strip_prefix(self.prefix.as_str()).unwrap_or(name)
    }
}

impl ServerHandler for NeospanMcpServer {
    fn get_info(&self) -> ServerInfo {
        // ServerInfo is #[non_exhaustive]; start from the default.
        let mut info = ServerInfo::default();
        info.instructions = self.config.instructions.clone();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self
            .registry
            .tools()
            .into_iter()
            .map(|mut tool| {
                if !self.prefix.is_empty() {
                    tool.name = format!("{}{}", self.prefix, tool.name).into();
                }
                tool
            })
            .collect();

        Ok(ListToolsResult {
            tools,
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name = self.strip_prefix(request.name.as_ref());
        let args = request
            .arguments
            .map(Value::Object)
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()));

        tracing::debug!(tool = name, "dispatching tool call");

        match self.registry.call(name, args) {
            Some(handler) => handler.await,
            None => Err(ErrorData::invalid_params(
                format!("unknown tool: {}", request.name),
                None,
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
