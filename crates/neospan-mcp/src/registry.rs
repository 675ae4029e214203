//! Tool registry trait for the Neospan MCP servers.
//!
//! Each tool domain (Cypher gateway, retrieval, built-ins) implements
//! [`ToolRegistry`] to declare its tools and dispatch calls to them.
//! [`CompositeRegistry`] stitches several domains into the single
//! registry the server handler serves.

use rmcp::model::{CallToolResult, ErrorData, Tool};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Type alias for async tool handler results.
pub type ToolResult = Pin<Box<dyn Future<Output = Result<CallToolResult, ErrorData>> + Send>>;

/// Trait for registering and dispatching MCP tools.
///
/// `NeospanMcpServer` delegates `list_tools` and `call_tool` to the
/// registry it holds; registries never see namespace prefixes; the
/// server strips those before dispatch.
///
/// # Example
///
/// ```rust,ignore
/// struct CypherTools { /* ... */ }
///
/// impl ToolRegistry for CypherTools {
///     fn tools(&self) -> Vec<Tool> {
///         vec![/* tool definitions */]
///     }
///
///     fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
///         match name {
///             "read_neo4j_cypher" => Some(Box::pin(/* ... */)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ToolRegistry: Send + Sync {
    /// Returns definitions for all tools this registry serves.
    fn tools(&self) -> Vec<Tool>;

    /// Dispatches a tool call by (unprefixed) name.
    ///
    /// Returns `None` if this registry does not recognize the tool.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Number of registered tools.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Check whether a tool exists by name.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }
}

/// A registry that combines multiple sub-registries.
///
/// Dispatch tries sub-registries in insertion order; the first one
/// that recognizes the name wins.
///
/// # Example
///
/// ```rust,ignore
/// let registry = CompositeRegistry::new()
///     .add(cypher_tools)
///     .add(vector_tools)
///     .add(health_tools);
/// ```
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    /// Create a new empty composite registry.
    pub fn new() -> Self {
        Self {
            registries: Vec::new(),
        }
    }

    /// Add a sub-registry.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: ToolRegistry + 'static>(mut self, registry: R) -> Self {
        self.registries.push(Box::new(registry));
        self
    }
}

impl Default for CompositeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<Tool> {
        self.registries.iter().flat_map(|r| r.tools()).collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        for registry in &self.registries {
            if let Some(result) = registry.call(name, args.clone()) {
                return Some(result);
            }
        }
        None
    }
}

// ============================================================================
// Tests
// ============================================================================
