//! MCP server infrastructure for Neospan.
//!
//! This crate provides the protocol-facing pieces shared by the
//! Neospan tool servers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      neospan-mcp                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ToolRegistry trait - tool registration and dispatch        │
//! │  CompositeRegistry - combine multiple tool sources          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  NeospanMcpServer - generic server (implements ServerHandler)│
//! │  ServerConfig - identity, instructions, tool namespace      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  McpErrorExt - neospan_core::Error → rmcp::ErrorData        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Built-in tools:                                            │
//! │  └── health - server status and tool count                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use neospan_mcp::{CompositeRegistry, NeospanMcpServer, ServerConfig};
//!
//! let registry = CompositeRegistry::new()
//!     .add(cypher_tools)
//!     .add(vector_tools);
//!
//! let server = NeospanMcpServer::with_config(registry, config);
//! let service = server.serve(rmcp::transport::stdio()).await?;
//! service.waiting().await?;
//! ```

pub mod error;
pub mod registry;
pub mod server;
pub mod tools;

/// Re-export of the rmcp model types tool crates need.
pub use rmcp::model;

// Re-exports: registry
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult};

// Re-exports: server
pub use server::{NeospanMcpServer, ServerConfig, format_namespace};

// Re-exports: error
pub use error::McpErrorExt;

// Re-exports: built-in tools
pub use tools::{HealthResponse, HealthTools};
