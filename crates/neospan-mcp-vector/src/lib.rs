//! Vector retrieval MCP tool for Neospan.
//!
//! Exposes a single `neo4j_vector` tool over a
//! [`neospan_core::Retriever`] backend. Results are rendered as a
//! compact XML envelope (see [`format_as_xml`]) in rank order; an
//! empty result set gets a fixed "no relevant documents" message.

pub mod tools;
pub mod xml;

pub use tools::{DEFAULT_TOP_K, SearchArgs, VectorTools};
pub use xml::format_as_xml;
