//! Cypher MCP tools for Neospan.
//!
//! Exposes three tools over a [`neospan_core::GraphExecutor`]:
//!
//! - `get_neo4j_schema`: APOC-backed schema introspection, pruned by
//!   [`clean_schema`] before it is returned
//! - `read_neo4j_cypher`: classified, sanitized, token-clipped reads
//! - `write_neo4j_cypher`: classified writes returning mutation
//!   counters
//!
//! The crate never talks to a driver directly. Everything goes through
//! the executor seam so tests run against mocks and the server wires
//! in the real Neo4j adapter.

pub mod schema;
pub mod tools;

pub use schema::clean_schema;
pub use tools::{CypherArgs, CypherTools, ShapingConfig};
