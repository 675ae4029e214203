//! Neo4j driver backends for Neospan.
//!
//! Two concrete implementations of the `neospan-core` seams:
//!
//! - [`Neo4jExecutor`]: Bolt-backed [`neospan_core::GraphExecutor`]
//!   over a `neo4rs` connection pool, with status-code classification
//!   and per-query timeouts
//! - [`FulltextRetriever`]: [`neospan_core::Retriever`] over a
//!   fulltext index, routed through the executor's read path
//!
//! This is the only crate in the workspace that links the driver.

pub mod executor;
pub mod retriever;

pub use executor::{Neo4jExecutor, Neo4jSettings, json_to_bolt};
pub use retriever::FulltextRetriever;
