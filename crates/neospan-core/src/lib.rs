//! Core types, traits, and errors for the Neospan Neo4j MCP servers.
//!
//! This crate holds the pieces shared by every Neospan crate:
//!
//! - the invocation error taxonomy ([`Error`], [`Result`])
//! - the graph driver seam ([`GraphExecutor`], [`WriteCounters`])
//! - the retrieval seam ([`Retriever`], [`ScoredDocument`])
//!
//! Nothing in here talks to a network or holds state; concrete
//! backends live in `neospan-neo4j`.

pub mod error;
pub mod executor;
pub mod retriever;

// Re-exports: errors
pub use error::{Error, Result};

// Re-exports: driver seam
pub use executor::{GraphExecutor, Params, WriteCounters};

// Re-exports: retrieval seam
pub use retriever::{Retriever, ScoredDocument};
