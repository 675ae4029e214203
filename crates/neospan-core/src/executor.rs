//! Graph driver seam.
//!
//! This module defines the [`GraphExecutor`] trait that isolates the
//! tool gateway from the concrete Neo4j driver. Routing is expressed
//! by method choice: [`GraphExecutor::read`] goes through the driver's
//! read path, [`GraphExecutor::write`] through the write path. Which
//! method a tool calls is decided by the invoked operation, never by
//! the classification outcome.
//!
//! Implementations live elsewhere (`neospan-neo4j` for the real driver,
//! mocks in tests); the gateway only sees this trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

use crate::error::Result;

/// Named parameters passed alongside a Cypher query.
pub type Params = Map<String, Value>;

/// Mutation counters reported by the driver after a write query.
///
/// Field names mirror the Bolt result summary. Serialized verbatim to
/// the caller; counters are small and fixed-shape, so the write path
/// skips sanitization and truncation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteCounters {
    /// Nodes created.
    pub nodes_created: u64,
    /// Nodes deleted.
    pub nodes_deleted: u64,
    /// Relationships created.
    pub relationships_created: u64,
    /// Relationships deleted.
    pub relationships_deleted: u64,
    /// Properties set.
    pub properties_set: u64,
    /// Labels added.
    pub labels_added: u64,
    /// Labels removed.
    pub labels_removed: u64,
    /// Indexes added.
    pub indexes_added: u64,
    /// Indexes removed.
    pub indexes_removed: u64,
    /// Constraints added.
    pub constraints_added: u64,
    /// Constraints removed.
    pub constraints_removed: u64,
    /// Whether the query produced any updates at all.
    pub contains_updates: bool,
}

/// Abstract executor for Cypher queries.
///
/// The per-call `timeout` bounds the driver round trip; on expiry the
/// implementation must fail the call (the gateway treats it as an
/// upstream database error, with no partial effects assumed).
///
/// # Concurrency
///
/// Implementations must be safe to share across concurrently running
/// tool invocations; connection pooling is the implementation's
/// (i.e. the driver's) concern.
#[async_trait]
pub trait GraphExecutor: Send + Sync {
    /// Execute a read query and return the result rows.
    ///
    /// Each row is a mapping from returned field name to value.
    async fn read(&self, query: &str, params: &Params, timeout: Duration) -> Result<Vec<Value>>;

    /// Execute a write query and return the mutation counter summary.
    async fn write(
        &self,
        query: &str,
        params: &Params,
        timeout: Duration,
    ) -> Result<WriteCounters>;
}

// ============================================================================
// Tests
// ============================================================================
