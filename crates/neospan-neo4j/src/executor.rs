//! Bolt-backed implementation of the graph driver seam.
//!
//! [`Neo4jExecutor`] wraps a [`neo4rs::Graph`] connection pool and
//! implements [`GraphExecutor`]. Routing is by method: `read` and
//! `write` each submit through the driver, with the per-call timeout
//! enforced around the whole round trip. Driver status codes are
//! folded into the shared error taxonomy here, so nothing above this
//! crate ever sees a `neo4rs` type.

use async_trait::async_trait;
use neo4rs::{
    BoltBoolean, BoltFloat, BoltInteger, BoltList, BoltMap, BoltNull, BoltString, BoltType,
    ConfigBuilder, Graph, Query, query,
};
use serde_json::Value;
use std::time::Duration;

use neospan_core::{Error, GraphExecutor, Params, Result, WriteCounters};

/// Connection settings for a Neo4j instance.
#[derive(Clone, Debug)]
pub struct Neo4jSettings {
    /// Bolt URI, e.g. `bolt://localhost:7687`.
    pub uri: String,
    /// Authentication user.
    pub username: String,
    /// Authentication password.
    pub password: String,
    /// Target database name.
    pub database: String,
}

/// [`GraphExecutor`] backed by the Bolt driver.
///
/// `Graph` is a connection pool behind an `Arc`, so cloning the
/// executor is cheap and sharing it across tool invocations needs no
/// further coordination.
#[derive(Clone)]
pub struct Neo4jExecutor {
    graph: Graph,
}

impl Neo4jExecutor {
    /// Open a connection pool against the configured instance.
    ///
    /// Connections are established lazily; a bad URI or credential
    /// surfaces on the first query, not here.
    pub fn connect(settings: &Neo4jSettings) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(&settings.uri)
            .user(&settings.username)
            .password(&settings.password)
            .db(settings.database.as_str())
            .build()
            .map_err(|e| Error::Unexpected(e.to_string()))?;
        let graph = Graph::connect(config).map_err(|e| Error::Unexpected(e.to_string()))?;
        Ok(Self { graph })
    }

    /// Wrap an already-connected pool.
    pub fn from_graph(graph: Graph) -> Self {
        Self { graph }
    }

    fn build_query(text: &str, params: &Params) -> Query {
        let mut q = query(text);
        for (key, value) in params {
            q = q.param(key, json_to_bolt(value));
        }
        q
    }
}

#[async_trait]
impl GraphExecutor for Neo4jExecutor {
    async fn read(&self, text: &str, params: &Params, timeout: Duration) -> Result<Vec<Value>> {
        let q = Self::build_query(text, params);
        let rows = tokio::time::timeout(timeout, async {
            let mut stream = self.graph.execute(q).await.map_err(map_driver_error)?;
            let mut rows = Vec::new();
            while let Some(row) = stream.next().await.map_err(map_driver_error)? {
                let value: Value = row.to().map_err(|e| Error::Unexpected(e.to_string()))?;
                rows.push(value);
            }
            Ok(rows)
        })
        .await
        .map_err(|_| timed_out(timeout))??;
        Ok(rows)
    }

    async fn write(
        &self,
        text: &str,
        params: &Params,
        timeout: Duration,
    ) -> Result<WriteCounters> {
        let q = Self::build_query(text, params);
        let counters = tokio::time::timeout(timeout, async {
            let mut stream = self.graph.execute(q).await.map_err(map_driver_error)?;
            // Drain rows first; the summary only arrives once the
            // stream is exhausted.
            while stream.next().await.map_err(map_driver_error)?.is_some() {}
            let summary = stream.finish().await.map_err(map_driver_error)?;
            Ok(from_summary_counters(summary.stats()))
        })
        .await
        .map_err(|_| timed_out(timeout))??;
        Ok(counters)
    }
}

// Expiry is an upstream database failure, terminal for the
// invocation; no partial effects are assumed.
fn timed_out(timeout: Duration) -> Error {
    Error::Database {
        code: "Neo.DatabaseError.Transaction.TransactionTimedOut".to_string(),
        message: format!("query timed out after {timeout:?}"),
    }
}

/// Fold a driver error into the shared taxonomy.
///
/// Server-reported failures are classified by status code prefix;
/// everything else (connection loss, protocol errors) is unexpected.
fn map_driver_error(error: neo4rs::Error) -> Error {
    match error {
        neo4rs::Error::Neo4j(e) => classify_status(e.code(), e.message()),
        other => Error::Unexpected(other.to_string()),
    }
}

fn classify_status(code: &str, message: &str) -> Error {
    if code.starts_with("Neo.ClientError") {
        Error::Client {
            code: code.to_string(),
            message: message.to_string(),
        }
    } else {
        Error::Database {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

fn from_summary_counters(stats: &neo4rs::summary::Counters) -> WriteCounters {
    // The driver does not surface the server's `contains_updates` flag;
    // derive it the same way the official drivers do: any update
    // counter being non-zero means the query updated the graph.
    let contains_updates = stats.nodes_created > 0
        || stats.nodes_deleted > 0
        || stats.relationships_created > 0
        || stats.relationships_deleted > 0
        || stats.properties_set > 0
        || stats.labels_added > 0
        || stats.labels_removed > 0
        || stats.indexes_added > 0
        || stats.indexes_removed > 0
        || stats.constraints_added > 0
        || stats.constraints_removed > 0;
    WriteCounters {
        nodes_created: stats.nodes_created,
        nodes_deleted: stats.nodes_deleted,
        relationships_created: stats.relationships_created,
        relationships_deleted: stats.relationships_deleted,
        properties_set: stats.properties_set,
        labels_added: stats.labels_added,
        labels_removed: stats.labels_removed,
        indexes_added: stats.indexes_added,
        indexes_removed: stats.indexes_removed,
        constraints_added: stats.constraints_added,
        constraints_removed: stats.constraints_removed,
        contains_updates,
    }
}

/// Convert a JSON parameter value into its Bolt representation.
///
/// Numbers that fit an i64 become Bolt integers, anything else
/// numeric becomes a float. Nesting is preserved.
pub fn json_to_bolt(value: &Value) -> BoltType {
    match value {
        Value::Null => BoltType::Null(BoltNull),
        Value::Bool(b) => BoltType::Boolean(BoltBoolean::new(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BoltType::Integer(BoltInteger::new(i)),
            None => BoltType::Float(BoltFloat::new(n.as_f64().unwrap_or(f64::NAN))),
        },
        Value::String(s) => BoltType::String(BoltString::new(s)),
        Value::Array(items) => {
            let list: Vec<BoltType> = items.iter().map(json_to_bolt).collect();
            BoltType::List(BoltList::from(list))
        }
        Value::Object(map) => {
            let mut bolt = BoltMap::default();
            for (key, val) in map {
                bolt.put(BoltString::new(key), json_to_bolt(val));
            }
            BoltType::Map(bolt)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
