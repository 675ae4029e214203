//! Error types for neospan-core.
//!
//! One taxonomy covers the whole invocation pipeline. The first two
//! variants are produced by the tool gateway itself; the remaining
//! three classify failures reported by the graph driver. Every variant
//! is terminal for the invocation that raised it; nothing in Neospan
//! retries.

use thiserror::Error;

/// Result type alias for neospan-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while executing a tool invocation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The query's lexical intent does not match the invoked operation
    /// (e.g. a write keyword in a read call). Raised before the driver
    /// is contacted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required database capability is absent (currently only the
    /// APOC plugin for schema introspection). Carries a remediation
    /// hint for the operator.
    #[error("missing capability: {0}")]
    MissingCapability(String),

    /// A client-side error reported by the driver: malformed query,
    /// constraint violation, unknown procedure, and the like.
    #[error("Neo4j client error [{code}]: {message}")]
    Client {
        /// Neo4j status code, e.g. `Neo.ClientError.Statement.SyntaxError`.
        code: String,
        /// Server-provided error message.
        message: String,
    },

    /// A database-side failure reported by the driver.
    #[error("Neo4j error [{code}]: {message}")]
    Database {
        /// Neo4j status code.
        code: String,
        /// Server-provided error message.
        message: String,
    },

    /// Anything else: network failure, timeout, programming error.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Neo4j status code carried by this error, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Client { code, .. } | Self::Database { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns `true` if the driver reported an unknown procedure,
    /// which is how a missing APOC installation manifests.
    pub fn is_procedure_not_found(&self) -> bool {
        self.code()
            .is_some_and(|c| c.contains("Neo.ClientError.Procedure.ProcedureNotFound"))
    }
}

// ============================================================================
// Tests
// ============================================================================
