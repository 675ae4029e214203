//! Query-safety and result-shaping layer for Neospan.
//!
//! Three pure, synchronous, side-effect-free functions sit between the
//! MCP tools and the graph driver:
//!
//! - [`classify`]: lexical read/write classification of a Cypher query
//! - [`sanitize`]: recursive pruning of oversized/low-value subtrees
//!   from a query result
//! - [`truncate_to_tokens`]: hard token-budget clipping of serialized
//!   output
//!
//! All three are safe to call from any number of concurrent tool
//! invocations without coordination.

pub mod classify;
pub mod error;
pub mod sanitize;
pub mod truncate;

// Re-exports: classifier
pub use classify::{QueryIntent, classify};

// Re-exports: sanitizer
pub use sanitize::{DEFAULT_LIST_SIZE_LIMIT, sanitize, sanitize_with_limit};

// Re-exports: truncator
pub use truncate::{DEFAULT_MODEL, DEFAULT_TOKEN_LIMIT, truncate, truncate_to_tokens};

// Re-exports: error
pub use error::{Error, Result};
