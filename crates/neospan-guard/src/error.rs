//! Error types for neospan-guard

use thiserror::Error;

/// Result type alias for neospan-guard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while shaping results.
///
/// The classifier and sanitizer are total functions; only the token
/// truncator can fail.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No tokenizer is registered for the requested model id.
    #[error("no tokenizer known for model `{model}`")]
    UnknownModel {
        /// The model id that was requested.
        model: String,
    },

    /// The clipped token sequence could not be decoded back to text.
    #[error("token decode failed: {0}")]
    Decode(String),
}
