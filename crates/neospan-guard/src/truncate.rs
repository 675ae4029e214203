//! Token-budget truncation.
//!
//! Serialized results are clipped to a hard token ceiling before being
//! returned. The budget is measured in the tokenizer of the target
//! model, so "2048 tokens" means the same thing to this server as it
//! does to the model consuming the output.
//!
//! Clipping cuts the token sequence, not the text: if the boundary
//! lands mid-word (or mid-character for multi-byte input), the decoded
//! tail may be a malformed fragment. That trade-off is intentional;
//! a hard ceiling beats well-formed output here.

use tiktoken_rs::get_bpe_from_model;

use crate::error::{Error, Result};

/// Default token budget for shaped results.
pub const DEFAULT_TOKEN_LIMIT: usize = 2048;

/// Default tokenizer model.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Truncate `text` to at most `token_limit` tokens of `model`'s
/// tokenizer.
///
/// Text already within the budget is returned unchanged. Over-budget
/// text is clipped to exactly the first `token_limit` tokens and
/// re-decoded.
///
/// # Errors
///
/// [`Error::UnknownModel`] if no tokenizer is registered for `model`;
/// there is no fallback tokenizer. [`Error::Decode`] if the clipped
/// token sequence cannot be decoded back to text.
pub fn truncate_to_tokens(text: &str, token_limit: usize, model: &str) -> Result<String> {
    let bpe = get_bpe_from_model(model).map_err(|_| Error::UnknownModel {
        model: model.to_string(),
    })?;

    let tokens = bpe.encode_ordinary(text);
    if tokens.len() <= token_limit {
        return Ok(text.to_string());
    }

    let clipped = tokens[..token_limit].to_vec();
    bpe.decode(clipped).map_err(|e| Error::Decode(e.to_string()))
}

/// [`truncate_to_tokens`] with the default budget and model.
pub fn truncate(text: &str) -> Result<String> {
    truncate_to_tokens(text, DEFAULT_TOKEN_LIMIT, DEFAULT_MODEL)
}

// ============================================================================
// Tests
// ============================================================================
