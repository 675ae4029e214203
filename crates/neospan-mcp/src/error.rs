//! Error conversion at the MCP boundary.
//!
//! Tool handlers work with [`neospan_core::Error`]; the protocol layer
//! wants [`rmcp::model::ErrorData`]. [`McpErrorExt`] is the one place
//! that mapping lives. Callers are expected to log failures (with
//! query context) *before* converting; conversion flattens the error
//! to a human-readable message.

use neospan_core::Error;
use rmcp::model::ErrorData;

/// Conversion from Neospan errors to MCP protocol errors.
pub trait McpErrorExt {
    /// Convert to an rmcp [`ErrorData`] for the wire.
    fn to_mcp_error(&self) -> ErrorData;
}

impl McpErrorExt for Error {
    fn to_mcp_error(&self) -> ErrorData {
        match self {
            // Rejected before the driver was contacted.
            Error::InvalidArgument(message) => ErrorData::invalid_params(message.clone(), None),
            // Everything else is terminal server-side failure; the
            // message carries the remediation hint or driver context.
            _ => ErrorData::internal_error(self.to_string(), None),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_maps_to_invalid_params() {
        let err = Error::InvalidArgument("Only MATCH queries are allowed".to_string());
        let data = err.to_mcp_error();
        assert_eq!(data.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(data.message.contains("Only MATCH queries"));
    }

    #[test]
    fn test_missing_capability_keeps_remediation_hint() {
        let err = Error::MissingCapability("install and enable the APOC plugin".to_string());
        let data = err.to_mcp_error();
        assert_eq!(data.code, rmcp::model::ErrorCode::INTERNAL_ERROR);
        assert!(data.message.contains("APOC"));
    }

    #[test]
    fn test_driver_errors_keep_code_and_message() {
        let err = Error::Client {
            code: "Neo.ClientError.Statement.SyntaxError".to_string(),
            message: "Invalid input 'MTCH'".to_string(),
        };
        let data = err.to_mcp_error();
        assert!(data.message.contains("Neo.ClientError.Statement.SyntaxError"));
        assert!(data.message.contains("MTCH"));
    }
}
