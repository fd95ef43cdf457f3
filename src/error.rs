//! Error types and their mapping onto MCP (JSON-RPC) errors.
//!
//! The greeting itself is total; everything here concerns the hosting
//! server: configuration gates and unexpected internal failures.

use rmcp::ErrorData as McpError;
use rmcp::model::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a failed tool call, used for the metrics `status`
/// label and to pick the JSON-RPC error sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Tool disabled by configuration; sent as `invalid_request`
    ToolDisabled,
    /// Anything else; sent as `internal_error`
    Internal,
}

impl ErrorCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::ToolDisabled => "tool_disabled",
            ErrorCategory::Internal => "server_error",
        }
    }

    /// JSON-RPC code placed on the wire for this category.
    pub fn wire_code(&self) -> ErrorCode {
        match self {
            ErrorCategory::ToolDisabled => ErrorCode::INVALID_REQUEST,
            ErrorCategory::Internal => ErrorCode::INTERNAL_ERROR,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
#[error("tool '{tool_name}' is disabled by server configuration")]
pub struct ToolDisabledError {
    tool_name: String,
}

impl ToolDisabledError {
    pub fn new(tool_name: &str) -> Self {
        Self {
            tool_name: tool_name.to_ascii_lowercase(),
        }
    }
}

pub fn classify(error: &anyhow::Error) -> ErrorCategory {
    if error.downcast_ref::<ToolDisabledError>().is_some() {
        ErrorCategory::ToolDisabled
    } else {
        ErrorCategory::Internal
    }
}

/// Converts an application error into the rmcp wire error.
///
/// Disabled tools surface as `invalid_request` so clients can tell a
/// configuration refusal apart from a server fault.
pub fn to_mcp_error(error: anyhow::Error) -> McpError {
    let code = classify(&error).wire_code();
    McpError::new(code, error.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_tool_maps_to_invalid_request() {
        let err = to_mcp_error(ToolDisabledError::new("Say_Hello").into());
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
        assert_eq!(
            err.message,
            "tool 'say_hello' is disabled by server configuration"
        );
    }

    #[test]
    fn other_errors_map_to_internal_error() {
        let err = to_mcp_error(anyhow::anyhow!("boom"));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn categories_label_metrics_and_pick_wire_codes() {
        let disabled = classify(&ToolDisabledError::new("system_info").into());
        assert_eq!(disabled, ErrorCategory::ToolDisabled);
        assert_eq!(disabled.label(), "tool_disabled");
        assert_eq!(disabled.wire_code(), ErrorCode::INVALID_REQUEST);

        let internal = classify(&anyhow::anyhow!("io"));
        assert_eq!(internal.to_string(), "server_error");
        assert_eq!(internal.wire_code(), ErrorCode::INTERNAL_ERROR);
    }
}
