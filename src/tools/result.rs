// ABOUTME: Defines ToolResult returned by tool execution.
// ABOUTME: Bridges tool output with the MCP tools/call response format.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

use serde_json::Value;

use crate::mcp::schema::{Content, ToolResponse};

/// Result returned by tool execution
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The result value to return to the client
    pub content: Value,
    /// Whether this result represents an error condition
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Create an error result
    #[must_use]
    pub const fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Render as an MCP tool response.
    ///
    /// Strings are sent verbatim, everything else as compact JSON text.
    /// Objects are also attached as `structuredContent`.
    #[must_use]
    pub fn into_response(self) -> ToolResponse {
        let text = match &self.content {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let structured_content = self.content.is_object().then_some(self.content);

        ToolResponse {
            content: vec![Content::Text { text }],
            is_error: self.is_error,
            structured_content,
        }
    }
}
