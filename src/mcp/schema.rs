// ABOUTME: MCP protocol schema definitions and message structures
// ABOUTME: Typed initialize, tool listing, and tool call shapes for the stdio host
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! MCP Protocol Schema Definitions
//!
//! Type-safe definitions of the MCP messages the server exchanges, so tool
//! schemas and responses are never assembled from hand-written JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use workouts_core::constants::protocol::MCP_PROTOCOL_VERSION;
use workouts_core::constants::service_names;

/// Server Information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name used in `tools/call`
    pub name: String,
    /// Description shown to the model
    pub description: String,
    /// Argument schema
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Schema type, always `object` for tool arguments
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Named properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, PropertySchema>>,
    /// Required property names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchema {
    /// Object schema with no arguments
    #[must_use]
    pub fn empty_object() -> Self {
        Self {
            schema_type: "object".to_owned(),
            properties: None,
            required: None,
        }
    }
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySchema {
    /// Property type
    #[serde(rename = "type")]
    pub property_type: String,
    /// Property description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameters of a `tools/call` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name
    pub name: String,
    /// Tool arguments
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// Tool Response after execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Text rendering of the result
    pub content: Vec<Content>,
    /// Whether the tool reported a failure
    #[serde(rename = "isError")]
    pub is_error: bool,
    /// The result as structured JSON
    #[serde(rename = "structuredContent", skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
}

/// Content types for MCP messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text block
    #[serde(rename = "text")]
    Text {
        /// Text body
        text: String,
    },
}

/// MCP Server Capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tool support
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Tools capability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether the server emits `tools/list_changed`
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Complete MCP Initialize Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// Negotiated protocol version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server identity
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Advertised capabilities
    pub capabilities: ServerCapabilities,
    /// Usage hints for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl InitializeResponse {
    /// Create a new initialize response with current server configuration
    #[must_use]
    pub fn new(protocol_version: String, server_name: String, server_version: String) -> Self {
        Self {
            protocol_version,
            server_info: ServerInfo {
                name: server_name,
                version: server_version,
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            instructions: Some("This server manages structured workouts on Garmin Connect. Call `generate_workout_data_prompt` to get the workout JSON format, then `upload_workout` to compile and create it. Use `list_workouts`, `get_workout`, `schedule_workout`, and `delete_workout` to manage existing workouts.".into()),
        }
    }
}

impl Default for InitializeResponse {
    fn default() -> Self {
        Self::new(
            MCP_PROTOCOL_VERSION.to_owned(),
            service_names::GARMIN_WORKOUTS_MCP.to_owned(),
            env!("CARGO_PKG_VERSION").to_owned(),
        )
    }
}
