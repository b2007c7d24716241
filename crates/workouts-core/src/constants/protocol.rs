// ABOUTME: Protocol-related constants for MCP and JSON-RPC communication
// ABOUTME: Handles protocol versioning and standard JSON-RPC error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

/// JSON-RPC version string
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol version advertised in `initialize`
pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";

/// Invalid JSON was received
pub const JSONRPC_PARSE_ERROR: i32 = -32700;
/// The JSON sent is not a valid request object
pub const JSONRPC_INVALID_REQUEST: i32 = -32600;
/// The method does not exist
pub const JSONRPC_METHOD_NOT_FOUND: i32 = -32601;
/// Invalid method parameters
pub const JSONRPC_INVALID_PARAMS: i32 = -32602;
/// Internal JSON-RPC error
pub const JSONRPC_INTERNAL_ERROR: i32 = -32603;

/// MCP method names handled by the stdio host
pub mod methods {
    /// Session handshake
    pub const INITIALIZE: &str = "initialize";
    /// Client acknowledgement of the handshake (notification)
    pub const INITIALIZED: &str = "notifications/initialized";
    /// Liveness probe
    pub const PING: &str = "ping";
    /// Tool discovery
    pub const TOOLS_LIST: &str = "tools/list";
    /// Tool invocation
    pub const TOOLS_CALL: &str = "tools/call";
}
