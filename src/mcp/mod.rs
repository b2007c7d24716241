// ABOUTME: MCP protocol module: schema types and the stdio server
// ABOUTME: Exposes the registry-backed JSON-RPC host used by the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

/// MCP message and schema types
pub mod schema;
/// JSON-RPC dispatch and stdio transport
pub mod server;

pub use server::McpServer;
