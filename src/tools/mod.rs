// ABOUTME: Pluggable MCP tools architecture: trait, registry, context, and implementations.
// ABOUTME: Tools are registered once at startup and executed by the stdio host.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # MCP Tools
//!
//! - [`McpTool`]: metadata plus async execution
//! - [`ToolRegistry`]: name lookup, `tools/list` schemas, execution with timing logs
//! - [`ToolExecutionContext`]: shared workout backend and compiler

/// Execution context and shared resources
pub mod context;
/// Tool implementations
pub mod implementations;
/// Tool registry
pub mod registry;
/// Tool result type
pub mod result;
/// Tool trait and capability flags
pub mod traits;

pub use context::{ServerResources, ToolExecutionContext};
pub use registry::ToolRegistry;
pub use result::ToolResult;
pub use traits::{McpTool, ToolCapabilities};
