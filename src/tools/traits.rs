// ABOUTME: Defines the McpTool trait and ToolCapabilities for the workout tools.
// ABOUTME: Tools implement this trait to be registered and executed via the ToolRegistry.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # MCP Tool Trait and Capabilities
//!
//! Every tool exposes its metadata (name, description, input schema),
//! a set of capability flags, and an async `execute`.

use async_trait::async_trait;
use bitflags::bitflags;
use serde_json::Value;
use workouts_core::errors::AppResult;

use crate::mcp::schema::JsonSchema;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

bitflags! {
    /// Capabilities that tools declare for discovery and logging.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Tool needs an authenticated Garmin session
        const REQUIRES_AUTH = 0b0000_0001;
        /// Tool reads data from Garmin Connect
        const READS_DATA = 0b0000_0010;
        /// Tool creates, schedules or deletes data on Garmin Connect
        const WRITES_DATA = 0b0000_0100;
        /// Tool runs the workout compiler
        const COMPILES = 0b0000_1000;
        /// Tool works without any network access
        const OFFLINE = 0b0001_0000;
    }
}

impl ToolCapabilities {
    /// Check if tool requires a Garmin session
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        self.contains(Self::REQUIRES_AUTH)
    }

    /// Check if tool reads data
    #[must_use]
    pub const fn reads_data(self) -> bool {
        self.contains(Self::READS_DATA)
    }

    /// Check if tool writes data
    #[must_use]
    pub const fn writes_data(self) -> bool {
        self.contains(Self::WRITES_DATA)
    }

    /// Get a description of all enabled capabilities for logging
    #[must_use]
    pub fn describe(&self) -> String {
        let parts: Vec<&str> = self
            .iter_names()
            .map(|(name, _)| match name {
                "REQUIRES_AUTH" => "requires_auth",
                "READS_DATA" => "reads_data",
                "WRITES_DATA" => "writes_data",
                "COMPILES" => "compiles",
                "OFFLINE" => "offline",
                other => other,
            })
            .collect();

        if parts.is_empty() {
            "none".to_owned()
        } else {
            parts.join(", ")
        }
    }
}

/// The trait that all MCP tools implement.
///
/// Tools are `Send + Sync` and registered once at startup behind an `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use garmin_workouts_mcp::tools::{McpTool, ToolCapabilities, ToolResult, ToolExecutionContext};
/// use garmin_workouts_mcp::mcp::schema::JsonSchema;
/// use workouts_core::errors::AppResult;
/// use serde_json::Value;
///
/// struct PingTool;
///
/// #[async_trait]
/// impl McpTool for PingTool {
///     fn name(&self) -> &'static str {
///         "ping_garmin"
///     }
///
///     fn description(&self) -> &'static str {
///         "Check that the server answers"
///     }
///
///     fn input_schema(&self) -> JsonSchema {
///         JsonSchema::empty_object()
///     }
///
///     fn capabilities(&self) -> ToolCapabilities {
///         ToolCapabilities::OFFLINE
///     }
///
///     async fn execute(&self, _args: Value, _context: &ToolExecutionContext) -> AppResult<ToolResult> {
///         Ok(ToolResult::ok(Value::String("pong".to_owned())))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique identifier used in `tools/call`
    fn name(&self) -> &'static str;

    /// Description for LLM consumption
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters, returned by `tools/list`
    fn input_schema(&self) -> JsonSchema;

    /// Capability flags
    fn capabilities(&self) -> ToolCapabilities;

    /// Execute the tool with given arguments and context
    ///
    /// # Errors
    ///
    /// Returns `AppError` for argument, compilation, or backend failures
    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult>;
}
