// ABOUTME: Central registry for MCP tools with lookup, schema listing, and execution.
// ABOUTME: Built once at startup and then shared immutably by the stdio host.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Tool Registry
//!
//! Tools are `Arc`-wrapped and keyed by name. Schemas are listed in name
//! order so `tools/list` output is stable between runs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};
use workouts_core::errors::{AppResult, ToolError};

use crate::logging::AppLogger;
use crate::mcp::schema::ToolSchema;

use super::context::ToolExecutionContext;
use super::implementations::workouts::{
    DeleteWorkoutTool, GenerateWorkoutDataPromptTool, GetWorkoutTool, ListWorkoutsTool,
    ScheduleWorkoutTool, UploadWorkoutTool,
};
use super::result::ToolResult;
use super::traits::{McpTool, ToolCapabilities};

/// Central registry for MCP tools
///
/// # Example
///
/// ```
/// use garmin_workouts_mcp::tools::registry::ToolRegistry;
///
/// let mut registry = ToolRegistry::new();
/// registry.register_builtin_tools();
/// assert_eq!(registry.len(), 6);
/// assert!(registry.contains("upload_workout"));
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.tools.contains_key(&name) {
            warn!("Tool '{}' is already registered, skipping", name);
            return false;
        }

        debug!(
            "Registering tool '{}' with capabilities: {}",
            name,
            tool.capabilities().describe()
        );
        self.tools.insert(name, tool);
        true
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tool names, sorted
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Schemas for `tools/list`, sorted by name
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self
            .tools
            .values()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Tools declaring all of the given capabilities
    #[must_use]
    pub fn filter_by_capabilities(&self, required: ToolCapabilities) -> Vec<&Arc<dyn McpTool>> {
        self.tools
            .values()
            .filter(|tool| tool.capabilities().contains(required))
            .collect()
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the tool is not registered or its execution fails
    pub async fn execute(
        &self,
        name: &str,
        args: Value,
        context: &ToolExecutionContext,
    ) -> AppResult<ToolResult> {
        let result = match self.get(name) {
            Some(tool) => {
                let started = Instant::now();
                let result = tool.execute(args, context).await;
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

                let success = matches!(&result, Ok(tool_result) if !tool_result.is_error);
                AppLogger::log_mcp_tool_call(name, success, elapsed_ms);
                result
            }
            None => Err(ToolError::not_found(name).into()),
        };

        result.map_err(|error| match &context.request_id {
            Some(request_id) => error.with_request_id(request_id.clone()),
            None => error,
        })
    }

    /// Register the Garmin workout tools
    pub fn register_builtin_tools(&mut self) {
        info!("Registering built-in tools...");

        self.register(Arc::new(ListWorkoutsTool));
        self.register(Arc::new(GetWorkoutTool));
        self.register(Arc::new(ScheduleWorkoutTool));
        self.register(Arc::new(DeleteWorkoutTool));
        self.register(Arc::new(UploadWorkoutTool));
        self.register(Arc::new(GenerateWorkoutDataPromptTool));

        info!("Registered {} tools", self.tools.len());
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}
