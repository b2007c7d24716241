// ABOUTME: Defines ToolExecutionContext which gives tools access to shared server resources.
// ABOUTME: Holds the workout service, the compiler, and the request id for tracing.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Tool Execution Context
//!
//! `ServerResources` is built once at startup and shared behind an `Arc`;
//! each request gets a cheap `ToolExecutionContext` carrying its id.

use std::fmt;
use std::sync::Arc;

use workouts_compiler::{CompileOptions, Compiler};

use crate::providers::WorkoutService;

/// Resources shared by every tool invocation
pub struct ServerResources {
    /// Garmin Connect workout backend
    pub workouts: Arc<dyn WorkoutService>,
    /// Workout payload compiler
    pub compiler: Compiler,
}

impl ServerResources {
    /// Bundle a workout backend with a compiler using the given ceilings
    #[must_use]
    pub fn new(workouts: Arc<dyn WorkoutService>, options: CompileOptions) -> Self {
        Self {
            workouts,
            compiler: Compiler::with_options(options),
        }
    }
}

impl fmt::Debug for ServerResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerResources")
            .field("workouts", &self.workouts.name())
            .field("compiler", &self.compiler.options())
            .finish()
    }
}

/// Context provided to every tool execution
#[derive(Clone, Debug)]
pub struct ToolExecutionContext {
    /// Shared server resources
    pub resources: Arc<ServerResources>,
    /// JSON-RPC request id rendered as a string, for log correlation
    pub request_id: Option<String>,
}

impl ToolExecutionContext {
    /// Create a context without a request id
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self {
            resources,
            request_id: None,
        }
    }

    /// Attach the request id
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Workout backend
    #[must_use]
    pub fn workouts(&self) -> &dyn WorkoutService {
        self.resources.workouts.as_ref()
    }

    /// Workout compiler
    #[must_use]
    pub fn compiler(&self) -> &Compiler {
        &self.resources.compiler
    }
}
