// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, a recording workout service double, and server builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `garmin_workouts_mcp`

use std::env;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::NaiveDate;
use garmin_workouts_mcp::mcp::McpServer;
use garmin_workouts_mcp::providers::WorkoutService;
use garmin_workouts_mcp::tools::{ServerResources, ToolExecutionContext, ToolRegistry};
use serde_json::{json, Value};
use tracing::Level;
use workouts_compiler::{CompileOptions, WirePayload};
use workouts_core::errors::{AppError, AppResult};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// One call received by the recording service
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    List,
    Get(String),
    Schedule(String, NaiveDate),
    Delete(String),
    Create(Value),
}

/// In-memory workout service that records calls and returns canned responses
pub struct RecordingWorkoutService {
    pub calls: Mutex<Vec<RecordedCall>>,
    pub list_response: Value,
    pub get_response: Value,
    pub schedule_response: Value,
    pub create_response: Value,
    pub fail_with: Option<String>,
}

impl Default for RecordingWorkoutService {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            list_response: json!([{"workoutId": 1, "workoutName": "Easy Run"}]),
            get_response: json!({"workoutId": 1, "workoutName": "Easy Run"}),
            schedule_response: json!({"workoutScheduleId": 987}),
            create_response: json!({"workoutId": 123_456}),
            fail_with: None,
        }
    }
}

impl RecordingWorkoutService {
    /// A service whose every call fails with a Garmin error
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_owned()),
            ..Self::default()
        }
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> AppResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(AppError::external_service("Garmin Connect", message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl WorkoutService for RecordingWorkoutService {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn list_workouts(&self) -> AppResult<Value> {
        self.record(RecordedCall::List)?;
        Ok(self.list_response.clone())
    }

    async fn get_workout(&self, workout_id: &str) -> AppResult<Value> {
        self.record(RecordedCall::Get(workout_id.to_owned()))?;
        Ok(self.get_response.clone())
    }

    async fn schedule_workout(&self, workout_id: &str, date: NaiveDate) -> AppResult<Value> {
        self.record(RecordedCall::Schedule(workout_id.to_owned(), date))?;
        Ok(self.schedule_response.clone())
    }

    async fn delete_workout(&self, workout_id: &str) -> AppResult<()> {
        self.record(RecordedCall::Delete(workout_id.to_owned()))
    }

    async fn create_workout(&self, payload: &WirePayload) -> AppResult<Value> {
        self.record(RecordedCall::Create(serde_json::to_value(payload).unwrap()))?;
        Ok(self.create_response.clone())
    }
}

/// Registry with every built-in tool
pub fn builtin_registry() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register_builtin_tools();
    Arc::new(registry)
}

/// Tool context backed by the given service and default compiler ceilings
pub fn tool_context(service: Arc<RecordingWorkoutService>) -> ToolExecutionContext {
    init_test_logging();
    let resources = ServerResources::new(service, CompileOptions::default());
    ToolExecutionContext::new(Arc::new(resources))
}

/// MCP server backed by the given service
pub fn mcp_server(service: Arc<RecordingWorkoutService>) -> McpServer {
    init_test_logging();
    let resources = ServerResources::new(service, CompileOptions::default());
    McpServer::new(builtin_registry(), Arc::new(resources))
}

/// Small valid description used across tests
pub fn easy_run() -> Value {
    json!({
        "name": "Easy Run",
        "type": "running",
        "steps": [
            {
                "stepName": "Warm up",
                "stepType": "warmup",
                "endConditionType": "time",
                "stepDuration": 600,
                "target": {"type": "no target"}
            },
            {
                "stepName": "Main",
                "stepType": "interval",
                "endConditionType": "distance",
                "stepDistance": 5,
                "distanceUnit": "km",
                "target": {"type": "heart rate", "value": [140, 150], "unit": "bpm"}
            }
        ]
    })
}
