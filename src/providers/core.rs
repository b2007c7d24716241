// ABOUTME: Workout service trait abstracting the Garmin Connect workout-service endpoints
// ABOUTME: Tools depend on this trait so the HTTP client can be swapped for a test double
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Workout Service
//!
//! The five calls the tool layer makes against Garmin Connect. Request and
//! response bodies other than the compiled payload are passed through as raw
//! JSON: the tools return whatever the backend answers.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use workouts_compiler::WirePayload;
use workouts_core::errors::AppResult;

/// Garmin Connect workout operations
#[async_trait]
pub trait WorkoutService: Send + Sync {
    /// Backend name for logs and error messages
    fn name(&self) -> &'static str;

    /// List every stored workout
    async fn list_workouts(&self) -> AppResult<Value>;

    /// Fetch one workout
    async fn get_workout(&self, workout_id: &str) -> AppResult<Value>;

    /// Put a workout on the calendar, returning the raw schedule response
    async fn schedule_workout(&self, workout_id: &str, date: NaiveDate) -> AppResult<Value>;

    /// Delete a workout
    async fn delete_workout(&self, workout_id: &str) -> AppResult<()>;

    /// Submit a compiled workout, returning the raw creation response
    async fn create_workout(&self, payload: &WirePayload) -> AppResult<Value>;
}
