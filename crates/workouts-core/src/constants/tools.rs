// ABOUTME: MCP tool identifier constants and tool argument field names
// ABOUTME: Provides centralized names so schemas, tools and tests agree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

/// List workouts stored on Garmin Connect
pub const LIST_WORKOUTS: &str = "list_workouts";
/// Fetch one workout by id
pub const GET_WORKOUT: &str = "get_workout";
/// Schedule a workout on a calendar date
pub const SCHEDULE_WORKOUT: &str = "schedule_workout";
/// Delete a workout by id
pub const DELETE_WORKOUT: &str = "delete_workout";
/// Compile and upload a workout description
pub const UPLOAD_WORKOUT: &str = "upload_workout";
/// Build the authoring prompt for an LLM
pub const GENERATE_WORKOUT_DATA_PROMPT: &str = "generate_workout_data_prompt";

/// Tool argument and result field names
pub mod json_fields {
    /// Workout identifier argument
    pub const WORKOUT_ID: &str = "workout_id";
    /// Calendar date argument
    pub const DATE: &str = "date";
    /// Workout description argument of `upload_workout`
    pub const WORKOUT_DATA: &str = "workout_data";
    /// Natural language description argument
    pub const DESCRIPTION: &str = "description";
    /// Identifier returned by Garmin when a workout is created
    pub const WORKOUT_ID_RESPONSE: &str = "workoutId";
    /// Identifier returned by Garmin when a workout is scheduled
    pub const WORKOUT_SCHEDULE_ID: &str = "workoutScheduleId";
}
