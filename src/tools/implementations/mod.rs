// ABOUTME: Tool implementations grouped by domain.
// ABOUTME: Currently the Garmin Connect workout tools.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

/// Garmin Connect workout tools
pub mod workouts;

pub use workouts::{
    DeleteWorkoutTool, GenerateWorkoutDataPromptTool, GetWorkoutTool, ListWorkoutsTool,
    ScheduleWorkoutTool, UploadWorkoutTool,
};
