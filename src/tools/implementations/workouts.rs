// ABOUTME: Garmin Connect workout tools: list, get, schedule, delete, upload, and prompt generation.
// ABOUTME: Upload runs the workout compiler before submitting the payload to Garmin Connect.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Workout Tools
//!
//! - `list_workouts` - All workouts stored on Garmin Connect
//! - `get_workout` - One workout by id
//! - `schedule_workout` - Put a workout on a calendar date
//! - `delete_workout` - Delete a workout, reporting success as a boolean
//! - `upload_workout` - Compile a workout description and create it
//! - `generate_workout_data_prompt` - Authoring prompt for the description format

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::{debug, error, info};
use workouts_core::constants::json_fields::{
    DATE, DESCRIPTION, WORKOUT_DATA, WORKOUT_ID, WORKOUT_ID_RESPONSE, WORKOUT_SCHEDULE_ID,
};
use workouts_core::constants::tools::{
    DELETE_WORKOUT, GENERATE_WORKOUT_DATA_PROMPT, GET_WORKOUT, LIST_WORKOUTS, SCHEDULE_WORKOUT,
    UPLOAD_WORKOUT,
};
use workouts_core::errors::{AppError, AppResult, ToolError};

use crate::logging::AppLogger;
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

const DATE_FORMAT: &str = "%Y-%m-%d";

fn object_schema(properties: &[(&str, &str, &str)]) -> JsonSchema {
    let mut map = HashMap::new();
    for (name, property_type, description) in properties {
        map.insert(
            (*name).to_owned(),
            PropertySchema {
                property_type: (*property_type).to_owned(),
                description: Some((*description).to_owned()),
            },
        );
    }
    JsonSchema {
        schema_type: "object".to_owned(),
        properties: Some(map),
        required: Some(properties.iter().map(|(name, _, _)| (*name).to_owned()).collect()),
    }
}

/// Identifier argument; numbers are accepted and rendered as strings
/// Garmin workout ids are numeric; anything else never reaches a request path
fn id_argument(args: &Value, tool: &str, field: &str) -> AppResult<String> {
    let id = match args.get(field) {
        Some(Value::String(id)) if !id.trim().is_empty() => id.trim().to_owned(),
        Some(Value::Number(id)) => id.to_string(),
        Some(Value::Null) | None => return Err(ToolError::missing_parameter(tool, field).into()),
        Some(_) => {
            return Err(ToolError::invalid_parameter(tool, field, "must be a string").into())
        }
    };

    if !id.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(ToolError::invalid_parameter(tool, field, "must be a numeric workout id").into());
    }
    Ok(id)
}

fn string_argument<'a>(args: &'a Value, tool: &str, field: &str) -> AppResult<&'a str> {
    match args.get(field) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(Value::Null) | None => Err(ToolError::missing_parameter(tool, field).into()),
        Some(_) => Err(ToolError::invalid_parameter(tool, field, "must be a string").into()),
    }
}

/// Render an id returned by Garmin, which may be a number or a string
fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

// ============================================================================
// ListWorkoutsTool
// ============================================================================

/// Tool listing all workouts stored on Garmin Connect.
pub struct ListWorkoutsTool;

#[async_trait]
impl McpTool for ListWorkoutsTool {
    fn name(&self) -> &'static str {
        LIST_WORKOUTS
    }

    fn description(&self) -> &'static str {
        "List all workouts available on Garmin Connect"
    }

    fn input_schema(&self) -> JsonSchema {
        JsonSchema::empty_object()
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_AUTH | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, _args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workouts = ctx.workouts().list_workouts().await?;
        Ok(ToolResult::ok(json!({ "workouts": workouts })))
    }
}

// ============================================================================
// GetWorkoutTool
// ============================================================================

/// Tool fetching one workout by id.
pub struct GetWorkoutTool;

#[async_trait]
impl McpTool for GetWorkoutTool {
    fn name(&self) -> &'static str {
        GET_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Get details of a specific workout by its ID"
    }

    fn input_schema(&self) -> JsonSchema {
        object_schema(&[(WORKOUT_ID, "string", "ID of the workout to retrieve")])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_AUTH | ToolCapabilities::READS_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = id_argument(&args, GET_WORKOUT, WORKOUT_ID)?;
        let workout = ctx.workouts().get_workout(&workout_id).await?;
        Ok(ToolResult::ok(json!({ "workout": workout })))
    }
}

// ============================================================================
// ScheduleWorkoutTool
// ============================================================================

/// Tool scheduling a workout on a calendar date.
pub struct ScheduleWorkoutTool;

#[async_trait]
impl McpTool for ScheduleWorkoutTool {
    fn name(&self) -> &'static str {
        SCHEDULE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Schedule a workout on Garmin Connect for a date in ISO format (YYYY-MM-DD)"
    }

    fn input_schema(&self) -> JsonSchema {
        object_schema(&[
            (WORKOUT_ID, "string", "ID of the workout to schedule"),
            (
                DATE,
                "string",
                "Date to schedule the workout in ISO format (YYYY-MM-DD)",
            ),
        ])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_AUTH | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = id_argument(&args, SCHEDULE_WORKOUT, WORKOUT_ID)?;
        let date = string_argument(&args, SCHEDULE_WORKOUT, DATE)?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
            ToolError::invalid_parameter(
                SCHEDULE_WORKOUT,
                DATE,
                "Date must be in ISO format (YYYY-MM-DD)",
            )
        })?;

        let result = ctx.workouts().schedule_workout(&workout_id, date).await?;
        let schedule_id = result
            .get(WORKOUT_SCHEDULE_ID)
            .and_then(id_to_string)
            .ok_or_else(|| {
                ToolError::execution_failed(
                    SCHEDULE_WORKOUT,
                    format!("Scheduling workout failed: {result}"),
                )
            })?;

        info!("Workout {workout_id} scheduled on {date} as {schedule_id}");
        Ok(ToolResult::ok(json!({ WORKOUT_SCHEDULE_ID: schedule_id })))
    }
}

// ============================================================================
// DeleteWorkoutTool
// ============================================================================

/// Tool deleting a workout; backend failures are reported as `false`.
pub struct DeleteWorkoutTool;

#[async_trait]
impl McpTool for DeleteWorkoutTool {
    fn name(&self) -> &'static str {
        DELETE_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Delete a workout from Garmin Connect. Returns true if the deletion was successful, false otherwise"
    }

    fn input_schema(&self) -> JsonSchema {
        object_schema(&[(WORKOUT_ID, "string", "ID of the workout to delete")])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_AUTH | ToolCapabilities::WRITES_DATA
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_id = id_argument(&args, DELETE_WORKOUT, WORKOUT_ID)?;

        match ctx.workouts().delete_workout(&workout_id).await {
            Ok(()) => {
                info!("Workout {workout_id} deleted successfully");
                Ok(ToolResult::ok(Value::Bool(true)))
            }
            Err(e) => {
                error!("Failed to delete workout {workout_id}: {e}");
                Ok(ToolResult::ok(Value::Bool(false)))
            }
        }
    }
}

// ============================================================================
// UploadWorkoutTool
// ============================================================================

/// Tool compiling a workout description and creating it on Garmin Connect.
pub struct UploadWorkoutTool;

impl UploadWorkoutTool {
    /// The description may arrive as an object or as a JSON-encoded string
    fn workout_data(args: &Value) -> AppResult<Value> {
        match args.get(WORKOUT_DATA) {
            Some(Value::String(encoded)) => serde_json::from_str(encoded).map_err(|e| {
                ToolError::invalid_parameter(
                    UPLOAD_WORKOUT,
                    WORKOUT_DATA,
                    format!("must be a JSON object: {e}"),
                )
                .into()
            }),
            Some(Value::Null) | None => {
                Err(ToolError::missing_parameter(UPLOAD_WORKOUT, WORKOUT_DATA).into())
            }
            Some(data) => Ok(data.clone()),
        }
    }
}

#[async_trait]
impl McpTool for UploadWorkoutTool {
    fn name(&self) -> &'static str {
        UPLOAD_WORKOUT
    }

    fn description(&self) -> &'static str {
        "Upload a structured workout to Garmin Connect. Use the `generate_workout_data_prompt` tool \
         to create a prompt for generating the workout data. Returns the ID of the uploaded workout"
    }

    fn input_schema(&self) -> JsonSchema {
        object_schema(&[(
            WORKOUT_DATA,
            "object",
            "Workout data in JSON format with name, type and steps",
        )])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::REQUIRES_AUTH | ToolCapabilities::WRITES_DATA | ToolCapabilities::COMPILES
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let workout_data = Self::workout_data(&args)?;
        debug!("Workout data received from client: {workout_data}");

        let payload = ctx.compiler().compile(&workout_data).map_err(|e| {
            AppLogger::log_compile_failure(e.kind(), &e.to_string());
            AppError::from(e)
        })?;
        info!(
            "Compiled workout '{}' into {} steps",
            payload.workout_name,
            payload.steps().len()
        );

        let result = ctx.workouts().create_workout(&payload).await?;
        info!("Response from Garmin Connect: {result}");

        let workout_id = result
            .get(WORKOUT_ID_RESPONSE)
            .and_then(id_to_string)
            .ok_or_else(|| ToolError::execution_failed(UPLOAD_WORKOUT, "No workout ID returned"))?;

        Ok(ToolResult::ok(json!({ WORKOUT_ID_RESPONSE: workout_id })))
    }
}

// ============================================================================
// GenerateWorkoutDataPromptTool
// ============================================================================

/// Tool returning the authoring prompt for the workout description format.
pub struct GenerateWorkoutDataPromptTool;

impl GenerateWorkoutDataPromptTool {
    /// Build the prompt for a natural language workout description
    #[must_use]
    pub fn prompt(description: &str) -> String {
        format!(
            r#"You are a fitness coach.
Given the following workout description, create a structured JSON object that represents the workout.
The generated JSON should be compatible with the `upload_workout` tool.

Workout Description:
{description}

Requirements:
- The output must be valid JSON.
- For pace targets, use decimal minutes per km (e.g., 4:40 min/km = 4.67 minutes per km)
- For time-based steps, use stepDuration in seconds
- For distance-based steps, use stepDistance with appropriate distanceUnit
- Set only the field for the step's endConditionType: leave stepDistance and distanceUnit out (or null) on time steps, and stepDuration out (or null) on distance steps
- Repeat steps only need stepName, stepType "repeat", numberOfIterations and a non-empty steps list
- Use the following structure for the workout object:
{{
  "name": "Workout Name",
  "description": "Optional workout notes",
  "type": "running" | "cycling" | "swimming" | "walking" | "cardio" | "strength",
  "steps": [
    {{
      "stepName": "Step Name",
      "stepDescription": "Description",
      "endConditionType": "time" | "distance",
      "stepDuration": duration_in_seconds,
      "stepDistance": distance_value,
      "distanceUnit": "m" | "km" | "mile",
      "stepType": "warmup" | "cooldown" | "interval" | "recovery" | "rest" | "repeat",
      "target": {{
        "type": "no target" | "pace" | "heart rate" | "power" | "cadence" | "speed",
        "value": [minValue, maxValue] | singleValue,
        "unit": "min_per_km" | "min_per_mile" | "bpm" | "watts" | "rpm" | "spm" | "km_per_h" | "m_per_s"
      }},
      "numberOfIterations": number,
      "steps": []
    }}
  ]
}}

Examples:
- For 4:40 min/km pace: "value": 4.67 or "value": [4.5, 4.8]
- For 160 bpm heart rate: "value": 160 or "value": [150, 170]
- For no target: "type": "no target", "value": null, "unit": null
"#
        )
    }
}

#[async_trait]
impl McpTool for GenerateWorkoutDataPromptTool {
    fn name(&self) -> &'static str {
        GENERATE_WORKOUT_DATA_PROMPT
    }

    fn description(&self) -> &'static str {
        "Generate a prompt for an LLM to create structured workout data from a natural language \
         description. The resulting JSON can be passed to the `upload_workout` tool"
    }

    fn input_schema(&self) -> JsonSchema {
        object_schema(&[(
            DESCRIPTION,
            "string",
            "Natural language description of the workout",
        )])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::OFFLINE
    }

    async fn execute(&self, args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let description = string_argument(&args, GENERATE_WORKOUT_DATA_PROMPT, DESCRIPTION)?;
        Ok(ToolResult::ok(json!({ "prompt": Self::prompt(description) })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_argument_accepts_numbers() {
        let args = json!({ "workout_id": 12345 });
        assert_eq!(id_argument(&args, GET_WORKOUT, WORKOUT_ID).unwrap(), "12345");
    }

    #[test]
    fn test_id_argument_rejects_missing() {
        let error = id_argument(&json!({}), GET_WORKOUT, WORKOUT_ID).unwrap_err();
        assert!(error.message.contains("workout_id"));
    }

    #[test]
    fn test_schema_requires_every_property() {
        let schema = ScheduleWorkoutTool.input_schema();
        let required = schema.required.unwrap();
        assert!(required.contains(&"workout_id".to_owned()));
        assert!(required.contains(&"date".to_owned()));
    }
}
