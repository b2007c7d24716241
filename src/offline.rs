// ABOUTME: Offline compilation of workout description files for the --compile flag
// ABOUTME: Reads a JSON description from disk and runs the compiler without Garmin Connect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, info};
use workouts_compiler::{CompileError, Compiler, WirePayload};

use crate::logging::AppLogger;

/// Read a workout description file as JSON
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON
pub async fn read_description(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!("Read {} bytes from {}", contents.len(), path.display());
    serde_json::from_str(&contents).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Compile an already loaded description, logging the outcome
///
/// # Errors
///
/// Returns the structured [`CompileError`] when the description is rejected
pub fn compile_description(
    compiler: &Compiler,
    description: &Value,
) -> Result<WirePayload, CompileError> {
    match compiler.compile(description) {
        Ok(payload) => {
            info!(
                "Compiled workout '{}' into {} steps",
                payload.workout_name,
                payload.steps().len()
            );
            Ok(payload)
        }
        Err(e) => {
            AppLogger::log_compile_failure(e.kind(), &e.to_string());
            Err(e)
        }
    }
}
