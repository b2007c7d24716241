// ABOUTME: Configuration module for the Garmin workouts MCP server
// ABOUTME: Environment-only configuration for the Garmin API, compiler ceilings, and logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

/// Environment-based server configuration
pub mod environment;

pub use environment::{Environment, GarminApiConfig, LogLevel, ServerConfig};
