// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for Garmin Connect, units, protocol, and tool names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Garmin Connect endpoints and workout vocabulary (keys and ids)
pub mod garmin;
/// JSON-RPC and MCP protocol constants
pub mod protocol;
/// Tool identifiers and tool argument names
pub mod tools;
/// Unit conversion and measurement constants
pub mod units;

pub use tools::*;

/// Default limits for the workout compiler
pub mod limits {
    /// Default maximum nesting depth of repeat blocks (top-level steps are depth 1)
    pub const DEFAULT_MAX_STEP_DEPTH: usize = 32;
    /// Default maximum number of steps (leaves and repeats) in one description
    pub const DEFAULT_MAX_STEP_COUNT: usize = 500;
}

/// Service identification used in logs and MCP `serverInfo`
pub mod service_names {
    /// Name reported by the server
    pub const GARMIN_WORKOUTS_MCP: &str = "garmin-workouts-mcp";
}
