// ABOUTME: Core types and constants for the Garmin workouts MCP server
// ABOUTME: Foundation crate with error handling, vendor vocabulary, and unit constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

#![deny(unsafe_code)]

//! # Workouts Core
//!
//! Foundation crate shared by the workout compiler and the MCP server. It is
//! designed to change infrequently so the workspace gets incremental
//! compilation benefits.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ToolError`
//! - **constants**: Garmin Connect endpoints, vendor keys and ids, units, tool names

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;
