// ABOUTME: Garmin Connect provider module
// ABOUTME: Workout service trait and its reqwest-backed implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

/// Workout service trait
pub mod core;
/// Garmin Connect HTTP client
pub mod garmin;

pub use self::core::WorkoutService;
pub use garmin::GarminConnectClient;
