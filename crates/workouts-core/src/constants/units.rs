// ABOUTME: Unit conversion constants for distance, time, and speed
// ABOUTME: Provides named constants to eliminate magic numbers in normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

/// Meters per kilometer conversion factor
pub const METERS_PER_KM: f64 = 1000.0;

/// Meters per statute mile
pub const METERS_PER_MILE: f64 = 1609.344;

/// Seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Kilometers per hour in one meter per second
pub const KMH_PER_MPS: f64 = 3.6;
