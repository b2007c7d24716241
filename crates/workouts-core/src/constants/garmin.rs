// ABOUTME: Garmin Connect workout-service endpoints and workout vocabulary
// ABOUTME: Vendor keys and numeric ids for sports, step types, end conditions, and targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

/// A `(id, key)` pair from Garmin's workout vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorKey {
    /// Numeric id expected next to the key
    pub id: u32,
    /// String key, e.g. `heart.rate.zone`
    pub key: &'static str,
}

impl VendorKey {
    const fn new(id: u32, key: &'static str) -> Self {
        Self { id, key }
    }
}

/// Service name used in error messages
pub const SERVICE_NAME: &str = "Garmin Connect";

/// Default base URL of the Connect API
pub const DEFAULT_API_BASE_URL: &str = "https://connectapi.garmin.com";

/// Workout-service endpoints, as path segments below the API base URL
pub mod endpoints {
    /// List all workouts
    pub const LIST_WORKOUTS: &[&str] = &["workout-service", "workouts"];
    /// Create a workout (POST), or get and delete one below it by id
    pub const WORKOUT: &[&str] = &["workout-service", "workout"];
    /// Schedule a workout on a date (POST), by id
    pub const SCHEDULE: &[&str] = &["workout-service", "schedule"];
}

/// Sport types
pub mod sports {
    use super::VendorKey;

    /// Running
    pub const RUNNING: VendorKey = VendorKey::new(1, "running");
    /// Cycling
    pub const CYCLING: VendorKey = VendorKey::new(2, "cycling");
    /// Swimming
    pub const SWIMMING: VendorKey = VendorKey::new(4, "swimming");
    /// Strength training
    pub const STRENGTH_TRAINING: VendorKey = VendorKey::new(5, "strength_training");
    /// Cardio training
    pub const CARDIO_TRAINING: VendorKey = VendorKey::new(6, "cardio_training");
    /// Walking
    pub const WALKING: VendorKey = VendorKey::new(9, "walking");
}

/// Step types
pub mod step_types {
    use super::VendorKey;

    /// Warm up
    pub const WARMUP: VendorKey = VendorKey::new(1, "warmup");
    /// Cool down
    pub const COOLDOWN: VendorKey = VendorKey::new(2, "cooldown");
    /// Work interval
    pub const INTERVAL: VendorKey = VendorKey::new(3, "interval");
    /// Active recovery
    pub const RECOVERY: VendorKey = VendorKey::new(4, "recovery");
    /// Rest
    pub const REST: VendorKey = VendorKey::new(5, "rest");
    /// Repeat group
    pub const REPEAT: VendorKey = VendorKey::new(6, "repeat");
}

/// End conditions
pub mod conditions {
    use super::VendorKey;

    /// Ends after a duration in seconds
    pub const TIME: VendorKey = VendorKey::new(2, "time");
    /// Ends after a distance in meters
    pub const DISTANCE: VendorKey = VendorKey::new(3, "distance");
    /// Repeat group ends after a number of iterations
    pub const ITERATIONS: VendorKey = VendorKey::new(7, "iterations");
}

/// Workout target types
pub mod targets {
    use super::VendorKey;

    /// No target
    pub const NO_TARGET: VendorKey = VendorKey::new(1, "no.target");
    /// Power zone in watts
    pub const POWER_ZONE: VendorKey = VendorKey::new(2, "power.zone");
    /// Cadence zone
    pub const CADENCE_ZONE: VendorKey = VendorKey::new(3, "cadence.zone");
    /// Heart rate zone in bpm
    pub const HEART_RATE_ZONE: VendorKey = VendorKey::new(4, "heart.rate.zone");
    /// Speed zone in m/s
    pub const SPEED_ZONE: VendorKey = VendorKey::new(5, "speed.zone");
    /// Pace zone, expressed in m/s
    pub const PACE_ZONE: VendorKey = VendorKey::new(6, "pace.zone");
}

/// Discriminators of the step objects in a segment
pub mod step_dto {
    /// Leaf step
    pub const EXECUTABLE: &str = "ExecutableStepDTO";
    /// Start of a repeat block
    pub const REPEAT_GROUP: &str = "RepeatGroupDTO";
    /// End of a repeat block
    pub const REPEAT_END: &str = "RepeatEndDTO";
}
