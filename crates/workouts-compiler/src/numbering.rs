// ABOUTME: Assigns sequential step ids to the flattened step sequence
// ABOUTME: Ids are 1-based, contiguous, and follow execution order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

use crate::flatten::FlattenedStep;

/// Assign `1..=N` ids in sequence order, overwriting any previous ids
#[must_use]
pub fn assign_ids(steps: Vec<FlattenedStep>) -> Vec<FlattenedStep> {
    steps
        .into_iter()
        .zip(1_u32..)
        .map(|(mut step, id)| {
            step.sequence_number = id;
            step.step_order = id;
            step
        })
        .collect()
}
