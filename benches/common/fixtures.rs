// ABOUTME: Benchmark fixtures generating realistic workout descriptions
// ABOUTME: Deterministic interval sessions of increasing size and nesting depth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! Deterministic workout description generators.

use serde_json::{json, Value};

/// Predefined plan sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum PlanSize {
    /// A single repeat block - typical track session
    Small,
    /// Several blocks with mixed targets
    Medium,
    /// Close to the default step ceiling
    Large,
}

impl PlanSize {
    /// Number of interval blocks in the plan
    #[must_use]
    pub const fn blocks(self) -> usize {
        match self {
            Self::Small => 1,
            Self::Medium => 10,
            Self::Large => 60,
        }
    }

    /// Label used in benchmark ids
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

fn target_for(index: usize) -> Value {
    match index % 4 {
        0 => json!({"type": "pace", "value": [4.5, 5.0], "unit": "min_per_km"}),
        1 => json!({"type": "heart rate", "value": [150, 165], "unit": "bpm"}),
        2 => json!({"type": "power", "value": 280, "unit": "watts"}),
        _ => json!({"type": "no target"}),
    }
}

fn block(index: usize) -> Value {
    json!({
        "stepType": "repeat",
        "numberOfIterations": 4 + index % 3,
        "steps": [
            {
                "stepName": format!("Rep {}", index + 1),
                "stepType": "interval",
                "endConditionType": "distance",
                "stepDistance": 400 + 100 * (index % 5),
                "distanceUnit": "m",
                "target": target_for(index)
            },
            {
                "stepType": "recovery",
                "endConditionType": "time",
                "stepDuration": 90,
                "target": {"type": "no target"}
            }
        ]
    })
}

/// Flat session: warmup, `size.blocks()` repeat blocks, cooldown
#[must_use]
pub fn interval_session(size: PlanSize) -> Value {
    let mut steps = vec![json!({
        "stepType": "warmup",
        "endConditionType": "time",
        "stepDuration": 900,
        "target": {"type": "no target"}
    })];
    steps.extend((0..size.blocks()).map(block));
    steps.push(json!({
        "stepType": "cooldown",
        "endConditionType": "distance",
        "stepDistance": 2,
        "distanceUnit": "km",
        "target": {"type": "no target"}
    }));

    json!({
        "name": format!("Intervals ({})", size.label()),
        "description": "Generated benchmark session",
        "type": "running",
        "steps": steps
    })
}

/// Session whose main set is `depth` repeats nested inside each other
#[must_use]
pub fn nested_session(depth: usize) -> Value {
    let mut inner = block(0);
    for level in 1..depth {
        inner = json!({
            "stepType": "repeat",
            "numberOfIterations": 2,
            "steps": [inner, block(level)]
        });
    }

    json!({
        "name": format!("Nested x{depth}"),
        "type": "running",
        "steps": [inner]
    })
}
