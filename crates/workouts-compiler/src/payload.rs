// ABOUTME: Wire payload model for Garmin Connect workout creation and its assembler
// ABOUTME: Wraps numbered flattened steps with workout metadata into a single-segment payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Payload Assembler
//!
//! Translates the numbered step sequence into Garmin's step objects. Repeat
//! markers are paired with a stack to derive each group's child id range.
//! Anything inconsistent at this point is a defect of an earlier stage and is
//! reported as an [`InternalAssemblyError`], never patched.

use serde::{Deserialize, Serialize};
use workouts_core::constants::garmin::{conditions, step_types, VendorKey};

use crate::description::SportKind;
use crate::error::InternalAssemblyError;
use crate::flatten::{FlattenedKind, FlattenedLeaf, FlattenedStep};
use crate::units::NormalizedEnd;

/// Workout-level metadata carried next to the step sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutHeader {
    /// Workout name
    pub name: String,
    /// Optional workout description
    pub description: Option<String>,
    /// Sport of the workout
    pub sport: SportKind,
}

/// Sport type object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSportType {
    /// Numeric sport id
    pub sport_type_id: u32,
    /// Sport key, e.g. `running`
    pub sport_type_key: String,
}

impl From<VendorKey> for WireSportType {
    fn from(key: VendorKey) -> Self {
        Self {
            sport_type_id: key.id,
            sport_type_key: key.key.to_owned(),
        }
    }
}

/// Step type object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStepType {
    /// Numeric step type id
    pub step_type_id: u32,
    /// Step type key, e.g. `interval`
    pub step_type_key: String,
}

impl From<VendorKey> for WireStepType {
    fn from(key: VendorKey) -> Self {
        Self {
            step_type_id: key.id,
            step_type_key: key.key.to_owned(),
        }
    }
}

/// End condition object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEndCondition {
    /// Numeric condition id
    pub condition_type_id: u32,
    /// Condition key, e.g. `distance`
    pub condition_type_key: String,
}

impl From<VendorKey> for WireEndCondition {
    fn from(key: VendorKey) -> Self {
        Self {
            condition_type_id: key.id,
            condition_type_key: key.key.to_owned(),
        }
    }
}

/// Target type object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTargetType {
    /// Numeric target type id
    pub workout_target_type_id: u32,
    /// Target key, e.g. `pace.zone`
    pub workout_target_type_key: String,
}

impl From<VendorKey> for WireTargetType {
    fn from(key: VendorKey) -> Self {
        Self {
            workout_target_type_id: key.id,
            workout_target_type_key: key.key.to_owned(),
        }
    }
}

/// Leaf step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableStep {
    /// 1-based step id
    pub step_id: u32,
    /// 1-based position in the segment
    pub step_order: u32,
    /// Step type
    pub step_type: WireStepType,
    /// Free text shown on the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// End condition
    pub end_condition: WireEndCondition,
    /// Seconds or meters, per `end_condition`
    pub end_condition_value: f64,
    /// Target type
    pub target_type: WireTargetType,
    /// Lower zone bound, null for no target
    pub target_value_one: Option<f64>,
    /// Upper zone bound, null for no target
    pub target_value_two: Option<f64>,
}

/// Opening marker of a repeat block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatGroupStep {
    /// 1-based step id
    pub step_id: u32,
    /// 1-based position in the segment
    pub step_order: u32,
    /// Always the repeat step type
    pub step_type: WireStepType,
    /// Free text shown on the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Always the iterations condition
    pub end_condition: WireEndCondition,
    /// Iteration count
    pub end_condition_value: f64,
    /// Iteration count
    pub number_of_iterations: u32,
    /// Id of the first step inside the block
    pub first_child_step_id: u32,
    /// Id of the last step inside the block
    pub last_child_step_id: u32,
    /// Id of the matching end marker
    pub end_step_id: u32,
}

/// Closing marker of a repeat block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatEndStep {
    /// 1-based step id
    pub step_id: u32,
    /// 1-based position in the segment
    pub step_order: u32,
    /// Always the repeat step type
    pub step_type: WireStepType,
    /// Id of the matching group marker
    pub repeat_step_id: u32,
    /// Iteration count of the block
    pub number_of_iterations: u32,
}

/// Step object inside a segment, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WireStep {
    /// Leaf step
    #[serde(rename = "ExecutableStepDTO")]
    Executable(ExecutableStep),
    /// Repeat block opening marker
    #[serde(rename = "RepeatGroupDTO")]
    RepeatGroup(RepeatGroupStep),
    /// Repeat block closing marker
    #[serde(rename = "RepeatEndDTO")]
    RepeatEnd(RepeatEndStep),
}

impl WireStep {
    /// Step id
    #[must_use]
    pub const fn step_id(&self) -> u32 {
        match self {
            Self::Executable(step) => step.step_id,
            Self::RepeatGroup(step) => step.step_id,
            Self::RepeatEnd(step) => step.step_id,
        }
    }

    /// Step order
    #[must_use]
    pub const fn step_order(&self) -> u32 {
        match self {
            Self::Executable(step) => step.step_order,
            Self::RepeatGroup(step) => step.step_order,
            Self::RepeatEnd(step) => step.step_order,
        }
    }
}

/// Workout segment; compiled workouts have exactly one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSegment {
    /// 1-based segment position
    pub segment_order: u32,
    /// Sport of the segment
    pub sport_type: WireSportType,
    /// Steps in execution order
    pub workout_steps: Vec<WireStep>,
}

/// Body of the workout-creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePayload {
    /// Workout name
    pub workout_name: String,
    /// Optional workout description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sport of the workout
    pub sport_type: WireSportType,
    /// Segments, one for compiled workouts
    pub workout_segments: Vec<WireSegment>,
}

impl WirePayload {
    /// Steps of the first segment
    #[must_use]
    pub fn steps(&self) -> &[WireStep] {
        self.workout_segments
            .first()
            .map_or(&[], |segment| segment.workout_steps.as_slice())
    }
}

/// Build the wire payload from metadata and a numbered step sequence.
///
/// # Errors
///
/// Returns an [`InternalAssemblyError`] if ids are not `1..=N`, repeat
/// markers do not pair up, or a repeat block is empty.
pub fn assemble(
    header: &WorkoutHeader,
    steps: &[FlattenedStep],
) -> Result<WirePayload, InternalAssemblyError> {
    let mut wire_steps: Vec<WireStep> = Vec::with_capacity(steps.len());
    let mut open_groups: Vec<usize> = Vec::new();

    for (position, step) in steps.iter().enumerate() {
        let expected = u32::try_from(position + 1).unwrap_or(u32::MAX);
        if step.sequence_number != expected || step.step_order != expected {
            return Err(defect(
                step.sequence_number,
                format!(
                    "expected step id and order {expected}, found {} and {}",
                    step.sequence_number, step.step_order
                ),
            ));
        }

        let wire = match &step.kind {
            FlattenedKind::Leaf(leaf) => WireStep::Executable(executable(step, leaf)),
            FlattenedKind::RepeatBegin { iterations } => {
                open_groups.push(wire_steps.len());
                WireStep::RepeatGroup(RepeatGroupStep {
                    step_id: step.sequence_number,
                    step_order: step.step_order,
                    step_type: step_types::REPEAT.into(),
                    description: step.description.clone().or_else(|| step.name.clone()),
                    end_condition: conditions::ITERATIONS.into(),
                    end_condition_value: f64::from(*iterations),
                    number_of_iterations: *iterations,
                    first_child_step_id: 0,
                    last_child_step_id: 0,
                    end_step_id: 0,
                })
            }
            FlattenedKind::RepeatEnd { iterations } => {
                let group_id = close_group(&mut wire_steps, &mut open_groups, step, *iterations)?;
                WireStep::RepeatEnd(RepeatEndStep {
                    step_id: step.sequence_number,
                    step_order: step.step_order,
                    step_type: step_types::REPEAT.into(),
                    repeat_step_id: group_id,
                    number_of_iterations: *iterations,
                })
            }
        };
        wire_steps.push(wire);
    }

    if let Some(&unclosed) = open_groups.last() {
        let step_id = wire_steps.get(unclosed).map(WireStep::step_id);
        return Err(InternalAssemblyError {
            step_id,
            message: "repeat block is never closed".to_owned(),
        });
    }

    let sport_type = WireSportType::from(header.sport.vendor_key());
    Ok(WirePayload {
        workout_name: header.name.clone(),
        description: header.description.clone(),
        sport_type: sport_type.clone(),
        workout_segments: vec![WireSegment {
            segment_order: 1,
            sport_type,
            workout_steps: wire_steps,
        }],
    })
}

fn executable(step: &FlattenedStep, leaf: &FlattenedLeaf) -> ExecutableStep {
    let (end_condition, end_condition_value) = match leaf.end {
        NormalizedEnd::Time { seconds } => (conditions::TIME, f64::from(seconds)),
        NormalizedEnd::Distance { meters } => (conditions::DISTANCE, meters),
    };
    ExecutableStep {
        step_id: step.sequence_number,
        step_order: step.step_order,
        step_type: leaf.step_kind.vendor_key().into(),
        description: step.description.clone().or_else(|| step.name.clone()),
        end_condition: end_condition.into(),
        end_condition_value,
        target_type: leaf.target.target_type.into(),
        target_value_one: leaf.target.value_one,
        target_value_two: leaf.target.value_two,
    }
}

/// Fill in the child range of the innermost open group and return its id
fn close_group(
    wire_steps: &mut [WireStep],
    open_groups: &mut Vec<usize>,
    end: &FlattenedStep,
    iterations: u32,
) -> Result<u32, InternalAssemblyError> {
    let index = open_groups
        .pop()
        .ok_or_else(|| defect(end.sequence_number, "repeat end without a matching begin"))?;

    let Some(WireStep::RepeatGroup(group)) = wire_steps.get_mut(index) else {
        return Err(defect(end.sequence_number, "open repeat index does not point at a group"));
    };

    if group.number_of_iterations != iterations {
        return Err(defect(
            end.sequence_number,
            format!(
                "repeat end carries {iterations} iterations but its group declares {}",
                group.number_of_iterations
            ),
        ));
    }
    if group.step_id + 1 >= end.sequence_number {
        return Err(defect(end.sequence_number, "repeat block has no children"));
    }

    group.first_child_step_id = group.step_id + 1;
    group.last_child_step_id = end.sequence_number - 1;
    group.end_step_id = end.sequence_number;
    Ok(group.step_id)
}

fn defect(step_id: u32, message: impl Into<String>) -> InternalAssemblyError {
    InternalAssemblyError {
        step_id: Some(step_id),
        message: message.into(),
    }
}
