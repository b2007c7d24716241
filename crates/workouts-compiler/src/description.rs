// ABOUTME: Strongly typed workout description produced by schema validation
// ABOUTME: Sports, step kinds, end conditions, targets, and step paths into the authored tree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Workout Description Model
//!
//! The authored workout arrives as loosely typed JSON. Once it passes
//! [`crate::validation::validate`] it is represented by the types in this
//! module, so later stages never re-check shape or vocabulary.

use std::fmt;

use serde::{Serialize, Serializer};
use workouts_core::constants::garmin::{sports, step_types, VendorKey};

/// Position of a step in the authored tree, as indices into nested `steps` arrays.
///
/// Rendered as `steps[1].steps[0]` so callers can find the offending step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StepPath(Vec<usize>);

impl StepPath {
    /// Path of the workout itself (no step)
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th child of this step
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Nesting depth; top-level steps have depth 1
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Indices from the top level down
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for StepPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for StepPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("workout");
        }
        for (position, index) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            write!(f, "steps[{index}]")?;
        }
        Ok(())
    }
}

impl Serialize for StepPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sport of the whole workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SportKind {
    /// Running
    Running,
    /// Cycling
    Cycling,
    /// Swimming
    Swimming,
    /// Walking
    Walking,
    /// Cardio training
    Cardio,
    /// Strength training
    Strength,
}

impl SportKind {
    /// Every accepted sport, in the order they are documented to authors
    pub const ALL: [Self; 6] = [
        Self::Running,
        Self::Cycling,
        Self::Swimming,
        Self::Walking,
        Self::Cardio,
        Self::Strength,
    ];

    /// Parse the authored `type` field
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sport| sport.as_str() == value)
    }

    /// Authored spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
            Self::Swimming => "swimming",
            Self::Walking => "walking",
            Self::Cardio => "cardio",
            Self::Strength => "strength",
        }
    }

    /// Garmin sport type
    #[must_use]
    pub const fn vendor_key(&self) -> VendorKey {
        match self {
            Self::Running => sports::RUNNING,
            Self::Cycling => sports::CYCLING,
            Self::Swimming => sports::SWIMMING,
            Self::Walking => sports::WALKING,
            Self::Cardio => sports::CARDIO_TRAINING,
            Self::Strength => sports::STRENGTH_TRAINING,
        }
    }
}

/// Kind of an executable (non-repeat) step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Warm up
    Warmup,
    /// Cool down
    Cooldown,
    /// Work interval
    Interval,
    /// Active recovery
    Recovery,
    /// Rest
    Rest,
}

impl StepKind {
    /// Every executable step kind
    pub const ALL: [Self; 5] = [
        Self::Warmup,
        Self::Cooldown,
        Self::Interval,
        Self::Recovery,
        Self::Rest,
    ];

    /// Parse the authored `stepType` field (`repeat` is handled separately)
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Authored spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warmup => "warmup",
            Self::Cooldown => "cooldown",
            Self::Interval => "interval",
            Self::Recovery => "recovery",
            Self::Rest => "rest",
        }
    }

    /// Garmin step type
    #[must_use]
    pub const fn vendor_key(&self) -> VendorKey {
        match self {
            Self::Warmup => step_types::WARMUP,
            Self::Cooldown => step_types::COOLDOWN,
            Self::Interval => step_types::INTERVAL,
            Self::Recovery => step_types::RECOVERY,
            Self::Rest => step_types::REST,
        }
    }
}

/// Unit of an authored distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DistanceUnit {
    /// Meters (`m`)
    #[serde(rename = "m")]
    Meters,
    /// Kilometers (`km`)
    #[serde(rename = "km")]
    Kilometers,
    /// Statute miles (`mile`)
    #[serde(rename = "mile")]
    Miles,
}

impl DistanceUnit {
    /// Parse the authored `distanceUnit` field
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "m" => Some(Self::Meters),
            "km" => Some(Self::Kilometers),
            "mile" => Some(Self::Miles),
            _ => None,
        }
    }
}

/// When an executable step ends, in authored units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndCondition {
    /// After a duration in seconds
    Time {
        /// Authored duration, possibly fractional
        seconds: f64,
    },
    /// After a distance
    Distance {
        /// Authored distance
        value: f64,
        /// Unit of `value`
        unit: DistanceUnit,
    },
}

/// Family of a step target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Open step without a zone
    NoTarget,
    /// Pace zone
    Pace,
    /// Heart rate zone
    HeartRate,
    /// Power zone
    Power,
    /// Cadence zone
    Cadence,
    /// Speed zone
    Speed,
}

impl TargetKind {
    /// Every target family
    pub const ALL: [Self; 6] = [
        Self::NoTarget,
        Self::Pace,
        Self::HeartRate,
        Self::Power,
        Self::Cadence,
        Self::Speed,
    ];

    /// Parse the authored `target.type` field
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Authored spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoTarget => "no target",
            Self::Pace => "pace",
            Self::HeartRate => "heart rate",
            Self::Power => "power",
            Self::Cadence => "cadence",
            Self::Speed => "speed",
        }
    }
}

/// Scalar or `[min, max]` target value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetValue {
    /// A single point, resolved as a degenerate zone
    Single(f64),
    /// A closed range
    Range {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
}

/// Authored target; `unit` stays a raw string until normalization
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDescription {
    /// Target family
    pub kind: TargetKind,
    /// Zone value, `None` only for `no target`
    pub value: Option<TargetValue>,
    /// Declared unit, `None` only for `no target`
    pub unit: Option<String>,
}

impl TargetDescription {
    /// The explicit "no target" description
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: TargetKind::NoTarget,
            value: None,
            unit: None,
        }
    }
}

/// Executable step
#[derive(Debug, Clone, PartialEq)]
pub struct LeafStep {
    /// Position in the authored tree
    pub path: StepPath,
    /// Optional `stepName`
    pub name: Option<String>,
    /// Optional `stepDescription`
    pub description: Option<String>,
    /// Step kind
    pub kind: StepKind,
    /// End condition in authored units
    pub end_condition: EndCondition,
    /// Authored target
    pub target: TargetDescription,
}

/// Repeat block wrapping a non-empty sequence of children
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStep {
    /// Position in the authored tree
    pub path: StepPath,
    /// Optional `stepName`
    pub name: Option<String>,
    /// Optional `stepDescription`
    pub description: Option<String>,
    /// Number of times the children execute, at least 1
    pub iterations: u32,
    /// Child steps in execution order
    pub steps: Vec<StepDescription>,
}

/// One node of the authored step tree
#[derive(Debug, Clone, PartialEq)]
pub enum StepDescription {
    /// Executable step
    Leaf(LeafStep),
    /// Repeat block
    Repeat(RepeatStep),
}

impl StepDescription {
    /// Position in the authored tree
    #[must_use]
    pub const fn path(&self) -> &StepPath {
        match self {
            Self::Leaf(leaf) => &leaf.path,
            Self::Repeat(repeat) => &repeat.path,
        }
    }
}

/// Validated workout description
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDescription {
    /// Workout name
    pub name: String,
    /// Optional workout-level `description`
    pub description: Option<String>,
    /// Sport of the workout
    pub sport: SportKind,
    /// Top-level steps, never empty
    pub steps: Vec<StepDescription>,
}
