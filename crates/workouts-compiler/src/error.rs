// ABOUTME: Error taxonomy of the workout compiler
// ABOUTME: Validation, unit conversion, target resolution, and internal assembly failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Compile Errors
//!
//! Every stage fails fast with its own error kind, except validation, which
//! aggregates all findings so the author sees the whole problem at once.
//! All errors serialize to JSON and name the offending step by [`StepPath`].

use std::fmt;

use serde::Serialize;
use serde_json::json;
use workouts_core::errors::{AppError, ErrorCode};

use crate::description::StepPath;

/// Rule broken by a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    /// A required field is absent or null
    MissingField,
    /// A field has the wrong JSON type
    InvalidType,
    /// `name` is blank
    EmptyName,
    /// Workout `type` is not an accepted sport
    UnknownSport,
    /// `steps` is empty
    EmptySteps,
    /// `stepType` is not an accepted step type
    UnknownStepType,
    /// `endConditionType` is not `time` or `distance`
    UnknownEndCondition,
    /// Duration/distance fields disagree with `endConditionType`
    EndConditionMismatch,
    /// Duration or distance is not strictly positive
    NonPositiveQuantity,
    /// `distanceUnit` is not `m`, `km` or `mile`
    UnknownDistanceUnit,
    /// `numberOfIterations` is not an integer of at least 1
    InvalidIterations,
    /// A repeat has no child steps
    EmptyRepeat,
    /// A non-repeat step declares child steps
    UnexpectedChildren,
    /// `target.type` is not an accepted target type
    UnknownTargetType,
    /// A `no target` target carries a value or unit
    TargetNullability,
    /// `target.value` is neither a number nor a `[min, max]` pair
    InvalidTargetValue,
    /// Nesting exceeds the depth ceiling
    DepthExceeded,
    /// The description has more steps than allowed
    TooManySteps,
}

/// One finding of the schema validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Offending step; the workout itself for top-level fields
    pub step: StepPath,
    /// Field that broke the rule, e.g. `target.unit`
    pub field: String,
    /// Rule identifier
    pub rule: ValidationRule,
    /// Human-readable explanation
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`: {}", self.step, self.field, self.message)
    }
}

/// Aggregated validation failure listing every violation found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub struct ValidationError {
    /// All findings, in document order
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Whether any finding broke `rule`
    #[must_use]
    pub fn has_rule(&self, rule: ValidationRule) -> bool {
        self.violations.iter().any(|violation| violation.rule == rule)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "workout description has {} problem(s)",
            self.violations.len()
        )?;
        for violation in &self.violations {
            write!(f, "; {violation}")?;
        }
        Ok(())
    }
}

/// Why a unit conversion failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitConversionRule {
    /// The declared unit is not recognized
    UnrecognizedUnit,
    /// Pace or speed is zero or negative
    NonPositiveRate,
    /// The converted value is not a finite number
    NonFiniteValue,
    /// A duration rounds outside the representable whole-second range
    DurationOutOfRange,
}

/// Failure to express a quantity in internal units
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{step}: cannot convert {value} {unit}: {rule:?}")]
pub struct UnitConversionError {
    /// Offending step
    pub step: StepPath,
    /// Declared unit
    pub unit: String,
    /// Offending value
    pub value: f64,
    /// Rule identifier
    pub rule: UnitConversionRule,
}

/// Why a target could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRule {
    /// Range minimum exceeds its maximum
    InvertedRange,
    /// Unit does not belong to the target family
    UnitMismatch,
    /// A zoned target has no value or unit
    MissingValue,
    /// `no target` carries a value or unit
    UnexpectedValue,
}

/// Inconsistent target type, unit and value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{step}: invalid target: {message}")]
pub struct InvalidTargetError {
    /// Offending step
    pub step: StepPath,
    /// Rule identifier
    pub rule: TargetRule,
    /// Human-readable explanation
    pub message: String,
}

/// Invariant broken between stages; always a compiler defect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("internal assembly error at step id {step_id:?}: {message}")]
pub struct InternalAssemblyError {
    /// Flattened step id where the inconsistency was detected
    pub step_id: Option<u32>,
    /// What was inconsistent
    pub message: String,
}

/// Any failure of [`crate::compile`]
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompileError {
    /// Malformed or incomplete description
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Unrecognized or physically invalid unit/value
    #[error(transparent)]
    UnitConversion(#[from] UnitConversionError),
    /// Inconsistent target type/unit/value
    #[error(transparent)]
    InvalidTarget(#[from] InvalidTargetError),
    /// Compiler defect
    #[error(transparent)]
    InternalAssembly(#[from] InternalAssemblyError),
}

impl CompileError {
    /// Whether the caller can fix this by re-authoring the description
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InternalAssembly(_))
    }

    /// Serialized `kind` tag
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::UnitConversion(_) => "unit_conversion",
            Self::InvalidTarget(_) => "invalid_target",
            Self::InternalAssembly(_) => "internal_assembly",
        }
    }

    const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::InvalidInput,
            Self::UnitConversion(_) => ErrorCode::ValueOutOfRange,
            Self::InvalidTarget(_) => ErrorCode::InvalidFormat,
            Self::InternalAssembly(_) => ErrorCode::InternalError,
        }
    }
}

impl From<CompileError> for AppError {
    fn from(error: CompileError) -> Self {
        let details = serde_json::to_value(&error)
            .unwrap_or_else(|_| json!({ "message": error.to_string() }));
        Self::new(error.error_code(), error.to_string()).with_details(details)
    }
}
