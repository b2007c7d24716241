// ABOUTME: Workout payload compiler turning authored workout trees into Garmin wire payloads
// ABOUTME: Pure pipeline of validation, normalization, target resolution, flattening, numbering, assembly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

#![deny(unsafe_code)]

//! # Workouts Compiler
//!
//! Compiles a nested, loosely typed workout description into the flat payload
//! accepted by Garmin Connect's workout-creation endpoint. The pipeline is
//! strictly linear:
//!
//! 1. [`validation::validate`] checks shape and vocabulary
//! 2. [`units::normalize`] converts every quantity to Garmin units
//! 3. [`targets::resolve_target`] maps targets to Garmin target types
//! 4. [`flatten::flatten`] emits a pre-order sequence with repeat markers
//! 5. [`numbering::assign_ids`] numbers the sequence `1..=N`
//! 6. [`payload::assemble`] builds the wire object
//!
//! Compilation is synchronous and has no side effects, so a [`Compiler`] can
//! be shared freely across tasks.
//!
//! ```
//! use serde_json::json;
//!
//! let payload = workouts_compiler::compile(&json!({
//!     "name": "Easy Run",
//!     "type": "running",
//!     "steps": [{
//!         "stepType": "warmup",
//!         "endConditionType": "time",
//!         "stepDuration": 300,
//!         "target": {"type": "no target"}
//!     }]
//! }))
//! .expect("valid description");
//! assert_eq!(payload.workout_name, "Easy Run");
//! ```

/// Typed workout description
pub mod description;
/// Compile error taxonomy
pub mod error;
/// Step flattener
pub mod flatten;
/// Id assigner
pub mod numbering;
/// Wire payload model and assembler
pub mod payload;
/// Target resolver
pub mod targets;
/// Unit normalizer
pub mod units;
/// Schema validator
pub mod validation;

use serde_json::Value;
use workouts_core::constants::limits::{DEFAULT_MAX_STEP_COUNT, DEFAULT_MAX_STEP_DEPTH};

pub use description::{StepPath, WorkoutDescription};
pub use error::{
    CompileError, InternalAssemblyError, InvalidTargetError, UnitConversionError, ValidationError,
};
pub use flatten::FlattenedStep;
pub use payload::{WirePayload, WireStep, WorkoutHeader};

/// Ceilings applied while validating a description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Maximum nesting depth; top-level steps have depth 1
    pub max_depth: usize,
    /// Maximum number of steps in the whole tree, repeats included
    pub max_steps: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_STEP_DEPTH,
            max_steps: DEFAULT_MAX_STEP_COUNT,
        }
    }
}

/// Numbered step sequence plus the metadata needed to assemble a payload
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPlan {
    /// Workout-level metadata
    pub header: WorkoutHeader,
    /// Flattened steps with ids assigned
    pub steps: Vec<FlattenedStep>,
}

/// Workout compiler configured with validation ceilings
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Compiler with default ceilings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler with custom ceilings
    #[must_use]
    pub const fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Active ceilings
    #[must_use]
    pub const fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Run every stage except assembly.
    ///
    /// # Errors
    ///
    /// Returns the [`CompileError`] of the first failing stage.
    pub fn plan(&self, raw: &Value) -> Result<CompiledPlan, CompileError> {
        let description = validation::validate(raw, &self.options)?;
        let normalized = units::normalize(description)?;
        let flattened = flatten::flatten(&normalized.steps)?;
        Ok(CompiledPlan {
            header: WorkoutHeader {
                name: normalized.name,
                description: normalized.description,
                sport: normalized.sport,
            },
            steps: numbering::assign_ids(flattened),
        })
    }

    /// Compile a description into a wire payload.
    ///
    /// # Errors
    ///
    /// Returns the [`CompileError`] of the first failing stage; validation
    /// failures list every violation found.
    pub fn compile(&self, raw: &Value) -> Result<WirePayload, CompileError> {
        let plan = self.plan(raw)?;
        Ok(payload::assemble(&plan.header, &plan.steps)?)
    }
}

/// Compile a description with default ceilings.
///
/// # Errors
///
/// See [`Compiler::compile`].
pub fn compile(raw: &Value) -> Result<WirePayload, CompileError> {
    Compiler::new().compile(raw)
}
