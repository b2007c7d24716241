// ABOUTME: Flattens the normalized step tree into a pre-order step sequence
// ABOUTME: Repeat blocks become begin/end marker pairs around their children, never unrolled
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Step Flattener
//!
//! Garmin executes a segment as a linear list of steps. A repeat block is
//! represented by a begin marker, its children once, and an end marker; the
//! device handles iteration. Targets are resolved here so each flattened
//! leaf carries exactly what the payload needs.

use crate::description::{StepKind, StepPath};
use crate::error::InvalidTargetError;
use crate::targets::{resolve_target, ResolvedTarget};
use crate::units::{NormalizedEnd, NormalizedLeaf, NormalizedRepeat, NormalizedStep};

/// Executable content of a flattened leaf
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedLeaf {
    /// Step kind
    pub step_kind: StepKind,
    /// End condition in Garmin units
    pub end: NormalizedEnd,
    /// Resolved target
    pub target: ResolvedTarget,
}

/// What a flattened entry stands for
#[derive(Debug, Clone, PartialEq)]
pub enum FlattenedKind {
    /// Executable step
    Leaf(FlattenedLeaf),
    /// Opens a repeat block
    RepeatBegin {
        /// Iteration count of the block
        iterations: u32,
    },
    /// Closes the most recently opened repeat block
    RepeatEnd {
        /// Iteration count of the block
        iterations: u32,
    },
}

/// One entry of the flattened sequence
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedStep {
    /// 1-based id; zero until [`crate::numbering::assign_ids`] runs
    pub sequence_number: u32,
    /// 1-based position in the sequence
    pub step_order: u32,
    /// Authored step this entry came from
    pub path: StepPath,
    /// Optional `stepName`
    pub name: Option<String>,
    /// Optional `stepDescription`
    pub description: Option<String>,
    /// Entry kind
    pub kind: FlattenedKind,
}

impl FlattenedStep {
    /// Whether this entry opens a repeat block
    #[must_use]
    pub const fn is_repeat_begin(&self) -> bool {
        matches!(self.kind, FlattenedKind::RepeatBegin { .. })
    }

    /// Whether this entry closes a repeat block
    #[must_use]
    pub const fn is_repeat_end(&self) -> bool {
        matches!(self.kind, FlattenedKind::RepeatEnd { .. })
    }
}

/// Flatten a normalized step tree in pre-order.
///
/// # Errors
///
/// Returns the first [`InvalidTargetError`] raised while resolving leaf targets.
pub fn flatten(steps: &[NormalizedStep]) -> Result<Vec<FlattenedStep>, InvalidTargetError> {
    let mut flattener = Flattener::default();
    flattener.visit_all(steps)?;
    Ok(flattener.out)
}

#[derive(Default)]
struct Flattener {
    out: Vec<FlattenedStep>,
}

impl Flattener {
    fn visit_all(&mut self, steps: &[NormalizedStep]) -> Result<(), InvalidTargetError> {
        for step in steps {
            match step {
                NormalizedStep::Leaf(leaf) => self.leaf(leaf)?,
                NormalizedStep::Repeat(repeat) => self.repeat(repeat)?,
            }
        }
        Ok(())
    }

    fn leaf(&mut self, leaf: &NormalizedLeaf) -> Result<(), InvalidTargetError> {
        let target = resolve_target(&leaf.target, &leaf.path)?;
        self.push(
            &leaf.path,
            leaf.name.clone(),
            leaf.description.clone(),
            FlattenedKind::Leaf(FlattenedLeaf {
                step_kind: leaf.kind,
                end: leaf.end_condition,
                target,
            }),
        );
        Ok(())
    }

    fn repeat(&mut self, repeat: &NormalizedRepeat) -> Result<(), InvalidTargetError> {
        self.push(
            &repeat.path,
            repeat.name.clone(),
            repeat.description.clone(),
            FlattenedKind::RepeatBegin {
                iterations: repeat.iterations,
            },
        );
        self.visit_all(&repeat.steps)?;
        self.push(
            &repeat.path,
            None,
            None,
            FlattenedKind::RepeatEnd {
                iterations: repeat.iterations,
            },
        );
        Ok(())
    }

    fn push(
        &mut self,
        path: &StepPath,
        name: Option<String>,
        description: Option<String>,
        kind: FlattenedKind,
    ) {
        let step_order = u32::try_from(self.out.len() + 1).unwrap_or(u32::MAX);
        self.out.push(FlattenedStep {
            sequence_number: 0,
            step_order,
            path: path.clone(),
            name,
            description,
            kind,
        });
    }
}
