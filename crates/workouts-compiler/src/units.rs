// ABOUTME: Unit normalization of validated workout descriptions
// ABOUTME: Converts distances to meters, paces and speeds to m/s, and durations to whole seconds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Unit Normalizer
//!
//! Every quantity leaves this stage in the unit Garmin expects:
//!
//! - distances in meters (`km` x 1000, `mile` x 1609.344)
//! - durations in whole seconds
//! - pace (`min_per_km`, `min_per_mile`) and speed (`km_per_h`, `m_per_s`) in m/s
//! - heart rate, power and cadence rounded to whole numbers
//!
//! Pace is inversely related to speed, so a pace range `[fast, slow]` becomes
//! the speed range `[speed(slow), speed(fast)]`. Bound order is preserved so
//! an inverted authored range stays inverted for the target resolver.

use workouts_core::constants::units::{
    KMH_PER_MPS, METERS_PER_KM, METERS_PER_MILE, SECONDS_PER_MINUTE,
};

use crate::description::{
    DistanceUnit, EndCondition, LeafStep, RepeatStep, SportKind, StepDescription, StepKind,
    StepPath, TargetDescription, TargetKind, TargetValue, WorkoutDescription,
};
use crate::error::{UnitConversionError, UnitConversionRule};

/// Unit of a target value as authored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetUnit {
    /// Minutes per kilometer
    MinPerKm,
    /// Minutes per mile
    MinPerMile,
    /// Beats per minute
    Bpm,
    /// Watts
    Watts,
    /// Revolutions per minute
    Rpm,
    /// Steps per minute
    Spm,
    /// Kilometers per hour
    KmPerHour,
    /// Meters per second
    MetersPerSecond,
}

impl TargetUnit {
    /// Parse an authored unit string
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "min_per_km" => Some(Self::MinPerKm),
            "min_per_mile" => Some(Self::MinPerMile),
            "bpm" => Some(Self::Bpm),
            "watts" => Some(Self::Watts),
            "rpm" => Some(Self::Rpm),
            "spm" => Some(Self::Spm),
            "km_per_h" => Some(Self::KmPerHour),
            "m_per_s" => Some(Self::MetersPerSecond),
            _ => None,
        }
    }

    /// Authored spelling
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MinPerKm => "min_per_km",
            Self::MinPerMile => "min_per_mile",
            Self::Bpm => "bpm",
            Self::Watts => "watts",
            Self::Rpm => "rpm",
            Self::Spm => "spm",
            Self::KmPerHour => "km_per_h",
            Self::MetersPerSecond => "m_per_s",
        }
    }

    /// Whether values in this unit are paces (time per distance)
    #[must_use]
    pub const fn is_pace(&self) -> bool {
        matches!(self, Self::MinPerKm | Self::MinPerMile)
    }
}

/// End condition in Garmin units
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalizedEnd {
    /// Whole seconds, at least 1
    Time {
        /// Duration
        seconds: u32,
    },
    /// Meters, strictly positive
    Distance {
        /// Distance
        meters: f64,
    },
}

/// Target with its value expressed in Garmin units
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTarget {
    /// Target family
    pub kind: TargetKind,
    /// Declared unit, kept so the resolver can check family membership
    pub unit: Option<TargetUnit>,
    /// Converted value
    pub value: Option<TargetValue>,
}

/// Executable step in Garmin units
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLeaf {
    /// Position in the authored tree
    pub path: StepPath,
    /// Optional `stepName`
    pub name: Option<String>,
    /// Optional `stepDescription`
    pub description: Option<String>,
    /// Step kind
    pub kind: StepKind,
    /// End condition
    pub end_condition: NormalizedEnd,
    /// Target
    pub target: NormalizedTarget,
}

/// Repeat block with normalized children
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRepeat {
    /// Position in the authored tree
    pub path: StepPath,
    /// Optional `stepName`
    pub name: Option<String>,
    /// Optional `stepDescription`
    pub description: Option<String>,
    /// Iteration count
    pub iterations: u32,
    /// Child steps
    pub steps: Vec<NormalizedStep>,
}

/// Node of the normalized step tree
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedStep {
    /// Executable step
    Leaf(NormalizedLeaf),
    /// Repeat block
    Repeat(NormalizedRepeat),
}

/// Workout with every quantity in Garmin units
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWorkout {
    /// Workout name
    pub name: String,
    /// Optional workout description
    pub description: Option<String>,
    /// Sport
    pub sport: SportKind,
    /// Top-level steps
    pub steps: Vec<NormalizedStep>,
}

/// Convert an authored distance to meters
#[must_use]
pub fn distance_to_meters(value: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Meters => value,
        DistanceUnit::Kilometers => value * METERS_PER_KM,
        DistanceUnit::Miles => value * METERS_PER_MILE,
    }
}

/// Convert a pace in minutes per `meters_per_unit` meters to m/s
///
/// # Errors
///
/// Returns [`UnitConversionRule::NonPositiveRate`] for paces at or below
/// zero and [`UnitConversionRule::NonFiniteValue`] for non-finite input.
pub fn pace_to_speed(minutes: f64, meters_per_unit: f64) -> Result<f64, UnitConversionRule> {
    if !minutes.is_finite() {
        return Err(UnitConversionRule::NonFiniteValue);
    }
    if minutes <= 0.0 {
        return Err(UnitConversionRule::NonPositiveRate);
    }
    let speed = meters_per_unit / (minutes * SECONDS_PER_MINUTE);
    if speed.is_finite() {
        Ok(speed)
    } else {
        Err(UnitConversionRule::NonFiniteValue)
    }
}

/// Normalize every quantity of a validated description.
///
/// # Errors
///
/// Returns the first [`UnitConversionError`] encountered in document order.
pub fn normalize(workout: WorkoutDescription) -> Result<NormalizedWorkout, UnitConversionError> {
    let steps = normalize_steps(workout.steps)?;
    Ok(NormalizedWorkout {
        name: workout.name,
        description: workout.description,
        sport: workout.sport,
        steps,
    })
}

fn normalize_steps(steps: Vec<StepDescription>) -> Result<Vec<NormalizedStep>, UnitConversionError> {
    steps
        .into_iter()
        .map(|step| match step {
            StepDescription::Leaf(leaf) => normalize_leaf(leaf).map(NormalizedStep::Leaf),
            StepDescription::Repeat(repeat) => normalize_repeat(repeat).map(NormalizedStep::Repeat),
        })
        .collect()
}

fn normalize_repeat(repeat: RepeatStep) -> Result<NormalizedRepeat, UnitConversionError> {
    Ok(NormalizedRepeat {
        steps: normalize_steps(repeat.steps)?,
        path: repeat.path,
        name: repeat.name,
        description: repeat.description,
        iterations: repeat.iterations,
    })
}

fn normalize_leaf(leaf: LeafStep) -> Result<NormalizedLeaf, UnitConversionError> {
    let end_condition = normalize_end(&leaf.path, leaf.end_condition)?;
    let target = normalize_target(&leaf.path, leaf.target)?;
    Ok(NormalizedLeaf {
        path: leaf.path,
        name: leaf.name,
        description: leaf.description,
        kind: leaf.kind,
        end_condition,
        target,
    })
}

fn normalize_end(path: &StepPath, end: EndCondition) -> Result<NormalizedEnd, UnitConversionError> {
    match end {
        EndCondition::Time { seconds } => {
            let rounded = seconds.round();
            if !rounded.is_finite() || rounded < 1.0 || rounded > f64::from(u32::MAX) {
                return Err(conversion_error(
                    path,
                    "s",
                    seconds,
                    UnitConversionRule::DurationOutOfRange,
                ));
            }
            Ok(NormalizedEnd::Time {
                seconds: rounded as u32,
            })
        }
        EndCondition::Distance { value, unit } => {
            let meters = distance_to_meters(value, unit);
            if !meters.is_finite() {
                let unit_name = match unit {
                    DistanceUnit::Meters => "m",
                    DistanceUnit::Kilometers => "km",
                    DistanceUnit::Miles => "mile",
                };
                return Err(conversion_error(
                    path,
                    unit_name,
                    value,
                    UnitConversionRule::NonFiniteValue,
                ));
            }
            Ok(NormalizedEnd::Distance { meters })
        }
    }
}

fn normalize_target(
    path: &StepPath,
    target: TargetDescription,
) -> Result<NormalizedTarget, UnitConversionError> {
    let Some(raw_unit) = target.unit else {
        return Ok(NormalizedTarget {
            kind: target.kind,
            unit: None,
            value: target.value,
        });
    };

    let Some(unit) = TargetUnit::parse(&raw_unit) else {
        let value = target.value.map_or(f64::NAN, first_bound);
        return Err(conversion_error(
            path,
            &raw_unit,
            value,
            UnitConversionRule::UnrecognizedUnit,
        ));
    };

    let value = target
        .value
        .map(|value| convert_value(path, unit, value))
        .transpose()?;

    Ok(NormalizedTarget {
        kind: target.kind,
        unit: Some(unit),
        value,
    })
}

fn convert_value(
    path: &StepPath,
    unit: TargetUnit,
    value: TargetValue,
) -> Result<TargetValue, UnitConversionError> {
    let convert = |raw: f64| {
        convert_scalar(unit, raw).map_err(|rule| conversion_error(path, unit.as_str(), raw, rule))
    };

    match value {
        TargetValue::Single(raw) => Ok(TargetValue::Single(convert(raw)?)),
        TargetValue::Range { min, max } if unit.is_pace() => Ok(TargetValue::Range {
            min: convert(max)?,
            max: convert(min)?,
        }),
        TargetValue::Range { min, max } => Ok(TargetValue::Range {
            min: convert(min)?,
            max: convert(max)?,
        }),
    }
}

fn convert_scalar(unit: TargetUnit, raw: f64) -> Result<f64, UnitConversionRule> {
    if !raw.is_finite() {
        return Err(UnitConversionRule::NonFiniteValue);
    }
    match unit {
        TargetUnit::MinPerKm => pace_to_speed(raw, METERS_PER_KM),
        TargetUnit::MinPerMile => pace_to_speed(raw, METERS_PER_MILE),
        TargetUnit::KmPerHour | TargetUnit::MetersPerSecond if raw <= 0.0 => {
            Err(UnitConversionRule::NonPositiveRate)
        }
        TargetUnit::KmPerHour => Ok(raw / KMH_PER_MPS),
        TargetUnit::MetersPerSecond => Ok(raw),
        TargetUnit::Bpm | TargetUnit::Watts | TargetUnit::Rpm | TargetUnit::Spm => Ok(raw.round()),
    }
}

const fn first_bound(value: TargetValue) -> f64 {
    match value {
        TargetValue::Single(raw) | TargetValue::Range { min: raw, .. } => raw,
    }
}

fn conversion_error(
    path: &StepPath,
    unit: &str,
    value: f64,
    rule: UnitConversionRule,
) -> UnitConversionError {
    UnitConversionError {
        step: path.clone(),
        unit: unit.to_owned(),
        value,
        rule,
    }
}
