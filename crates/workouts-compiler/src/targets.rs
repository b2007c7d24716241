// ABOUTME: Target resolution from normalized targets to Garmin target types
// ABOUTME: Checks unit family membership and range ordering before emitting value bounds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

use workouts_core::constants::garmin::{targets, VendorKey};

use crate::description::{StepPath, TargetKind, TargetValue};
use crate::error::{InvalidTargetError, TargetRule};
use crate::units::{NormalizedTarget, TargetUnit};

/// Target as Garmin expects it: a target type plus optional low/high bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTarget {
    /// Garmin target type
    pub target_type: VendorKey,
    /// Lower bound in Garmin units, `None` for no target
    pub value_one: Option<f64>,
    /// Upper bound in Garmin units, `None` for no target
    pub value_two: Option<f64>,
}

impl ResolvedTarget {
    /// An open step
    #[must_use]
    pub const fn open() -> Self {
        Self {
            target_type: targets::NO_TARGET,
            value_one: None,
            value_two: None,
        }
    }
}

/// Garmin target type for a target family
#[must_use]
pub const fn vendor_target(kind: TargetKind) -> VendorKey {
    match kind {
        TargetKind::NoTarget => targets::NO_TARGET,
        TargetKind::Pace => targets::PACE_ZONE,
        TargetKind::HeartRate => targets::HEART_RATE_ZONE,
        TargetKind::Power => targets::POWER_ZONE,
        TargetKind::Cadence => targets::CADENCE_ZONE,
        TargetKind::Speed => targets::SPEED_ZONE,
    }
}

/// Units accepted by a target family
#[must_use]
pub const fn accepted_units(kind: TargetKind) -> &'static [TargetUnit] {
    match kind {
        TargetKind::NoTarget => &[],
        TargetKind::Pace => &[TargetUnit::MinPerKm, TargetUnit::MinPerMile],
        TargetKind::HeartRate => &[TargetUnit::Bpm],
        TargetKind::Power => &[TargetUnit::Watts],
        TargetKind::Cadence => &[TargetUnit::Rpm, TargetUnit::Spm],
        TargetKind::Speed => &[TargetUnit::KmPerHour, TargetUnit::MetersPerSecond],
    }
}

/// Map a normalized target to its Garmin representation.
///
/// # Errors
///
/// Returns an [`InvalidTargetError`] when the unit does not belong to the
/// family, a zoned target lacks a value, `no target` carries one, or a range
/// is inverted.
pub fn resolve_target(
    target: &NormalizedTarget,
    path: &StepPath,
) -> Result<ResolvedTarget, InvalidTargetError> {
    let fail = |rule: TargetRule, message: String| InvalidTargetError {
        step: path.clone(),
        rule,
        message,
    };

    if target.kind == TargetKind::NoTarget {
        if target.value.is_some() || target.unit.is_some() {
            return Err(fail(
                TargetRule::UnexpectedValue,
                "'no target' must not carry a value or unit".to_owned(),
            ));
        }
        return Ok(ResolvedTarget::open());
    }

    let (Some(unit), Some(value)) = (target.unit, target.value) else {
        return Err(fail(
            TargetRule::MissingValue,
            format!("'{}' target requires a value and unit", target.kind.as_str()),
        ));
    };

    let accepted = accepted_units(target.kind);
    if !accepted.contains(&unit) {
        let names: Vec<&str> = accepted.iter().map(TargetUnit::as_str).collect();
        return Err(fail(
            TargetRule::UnitMismatch,
            format!(
                "unit '{}' is not valid for a '{}' target, expected {}",
                unit.as_str(),
                target.kind.as_str(),
                names.join(" or ")
            ),
        ));
    }

    let (low, high) = match value {
        TargetValue::Single(point) => (point, point),
        TargetValue::Range { min, max } if min > max => {
            return Err(fail(
                TargetRule::InvertedRange,
                format!("range minimum {min} exceeds maximum {max}"),
            ));
        }
        TargetValue::Range { min, max } => (min, max),
    };

    Ok(ResolvedTarget {
        target_type: vendor_target(target.kind),
        value_one: Some(low),
        value_two: Some(high),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(kind: TargetKind, unit: Option<TargetUnit>, value: Option<TargetValue>) -> NormalizedTarget {
        NormalizedTarget { kind, unit, value }
    }

    #[test]
    fn test_every_family_has_a_vendor_key() {
        for kind in TargetKind::ALL {
            let key = vendor_target(kind);
            assert!(!key.key.is_empty());
            assert_eq!(kind == TargetKind::NoTarget, accepted_units(kind).is_empty());
        }
    }

    #[test]
    fn test_single_value_becomes_degenerate_zone() {
        let resolved = resolve_target(
            &target(
                TargetKind::HeartRate,
                Some(TargetUnit::Bpm),
                Some(TargetValue::Single(150.0)),
            ),
            &StepPath::root().child(0),
        )
        .unwrap();
        assert_eq!(resolved.target_type, targets::HEART_RATE_ZONE);
        assert_eq!(resolved.value_one, Some(150.0));
        assert_eq!(resolved.value_two, Some(150.0));
    }

    #[test]
    fn test_unit_mismatch_reported_before_range_order() {
        let error = resolve_target(
            &target(
                TargetKind::Power,
                Some(TargetUnit::Bpm),
                Some(TargetValue::Range { min: 300.0, max: 200.0 }),
            ),
            &StepPath::root().child(1),
        )
        .unwrap_err();
        assert_eq!(error.rule, TargetRule::UnitMismatch);
    }

    #[test]
    fn test_inverted_range() {
        let error = resolve_target(
            &target(
                TargetKind::Power,
                Some(TargetUnit::Watts),
                Some(TargetValue::Range { min: 300.0, max: 200.0 }),
            ),
            &StepPath::root().child(1),
        )
        .unwrap_err();
        assert_eq!(error.rule, TargetRule::InvertedRange);
    }

    #[test]
    fn test_no_target_rejects_values() {
        let error = resolve_target(
            &target(TargetKind::NoTarget, Some(TargetUnit::Bpm), None),
            &StepPath::root().child(0),
        )
        .unwrap_err();
        assert_eq!(error.rule, TargetRule::UnexpectedValue);

        let open = resolve_target(
            &target(TargetKind::NoTarget, None, None),
            &StepPath::root().child(0),
        )
        .unwrap();
        assert_eq!(open, ResolvedTarget::open());
    }
}
