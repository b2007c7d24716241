// ABOUTME: Integration tests for the workout payload compiler pipeline
// ABOUTME: Covers unit conversion, flattening order, iteration fidelity, numbering, and error reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serde_json::{json, Value};
use workouts_compiler::error::{TargetRule, UnitConversionRule, ValidationRule};
use workouts_compiler::flatten::FlattenedKind;
use workouts_compiler::payload::WireStep;
use workouts_compiler::{compile, CompileError, CompileOptions, Compiler};
use workouts_core::constants::garmin::step_dto;

const TOLERANCE: f64 = 1e-3;

fn time_step(step_type: &str, seconds: u32) -> Value {
    json!({
        "stepName": step_type,
        "stepType": step_type,
        "endConditionType": "time",
        "stepDuration": seconds,
        "target": {"type": "no target", "value": null, "unit": null}
    })
}

fn distance_step(distance: f64, unit: &str) -> Value {
    json!({
        "stepType": "interval",
        "endConditionType": "distance",
        "stepDistance": distance,
        "distanceUnit": unit,
        "target": {"type": "no target", "value": null, "unit": null}
    })
}

fn workout(steps: Vec<Value>) -> Value {
    json!({"name": "Test Workout", "type": "running", "steps": steps})
}

fn repeat(iterations: u32, steps: Vec<Value>) -> Value {
    json!({"stepType": "repeat", "numberOfIterations": iterations, "steps": steps})
}

fn end_values(payload: &workouts_compiler::WirePayload) -> Vec<f64> {
    payload
        .steps()
        .iter()
        .filter_map(|step| match step {
            WireStep::Executable(leaf) => Some(leaf.end_condition_value),
            _ => None,
        })
        .collect()
}

fn validation_error(raw: &Value) -> workouts_compiler::ValidationError {
    match compile(raw).unwrap_err() {
        CompileError::Validation(error) => error,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_end_to_end_easy_run() {
    let raw = json!({
        "name": "Easy Run",
        "type": "running",
        "steps": [
            {"stepType": "warmup", "endConditionType": "time", "stepDuration": 300,
             "target": {"type": "no target"}},
            {"stepType": "interval", "endConditionType": "distance", "stepDistance": 1,
             "distanceUnit": "km", "target": {"type": "pace", "value": 4.67, "unit": "min_per_km"}}
        ]
    });

    let plan = Compiler::new().plan(&raw).unwrap();
    assert_eq!(plan.steps.len(), 2);
    assert_eq!(
        plan.steps.iter().map(|step| step.sequence_number).collect::<Vec<_>>(),
        vec![1, 2]
    );

    let payload = compile(&raw).unwrap();
    assert_eq!(payload.workout_name, "Easy Run");
    assert_eq!(payload.sport_type.sport_type_key, "running");
    assert_eq!(payload.workout_segments.len(), 1);

    let WireStep::Executable(interval) = &payload.steps()[1] else {
        panic!("expected an executable step");
    };
    assert!((interval.end_condition_value - 1000.0).abs() < TOLERANCE);
    assert_eq!(interval.end_condition.condition_type_key, "distance");
    assert_eq!(interval.target_type.workout_target_type_key, "pace.zone");
    let speed = interval.target_value_one.unwrap();
    assert!((speed - 3.570).abs() < TOLERANCE);
    assert_eq!(interval.target_value_one, interval.target_value_two);
}

#[test]
fn test_distance_normalization() {
    let payload = compile(&workout(vec![
        distance_step(400.0, "m"),
        distance_step(1.0, "km"),
        distance_step(1.0, "mile"),
    ]))
    .unwrap();

    let values = end_values(&payload);
    assert!((values[0] - 400.0).abs() < TOLERANCE);
    assert!((values[1] - 1000.0).abs() < TOLERANCE);
    assert!((values[2] - 1609.344).abs() < TOLERANCE);
}

#[test]
fn test_fractional_duration_is_rounded() {
    let mut step = time_step("rest", 0);
    step["stepDuration"] = json!(89.6);
    let payload = compile(&workout(vec![step])).unwrap();
    assert_eq!(end_values(&payload), vec![90.0]);
}

#[test]
fn test_iteration_fidelity() {
    let raw = workout(vec![repeat(
        3,
        vec![time_step("interval", 60), time_step("recovery", 90)],
    )]);

    let plan = Compiler::new().plan(&raw).unwrap();
    assert_eq!(plan.steps.len(), 4);
    assert!(matches!(
        plan.steps[0].kind,
        FlattenedKind::RepeatBegin { iterations: 3 }
    ));
    assert!(matches!(plan.steps[1].kind, FlattenedKind::Leaf(_)));
    assert!(matches!(plan.steps[2].kind, FlattenedKind::Leaf(_)));
    assert!(matches!(
        plan.steps[3].kind,
        FlattenedKind::RepeatEnd { iterations: 3 }
    ));

    let payload = compile(&raw).unwrap();
    let WireStep::RepeatGroup(group) = &payload.steps()[0] else {
        panic!("expected a repeat group");
    };
    assert_eq!(group.number_of_iterations, 3);
    assert_eq!(group.step_type.step_type_key, "repeat");
    assert_eq!(group.end_condition.condition_type_key, "iterations");
    assert_eq!((group.first_child_step_id, group.last_child_step_id), (2, 3));
}

#[test]
fn test_nested_repeats_flatten_in_pre_order() {
    let raw = workout(vec![
        time_step("warmup", 600),
        repeat(
            2,
            vec![
                time_step("interval", 60),
                repeat(3, vec![time_step("interval", 30), time_step("rest", 30)]),
                time_step("recovery", 120),
            ],
        ),
        time_step("cooldown", 600),
    ]);

    let plan = Compiler::new().plan(&raw).unwrap();
    let names: Vec<String> = plan
        .steps
        .iter()
        .map(|step| match &step.kind {
            FlattenedKind::Leaf(_) => step.name.clone().unwrap(),
            FlattenedKind::RepeatBegin { iterations } => format!("begin{iterations}"),
            FlattenedKind::RepeatEnd { iterations } => format!("end{iterations}"),
        })
        .collect();
    assert_eq!(
        names,
        vec![
            "warmup", "begin2", "interval", "begin3", "interval", "rest", "end3", "recovery",
            "end2", "cooldown"
        ]
    );

    let ids: Vec<u32> = plan.steps.iter().map(|step| step.sequence_number).collect();
    let orders: Vec<u32> = plan.steps.iter().map(|step| step.step_order).collect();
    let expected: Vec<u32> = (1..=10).collect();
    assert_eq!(ids, expected);
    assert_eq!(orders, expected);

    let payload = compile(&raw).unwrap();
    let WireStep::RepeatGroup(outer) = &payload.steps()[1] else {
        panic!("expected outer repeat group");
    };
    assert_eq!(
        (outer.first_child_step_id, outer.last_child_step_id, outer.end_step_id),
        (3, 8, 9)
    );
    let WireStep::RepeatGroup(inner) = &payload.steps()[3] else {
        panic!("expected inner repeat group");
    };
    assert_eq!(
        (inner.first_child_step_id, inner.last_child_step_id, inner.end_step_id),
        (5, 6, 7)
    );
    let WireStep::RepeatEnd(inner_end) = &payload.steps()[6] else {
        panic!("expected inner repeat end");
    };
    assert_eq!(inner_end.repeat_step_id, 4);
}

#[test]
fn test_wire_shape_uses_vendor_field_names() {
    let raw = workout(vec![repeat(2, vec![time_step("interval", 60)])]);
    let payload = serde_json::to_value(compile(&raw).unwrap()).unwrap();

    let steps = &payload["workoutSegments"][0]["workoutSteps"];
    assert_eq!(payload["workoutSegments"][0]["segmentOrder"], 1);
    assert_eq!(steps[0]["type"], step_dto::REPEAT_GROUP);
    assert_eq!(steps[1]["type"], step_dto::EXECUTABLE);
    assert_eq!(steps[2]["type"], step_dto::REPEAT_END);
    assert_eq!(steps[1]["stepId"], 2);
    assert_eq!(steps[1]["stepType"]["stepTypeKey"], "interval");
    assert_eq!(steps[1]["targetType"]["workoutTargetTypeKey"], "no.target");
    assert!(steps[1]["targetValueOne"].is_null());
    assert!(steps[1]["targetValueTwo"].is_null());
    assert_eq!(steps[1]["description"], "interval");
    assert_eq!(steps[2]["repeatStepId"], 1);
}

#[test]
fn test_heart_rate_range_and_power_single() {
    let raw = workout(vec![
        json!({"stepType": "interval", "endConditionType": "time", "stepDuration": 300,
               "target": {"type": "heart rate", "value": [140, 155], "unit": "bpm"}}),
        json!({"stepType": "interval", "endConditionType": "time", "stepDuration": 300,
               "target": {"type": "power", "value": 250.4, "unit": "watts"}}),
    ]);
    let payload = compile(&raw).unwrap();

    let WireStep::Executable(heart_rate) = &payload.steps()[0] else {
        panic!("expected an executable step");
    };
    assert_eq!(heart_rate.target_type.workout_target_type_key, "heart.rate.zone");
    assert_eq!(heart_rate.target_value_one, Some(140.0));
    assert_eq!(heart_rate.target_value_two, Some(155.0));

    let WireStep::Executable(power) = &payload.steps()[1] else {
        panic!("expected an executable step");
    };
    assert_eq!(power.target_type.workout_target_type_key, "power.zone");
    assert_eq!(power.target_value_one, Some(250.0));
    assert_eq!(power.target_value_two, Some(250.0));
}

#[test]
fn test_pace_range_becomes_ascending_speed_zone() {
    let raw = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 600,
        "target": {"type": "pace", "value": [4.5, 5.0], "unit": "min_per_km"}
    })]);
    let payload = compile(&raw).unwrap();
    let WireStep::Executable(step) = &payload.steps()[0] else {
        panic!("expected an executable step");
    };
    let (low, high) = (step.target_value_one.unwrap(), step.target_value_two.unwrap());
    assert!((low - 1000.0 / 300.0).abs() < TOLERANCE);
    assert!((high - 1000.0 / 270.0).abs() < TOLERANCE);
}

#[test]
fn test_inverted_range_is_invalid_target() {
    let raw = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 600,
        "target": {"type": "heart rate", "value": [160, 140], "unit": "bpm"}
    })]);
    match compile(&raw).unwrap_err() {
        CompileError::InvalidTarget(error) => {
            assert_eq!(error.rule, TargetRule::InvertedRange);
            assert_eq!(error.step.to_string(), "steps[0]");
        }
        other => panic!("expected an invalid target error, got {other:?}"),
    }
}

#[test]
fn test_unit_inconsistent_with_type() {
    let raw = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 600,
        "target": {"type": "pace", "value": 150, "unit": "bpm"}
    })]);
    let error = compile(&raw).unwrap_err();
    assert!(matches!(
        error,
        CompileError::InvalidTarget(ref target) if target.rule == TargetRule::UnitMismatch
    ));
    assert!(error.is_recoverable());
}

#[test]
fn test_zero_pace_is_unit_conversion_error() {
    let raw = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 600,
        "target": {"type": "pace", "value": 0, "unit": "min_per_km"}
    })]);
    match compile(&raw).unwrap_err() {
        CompileError::UnitConversion(error) => {
            assert_eq!(error.rule, UnitConversionRule::NonPositiveRate);
        }
        other => panic!("expected a unit conversion error, got {other:?}"),
    }
}

#[test]
fn test_no_target_nullability() {
    let open = workout(vec![time_step("interval", 60)]);
    let compiled = compile(&open).unwrap();
    let WireStep::Executable(step) = &compiled.steps()[0] else {
        panic!("expected an executable step");
    };
    assert_eq!(step.target_type.workout_target_type_key, "no.target");
    assert_eq!(step.target_value_one, None);

    let missing_value = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 60,
        "target": {"type": "heart rate", "value": null, "unit": null}
    })]);
    let error = compile(&missing_value).unwrap_err();
    assert_eq!(error.kind(), "invalid_target");
    match error {
        CompileError::InvalidTarget(error) => {
            assert_eq!(error.rule, TargetRule::MissingValue);
            assert_eq!(error.step.to_string(), "steps[0]");
        }
        other => panic!("expected an invalid target error, got {other:?}"),
    }

    let missing_unit = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 60,
        "target": {"type": "power", "value": 250, "unit": null}
    })]);
    assert!(matches!(
        compile(&missing_unit).unwrap_err(),
        CompileError::InvalidTarget(ref target) if target.rule == TargetRule::MissingValue
    ));

    let valued_open = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 60,
        "target": {"type": "no target", "value": 5, "unit": "bpm"}
    })]);
    assert!(validation_error(&valued_open).has_rule(ValidationRule::TargetNullability));
}

#[test]
fn test_null_fields_of_the_other_end_condition_are_ignored() {
    let nulled = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 90,
        "stepDistance": null, "distanceUnit": null,
        "target": {"type": "no target", "value": null, "unit": null}
    })]);
    assert_eq!(end_values(&compile(&nulled).unwrap()), vec![90.0]);

    let both_set = workout(vec![json!({
        "stepType": "interval", "endConditionType": "time", "stepDuration": 90,
        "stepDistance": 400, "distanceUnit": "m",
        "target": {"type": "no target", "value": null, "unit": null}
    })]);
    assert!(validation_error(&both_set).has_rule(ValidationRule::EndConditionMismatch));
}

#[test]
fn test_validation_aggregates_every_violation() {
    let raw = json!({
        "name": "",
        "type": "rowing",
        "steps": [
            {"stepType": "sprint", "endConditionType": "time", "stepDuration": 60},
            {"stepType": "interval", "endConditionType": "time", "stepDistance": 400,
             "distanceUnit": "m"},
            {"stepType": "repeat", "numberOfIterations": 0, "steps": []},
            {"stepType": "interval", "endConditionType": "distance", "stepDistance": 1,
             "distanceUnit": "yard"}
        ]
    });

    let error = validation_error(&raw);
    for rule in [
        ValidationRule::EmptyName,
        ValidationRule::UnknownSport,
        ValidationRule::UnknownStepType,
        ValidationRule::EndConditionMismatch,
        ValidationRule::MissingField,
        ValidationRule::InvalidIterations,
        ValidationRule::EmptyRepeat,
        ValidationRule::UnknownDistanceUnit,
    ] {
        assert!(error.has_rule(rule), "missing {rule:?} in {error}");
    }

    let steps: Vec<String> = error
        .violations
        .iter()
        .map(|violation| violation.step.to_string())
        .collect();
    assert!(steps.contains(&"workout".to_owned()));
    assert!(steps.contains(&"steps[2]".to_owned()));
    assert!(steps.contains(&"steps[3]".to_owned()));
}

#[test]
fn test_missing_steps_and_non_object_input() {
    assert!(validation_error(&json!({"name": "x", "type": "running", "steps": []}))
        .has_rule(ValidationRule::EmptySteps));
    assert!(validation_error(&json!({"name": "x", "type": "running"}))
        .has_rule(ValidationRule::MissingField));
    assert!(validation_error(&json!([1, 2, 3])).has_rule(ValidationRule::InvalidType));
}

#[test]
fn test_leaf_with_children_is_rejected() {
    let mut step = time_step("interval", 60);
    step["steps"] = json!([time_step("rest", 30)]);
    assert!(validation_error(&workout(vec![step])).has_rule(ValidationRule::UnexpectedChildren));
}

#[test]
fn test_depth_ceiling() {
    let mut tree = time_step("interval", 60);
    for _ in 0..4 {
        tree = repeat(2, vec![tree]);
    }
    let raw = workout(vec![tree]);

    let shallow = Compiler::with_options(CompileOptions {
        max_depth: 3,
        ..CompileOptions::default()
    });
    match shallow.compile(&raw).unwrap_err() {
        CompileError::Validation(error) => {
            assert!(error.has_rule(ValidationRule::DepthExceeded));
            let deepest = error
                .violations
                .iter()
                .find(|violation| violation.rule == ValidationRule::DepthExceeded)
                .unwrap();
            assert_eq!(deepest.step.depth(), 4);
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    assert!(Compiler::new().compile(&raw).is_ok());
}

#[test]
fn test_step_count_ceiling() {
    let steps = (0..6).map(|_| time_step("interval", 60)).collect();
    let limited = Compiler::with_options(CompileOptions {
        max_steps: 5,
        ..CompileOptions::default()
    });
    match limited.compile(&workout(steps)).unwrap_err() {
        CompileError::Validation(error) => {
            assert_eq!(
                error
                    .violations
                    .iter()
                    .filter(|violation| violation.rule == ValidationRule::TooManySteps)
                    .count(),
                1
            );
        }
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn test_compile_error_serializes_with_kind() {
    let error = compile(&json!({"name": "x", "type": "running", "steps": []})).unwrap_err();
    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value["kind"], "validation");
    assert_eq!(value["violations"][0]["rule"], "empty_steps");
    assert_eq!(value["violations"][0]["step"], "workout");
}

#[test]
fn test_payload_round_trips_through_serde() {
    let raw = workout(vec![
        time_step("warmup", 300),
        repeat(4, vec![distance_step(400.0, "m"), time_step("recovery", 90)]),
    ]);
    let payload = compile(&raw).unwrap();
    let text = serde_json::to_string(&payload).unwrap();
    let parsed: workouts_compiler::WirePayload = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, payload);
}
