// ABOUTME: Schema validation of externally authored workout descriptions
// ABOUTME: Turns loosely typed JSON into a typed description, aggregating every violation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Garmin Workouts MCP Contributors

//! # Schema Validator
//!
//! The single trust boundary of the compiler. Input comes from an LLM or a
//! human and may be malformed anywhere, so the validator walks the whole tree
//! and reports every violation instead of stopping at the first one. Later
//! stages rely on the typed [`WorkoutDescription`] and do no re-checking.

use serde_json::{Map, Value};

use crate::description::{
    DistanceUnit, EndCondition, LeafStep, RepeatStep, SportKind, StepDescription, StepKind,
    StepPath, TargetDescription, TargetKind, TargetValue, WorkoutDescription,
};
use crate::error::{ValidationError, ValidationRule, Violation};
use crate::CompileOptions;

const REPEAT_STEP_TYPE: &str = "repeat";

/// Validate a raw description against the accepted vocabulary.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every violation found in the tree.
pub fn validate(
    raw: &Value,
    options: &CompileOptions,
) -> Result<WorkoutDescription, ValidationError> {
    let mut validator = Validator::new(options);
    let description = validator.workout(raw);

    match description {
        Some(description) if validator.violations.is_empty() => Ok(description),
        _ => {
            if validator.violations.is_empty() {
                validator.report(
                    &StepPath::root(),
                    "",
                    ValidationRule::InvalidType,
                    "workout description could not be read",
                );
            }
            Err(ValidationError {
                violations: validator.violations,
            })
        }
    }
}

struct Validator<'a> {
    options: &'a CompileOptions,
    violations: Vec<Violation>,
    step_count: usize,
}

impl<'a> Validator<'a> {
    const fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            violations: Vec::new(),
            step_count: 0,
        }
    }

    fn report(
        &mut self,
        step: &StepPath,
        field: &str,
        rule: ValidationRule,
        message: impl Into<String>,
    ) {
        self.violations.push(Violation {
            step: step.clone(),
            field: field.to_owned(),
            rule,
            message: message.into(),
        });
    }

    fn workout(&mut self, raw: &Value) -> Option<WorkoutDescription> {
        let root = StepPath::root();
        let Some(object) = raw.as_object() else {
            self.report(
                &root,
                "",
                ValidationRule::InvalidType,
                "workout description must be a JSON object",
            );
            return None;
        };

        let name = self.workout_name(object, &root);
        let description = self.optional_str(object, &root, "description");
        let sport = self.sport(object, &root);
        let steps = self.step_list(object, &root, "steps");

        Some(WorkoutDescription {
            name: name?,
            description: description?,
            sport: sport?,
            steps: steps?,
        })
    }

    fn workout_name(&mut self, object: &Map<String, Value>, root: &StepPath) -> Option<String> {
        let name = self.required_str(object, root, "name")?;
        if name.trim().is_empty() {
            self.report(root, "name", ValidationRule::EmptyName, "name must not be blank");
            return None;
        }
        Some(name.to_owned())
    }

    fn sport(&mut self, object: &Map<String, Value>, root: &StepPath) -> Option<SportKind> {
        let raw = self.required_str(object, root, "type")?;
        let sport = SportKind::parse(raw);
        if sport.is_none() {
            let accepted: Vec<&str> = SportKind::ALL.iter().map(SportKind::as_str).collect();
            self.report(
                root,
                "type",
                ValidationRule::UnknownSport,
                format!("unknown sport '{raw}', expected one of {}", accepted.join(", ")),
            );
        }
        sport
    }

    /// Validate a required, non-empty `steps` array owned by `parent`.
    fn step_list(
        &mut self,
        object: &Map<String, Value>,
        parent: &StepPath,
        field: &str,
    ) -> Option<Vec<StepDescription>> {
        let items = match present(object, field) {
            None => {
                self.report(
                    parent,
                    field,
                    ValidationRule::MissingField,
                    "steps are required",
                );
                return None;
            }
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.report(
                    parent,
                    field,
                    ValidationRule::InvalidType,
                    "steps must be an array",
                );
                return None;
            }
        };

        if items.is_empty() {
            let rule = if parent.depth() == 0 {
                ValidationRule::EmptySteps
            } else {
                ValidationRule::EmptyRepeat
            };
            self.report(parent, field, rule, "at least one step is required");
            return None;
        }

        let mut steps = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            match self.step(item, parent.child(index)) {
                Some(step) => steps.push(step),
                None => complete = false,
            }
        }
        complete.then_some(steps)
    }

    fn step(&mut self, raw: &Value, path: StepPath) -> Option<StepDescription> {
        if path.depth() > self.options.max_depth {
            self.report(
                &path,
                "",
                ValidationRule::DepthExceeded,
                format!(
                    "repeat nesting exceeds the maximum depth of {}",
                    self.options.max_depth
                ),
            );
            return None;
        }

        // Reported once, on the first step past the ceiling
        self.step_count += 1;
        if self.step_count - 1 == self.options.max_steps {
            self.report(
                &path,
                "",
                ValidationRule::TooManySteps,
                format!(
                    "workout has more than {} steps",
                    self.options.max_steps
                ),
            );
        }

        let Some(object) = raw.as_object() else {
            self.report(
                &path,
                "",
                ValidationRule::InvalidType,
                "step must be a JSON object",
            );
            return None;
        };

        let name = self.optional_str(object, &path, "stepName");
        let description = self.optional_str(object, &path, "stepDescription");
        let step_type = self.required_str(object, &path, "stepType")?;

        if step_type == REPEAT_STEP_TYPE {
            let iterations = self.iterations(object, &path);
            let steps = self.step_list(object, &path, "steps");
            return Some(StepDescription::Repeat(RepeatStep {
                path,
                name: name?,
                description: description?,
                iterations: iterations?,
                steps: steps?,
            }));
        }

        let Some(kind) = StepKind::parse(step_type) else {
            let mut accepted: Vec<&str> = StepKind::ALL.iter().map(StepKind::as_str).collect();
            accepted.push(REPEAT_STEP_TYPE);
            self.report(
                &path,
                "stepType",
                ValidationRule::UnknownStepType,
                format!(
                    "unknown step type '{step_type}', expected one of {}",
                    accepted.join(", ")
                ),
            );
            return None;
        };

        let end_condition = self.end_condition(object, &path);
        let target = self.target(object, &path);
        let childless = self.no_children(object, &path);

        Some(StepDescription::Leaf(LeafStep {
            path,
            name: name?,
            description: description?,
            kind,
            end_condition: end_condition?,
            target: target?,
        }))
        .filter(|_| childless)
    }

    fn iterations(&mut self, object: &Map<String, Value>, path: &StepPath) -> Option<u32> {
        let Some(raw) = present(object, "numberOfIterations") else {
            self.report(
                path,
                "numberOfIterations",
                ValidationRule::MissingField,
                "repeat steps require numberOfIterations",
            );
            return None;
        };

        let iterations = whole_number(raw).and_then(|count| u32::try_from(count).ok());
        match iterations {
            Some(count) if count >= 1 => Some(count),
            _ => {
                self.report(
                    path,
                    "numberOfIterations",
                    ValidationRule::InvalidIterations,
                    format!("numberOfIterations must be an integer of at least 1, got {raw}"),
                );
                None
            }
        }
    }

    fn end_condition(&mut self, object: &Map<String, Value>, path: &StepPath) -> Option<EndCondition> {
        let condition = self.required_str(object, path, "endConditionType")?;
        match condition {
            "time" => {
                self.absent_for(object, path, "stepDistance", "time");
                let seconds = self.positive_number(object, path, "stepDuration")?;
                Some(EndCondition::Time { seconds })
            }
            "distance" => {
                self.absent_for(object, path, "stepDuration", "distance");
                let value = self.positive_number(object, path, "stepDistance");
                let unit = self.distance_unit(object, path);
                Some(EndCondition::Distance {
                    value: value?,
                    unit: unit?,
                })
            }
            other => {
                self.report(
                    path,
                    "endConditionType",
                    ValidationRule::UnknownEndCondition,
                    format!("unknown end condition '{other}', expected time or distance"),
                );
                None
            }
        }
    }

    fn absent_for(&mut self, object: &Map<String, Value>, path: &StepPath, field: &str, condition: &str) {
        if present(object, field).is_some() {
            self.report(
                path,
                field,
                ValidationRule::EndConditionMismatch,
                format!("{field} must not be set when endConditionType is {condition}"),
            );
        }
    }

    fn distance_unit(&mut self, object: &Map<String, Value>, path: &StepPath) -> Option<DistanceUnit> {
        let raw = self.required_str(object, path, "distanceUnit")?;
        let unit = DistanceUnit::parse(raw);
        if unit.is_none() {
            self.report(
                path,
                "distanceUnit",
                ValidationRule::UnknownDistanceUnit,
                format!("unknown distance unit '{raw}', expected m, km or mile"),
            );
        }
        unit
    }

    fn no_children(&mut self, object: &Map<String, Value>, path: &StepPath) -> bool {
        match present(object, "steps") {
            None => true,
            Some(Value::Array(items)) if items.is_empty() => true,
            Some(_) => {
                self.report(
                    path,
                    "steps",
                    ValidationRule::UnexpectedChildren,
                    "only repeat steps may contain steps",
                );
                false
            }
        }
    }

    fn target(&mut self, object: &Map<String, Value>, path: &StepPath) -> Option<TargetDescription> {
        let target = match present(object, "target") {
            None => return Some(TargetDescription::none()),
            Some(Value::Object(target)) => target,
            Some(_) => {
                self.report(
                    path,
                    "target",
                    ValidationRule::InvalidType,
                    "target must be a JSON object",
                );
                return None;
            }
        };

        let kind = match present(target, "type") {
            None => {
                self.report(
                    path,
                    "target.type",
                    ValidationRule::MissingField,
                    "target.type is required",
                );
                None
            }
            Some(Value::String(raw)) => {
                let kind = TargetKind::parse(raw);
                if kind.is_none() {
                    let accepted: Vec<&str> =
                        TargetKind::ALL.iter().map(TargetKind::as_str).collect();
                    self.report(
                        path,
                        "target.type",
                        ValidationRule::UnknownTargetType,
                        format!(
                            "unknown target type '{raw}', expected one of {}",
                            accepted.join(", ")
                        ),
                    );
                }
                kind
            }
            Some(_) => {
                self.report(
                    path,
                    "target.type",
                    ValidationRule::InvalidType,
                    "target.type must be a string",
                );
                None
            }
        };

        let value = self.target_value(target, path);
        let unit = match present(target, "unit") {
            None => Some(None),
            Some(Value::String(unit)) => Some(Some(unit.clone())),
            Some(_) => {
                self.report(
                    path,
                    "target.unit",
                    ValidationRule::InvalidType,
                    "target.unit must be a string or null",
                );
                None
            }
        };

        let (kind, value, unit) = (kind?, value?, unit?);
        let is_open = kind == TargetKind::NoTarget;
        if is_open && (value.is_some() || unit.is_some()) {
            self.report(
                path,
                "target",
                ValidationRule::TargetNullability,
                "a 'no target' target must have null value and unit",
            );
            return None;
        }
        // A zoned target missing its value or unit is left to the target resolver
        Some(TargetDescription { kind, value, unit })
    }

    /// `Some(None)` for an absent value, `None` after reporting a malformed one.
    fn target_value(&mut self, target: &Map<String, Value>, path: &StepPath) -> Option<Option<TargetValue>> {
        let parsed = match present(target, "value") {
            None => return Some(None),
            Some(Value::Number(number)) => number.as_f64().map(TargetValue::Single),
            Some(Value::Array(pair)) => match pair.as_slice() {
                [min, max] => min
                    .as_f64()
                    .zip(max.as_f64())
                    .map(|(min, max)| TargetValue::Range { min, max }),
                _ => None,
            },
            Some(_) => None,
        };

        if parsed.is_none() {
            self.report(
                path,
                "target.value",
                ValidationRule::InvalidTargetValue,
                "target.value must be a number or a [min, max] pair of numbers",
            );
            return None;
        }
        Some(parsed)
    }

    fn required_str<'v>(
        &mut self,
        object: &'v Map<String, Value>,
        path: &StepPath,
        field: &str,
    ) -> Option<&'v str> {
        match present(object, field) {
            None => {
                self.report(
                    path,
                    field,
                    ValidationRule::MissingField,
                    format!("{field} is required"),
                );
                None
            }
            Some(Value::String(value)) => Some(value.as_str()),
            Some(_) => {
                self.report(
                    path,
                    field,
                    ValidationRule::InvalidType,
                    format!("{field} must be a string"),
                );
                None
            }
        }
    }

    /// `Some(None)` when absent, `None` after reporting a non-string value.
    fn optional_str(
        &mut self,
        object: &Map<String, Value>,
        path: &StepPath,
        field: &str,
    ) -> Option<Option<String>> {
        match present(object, field) {
            None => Some(None),
            Some(Value::String(value)) => Some(Some(value.clone())),
            Some(_) => {
                self.report(
                    path,
                    field,
                    ValidationRule::InvalidType,
                    format!("{field} must be a string"),
                );
                None
            }
        }
    }

    fn positive_number(&mut self, object: &Map<String, Value>, path: &StepPath, field: &str) -> Option<f64> {
        match present(object, field) {
            None => {
                self.report(
                    path,
                    field,
                    ValidationRule::MissingField,
                    format!("{field} is required for this end condition"),
                );
                None
            }
            Some(Value::Number(number)) => match number.as_f64() {
                Some(value) if value > 0.0 => Some(value),
                _ => {
                    self.report(
                        path,
                        field,
                        ValidationRule::NonPositiveQuantity,
                        format!("{field} must be greater than zero"),
                    );
                    None
                }
            },
            Some(_) => {
                self.report(
                    path,
                    field,
                    ValidationRule::InvalidType,
                    format!("{field} must be a number"),
                );
                None
            }
        }
    }
}

/// Field value, treating JSON `null` as absent
fn present<'v>(object: &'v Map<String, Value>, field: &str) -> Option<&'v Value> {
    object.get(field).filter(|value| !value.is_null())
}

/// Integer value of `raw`, accepting integral floats such as `3.0`
fn whole_number(raw: &Value) -> Option<u64> {
    raw.as_u64().or_else(|| {
        raw.as_f64()
            .filter(|value| value.fract() == 0.0 && *value >= 0.0 && *value <= f64::from(u32::MAX))
            .map(|value| value as u64)
    })
}
