//! Raw task input and its validation.
//!
//! The scoring engine trusts its input; this layer turns loosely typed
//! records into [`Task`]s and rejects a batch if any record is malformed.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{BatchValidationError, TaskValidationError, ValidationError};
use crate::scoring::Strategy;
use crate::task::{default_estimated_hours, default_importance, Task};
use crate::weights::WeightOverride;

/// A task record as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub importance: Option<i64>,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
}

/// A submitted batch: either a bare array or
/// `{"tasks": [...], "weights": {...}, "strategy": "..."}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TaskBatch {
    Bare(Vec<TaskInput>),
    Wrapped {
        tasks: Vec<TaskInput>,
        #[serde(default)]
        weights: Option<WeightOverride>,
        #[serde(default)]
        strategy: Option<String>,
    },
}

/// Scoring options carried alongside the tasks of a wrapped batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchOptions {
    pub weights: Option<WeightOverride>,
    pub strategy: Option<Strategy>,
}

impl TaskBatch {
    pub fn into_parts(self) -> (Vec<TaskInput>, BatchOptions) {
        match self {
            TaskBatch::Bare(tasks) => (tasks, BatchOptions::default()),
            TaskBatch::Wrapped {
                tasks,
                weights,
                strategy,
            } => {
                let options = BatchOptions {
                    weights: weights.filter(|w| !w.is_empty()),
                    strategy: strategy.as_deref().map(Strategy::from_name),
                };
                (tasks, options)
            }
        }
    }

    pub fn into_inputs(self) -> Vec<TaskInput> {
        self.into_parts().0
    }
}

/// Parse a calendar date from `YYYY-MM-DD`, an RFC 3339 timestamp or a
/// naive `YYYY-MM-DDTHH:MM:SS` timestamp. Blank input is `None`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidValue`] for anything else.
pub fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.date_naive()));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(Some(ts.date()));
        }
    }
    Err(ValidationError::InvalidValue {
        field: "due_date".to_string(),
        message: "Invalid due_date format. Use YYYY-MM-DD.".to_string(),
    })
}

impl TaskInput {
    /// Validate one record. `index` is its position in the batch and
    /// supplies the id when none was given.
    ///
    /// # Errors
    ///
    /// Returns every field-level problem found.
    pub fn validate(&self, index: usize) -> Result<Task, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(ValidationError::MissingField("title".to_string()));
        }

        let due_date = parse_due_date(self.due_date.as_deref()).unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        let importance = match self.importance {
            None => default_importance(),
            Some(v) if (1..=10).contains(&v) => v as i32,
            Some(_) => {
                errors.push(ValidationError::InvalidValue {
                    field: "importance".to_string(),
                    message: "importance must be 1-10".to_string(),
                });
                default_importance()
            }
        };

        let estimated_hours = match self.estimated_hours {
            None => default_estimated_hours(),
            Some(v) if v.is_finite() && v > 0.0 => v,
            Some(_) => {
                errors.push(ValidationError::InvalidValue {
                    field: "estimated_hours".to_string(),
                    message: "estimated_hours must be positive".to_string(),
                });
                default_estimated_hours()
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let id = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| (index + 1).to_string());

        Ok(Task {
            id,
            title: title.to_string(),
            due_date,
            estimated_hours,
            importance,
            dependencies: self.dependencies.clone().unwrap_or_default(),
        })
    }
}

/// Validate a whole batch; any failure rejects it.
///
/// # Errors
///
/// Returns a [`BatchValidationError`] listing each failing record by index.
pub fn validate_tasks(inputs: &[TaskInput]) -> Result<Vec<Task>, BatchValidationError> {
    let mut tasks = Vec::with_capacity(inputs.len());
    let mut failures = Vec::new();
    for (index, input) in inputs.iter().enumerate() {
        match input.validate(index) {
            Ok(task) => tasks.push(task),
            Err(errors) => failures.push(TaskValidationError {
                index,
                errors: errors.iter().map(ToString::to_string).collect(),
            }),
        }
    }
    if failures.is_empty() {
        Ok(tasks)
    } else {
        Err(BatchValidationError { errors: failures })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_are_filled() {
        let task = input("Write").validate(0).unwrap();
        assert_eq!(task.id, "1");
        assert_eq!(task.importance, 5);
        assert_eq!(task.estimated_hours, 1.0);
        assert_eq!(task.due_date, None);
        assert!(task.dependencies.is_empty());
    }

    #[test]
    fn due_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 11, 3);
        assert_eq!(parse_due_date(Some("2026-11-03")).unwrap(), expected);
        assert_eq!(parse_due_date(Some("2026-11-03T17:30:00Z")).unwrap(), expected);
        assert_eq!(parse_due_date(Some("2026-11-03T09:00:00")).unwrap(), expected);
        assert_eq!(parse_due_date(Some("  ")).unwrap(), None);
        assert_eq!(parse_due_date(None).unwrap(), None);
        assert!(parse_due_date(Some("next tuesday")).is_err());
        assert!(parse_due_date(Some("2026-13-01")).is_err());
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let bad = TaskInput {
            importance: Some(11),
            estimated_hours: Some(0.0),
            due_date: Some("soon".into()),
            ..input("x")
        };
        let errors = bad.validate(0).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn blank_title_is_rejected() {
        let errors = input("   ").validate(0).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingField("title".into())]);
    }

    #[test]
    fn batch_reports_failing_indices() {
        let inputs = vec![input("ok"), input(""), TaskInput { importance: Some(0), ..input("y") }];
        let err = validate_tasks(&inputs).unwrap_err();
        let indices: Vec<_> = err.errors.iter().map(|e| e.index).collect();
        assert_eq!(indices, [1, 2]);
        assert!(err.errors[1].errors[0].contains("importance must be 1-10"));
    }

    #[test]
    fn batch_accepts_bare_or_wrapped_json() {
        let bare: TaskBatch = serde_json::from_str(r#"[{"title": "a"}]"#).unwrap();
        let wrapped: TaskBatch = serde_json::from_str(r#"{"tasks": [{"title": "a"}, {"title": "b"}]}"#).unwrap();
        assert_eq!(bare.into_inputs().len(), 1);
        assert_eq!(wrapped.into_inputs().len(), 2);
    }

    #[test]
    fn wrapped_batch_carries_weights_and_strategy() {
        let batch: TaskBatch = serde_json::from_str(
            r#"{"tasks": [{"title": "a"}], "weights": {"urgency_weight": 2.0}, "strategy": "Impact"}"#,
        )
        .unwrap();
        let (inputs, options) = batch.into_parts();
        assert_eq!(inputs.len(), 1);
        assert_eq!(options.strategy, Some(Strategy::Impact));
        let weights = options.weights.unwrap();
        assert_eq!(weights.urgency_weight, Some(2.0));
        assert_eq!(weights.importance_weight, None);
    }

    #[test]
    fn wrapped_batch_options_are_optional() {
        let batch: TaskBatch =
            serde_json::from_str(r#"{"tasks": [], "weights": {}, "strategy": "whatever"}"#).unwrap();
        let (_, options) = batch.into_parts();
        assert_eq!(options.weights, None);
        assert_eq!(options.strategy, Some(Strategy::Smart));

        let bare: TaskBatch = serde_json::from_str("[]").unwrap();
        assert_eq!(bare.into_parts().1, BatchOptions::default());
    }

    #[test]
    fn explicit_ids_and_dependencies_survive() {
        let task = TaskInput {
            id: Some("T-9".into()),
            dependencies: Some(vec!["T-1".into()]),
            importance: Some(10),
            estimated_hours: Some(2.5),
            ..input("Ship")
        }
        .validate(4)
        .unwrap();
        assert_eq!(task.id, "T-9");
        assert_eq!(task.dependencies, ["T-1"]);
        assert_eq!(task.importance, 10);
        assert_eq!(task.estimated_hours, 2.5);
    }
}
