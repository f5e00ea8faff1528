//! Task records consumed and produced by the scoring engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A validated task submitted for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Calendar due date, `YYYY-MM-DD` on the wire.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: f64,
    /// 1-10, higher is more important.
    #[serde(default = "default_importance")]
    pub importance: i32,
    /// Ids of tasks that must finish before this one. May name ids
    /// outside the current batch.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

pub(crate) fn default_estimated_hours() -> f64 {
    1.0
}

pub(crate) fn default_importance() -> i32 {
    5
}

impl Task {
    /// Create a task with default estimate, importance and no deadline.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date: None,
            estimated_hours: default_estimated_hours(),
            importance: default_importance(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_importance(mut self, importance: i32) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }
}

/// Eisenhower quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "Do First")]
    DoFirst,
    #[serde(rename = "Schedule")]
    Schedule,
    #[serde(rename = "Delegate")]
    Delegate,
    #[serde(rename = "Eliminate")]
    Eliminate,
}

impl Quadrant {
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Do First",
            Quadrant::Schedule => "Schedule",
            Quadrant::Delegate => "Delegate",
            Quadrant::Eliminate => "Eliminate",
        }
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A task with its computed score, explanation and quadrant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    /// Weighted score rounded to 3 decimals.
    pub score: f64,
    pub reason: String,
    pub matrix: Quadrant,
}

impl ScoredTask {
    pub fn id(&self) -> &str {
        &self.task.id
    }
}
