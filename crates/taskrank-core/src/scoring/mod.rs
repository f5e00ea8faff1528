//! Task priority scoring.
//!
//! Each task gets three sub-scores in `[0, 1]`:
//! - **urgency**: business days until the due date, loaded for weekend
//!   and holiday deadlines; overdue tasks are fully urgent
//! - **importance**: the 1-10 importance scaled down
//! - **effort**: quick-win bias, shorter estimates score higher
//!
//! The final score is their weighted mean, rounded to 3 decimals. The
//! Eisenhower quadrant is derived from importance and urgency alone.

mod response;
mod strategy;

pub use response::{AnalysisResponse, CYCLE_WARNING};
pub use strategy::{Strategy, STRATEGY_BIAS};

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calendar::DateIntelligence;
use crate::cycles::detect_cycles;
use crate::task::{Quadrant, ScoredTask, Task};
use crate::weights::{resolve_weights, WeightOverride, WeightStore, Weights};

/// Urgency for a task with no due date.
pub const NO_DEADLINE_URGENCY: f64 = 0.2;
/// Business days out at which base urgency reaches zero.
pub const URGENCY_HORIZON_DAYS: f64 = 10.0;
/// Added when the due date falls on a weekend.
pub const WEEKEND_BOOST: f64 = 0.1;
/// Added when the due date is a holiday.
pub const HOLIDAY_BOOST: f64 = 0.15;
/// Estimates at or above this many hours get no quick-win credit.
pub const EFFORT_CAP_HOURS: f64 = 12.0;
/// Importance at or above this is "important".
pub const IMPORTANT_THRESHOLD: i32 = 6;
/// Urgency at or above this is "urgent".
pub const URGENT_THRESHOLD: f64 = 0.6;
/// Number of suggestions returned when the caller does not say.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Scored batch, highest score first, plus any dependency cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub tasks: Vec<ScoredTask>,
    pub cycles: Vec<Vec<String>>,
}

impl ScoreReport {
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }
}

/// A top-ranked task with its explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub score: f64,
    pub explanation: String,
}

impl From<&ScoredTask> for Suggestion {
    fn from(t: &ScoredTask) -> Self {
        Self {
            id: t.task.id.clone(),
            title: t.task.title.clone(),
            score: t.score,
            explanation: t.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggestions: Vec<Suggestion>,
    pub cycles: Vec<Vec<String>>,
}

/// Scores, classifies and ranks task batches.
#[derive(Clone)]
pub struct ScoringEngine {
    store: Arc<dyn WeightStore>,
    calendar: DateIntelligence,
    today: Option<NaiveDate>,
}

impl ScoringEngine {
    /// Engine reading learned weights from `store`, with a weekend-only
    /// calendar and the local date as "today".
    pub fn new(store: Arc<dyn WeightStore>) -> Self {
        Self {
            store,
            calendar: DateIntelligence::default(),
            today: None,
        }
    }

    pub fn with_calendar(mut self, calendar: DateIntelligence) -> Self {
        self.calendar = calendar;
        self
    }

    /// Pin "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn calendar(&self) -> &DateIntelligence {
        &self.calendar
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Weights for one call: explicit over learned over defaults, then
    /// the strategy bias.
    pub fn effective_weights(
        &self,
        explicit: Option<&WeightOverride>,
        strategy: Option<Strategy>,
    ) -> Weights {
        let resolved = resolve_weights(self.store.as_ref(), explicit);
        strategy.unwrap_or_default().apply(resolved)
    }

    /// Deadline pressure in `[0, 1]`.
    pub fn urgency(&self, due_date: Option<NaiveDate>, today: NaiveDate) -> f64 {
        let Some(due) = due_date else {
            return NO_DEADLINE_URGENCY;
        };
        if due < today {
            return 1.0;
        }

        let days_left = f64::from(self.calendar.business_days_between(today, due));
        let mut urgency = (1.0 - days_left / URGENCY_HORIZON_DAYS).clamp(0.0, 1.0);
        if self.calendar.is_weekend(due) {
            urgency += WEEKEND_BOOST;
        }
        if self.calendar.is_holiday(due) {
            urgency += HOLIDAY_BOOST;
        }
        urgency.clamp(0.0, 1.0)
    }

    /// Score one task against already-resolved weights.
    pub fn score_task(&self, task: &Task, weights: &Weights, today: NaiveDate) -> ScoredTask {
        let urgency = self.urgency(task.due_date, today);
        let importance = importance_score(task.importance);
        let effort = effort_score(task.estimated_hours);

        let raw = weights.urgency_weight * urgency
            + weights.importance_weight * importance
            + weights.effort_weight * effort;
        let total = weights.sum();
        let denom = if total > 0.0 { total } else { 1.0 };
        let score = round_to(raw / denom, 3);

        let matrix = eisenhower(task.importance, urgency);
        let reason = explain(task, urgency, effort, matrix);

        ScoredTask {
            task: task.clone(),
            score,
            reason,
            matrix,
        }
    }

    /// Score, classify and rank `tasks`, and report dependency cycles.
    pub fn calculate_scores(
        &self,
        tasks: &[Task],
        weights: Option<&WeightOverride>,
        strategy: Option<Strategy>,
    ) -> ScoreReport {
        let weights = self.effective_weights(weights, strategy);
        let today = self.today();
        debug!(
            tasks = tasks.len(),
            %today,
            strategy = %strategy.unwrap_or_default(),
            ?weights,
            "scoring batch"
        );

        let mut scored: Vec<ScoredTask> = tasks
            .iter()
            .map(|task| self.score_task(task, &weights, today))
            .collect();
        let cycles = detect_cycles(&scored);
        rank(&mut scored);

        if !cycles.is_empty() {
            debug!(count = cycles.len(), "dependency cycles detected");
        }

        ScoreReport {
            tasks: scored,
            cycles,
        }
    }

    /// The `limit` best tasks with explanations.
    pub fn suggest(
        &self,
        tasks: &[Task],
        weights: Option<&WeightOverride>,
        strategy: Option<Strategy>,
        limit: usize,
    ) -> Suggestions {
        let report = self.calculate_scores(tasks, weights, strategy);
        Suggestions {
            suggestions: report.tasks.iter().take(limit).map(Suggestion::from).collect(),
            cycles: report.cycles,
        }
    }
}

impl std::fmt::Debug for ScoringEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringEngine")
            .field("calendar", &self.calendar)
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

/// Importance 1-10 scaled to `[0.1, 1]`; out-of-range values are clamped.
pub fn importance_score(importance: i32) -> f64 {
    f64::from(importance.clamp(1, 10)) / 10.0
}

/// Quick-win score: 1 for a zero-hour task, 0 at [`EFFORT_CAP_HOURS`] and beyond.
pub fn effort_score(estimated_hours: f64) -> f64 {
    1.0 - estimated_hours.min(EFFORT_CAP_HOURS) / EFFORT_CAP_HOURS
}

/// Eisenhower quadrant from raw importance and urgency.
pub fn eisenhower(importance: i32, urgency: f64) -> Quadrant {
    let important = importance >= IMPORTANT_THRESHOLD;
    let urgent = urgency >= URGENT_THRESHOLD;
    match (important, urgent) {
        (true, true) => Quadrant::DoFirst,
        (true, false) => Quadrant::Schedule,
        (false, true) => Quadrant::Delegate,
        (false, false) => Quadrant::Eliminate,
    }
}

/// Round to `places` decimals, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

fn explain(task: &Task, urgency: f64, effort: f64, matrix: Quadrant) -> String {
    let mut parts = vec![
        format!("Urgency: {:?}", round_to(urgency, 2)),
        format!("Importance: {}", task.importance),
        format!(
            "Effort: {:?}h (quick-win={:?})",
            task.estimated_hours,
            round_to(effort, 2)
        ),
        format!("Matrix: {matrix}"),
    ];
    if !task.dependencies.is_empty() {
        parts.push(format!("Depends on: {}", task.dependencies.join(", ")));
    }
    parts.join(" | ")
}

/// Highest score first; equal scores keep their input order.
pub(crate) fn rank(scored: &mut [ScoredTask]) {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
}
