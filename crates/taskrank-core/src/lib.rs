//! # taskrank Core Library
//!
//! Ranks task batches by computed priority, sorts them into Eisenhower
//! quadrants, flags circular dependencies and learns its weights from
//! feedback. The `taskrank` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Calendar**: weekend/holiday detection and business-day counting
//! - **Weights**: the learned weight triple behind a [`WeightStore`]
//! - **Cycles**: iterative depth-first search over dependency edges
//! - **Scoring**: urgency/importance/effort sub-scores, weighted
//!   aggregation, classification and ranking
//! - **Feedback**: nudges the learned weights from user feedback
//!
//! ## Key Components
//!
//! - [`ScoringEngine`]: scores and ranks a batch
//! - [`FeedbackAdapter`]: applies helpful/unhelpful feedback
//! - [`detect_cycles`]: standalone cycle detection
//! - [`Config`]: holidays, defaults and weight file location

pub mod calendar;
pub mod config;
pub mod cycles;
pub mod error;
pub mod feedback;
pub mod graph;
pub mod input;
pub mod scoring;
pub mod task;
pub mod weights;

pub use calendar::{is_weekend, DateIntelligence, FixedHolidays, HolidayCalendar};
pub use config::{data_dir, Config};
pub use cycles::{detect_cycles, DependencyNode};
pub use error::{
    BatchValidationError, ConfigError, CoreError, Result, TaskValidationError, ValidationError,
    WeightStoreError,
};
pub use feedback::{FeedbackAdapter, FeedbackOutcome};
pub use graph::{DependencyView, GraphEdge, GraphNode};
pub use input::{parse_due_date, validate_tasks, BatchOptions, TaskBatch, TaskInput};
pub use scoring::{
    eisenhower, AnalysisResponse, ScoreReport, ScoringEngine, Strategy, Suggestion, Suggestions,
};
pub use task::{Quadrant, ScoredTask, Task};
pub use weights::{
    resolve_weights, FileWeightStore, MemoryWeightStore, WeightOverride, WeightStore, Weights,
};
