//! Subcommands and the input handling they share.

pub mod analyze;
pub mod config;
pub mod feedback;
pub mod graph;
pub mod weights;

use std::error::Error;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use serde_json::json;
use taskrank_core::{
    validate_tasks, BatchOptions, Config, ScoringEngine, Strategy, Task, TaskBatch,
    WeightOverride, WeightStore,
};
use tracing::debug;

/// Read a JSON task batch from `file`, or stdin when absent or `-`.
pub fn read_tasks(file: Option<&Path>) -> Result<(Vec<Task>, BatchOptions), Box<dyn Error>> {
    let content = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let batch: TaskBatch =
        serde_json::from_str(&content).map_err(|e| format!("invalid tasks JSON: {e}"))?;
    let (inputs, options) = batch.into_parts();
    debug!(count = inputs.len(), "read task batch");

    match validate_tasks(&inputs) {
        Ok(tasks) => Ok((tasks, options)),
        Err(e) => {
            let detail = json!({ "detail": "validation_error", "errors": e.errors });
            eprintln!("{}", serde_json::to_string_pretty(&detail)?);
            Err(e.into())
        }
    }
}

/// Arguments shared by commands that score a batch.
#[derive(Args)]
pub struct ScoringArgs {
    /// JSON file with tasks (array or {"tasks": [...], "weights": {...}, "strategy": ...});
    /// stdin when omitted or "-"
    pub file: Option<PathBuf>,
    /// Ranking strategy: fastest, impact, deadline or smart (others rank as smart)
    #[arg(long)]
    pub strategy: Option<String>,
    /// Use this urgency weight instead of the learned one
    #[arg(long)]
    pub urgency_weight: Option<f64>,
    /// Use this importance weight instead of the learned one
    #[arg(long)]
    pub importance_weight: Option<f64>,
    /// Use this effort weight instead of the learned one
    #[arg(long)]
    pub effort_weight: Option<f64>,
    /// Score as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub today: Option<chrono::NaiveDate>,
}

impl ScoringArgs {
    /// Explicit weights from the flags, falling back per field to the
    /// weights sent with the batch.
    pub fn weight_override(
        &self,
        batch: &BatchOptions,
    ) -> Result<Option<WeightOverride>, Box<dyn Error>> {
        let flags = WeightOverride {
            urgency_weight: self.urgency_weight,
            importance_weight: self.importance_weight,
            effort_weight: self.effort_weight,
        };
        let explicit = flags.or(batch.weights.unwrap_or_default());
        for (name, value) in [
            ("urgency_weight", explicit.urgency_weight),
            ("importance_weight", explicit.importance_weight),
            ("effort_weight", explicit.effort_weight),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{name} must be a non-negative number").into());
                }
            }
        }
        Ok((!explicit.is_empty()).then_some(explicit))
    }

    /// The flag's strategy, else the batch's, else the configured default.
    pub fn strategy(&self, config: &Config, batch: &BatchOptions) -> Option<Strategy> {
        self.strategy
            .as_deref()
            .map(Strategy::from_name)
            .or(batch.strategy)
            .or(config.scoring.default_strategy)
    }

    /// Engine wired to the configured calendar and weight store.
    pub fn engine(&self, config: &Config) -> Result<ScoringEngine, Box<dyn Error>> {
        let store: Arc<dyn WeightStore> = Arc::new(config.weight_store()?);
        let engine = ScoringEngine::new(store).with_calendar(config.date_intelligence()?);
        Ok(match self.today {
            Some(today) => engine.with_today(today),
            None => engine,
        })
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
