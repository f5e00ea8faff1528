//! Weight learning from "was this suggestion helpful" feedback.
//!
//! Helpful feedback nudges the urgency and importance weights up,
//! unhelpful feedback nudges them down to a floor. The step grows with
//! the number of tasks the feedback covers. Effort is never adjusted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::WeightStoreError;
use crate::weights::{WeightStore, Weights};

/// Adjustment per selected task.
pub const FEEDBACK_STEP: f64 = 0.02;
/// Lowest value unhelpful feedback can push a weight to.
pub const WEIGHT_FLOOR: f64 = 0.1;

/// Response of a feedback round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    pub message: String,
    pub weights: Weights,
    pub helpful: bool,
    pub selected: Vec<String>,
}

/// Applies feedback to the learned weights.
#[derive(Clone)]
pub struct FeedbackAdapter {
    store: Arc<dyn WeightStore>,
}

impl FeedbackAdapter {
    pub fn new(store: Arc<dyn WeightStore>) -> Self {
        Self { store }
    }

    /// Adjust and persist the weights, returning the new values.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the update.
    pub fn apply(&self, selected: &[String], helpful: bool) -> Result<Weights, WeightStoreError> {
        let delta = FEEDBACK_STEP * selected.len().max(1) as f64;
        let weights = self.store.update(&mut |w| adjust(w, delta, helpful))?;
        info!(
            selected = selected.len(),
            helpful,
            delta,
            urgency = weights.urgency_weight,
            importance = weights.importance_weight,
            "feedback applied"
        );
        Ok(weights)
    }

    /// [`apply`](Self::apply), wrapped in the outcome record reported to users.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot persist the update.
    pub fn apply_with_outcome(
        &self,
        selected: Vec<String>,
        helpful: bool,
    ) -> Result<FeedbackOutcome, WeightStoreError> {
        let weights = self.apply(&selected, helpful)?;
        Ok(FeedbackOutcome {
            message: "Feedback applied".to_string(),
            weights,
            helpful,
            selected,
        })
    }
}

fn adjust(weights: &mut Weights, delta: f64, helpful: bool) {
    if helpful {
        weights.urgency_weight += delta;
        weights.importance_weight += delta;
    } else {
        weights.urgency_weight = (weights.urgency_weight - delta).max(WEIGHT_FLOOR);
        weights.importance_weight = (weights.importance_weight - delta).max(WEIGHT_FLOOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::MemoryWeightStore;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    #[test]
    fn unhelpful_lowers_urgency_and_importance() {
        let store = Arc::new(MemoryWeightStore::new());
        let adapter = FeedbackAdapter::new(store.clone());
        let w = adapter.apply(&ids(&["1", "2"]), false).unwrap();
        assert_close(w.urgency_weight, 0.96);
        assert_close(w.importance_weight, 0.96);
        assert_eq!(w.effort_weight, 1.0);
        assert_eq!(store.load(), w);
    }

    #[test]
    fn helpful_raises_without_cap() {
        let store = Arc::new(MemoryWeightStore::with_weights(Weights::new(5.0, 5.0, 0.3)));
        let adapter = FeedbackAdapter::new(store);
        let w = adapter.apply(&ids(&["a", "b", "c"]), true).unwrap();
        assert_close(w.urgency_weight, 5.06);
        assert_close(w.importance_weight, 5.06);
        assert_eq!(w.effort_weight, 0.3);
    }

    #[test]
    fn empty_selection_still_moves_one_step() {
        let adapter = FeedbackAdapter::new(Arc::new(MemoryWeightStore::new()));
        let w = adapter.apply(&[], true).unwrap();
        assert_close(w.urgency_weight, 1.02);
    }

    #[test]
    fn repeated_unhelpful_stops_at_floor() {
        let adapter = FeedbackAdapter::new(Arc::new(MemoryWeightStore::new()));
        let selected = ids(&["1", "2", "3", "4", "5"]);
        let mut last = Weights::default();
        for _ in 0..50 {
            last = adapter.apply(&selected, false).unwrap();
            assert!(last.urgency_weight >= WEIGHT_FLOOR);
            assert!(last.importance_weight >= WEIGHT_FLOOR);
        }
        assert_eq!(last.urgency_weight, WEIGHT_FLOOR);
        assert_eq!(last.importance_weight, WEIGHT_FLOOR);
        assert_eq!(last.effort_weight, 1.0);
    }

    #[test]
    fn outcome_echoes_request() {
        let adapter = FeedbackAdapter::new(Arc::new(MemoryWeightStore::new()));
        let outcome = adapter.apply_with_outcome(ids(&["9"]), true).unwrap();
        assert_eq!(outcome.message, "Feedback applied");
        assert!(outcome.helpful);
        assert_eq!(outcome.selected, ids(&["9"]));
        assert_close(outcome.weights.importance_weight, 1.02);
    }
}
