//! Scoring weights and their persistence.
//!
//! The learned weights are the only mutable state in the engine. They are
//! reached through the [`WeightStore`] trait so callers choose where the
//! record lives ([`FileWeightStore`] in production, [`MemoryWeightStore`]
//! in tests) and every read-modify-write goes through [`WeightStore::update`].

mod file;
mod memory;

pub use file::FileWeightStore;
pub use memory::MemoryWeightStore;

use serde::{Deserialize, Serialize};

use crate::error::WeightStoreError;

/// Value used for any weight nobody has set.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Relative weights of the three sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub urgency_weight: f64,
    pub importance_weight: f64,
    pub effort_weight: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            urgency_weight: DEFAULT_WEIGHT,
            importance_weight: DEFAULT_WEIGHT,
            effort_weight: DEFAULT_WEIGHT,
        }
    }
}

impl Weights {
    pub fn new(urgency_weight: f64, importance_weight: f64, effort_weight: f64) -> Self {
        Self {
            urgency_weight,
            importance_weight,
            effort_weight,
        }
    }

    pub fn sum(&self) -> f64 {
        self.urgency_weight + self.importance_weight + self.effort_weight
    }

    /// Layer caller-supplied values over these weights, field by field.
    pub fn overridden_by(self, explicit: Option<&WeightOverride>) -> Self {
        let Some(explicit) = explicit else {
            return self;
        };
        Self {
            urgency_weight: explicit.urgency_weight.unwrap_or(self.urgency_weight),
            importance_weight: explicit.importance_weight.unwrap_or(self.importance_weight),
            effort_weight: explicit.effort_weight.unwrap_or(self.effort_weight),
        }
    }
}

/// Per-call weight values supplied by the caller. Unset fields fall
/// through to the persisted weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightOverride {
    #[serde(default)]
    pub urgency_weight: Option<f64>,
    #[serde(default)]
    pub importance_weight: Option<f64>,
    #[serde(default)]
    pub effort_weight: Option<f64>,
}

impl WeightOverride {
    pub fn is_empty(&self) -> bool {
        self.urgency_weight.is_none()
            && self.importance_weight.is_none()
            && self.effort_weight.is_none()
    }

    /// Fill the fields left unset here from `fallback`.
    pub fn or(self, fallback: WeightOverride) -> Self {
        Self {
            urgency_weight: self.urgency_weight.or(fallback.urgency_weight),
            importance_weight: self.importance_weight.or(fallback.importance_weight),
            effort_weight: self.effort_weight.or(fallback.effort_weight),
        }
    }
}

impl From<Weights> for WeightOverride {
    fn from(w: Weights) -> Self {
        Self {
            urgency_weight: Some(w.urgency_weight),
            importance_weight: Some(w.importance_weight),
            effort_weight: Some(w.effort_weight),
        }
    }
}

/// Resolve the weights for one scoring call: explicit, then persisted,
/// then [`DEFAULT_WEIGHT`].
pub fn resolve_weights(store: &dyn WeightStore, explicit: Option<&WeightOverride>) -> Weights {
    store.load().overridden_by(explicit)
}

/// Persistent home of the learned weights.
pub trait WeightStore: Send + Sync {
    /// Last saved weights, or defaults when nothing usable is stored.
    fn load(&self) -> Weights;

    /// Replace the stored weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, weights: &Weights) -> Result<(), WeightStoreError>;

    /// Atomically load, modify and save the weights, returning the saved value.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be locked or written.
    fn update(&self, apply: &mut dyn FnMut(&mut Weights)) -> Result<Weights, WeightStoreError>;
}

/// Coerce a JSON value the way a lenient float conversion would:
/// numbers as-is, numeric strings parsed, booleans as 1/0.
pub(crate) fn coerce_weight(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Decode a stored record, defaulting missing keys. `None` when the
/// record is not an object or a present key cannot be coerced.
pub(crate) fn decode_weights(content: &str) -> Option<Weights> {
    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    let obj = value.as_object()?;
    let field = |key: &str| match obj.get(key) {
        None => Some(DEFAULT_WEIGHT),
        Some(v) => coerce_weight(v),
    };
    Some(Weights {
        urgency_weight: field("urgency_weight")?,
        importance_weight: field("importance_weight")?,
        effort_weight: field("effort_weight")?,
    })
}
