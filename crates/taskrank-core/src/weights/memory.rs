use std::sync::Mutex;

use super::{WeightStore, Weights};
use crate::error::WeightStoreError;

/// In-process weight store.
#[derive(Debug, Default)]
pub struct MemoryWeightStore {
    weights: Mutex<Option<Weights>>,
}

impl MemoryWeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `weights`.
    pub fn with_weights(weights: Weights) -> Self {
        Self {
            weights: Mutex::new(Some(weights)),
        }
    }
}

impl WeightStore for MemoryWeightStore {
    fn load(&self) -> Weights {
        let guard = self.weights.lock().unwrap_or_else(|e| e.into_inner());
        (*guard).unwrap_or_default()
    }

    fn save(&self, weights: &Weights) -> Result<(), WeightStoreError> {
        let mut guard = self.weights.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(*weights);
        Ok(())
    }

    fn update(&self, apply: &mut dyn FnMut(&mut Weights)) -> Result<Weights, WeightStoreError> {
        let mut guard = self.weights.lock().unwrap_or_else(|e| e.into_inner());
        let mut weights = (*guard).unwrap_or_default();
        apply(&mut weights);
        *guard = Some(weights);
        Ok(weights)
    }
}
