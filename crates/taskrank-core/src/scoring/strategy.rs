use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::weights::Weights;

/// Multiplier applied to the weight a strategy favours.
pub const STRATEGY_BIAS: f64 = 1.5;

/// Named ranking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Favour quick wins (effort).
    Fastest,
    /// Favour importance.
    Impact,
    /// Favour urgency.
    Deadline,
    /// Learned weights as they are.
    #[default]
    Smart,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Fastest => "fastest",
            Strategy::Impact => "impact",
            Strategy::Deadline => "deadline",
            Strategy::Smart => "smart",
        }
    }

    /// Look up a strategy by name, ignoring case. Names outside the four
    /// known strategies rank like [`Strategy::Smart`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fastest" => Strategy::Fastest,
            "impact" => Strategy::Impact,
            "deadline" => Strategy::Deadline,
            "smart" | "" => Strategy::Smart,
            other => {
                warn!(strategy = other, "unknown strategy, ranking with learned weights");
                Strategy::Smart
            }
        }
    }

    /// Scale the favoured weight by [`STRATEGY_BIAS`].
    pub fn apply(self, mut weights: Weights) -> Weights {
        match self {
            Strategy::Fastest => weights.effort_weight *= STRATEGY_BIAS,
            Strategy::Impact => weights.importance_weight *= STRATEGY_BIAS,
            Strategy::Deadline => weights.urgency_weight *= STRATEGY_BIAS,
            Strategy::Smart => {}
        }
        weights
    }
}

impl FromStr for Strategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
