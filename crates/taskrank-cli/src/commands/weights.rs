use clap::Subcommand;
use serde_json::json;
use taskrank_core::{Config, WeightStore, Weights};

use super::print_json;

#[derive(Subcommand)]
pub enum WeightsAction {
    /// Show the learned weights
    Show,
    /// Set one or more weights
    Set {
        #[arg(long)]
        urgency: Option<f64>,
        #[arg(long)]
        importance: Option<f64>,
        #[arg(long)]
        effort: Option<f64>,
    },
    /// Reset weights to defaults
    Reset,
}

pub fn run(action: WeightsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = config.weight_store()?;

    match action {
        WeightsAction::Show => {
            print_json(&json!({
                "path": store.path(),
                "weights": store.load(),
            }))?;
        }
        WeightsAction::Set {
            urgency,
            importance,
            effort,
        } => {
            for (name, value) in [("urgency", urgency), ("importance", importance), ("effort", effort)] {
                if matches!(value, Some(v) if !v.is_finite() || v < 0.0) {
                    return Err(format!("--{name} must be a non-negative number").into());
                }
            }
            let weights = store.update(&mut |w| {
                if let Some(v) = urgency {
                    w.urgency_weight = v;
                }
                if let Some(v) = importance {
                    w.importance_weight = v;
                }
                if let Some(v) = effort {
                    w.effort_weight = v;
                }
            })?;
            print_json(&weights)?;
        }
        WeightsAction::Reset => {
            store.save(&Weights::default())?;
            println!("weights reset to defaults");
        }
    }
    Ok(())
}
