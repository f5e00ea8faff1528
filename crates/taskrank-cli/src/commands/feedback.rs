use std::sync::Arc;

use clap::Args;
use taskrank_core::{Config, FeedbackAdapter};

use super::print_json;

#[derive(Args)]
pub struct FeedbackArgs {
    /// Ids of the suggested tasks the feedback is about (comma-separated or repeated)
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub selected: Vec<String>,
    /// The suggestions were not helpful
    #[arg(long)]
    pub unhelpful: bool,
}

pub fn run(args: FeedbackArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let adapter = FeedbackAdapter::new(Arc::new(config.weight_store()?));
    let outcome = adapter.apply_with_outcome(args.selected, !args.unhelpful)?;
    print_json(&outcome)
}
