//! Scoring commands: `analyze` and `suggest`.

use clap::Args;
use taskrank_core::{AnalysisResponse, Config};

use super::{print_json, read_tasks, ScoringArgs};

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub scoring: ScoringArgs,
}

#[derive(Args)]
pub struct SuggestArgs {
    #[command(flatten)]
    pub scoring: ScoringArgs,
    /// Number of suggestions (default from config, normally 3)
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (tasks, options) = read_tasks(args.scoring.file.as_deref())?;
    let engine = args.scoring.engine(&config)?;
    let weights = args.scoring.weight_override(&options)?;
    let strategy = args.scoring.strategy(&config, &options);

    let report = engine.calculate_scores(&tasks, weights.as_ref(), strategy);
    print_json(&AnalysisResponse::from(report))
}

pub fn run_suggest(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let (tasks, options) = read_tasks(args.scoring.file.as_deref())?;
    let engine = args.scoring.engine(&config)?;
    let weights = args.scoring.weight_override(&options)?;
    let strategy = args.scoring.strategy(&config, &options);
    let limit = args.limit.unwrap_or(config.scoring.suggest_limit);

    let suggestions = engine.suggest(&tasks, weights.as_ref(), strategy, limit);
    print_json(&suggestions)
}
