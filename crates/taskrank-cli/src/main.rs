use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "taskrank", version, about = "Rank tasks by urgency, importance and effort")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score, classify and rank a batch of tasks
    Analyze(commands::analyze::AnalyzeArgs),
    /// Show the top-ranked tasks with explanations
    Suggest(commands::analyze::SuggestArgs),
    /// Report circular dependencies in a batch
    Cycles(commands::graph::GraphArgs),
    /// Print the dependency graph as nodes and edges
    Graph(commands::graph::GraphArgs),
    /// Tell the ranker whether its suggestions helped
    Feedback(commands::feedback::FeedbackArgs),
    /// Inspect or change the learned weights
    Weights {
        #[command(subcommand)]
        action: commands::weights::WeightsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Suggest(args) => commands::analyze::run_suggest(args),
        Commands::Cycles(args) => commands::graph::run_cycles(args),
        Commands::Graph(args) => commands::graph::run_graph(args),
        Commands::Feedback(args) => commands::feedback::run(args),
        Commands::Weights { action } => commands::weights::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
