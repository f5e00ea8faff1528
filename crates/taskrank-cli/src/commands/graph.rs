//! Dependency structure commands: `graph` and `cycles`.

use std::path::PathBuf;

use clap::Args;
use serde_json::json;
use taskrank_core::{detect_cycles, DependencyView};

use super::{print_json, read_tasks};

#[derive(Args)]
pub struct GraphArgs {
    /// JSON file with tasks (array or {"tasks": [...]}); stdin when omitted or "-"
    pub file: Option<PathBuf>,
}

pub fn run_graph(args: GraphArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (tasks, _) = read_tasks(args.file.as_deref())?;
    print_json(&DependencyView::from_tasks(&tasks))
}

pub fn run_cycles(args: GraphArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (tasks, _) = read_tasks(args.file.as_deref())?;
    let cycles = detect_cycles(&tasks);
    print_json(&json!({ "cycles": cycles }))
}
