use serde::Serialize;

use super::ScoreReport;

/// Warning attached to analyses whose batch contains cycles.
pub const CYCLE_WARNING: &str = "circular_dependencies_detected";

/// What an analysis reports to its caller: the bare report, or the
/// report wrapped with a warning when dependencies are circular.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Clean(ScoreReport),
    Circular {
        warning: &'static str,
        cycles: Vec<Vec<String>>,
        result: ScoreReport,
    },
}

impl From<ScoreReport> for AnalysisResponse {
    fn from(report: ScoreReport) -> Self {
        if report.has_cycles() {
            AnalysisResponse::Circular {
                warning: CYCLE_WARNING,
                cycles: report.cycles.clone(),
                result: report,
            }
        } else {
            AnalysisResponse::Clean(report)
        }
    }
}

impl AnalysisResponse {
    pub fn report(&self) -> &ScoreReport {
        match self {
            AnalysisResponse::Clean(report) => report,
            AnalysisResponse::Circular { result, .. } => result,
        }
    }
}
