use tracing::{Level, Span};

use super::RunId;

/// Create the root span for one analysis run.
pub fn run_span(run_id: &RunId, bars: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "analysis_run",
        run_id = %run_id,
        bars
    )
}

/// Create a span for a join step that consumes several runs
/// (e.g. the fractality comparison of two timeframes).
pub fn stage_span(stage: &'static str) -> Span {
    tracing::span!(Level::DEBUG, "stage", stage)
}
