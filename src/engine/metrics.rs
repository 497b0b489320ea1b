//! Pipeline run metrics.
//!
//! `Pipeline::run` skips all of this; `Pipeline::run_with_metrics` fills it in
//! for verbose reports and for debugging a page that stopped parsing.

use crate::{CandidateToken, ParseOutcome};
use std::time::Duration;

/// Wall-clock time spent in each stage.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    pub total: Duration,
    pub decode: Duration,
    pub sanitize: Duration,
    pub entities: Duration,
    pub extract: Duration,
    pub disambiguate: Duration,
}

/// Pipeline output bundled with what the stages saw.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub outcome: ParseOutcome,
    pub metrics: RunMetrics,
    /// Length in bytes of the normalized text, `None` if decoding failed.
    pub normalized_len: Option<usize>,
    /// Every token of every class, grouped by class in scan order. Collected
    /// even when the outcome is a failure.
    pub candidates: Vec<CandidateToken>,
}
