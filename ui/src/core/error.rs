//! Contract violations raised by the scoring engine.
//!
//! Fetch failures are not here: they are expected runtime conditions, carried by
//! `api::FetchError` and turned into an on-screen indicator by the fetch controller.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("unknown mode `{0}` (expected lastedit, creation, revisions or frequency)")]
    UnknownMode(String),
    #[error("percentile {0} is outside 1..=100")]
    InvalidPercentile(u32),
    #[error("cannot aggregate a cluster without members")]
    EmptyCluster,
    #[error("colour {0} was not produced by the current scoring pass")]
    UnknownColor(String),
}
