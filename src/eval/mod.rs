//! Evaluation of pre-computed RoSE claims with the factuality pipeline.
//!
//! This module provides:
//! - the sequential driver that scores every claim set of a subset
//! - result records and per-claim-set summaries

pub mod results;
pub mod runner;

pub use results::{ClaimSetSummary, EvaluationResults, RecordResult};
pub use runner::{EvalOptions, RoseEvaluation};
