//! RoSE / FENICE evaluation harness.
//!
//! Scores the factuality of RoSE benchmark summaries with a FENICE-style
//! pipeline, feeding it pre-computed claims instead of extracting them.
//!
//! # Overview
//!
//! 1. [`dataset::load_rose_dataset`] reads the benchmark (subset name to
//!    records) and [`dataset::merge_claim_sets`] flattens a record's
//!    reference claims and per-model system claims into named claim sets.
//! 2. For every claim set a [`claims::FixedClaimsProvider`] is keyed by
//!    [`claims::summary_id`] and plugged into a
//!    [`pipeline::FactualityPipeline`].
//! 3. The pipeline aligns each claim against the source document through
//!    a [`align::ClaimAligner`] and reports the mean alignment score.
//!
//! # Quick Start
//!
//! ```no_run
//! use rose_fenice_eval::{
//!     align::LlmAligner,
//!     config::Config,
//!     dataset::load_rose_dataset,
//!     device::select_device,
//!     eval::{EvalOptions, RoseEvaluation},
//!     llm::LlmClient,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     config.validate()?;
//!
//!     let device = select_device(config.eval.device.as_deref())?;
//!     let dataset = load_rose_dataset(&config.eval.dataset_path)?;
//!
//!     let aligner = Arc::new(LlmAligner::new(LlmClient::new(config.llm.clone())));
//!     let evaluation = RoseEvaluation::new(aligner, device, EvalOptions::default());
//!     let results = evaluation.run(&dataset, &config.eval.subset).await?;
//!
//!     results.print_summary();
//!     Ok(())
//! }
//! ```

pub mod align;
pub mod claims;
pub mod config;
pub mod dataset;
pub mod device;
pub mod error;
pub mod eval;
pub mod llm;
pub mod persistence;
pub mod pipeline;

// Re-export commonly used types
pub use align::{AlignmentLabel, ClaimAligner, ClaimAlignment, LlmAligner};
pub use claims::{ClaimsProvider, FixedClaimsProvider, summary_id};
pub use config::Config;
pub use dataset::{ClaimSet, RoseDataset, RoseRecord, load_rose_dataset, merge_claim_sets};
pub use device::{Device, select_device};
pub use error::{EvalError, Result};
pub use eval::{EvalOptions, EvaluationResults, RecordResult, RoseEvaluation};
pub use persistence::{load_results, save_results};
pub use pipeline::{BatchScore, DocumentSummary, FactualityPipeline};
