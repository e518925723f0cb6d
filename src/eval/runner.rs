//! Sequential evaluation driver over one RoSE subset.

use super::results::{EvaluationResults, RecordResult};
use crate::align::ClaimAligner;
use crate::claims::FixedClaimsProvider;
use crate::dataset::{DEFAULT_REFERENCE_VARIANT, RoseDataset, merge_claim_sets};
use crate::device::Device;
use crate::error::{EvalError, Result};
use crate::pipeline::{DocumentSummary, FactualityPipeline};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Options for an evaluation run.
#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// Reference-claim variants promoted to claim sets.
    pub reference_variants: Vec<String>,
    /// Maximum records to evaluate (for quick testing).
    pub max_records: Option<usize>,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            reference_variants: vec![DEFAULT_REFERENCE_VARIANT.to_string()],
            max_records: None,
        }
    }
}

/// Scores every claim set of every record of a subset.
pub struct RoseEvaluation {
    aligner: Arc<dyn ClaimAligner>,
    device: Device,
    options: EvalOptions,
}

impl RoseEvaluation {
    pub fn new(aligner: Arc<dyn ClaimAligner>, device: Device, options: EvalOptions) -> Self {
        Self {
            aligner,
            device,
            options,
        }
    }

    /// Evaluate one subset.
    ///
    /// Records and claim sets are processed strictly in order, each claim
    /// set as a batch of one through a freshly built pipeline. The first
    /// error aborts the run.
    pub async fn run(&self, dataset: &RoseDataset, subset_key: &str) -> Result<EvaluationResults> {
        let start = Instant::now();
        let records = dataset.subset(subset_key)?;
        let limit = self.options.max_records.unwrap_or(records.len());
        let records = &records[..limit.min(records.len())];

        info!(
            subset = subset_key,
            records = records.len(),
            device = %self.device,
            "starting evaluation"
        );

        let mut results = EvaluationResults::new(subset_key, &self.device.to_string());
        results.total_records = records.len();

        for (idx, record) in records.iter().enumerate() {
            let record_id = record.id_or_index(idx);
            let claim_sets = merge_claim_sets(record, &self.options.reference_variants);
            debug!(record_id = %record_id, claim_sets = claim_sets.len(), "evaluating record");

            for claim_set in claim_sets {
                // The summary sits at position 0 of its single-item batch.
                let provider = FixedClaimsProvider::for_summary(0, &record.reference, claim_set.claims);
                let mut pipeline =
                    FactualityPipeline::new(provider, Arc::clone(&self.aligner), self.device);

                let batch = [DocumentSummary::new(
                    record.source.as_str(),
                    record.reference.as_str(),
                )];
                let score = pipeline
                    .score_batch(&batch)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| EvalError::Scoring("pipeline returned no score".to_string()))?;

                info!(
                    record_id = %record_id,
                    claim_set = %claim_set.name,
                    score = score.score,
                    "scored claim set"
                );

                results.records.push(RecordResult {
                    subset_key: subset_key.to_string(),
                    record_id: record_id.clone(),
                    claim_set_name: claim_set.name,
                    score: score.score,
                    alignments: score.alignments,
                });
            }
        }

        results.calculate_summary();
        results.total_time_secs = start.elapsed().as_secs_f64();
        Ok(results)
    }
}
