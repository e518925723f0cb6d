//! Evaluation results and their summary.

use crate::align::ClaimAlignment;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Score of one claim set of one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct RecordResult {
    /// Benchmark subset the record came from.
    pub subset_key: String,
    /// Record identifier (`rec_{index}` when the benchmark has none).
    pub record_id: String,
    /// Reference variant or model name.
    pub claim_set_name: String,
    /// Overall factuality score.
    pub score: f64,
    /// Per-claim alignments.
    pub alignments: Vec<ClaimAlignment>,
}

/// Aggregate over all records scored with one claim set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ClaimSetSummary {
    pub claim_set_name: String,
    /// Number of records scored.
    pub count: usize,
    pub mean_score: f64,
}

/// Results of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct EvaluationResults {
    /// Subset that was evaluated.
    pub subset_key: String,
    /// Device specifier the pipeline ran on.
    pub device: String,
    /// Records scored (before claim-set expansion).
    pub total_records: usize,
    /// One entry per record and claim set, in evaluation order.
    pub records: Vec<RecordResult>,
    /// Per-claim-set aggregates, ordered by name.
    pub summaries: Vec<ClaimSetSummary>,
    /// Wall-clock time of the run (seconds).
    pub total_time_secs: f64,
}

impl EvaluationResults {
    /// Create empty results.
    pub fn new(subset_key: &str, device: &str) -> Self {
        Self {
            subset_key: subset_key.to_string(),
            device: device.to_string(),
            total_records: 0,
            records: Vec::new(),
            summaries: Vec::new(),
            total_time_secs: 0.0,
        }
    }

    /// Recompute per-claim-set summaries from `records`.
    pub fn calculate_summary(&mut self) {
        let mut by_set: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for record in &self.records {
            let entry = by_set.entry(record.claim_set_name.as_str()).or_default();
            entry.0 += 1;
            entry.1 += record.score;
        }

        self.summaries = by_set
            .into_iter()
            .map(|(name, (count, total))| ClaimSetSummary {
                claim_set_name: name.to_string(),
                count,
                mean_score: total / count as f64,
            })
            .collect();
    }

    /// Mean score of a claim set, if it was scored.
    pub fn mean_score(&self, claim_set_name: &str) -> Option<f64> {
        self.summaries
            .iter()
            .find(|s| s.claim_set_name == claim_set_name)
            .map(|s| s.mean_score)
    }

    /// Print summary to stdout.
    pub fn print_summary(&self) {
        println!("\n========== FENICE Results ==========");
        println!("Subset:  {}", self.subset_key);
        println!("Device:  {}", self.device);
        println!("Records: {}", self.total_records);
        println!("Scored claim sets: {}", self.records.len());
        println!("------------------------------------");
        let width = self
            .summaries
            .iter()
            .map(|s| s.claim_set_name.len())
            .max()
            .unwrap_or(0);
        for summary in &self.summaries {
            println!(
                "{:<width$}  n={:<5} mean={:.4}",
                summary.claim_set_name,
                summary.count,
                summary.mean_score,
                width = width
            );
        }
        println!("------------------------------------");
        println!("Total time: {:.1}s", self.total_time_secs);
        println!("====================================\n");
    }
}
