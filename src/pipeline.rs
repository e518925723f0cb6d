//! FENICE-style factuality scoring pipeline.
//!
//! For each `{document, summary}` pair the pipeline obtains the summary's
//! claims from its [`ClaimsProvider`], aligns every claim against the
//! document with its [`ClaimAligner`] and reports the mean alignment
//! score together with the per-claim alignments.
//!
//! Claims are cached per pipeline instance under [`summary_id`]; a fresh
//! pipeline starts with an empty cache.

use crate::align::{ClaimAligner, ClaimAlignment};
use crate::claims::{ClaimsProvider, summary_id};
use crate::device::Device;
use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

/// One item of a scoring batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub document: String,
    pub summary: String,
}

impl DocumentSummary {
    pub fn new(document: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            summary: summary.into(),
        }
    }
}

/// Score of one batch item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchScore {
    /// Mean alignment score over the summary's claims; 0.0 with no claims.
    pub score: f64,
    /// Per-claim alignments, in claim order.
    pub alignments: Vec<ClaimAlignment>,
}

/// Scoring pipeline with pluggable claim acquisition and alignment.
pub struct FactualityPipeline<P, A> {
    provider: P,
    aligner: A,
    device: Device,
    claims_cache: HashMap<String, Vec<String>>,
}

impl<P: ClaimsProvider, A: ClaimAligner> FactualityPipeline<P, A> {
    pub fn new(provider: P, aligner: A, device: Device) -> Self {
        Self {
            provider,
            aligner,
            device,
            claims_cache: HashMap::new(),
        }
    }

    /// Device this pipeline scores on.
    pub fn device(&self) -> Device {
        self.device
    }

    /// Claims cached for a summary id, if any.
    pub fn cached_claims(&self, id: &str) -> Option<&[String]> {
        self.claims_cache.get(id).map(Vec::as_slice)
    }

    /// Score a batch of document/summary pairs.
    ///
    /// Fails as a whole if the provider cannot supply claims for any
    /// summary or if an alignment fails; no partial results are returned.
    pub async fn score_batch(&mut self, batch: &[DocumentSummary]) -> Result<Vec<BatchScore>> {
        let summaries: Vec<&str> = batch.iter().map(|p| p.summary.as_str()).collect();
        self.cache_claims(&summaries).await?;

        let mut scores = Vec::with_capacity(batch.len());
        for (idx, pair) in batch.iter().enumerate() {
            let id = summary_id(idx, &pair.summary);
            let claims = self
                .claims_cache
                .get(&id)
                .ok_or_else(|| EvalError::MissingClaims { summary_id: id.clone() })?;

            let mut alignments = Vec::with_capacity(claims.len());
            for claim in claims {
                let alignment = self.aligner.align(&pair.document, claim).await?;
                trace!(claim = %claim, score = alignment.score, "aligned claim");
                alignments.push(alignment);
            }

            let score = if alignments.is_empty() {
                0.0
            } else {
                alignments.iter().map(|a| a.score).sum::<f64>() / alignments.len() as f64
            };
            debug!(device = %self.device, claims = alignments.len(), score, "scored summary");

            scores.push(BatchScore { score, alignments });
        }

        Ok(scores)
    }

    async fn cache_claims(&mut self, summaries: &[&str]) -> Result<()> {
        for (id, claims) in self.provider.claims_for(summaries).await? {
            self.claims_cache.insert(id, claims);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::AlignmentLabel;
    use crate::claims::FixedClaimsProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scores a claim 1.0 when it appears verbatim in the document.
    struct SubstringAligner {
        calls: AtomicUsize,
    }

    impl SubstringAligner {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ClaimAligner for SubstringAligner {
        async fn align(&self, document: &str, claim: &str) -> Result<ClaimAlignment> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let found = document.contains(claim);
            Ok(ClaimAlignment {
                claim: claim.to_string(),
                score: if found { 1.0 } else { 0.0 },
                label: if found {
                    AlignmentLabel::Entailment
                } else {
                    AlignmentLabel::Neutral
                },
                evidence: if found { claim.to_string() } else { String::new() },
            })
        }
    }

    struct FailingAligner;

    #[async_trait]
    impl ClaimAligner for FailingAligner {
        async fn align(&self, _document: &str, _claim: &str) -> Result<ClaimAlignment> {
            Err(EvalError::Scoring("model unavailable".to_string()))
        }
    }

    fn claims(cs: &[&str]) -> Vec<String> {
        cs.iter().map(|c| c.to_string()).collect()
    }

    #[tokio::test]
    async fn test_score_is_mean_of_alignments() {
        let provider =
            FixedClaimsProvider::for_summary(0, "summary", claims(&["cat sat", "dog flew"]));
        let mut pipeline = FactualityPipeline::new(provider, SubstringAligner::new(), Device::Cpu);

        let batch = [DocumentSummary::new("The cat sat on the mat.", "summary")];
        let scores = pipeline.score_batch(&batch).await.unwrap();

        assert_eq!(scores.len(), 1);
        assert!((scores[0].score - 0.5).abs() < 1e-9);
        assert_eq!(scores[0].alignments[0].label, AlignmentLabel::Entailment);
        assert_eq!(scores[0].alignments[1].claim, "dog flew");
    }

    #[tokio::test]
    async fn test_claims_are_cached_under_summary_id() {
        let provider = FixedClaimsProvider::for_summary(0, "summary", claims(&["a"]));
        let mut pipeline = FactualityPipeline::new(provider, SubstringAligner::new(), Device::Cpu);
        assert!(pipeline.cached_claims("0summary").is_none());

        pipeline
            .score_batch(&[DocumentSummary::new("a", "summary")])
            .await
            .unwrap();

        assert_eq!(pipeline.cached_claims("0summary"), Some(&["a".to_string()][..]));
    }

    #[tokio::test]
    async fn test_missing_claims_fail_the_call() {
        let provider = FixedClaimsProvider::for_summary(0, "other summary", claims(&["a"]));
        let aligner = SubstringAligner::new();
        let mut pipeline = FactualityPipeline::new(provider, aligner, Device::Cpu);

        let err = pipeline
            .score_batch(&[DocumentSummary::new("doc", "summary")])
            .await
            .unwrap_err();

        assert!(matches!(err, EvalError::MissingClaims { .. }));
        assert_eq!(pipeline.aligner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_claim_list_scores_zero() {
        let provider = FixedClaimsProvider::for_summary(0, "summary", Vec::new());
        let mut pipeline = FactualityPipeline::new(provider, SubstringAligner::new(), Device::Cpu);

        let scores = pipeline
            .score_batch(&[DocumentSummary::new("doc", "summary")])
            .await
            .unwrap();

        assert_eq!(scores[0].score, 0.0);
        assert!(scores[0].alignments.is_empty());
    }

    #[tokio::test]
    async fn test_aligner_errors_propagate_unchanged() {
        let provider = FixedClaimsProvider::for_summary(0, "summary", claims(&["a"]));
        let mut pipeline = FactualityPipeline::new(provider, FailingAligner, Device::Cpu);

        let err = pipeline
            .score_batch(&[DocumentSummary::new("doc", "summary")])
            .await
            .unwrap_err();

        assert!(matches!(err, EvalError::Scoring(msg) if msg == "model unavailable"));
    }

    #[tokio::test]
    async fn test_batch_positions_select_claims() {
        let provider = FixedClaimsProvider::new(HashMap::from([
            (summary_id(0, "s"), claims(&["x"])),
            (summary_id(1, "s"), claims(&["y", "z"])),
        ]));
        let mut pipeline = FactualityPipeline::new(provider, SubstringAligner::new(), Device::Cpu);

        let batch = [DocumentSummary::new("x", "s"), DocumentSummary::new("y z", "s")];
        let scores = pipeline.score_batch(&batch).await.unwrap();

        assert_eq!(scores[0].alignments.len(), 1);
        assert_eq!(scores[1].alignments.len(), 2);
        assert_eq!(scores[1].score, 1.0);
    }
}
