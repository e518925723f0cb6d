//! Claim-to-document alignment.
//!
//! [`ClaimAligner`] is the inference collaborator of the scoring pipeline:
//! given a source document and one claim it reports how strongly the
//! document supports the claim. [`LlmAligner`] delegates that judgement
//! to an OpenAI-compatible chat endpoint.

use crate::error::{EvalError, Result};
use crate::llm::{LlmClient, Prompts, extract_json};
use async_trait::async_trait;
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Inference verdict for a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentLabel {
    Entailment,
    Neutral,
    Contradiction,
}

impl AlignmentLabel {
    /// Convert from string (case-insensitive); unknown labels are neutral.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "entailment" | "entailed" | "supported" => AlignmentLabel::Entailment,
            "contradiction" | "contradicted" => AlignmentLabel::Contradiction,
            _ => AlignmentLabel::Neutral,
        }
    }
}

/// Alignment of a single claim against the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode)]
pub struct ClaimAlignment {
    /// The claim that was aligned.
    pub claim: String,
    /// Support score in `[0, 1]`.
    pub score: f64,
    /// Verdict.
    pub label: AlignmentLabel,
    /// Document span the claim aligns with (may be empty).
    pub evidence: String,
}

/// Aligns claims against documents.
#[async_trait]
pub trait ClaimAligner: Send + Sync {
    async fn align(&self, document: &str, claim: &str) -> Result<ClaimAlignment>;
}

#[async_trait]
impl<T: ClaimAligner + ?Sized> ClaimAligner for Arc<T> {
    async fn align(&self, document: &str, claim: &str) -> Result<ClaimAlignment> {
        (**self).align(document, claim).await
    }
}

/// LLM-as-judge aligner.
pub struct LlmAligner {
    client: LlmClient,
}

impl LlmAligner {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    fn parse_alignment(claim: &str, response: &str) -> Result<ClaimAlignment> {
        #[derive(Deserialize)]
        struct RawAlignment {
            label: String,
            score: f64,
            #[serde(default)]
            evidence: String,
        }

        let raw: RawAlignment = serde_json::from_str(extract_json(response)).map_err(|e| {
            EvalError::LlmParse(format!(
                "Failed to parse alignment response: {}. Response: {}",
                e, response
            ))
        })?;

        if !raw.score.is_finite() {
            return Err(EvalError::LlmParse(format!(
                "Alignment score is not a number: {}",
                response
            )));
        }

        Ok(ClaimAlignment {
            claim: claim.to_string(),
            score: raw.score.clamp(0.0, 1.0),
            label: AlignmentLabel::from_str(&raw.label),
            evidence: raw.evidence,
        })
    }
}

#[async_trait]
impl ClaimAligner for LlmAligner {
    async fn align(&self, document: &str, claim: &str) -> Result<ClaimAlignment> {
        let prompt = Prompts::render_claim_alignment(document, claim);
        let response = self
            .client
            .complete(Some(Prompts::alignment_system()), &prompt)
            .await?;
        Self::parse_alignment(claim, &response)
    }
}
