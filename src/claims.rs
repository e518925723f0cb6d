//! Claim acquisition for the scoring pipeline.
//!
//! The pipeline never extracts claims itself: it asks a [`ClaimsProvider`]
//! for the claims of every summary in a batch and caches them by summary
//! id. [`FixedClaimsProvider`] answers from a caller-supplied map, which
//! is how pre-computed RoSE claims reach the scorer.

use crate::error::{EvalError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Number of leading summary characters that go into a summary id.
pub const SUMMARY_ID_PREFIX_CHARS: usize = 100;

/// Cache key for a summary at position `index` in its batch.
///
/// The decimal index followed by the first 100 characters of the summary.
/// Both the driver (when building claim maps) and the pipeline (when
/// looking claims up) go through this function.
pub fn summary_id(index: usize, summary: &str) -> String {
    let prefix: String = summary.chars().take(SUMMARY_ID_PREFIX_CHARS).collect();
    format!("{}{}", index, prefix)
}

/// Supplies claims for a batch of summaries.
#[async_trait]
pub trait ClaimsProvider: Send + Sync {
    /// Return `(summary id, claims)` for every summary, in batch order.
    ///
    /// Fails on the first summary it has no claims for.
    async fn claims_for(&self, summaries: &[&str]) -> Result<Vec<(String, Vec<String>)>>;
}

/// Provider backed by a fixed summary-id to claims map.
#[derive(Debug, Clone, Default)]
pub struct FixedClaimsProvider {
    claims_by_summary_id: HashMap<String, Vec<String>>,
}

impl FixedClaimsProvider {
    pub fn new(claims_by_summary_id: HashMap<String, Vec<String>>) -> Self {
        Self {
            claims_by_summary_id,
        }
    }

    /// Provider holding the claims of exactly one summary.
    pub fn for_summary(index: usize, summary: &str, claims: Vec<String>) -> Self {
        let mut map = HashMap::with_capacity(1);
        map.insert(summary_id(index, summary), claims);
        Self::new(map)
    }

    pub fn len(&self) -> usize {
        self.claims_by_summary_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims_by_summary_id.is_empty()
    }
}

#[async_trait]
impl ClaimsProvider for FixedClaimsProvider {
    async fn claims_for(&self, summaries: &[&str]) -> Result<Vec<(String, Vec<String>)>> {
        let mut out = Vec::with_capacity(summaries.len());
        for (idx, summary) in summaries.iter().enumerate() {
            let id = summary_id(idx, summary);
            match self.claims_by_summary_id.get(&id) {
                Some(claims) => out.push((id, claims.clone())),
                None => return Err(EvalError::MissingClaims { summary_id: id }),
            }
        }
        Ok(out)
    }
}
