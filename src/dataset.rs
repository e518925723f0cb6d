//! RoSE benchmark loading and claim-set flattening.
//!
//! The benchmark file is a JSON object mapping a subset name
//! (`cnndm_test`, `cnndm_validation`, `xsum`, `samsum`, ...) to a list of
//! records. Each record carries the source document, the reference
//! summary, reference-derived atomic content units and per-model system
//! claims.

use crate::error::{EvalError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Reference-claim variant promoted to a claim set by default.
pub const DEFAULT_REFERENCE_VARIANT: &str = "deduped_0.7_select_longest";

/// A single benchmark record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoseRecord {
    /// Source document.
    pub source: String,
    /// Reference summary.
    pub reference: String,
    /// Record identifier, when the benchmark provides one.
    #[serde(default)]
    pub record_id: Option<String>,
    /// Reference-derived claims keyed by extraction variant.
    #[serde(default)]
    pub reference_acus: IndexMap<String, Vec<String>>,
    /// System claims keyed by model name.
    #[serde(default)]
    pub system_claims: IndexMap<String, Vec<String>>,
}

impl RoseRecord {
    /// Record identifier, falling back to `rec_{index}`.
    pub fn id_or_index(&self, index: usize) -> String {
        self.record_id
            .clone()
            .unwrap_or_else(|| format!("rec_{}", index))
    }
}

/// Named, ordered list of claims attributed to one summary source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Reference variant name or model name.
    pub name: String,
    /// Claims in source order.
    pub claims: Vec<String>,
}

/// The whole benchmark: subset name to records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoseDataset {
    subsets: IndexMap<String, Vec<RoseRecord>>,
}

impl RoseDataset {
    /// Build a dataset from already-loaded subsets.
    pub fn from_subsets(subsets: IndexMap<String, Vec<RoseRecord>>) -> Self {
        Self { subsets }
    }

    /// Records of one subset.
    pub fn subset(&self, name: &str) -> Result<&[RoseRecord]> {
        self.subsets
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| EvalError::SubsetNotFound {
                name: name.to_string(),
                available: self.subset_names(),
            })
    }

    /// Names of all subsets, in file order.
    pub fn subset_names(&self) -> Vec<String> {
        self.subsets.keys().cloned().collect()
    }

    /// Iterate over `(subset name, record count)`.
    pub fn subset_sizes(&self) -> impl Iterator<Item = (&str, usize)> {
        self.subsets.iter().map(|(k, v)| (k.as_str(), v.len()))
    }

    /// Total number of records across all subsets.
    pub fn len(&self) -> usize {
        self.subsets.values().map(Vec::len).sum()
    }

    /// Check if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load a RoSE benchmark file.
pub fn load_rose_dataset(path: &Path) -> Result<RoseDataset> {
    let content = fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| EvalError::DatasetParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge the configured reference variants and all system claims of a
/// record into claim sets.
///
/// Reference variants come first, in the order given; system claims
/// follow in the order the benchmark file lists them. A system model whose
/// name equals an already-inserted set replaces that set's claims in place.
pub fn merge_claim_sets(record: &RoseRecord, reference_variants: &[String]) -> Vec<ClaimSet> {
    let mut sets: Vec<ClaimSet> = Vec::new();

    for variant in reference_variants {
        if let Some(claims) = record.reference_acus.get(variant) {
            insert_claim_set(&mut sets, variant, claims.clone());
        }
    }

    for (model, claims) in &record.system_claims {
        insert_claim_set(&mut sets, model, claims.clone());
    }

    sets
}

fn insert_claim_set(sets: &mut Vec<ClaimSet>, name: &str, claims: Vec<String>) {
    match sets.iter_mut().find(|s| s.name == name) {
        Some(existing) => {
            warn!(claim_set = name, "claim set name collides with an earlier set; overwriting");
            existing.claims = claims;
        }
        None => sets.push(ClaimSet {
            name: name.to_string(),
            claims,
        }),
    }
}

/// Create a sample dataset for testing.
pub fn create_sample_dataset() -> RoseDataset {
    let records = vec![
        RoseRecord {
            source: "The cat sat on the mat all afternoon while the dog slept by the door."
                .to_string(),
            reference: "The cat sat.".to_string(),
            record_id: Some("r0".to_string()),
            reference_acus: IndexMap::from([(
                DEFAULT_REFERENCE_VARIANT.to_string(),
                vec!["cat sat".to_string()],
            )]),
            system_claims: IndexMap::from([(
                "modelA".to_string(),
                vec!["cat was sitting".to_string()],
            )]),
        },
        RoseRecord {
            source: "Rust 1.0 was announced in May 2015. The language was originally designed by Graydon Hoare at Mozilla Research."
                .to_string(),
            reference: "Rust 1.0 shipped in 2015 and came out of Mozilla Research.".to_string(),
            record_id: None,
            reference_acus: IndexMap::from([(
                DEFAULT_REFERENCE_VARIANT.to_string(),
                vec![
                    "Rust 1.0 shipped in 2015".to_string(),
                    "Rust came out of Mozilla Research".to_string(),
                ],
            )]),
            system_claims: IndexMap::from([
                (
                    "modelA".to_string(),
                    vec!["Rust 1.0 was released in 2015".to_string()],
                ),
                (
                    "modelB".to_string(),
                    vec![
                        "Rust was designed at Google".to_string(),
                        "Rust 1.0 came out in May".to_string(),
                    ],
                ),
            ]),
        },
    ];

    RoseDataset::from_subsets(IndexMap::from([("cnndm_test".to_string(), records)]))
}
