use async_trait::async_trait;
use rose_fenice_eval::{
    AlignmentLabel, ClaimAligner, ClaimAlignment, Device, EvalError, EvalOptions, RoseEvaluation,
    load_results, load_rose_dataset, persistence::ensure_results_dir, save_results,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Entails claims whose first word occurs in the document.
struct FirstWordAligner;

#[async_trait]
impl ClaimAligner for FirstWordAligner {
    async fn align(&self, document: &str, claim: &str) -> rose_fenice_eval::Result<ClaimAlignment> {
        let first = claim.split_whitespace().next().unwrap_or_default();
        let entailed = !first.is_empty() && document.to_lowercase().contains(&first.to_lowercase());
        Ok(ClaimAlignment {
            claim: claim.to_string(),
            score: if entailed { 0.9 } else { 0.1 },
            label: if entailed {
                AlignmentLabel::Entailment
            } else {
                AlignmentLabel::Contradiction
            },
            evidence: if entailed { first.to_string() } else { String::new() },
        })
    }
}

const BENCHMARK: &str = r#"{
    "cnndm_test": [
        {
            "source": "D",
            "reference": "The cat sat.",
            "record_id": "r0",
            "reference_acus": {"deduped_0.7_select_longest": ["cat sat"]},
            "system_claims": {"modelA": ["cat was sitting"]}
        }
    ]
}"#;

fn write_benchmark(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("rose_datasets_small.json");
    fs::write(&path, BENCHMARK).unwrap();
    path
}

fn evaluation() -> RoseEvaluation {
    RoseEvaluation::new(Arc::new(FirstWordAligner), Device::Cpu, EvalOptions::default())
}

#[tokio::test]
async fn one_record_two_claim_sets() {
    let dir = TempDir::new().unwrap();
    let dataset = load_rose_dataset(&write_benchmark(&dir)).unwrap();

    let results = evaluation().run(&dataset, "cnndm_test").await.unwrap();

    assert_eq!(results.records.len(), 2);
    let names: Vec<_> = results
        .records
        .iter()
        .map(|r| r.claim_set_name.as_str())
        .collect();
    assert_eq!(names, vec!["deduped_0.7_select_longest", "modelA"]);

    for record in &results.records {
        assert_eq!(record.subset_key, "cnndm_test");
        assert_eq!(record.record_id, "r0");
        assert!(record.score.is_finite());
        assert_eq!(record.alignments.len(), 1);
    }
}

#[tokio::test]
async fn results_round_trip_through_output_dir() {
    let dir = TempDir::new().unwrap();
    let dataset = load_rose_dataset(&write_benchmark(&dir)).unwrap();
    let results = evaluation().run(&dataset, "cnndm_test").await.unwrap();

    let out_dir = ensure_results_dir(&dir.path().join("fenice_results")).unwrap();
    let path = out_dir.join("fenice_results.json");
    save_results(&results, &path).unwrap();

    let loaded = load_results(&path).unwrap();
    assert_eq!(loaded.records, results.records);
}

#[tokio::test]
async fn malformed_benchmark_fails_before_scoring() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"cnndm_test\": [").unwrap();

    assert!(matches!(
        load_rose_dataset(&path),
        Err(EvalError::DatasetParse { .. })
    ));
}
