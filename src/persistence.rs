//! Persistence layer for evaluation results.
//!
//! Supports both JSON (human-readable) and bincode (efficient binary) formats.

use crate::error::{EvalError, Result};
use crate::eval::EvaluationResults;
use std::fs;
use std::path::{Path, PathBuf};

/// Default filename for results inside the results directory.
pub const DEFAULT_RESULTS_FILENAME: &str = "fenice_results.json";

/// Save format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    /// JSON format (human-readable, larger).
    Json,
    /// Bincode format (binary, compact).
    Bincode,
}

impl SaveFormat {
    /// Determine format from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") | Some("bincode") => SaveFormat::Bincode,
            _ => SaveFormat::Json,
        }
    }
}

/// Create the results directory, including parents.
pub fn ensure_results_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| EvalError::io(dir, e))?;
    Ok(dir.to_path_buf())
}

/// Save results to a file, format chosen by extension.
pub fn save_results(results: &EvaluationResults, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            ensure_results_dir(parent)?;
        }
    }

    let data = match SaveFormat::from_path(path) {
        SaveFormat::Json => serde_json::to_string_pretty(results)
            .map_err(|e| EvalError::Serialization(e.to_string()))?
            .into_bytes(),
        SaveFormat::Bincode => bincode::encode_to_vec(results, bincode::config::standard())
            .map_err(|e| EvalError::Serialization(e.to_string()))?,
    };

    fs::write(path, &data).map_err(|e| EvalError::io(path, e))
}

/// Load results previously written by [`save_results`].
pub fn load_results(path: &Path) -> Result<EvaluationResults> {
    let data = fs::read(path).map_err(|e| EvalError::io(path, e))?;

    match SaveFormat::from_path(path) {
        SaveFormat::Json => serde_json::from_slice(&data)
            .map_err(|e| EvalError::Serialization(e.to_string())),
        SaveFormat::Bincode => {
            let (results, _): (EvaluationResults, usize) =
                bincode::decode_from_slice(&data, bincode::config::standard())
                    .map_err(|e| EvalError::Serialization(e.to_string()))?;
            Ok(results)
        }
    }
}
