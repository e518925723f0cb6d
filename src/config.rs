//! Configuration for the evaluation harness.
//!
//! Supports both environment variables and YAML config file.
//! Environment variables take precedence over config file values;
//! command-line flags in the binary take precedence over both.

use crate::dataset::DEFAULT_REFERENCE_VARIANT;
use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// LLM configuration, used by the alignment collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL for the LLM API (e.g., "https://api.openai.com")
    pub api_base: String,

    /// API key for authentication
    pub api_key: String,

    /// Model name (e.g., "gpt-4", "claude-3-opus")
    pub model: String,

    /// Maximum tokens for response (optional)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for generation (optional)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.0
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            api_key: String::new(),
            model: "claude-latest".to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Where the benchmark lives and which part of it to score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Path to the RoSE benchmark JSON file.
    pub dataset_path: PathBuf,
    /// Directory the results are written to (created if absent).
    pub results_dir: PathBuf,
    /// Subset of the benchmark to evaluate.
    pub subset: String,
    /// Device hint; `None` auto-selects.
    pub device: Option<String>,
    /// Reference-claim variants promoted to claim sets.
    pub reference_variants: Vec<String>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("rose_datasets_small.json"),
            results_dir: PathBuf::from("fenice_results"),
            subset: "cnndm_test".to_string(),
            device: None,
            reference_variants: vec![DEFAULT_REFERENCE_VARIANT.to_string()],
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM settings
    pub llm: LlmConfig,
    /// Evaluation settings
    pub eval: EvalConfig,
}

/// Configuration file structure (YAML format).
#[derive(Debug, Deserialize)]
struct ConfigFile {
    llm: Option<LlmFileSection>,
    eval: Option<EvalFileSection>,
}

#[derive(Debug, Deserialize)]
struct LlmFileSection {
    api_base: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct EvalFileSection {
    dataset_path: Option<PathBuf>,
    results_dir: Option<PathBuf>,
    subset: Option<String>,
    device: Option<String>,
    reference_variants: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables and optional config file.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LLM_API_BASE, LLM_API_KEY, LLM_MODEL,
    ///    ROSE_DATASET, ROSE_RESULTS_DIR, ROSE_SUBSET, FENICE_DEVICE)
    /// 2. Config file (~/.config/rose-fenice-eval/config.yaml)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                config = Self::load_from_file(&config_path)?;
            }
        }

        config.apply_env(|key| env::var(key).ok());

        Ok(config)
    }

    /// Apply environment overrides, reading variables through `var`.
    ///
    /// Unparsable numeric values are ignored.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(api_base) = var("LLM_API_BASE") {
            self.llm.api_base = api_base;
        }

        if let Some(api_key) = var("LLM_API_KEY") {
            self.llm.api_key = api_key;
        }

        if let Some(model) = var("LLM_MODEL") {
            self.llm.model = model;
        }

        if let Some(max_tokens) = var("LLM_MAX_TOKENS") {
            if let Ok(tokens) = max_tokens.parse() {
                self.llm.max_tokens = tokens;
            }
        }

        if let Some(temperature) = var("LLM_TEMPERATURE") {
            if let Ok(temp) = temperature.parse() {
                self.llm.temperature = temp;
            }
        }

        if let Some(dataset) = var("ROSE_DATASET") {
            self.eval.dataset_path = PathBuf::from(dataset);
        }

        if let Some(results_dir) = var("ROSE_RESULTS_DIR") {
            self.eval.results_dir = PathBuf::from(results_dir);
        }

        if let Some(subset) = var("ROSE_SUBSET") {
            self.eval.subset = subset;
        }

        if let Some(device) = var("FENICE_DEVICE") {
            self.eval.device = Some(device);
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;

        let file_config: ConfigFile = serde_yaml::from_str(&content)
            .map_err(|e| EvalError::Config(format!("Failed to parse config file: {}", e)))?;

        let mut config = Config::default();

        if let Some(llm) = file_config.llm {
            if let Some(api_base) = llm.api_base {
                config.llm.api_base = api_base;
            }
            if let Some(api_key) = llm.api_key {
                config.llm.api_key = api_key;
            }
            if let Some(model) = llm.model {
                config.llm.model = model;
            }
            if let Some(max_tokens) = llm.max_tokens {
                config.llm.max_tokens = max_tokens;
            }
            if let Some(temperature) = llm.temperature {
                config.llm.temperature = temperature;
            }
        }

        if let Some(eval) = file_config.eval {
            if let Some(dataset_path) = eval.dataset_path {
                config.eval.dataset_path = dataset_path;
            }
            if let Some(results_dir) = eval.results_dir {
                config.eval.results_dir = results_dir;
            }
            if let Some(subset) = eval.subset {
                config.eval.subset = subset;
            }
            if eval.device.is_some() {
                config.eval.device = eval.device;
            }
            if let Some(variants) = eval.reference_variants {
                config.eval.reference_variants = variants;
            }
        }

        Ok(config)
    }

    /// Get the default config file path.
    pub fn config_file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rose-fenice-eval")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Validate that required configuration is present.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_base.is_empty() {
            return Err(EvalError::Config(
                "LLM API base URL is required. Set LLM_API_BASE environment variable or add to config file.".to_string()
            ));
        }

        if self.llm.api_key.is_empty() {
            return Err(EvalError::Config(
                "LLM API key is required. Set LLM_API_KEY environment variable or add to config file.".to_string()
            ));
        }

        if self.llm.model.is_empty() {
            return Err(EvalError::Config(
                "LLM model is required. Set LLM_MODEL environment variable or add to config file."
                    .to_string(),
            ));
        }

        if self.eval.subset.is_empty() {
            return Err(EvalError::Config("Subset name must not be empty.".to_string()));
        }

        Ok(())
    }

    /// Create a config from explicit values (useful for testing).
    pub fn with_llm(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            llm: LlmConfig {
                api_base: api_base.into(),
                api_key: api_key.into(),
                model: model.into(),
                ..Default::default()
            },
            eval: EvalConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.llm.api_base.is_empty());
        assert_eq!(config.llm.model, "claude-latest");
        assert_eq!(config.eval.subset, "cnndm_test");
        assert_eq!(config.eval.results_dir, PathBuf::from("fenice_results"));
        assert_eq!(
            config.eval.reference_variants,
            vec!["deduped_0.7_select_longest".to_string()]
        );
        assert!(config.eval.device.is_none());
    }

    #[test]
    fn test_validate_fails_without_required_fields() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_llm_validates() {
        let config = Config::with_llm("https://api.example.com", "test-key", "gpt-4");
        assert_eq!(config.llm.api_base, "https://api.example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
llm:
  api_base: "https://llm.example.com"
  model: "judge-model"
eval:
  subset: "xsum"
  device: "cuda:1"
  reference_variants: ["deduped_0.7_select_longest", "original"]
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.llm.api_base, "https://llm.example.com");
        assert_eq!(config.llm.model, "judge-model");
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.eval.subset, "xsum");
        assert_eq!(config.eval.device.as_deref(), Some("cuda:1"));
        assert_eq!(config.eval.reference_variants.len(), 2);
        assert_eq!(config.eval.dataset_path, PathBuf::from("rose_datasets_small.json"));
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let vars = HashMap::from([
            ("ROSE_SUBSET", "xsum"),
            ("FENICE_DEVICE", "cuda:0"),
            ("LLM_MAX_TOKENS", "256"),
            ("ROSE_RESULTS_DIR", "/tmp/out"),
        ]);
        let mut config = Config::default();
        config.eval.subset = "samsum".to_string();

        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.eval.subset, "xsum");
        assert_eq!(config.eval.device.as_deref(), Some("cuda:0"));
        assert_eq!(config.llm.max_tokens, 256);
        assert_eq!(config.eval.results_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.llm.model, "claude-latest");
    }

    #[test]
    fn test_env_ignores_unparsable_numbers() {
        let vars = HashMap::from([("LLM_MAX_TOKENS", "lots"), ("LLM_TEMPERATURE", "warm")]);
        let mut config = Config::default();

        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.llm.temperature, 0.0);
    }

    #[test]
    fn test_load_from_file_rejects_bad_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "llm: [not, a, map").unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(EvalError::Config(_))
        ));
    }
}
