//! RoSE / FENICE evaluation CLI
//!
//! Scores pre-computed RoSE claims with the factuality pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rose_fenice_eval::{
    align::LlmAligner,
    config::Config,
    dataset::{RoseDataset, create_sample_dataset, load_rose_dataset},
    device::select_device,
    eval::{EvalOptions, RoseEvaluation},
    llm::LlmClient,
    persistence::{DEFAULT_RESULTS_FILENAME, ensure_results_dir, save_results},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

/// Evaluate RoSE summaries with FENICE using pre-computed claims
#[derive(Parser)]
#[command(name = "rose-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args)]
struct RunArgs {
    /// Device hint (cpu, cuda, cuda:N, mps, auto)
    #[arg(long)]
    device: Option<String>,

    /// Reference-claim variant to score (repeatable)
    #[arg(long = "reference-variant")]
    reference_variants: Vec<String>,

    /// Maximum number of records to evaluate
    #[arg(long)]
    max_records: Option<usize>,

    /// Directory results are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Results file name inside the output directory (.json or .bin)
    #[arg(short, long, default_value = DEFAULT_RESULTS_FILENAME)]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one subset of a RoSE benchmark file
    Run {
        /// Path to the RoSE JSON file
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Subset to evaluate
        #[arg(long)]
        subset: Option<String>,

        #[command(flatten)]
        args: RunArgs,
    },

    /// Score the built-in sample dataset
    Sample {
        #[command(flatten)]
        args: RunArgs,
    },

    /// List the subsets of a RoSE benchmark file
    Subsets {
        /// Path to the RoSE JSON file
        dataset: PathBuf,
    },

    /// Show the device that would be selected
    Device {
        /// Device hint; omit to auto-select
        hint: Option<String>,
    },

    /// Test LLM connection
    Test,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str())),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            dataset,
            subset,
            args,
        } => {
            let config = Config::load().context("Failed to load configuration")?;
            let path = dataset.unwrap_or_else(|| config.eval.dataset_path.clone());
            let dataset = load_rose_dataset(&path)
                .with_context(|| format!("Failed to load dataset {}", path.display()))?;
            let subset = subset.unwrap_or_else(|| config.eval.subset.clone());
            cmd_run(config, &dataset, &subset, args).await
        }
        Commands::Sample { args } => {
            let config = Config::load().context("Failed to load configuration")?;
            cmd_run(config, &create_sample_dataset(), "cnndm_test", args).await
        }
        Commands::Subsets { dataset } => cmd_subsets(dataset),
        Commands::Device { hint } => cmd_device(hint),
        Commands::Test => cmd_test().await,
    }
}

async fn cmd_run(mut config: Config, dataset: &RoseDataset, subset: &str, args: RunArgs) -> Result<()> {
    if args.device.is_some() {
        config.eval.device = args.device;
    }
    if !args.reference_variants.is_empty() {
        config.eval.reference_variants = args.reference_variants;
    }
    if let Some(dir) = args.output_dir {
        config.eval.results_dir = dir;
    }
    config.eval.subset = subset.to_string();
    config.validate().context("Invalid configuration")?;

    let device = select_device(config.eval.device.as_deref()).context("Device selection failed")?;
    let results_dir =
        ensure_results_dir(&config.eval.results_dir).context("Failed to create results directory")?;

    info!(model = %config.llm.model, %device, "using alignment model");

    let aligner = Arc::new(LlmAligner::new(LlmClient::new(config.llm)));
    let options = EvalOptions {
        reference_variants: config.eval.reference_variants,
        max_records: args.max_records,
    };
    let results = RoseEvaluation::new(aligner, device, options)
        .run(dataset, subset)
        .await
        .context("Evaluation failed")?;

    results.print_summary();

    let output_path = results_dir.join(&args.output);
    save_results(&results, &output_path).context("Failed to save results")?;
    println!("Results saved to {}", output_path.display());

    Ok(())
}

fn cmd_subsets(path: PathBuf) -> Result<()> {
    let dataset = load_rose_dataset(&path)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;

    println!("Subsets in {}", path.display());
    println!("{}", "─".repeat(40));
    for (name, count) in dataset.subset_sizes() {
        println!("  {:<24} {:>6} records", name, count);
    }
    println!("{}", "─".repeat(40));
    println!("  Total: {} records", dataset.len());

    Ok(())
}

fn cmd_device(hint: Option<String>) -> Result<()> {
    let device = select_device(hint.as_deref()).context("Device selection failed")?;
    println!("{}", device);
    Ok(())
}

async fn cmd_test() -> Result<()> {
    println!("Testing LLM connection...\n");

    let config = Config::load().context("Failed to load configuration")?;

    println!("Configuration:");
    println!("  API Base:  {}", config.llm.api_base);
    println!("  Model:     {}", config.llm.model);
    println!(
        "  API Key:   {}...",
        config.llm.api_key.chars().take(8).collect::<String>()
    );
    println!();

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Ok(());
    }

    let client = LlmClient::new(config.llm);

    println!("Sending test request...");
    match client.test_connection().await {
        Ok(()) => println!("Connection successful!"),
        Err(e) => println!("Connection failed: {}", e),
    }

    Ok(())
}
