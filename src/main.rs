use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use dental_epi::algorithm::cohort::analyze_cohort;
use dental_epi::loader::{load_cohort_file, load_narrative_file};
use dental_epi::utils::logging::{create_spinner, finish_progress_bar, log_issues};
use dental_epi::{EngineConfig, ReportAssembler};
use log::info;

/// Score a dental survey cohort and print the final report as JSON
#[derive(Debug, Parser)]
#[command(name = "dental-epi", version, about)]
struct Cli {
    /// JSON file with the patient batch
    cohort: PathBuf,

    /// JSON file with the narrative generated for this cohort
    #[arg(long)]
    narrative: Option<PathBuf>,

    /// Worker threads (defaults to the number of cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Records per parallel shard
    #[arg(long)]
    shard_size: Option<usize>,

    /// Maximum number of provinces in the ranking
    #[arg(long)]
    ranking_limit: Option<usize>,

    /// Show a progress bar while scoring
    #[arg(long)]
    progress: bool,

    /// Pretty-print the report
    #[arg(long)]
    pretty: bool,

    /// Include per-patient scores in the output
    #[arg(long)]
    patients: bool,
}

impl Cli {
    fn engine_config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            worker_threads: self.threads,
            shard_size: self.shard_size.unwrap_or(defaults.shard_size),
            province_ranking_limit: self.ranking_limit.unwrap_or(defaults.province_ranking_limit),
            show_progress: self.progress,
            ..defaults
        }
    }
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.engine_config();
    config.validate().context("Invalid command line options")?;
    info!("{}", config.to_string().trim_end());

    let start = Instant::now();
    let spinner = cli.progress.then(|| create_spinner(Some("Loading cohort")));
    let records = load_cohort_file(&cli.cohort)
        .with_context(|| format!("Failed to load cohort from {}", cli.cohort.display()))?;
    if let Some(spinner) = &spinner {
        finish_progress_bar(spinner, Some("Cohort loaded"));
    }

    let narrative = cli
        .narrative
        .as_deref()
        .map(load_narrative_file)
        .transpose()
        .context("Failed to load narrative")?;

    let analysis = analyze_cohort(&records, &config).context("Failed to analyze cohort")?;
    log_issues(&analysis.scores);

    let report = ReportAssembler::new(&config).merge(narrative, &analysis.statistics);
    info!(
        "Report for {} patients ready in {:?}",
        report.total_patients,
        start.elapsed()
    );

    let output = if cli.patients {
        serde_json::json!({
            "report": serde_json::to_value(&report)?,
            "patients": serde_json::to_value(&analysis.scores)?,
        })
    } else {
        serde_json::to_value(&report)?
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.pretty {
        serde_json::to_writer_pretty(&mut handle, &output)?;
    } else {
        serde_json::to_writer(&mut handle, &output)?;
    }
    writeln!(handle)?;

    Ok(())
}
