use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use rivalry_core::aggregator::{process_seasons, run_replicates, FailurePolicy, ReplicateSummary};
use rivalry_core::params::Parameters;
use rivalry_core::provider::{RecordedProvider, SeasonDataProvider, SyntheticProvider};
use rivalry_core::report::format_progress;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnFailure {
    Abort,
    Skip,
    Retry,
}

/// Season-by-season prediction accuracy with a significance test against chance
#[derive(Parser, Debug)]
#[command(name = "rivalry", version, about)]
struct Cli {
    /// TOML file with analysis parameters
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    start_year: Option<i32>,

    #[arg(long)]
    end_year: Option<i32>,

    /// Rolling window in days
    #[arg(long)]
    days: Option<i32>,

    #[arg(long)]
    days_in_year: Option<i32>,

    /// Win percentage below which a team counts as "<500"
    #[arg(long)]
    loser_threshold: Option<i32>,

    #[arg(long)]
    difference_threshold: Option<i32>,

    /// Seed for synthetic season data
    #[arg(long)]
    seed: Option<u64>,

    /// CSV of recorded season tallies; synthetic data is used when absent
    #[arg(long)]
    data: Option<PathBuf>,

    /// What to do when a season can't be fetched
    #[arg(long, value_enum, default_value = "abort")]
    on_failure: OnFailure,

    /// Extra attempts per season with --on-failure retry
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Run this many synthetic replicates and report how many were significant
    #[arg(long)]
    replicates: Option<usize>,

    /// Enable trace logging on stderr
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn parameters(&self) -> Result<Parameters> {
        let mut params = match &self.config {
            Some(path) => Parameters::load(path)
                .with_context(|| format!("loading parameters from {}", path.display()))?,
            None => Parameters::default(),
        };

        if let Some(v) = self.start_year {
            params.start_year = v;
        }
        if let Some(v) = self.end_year {
            params.end_year = v;
        }
        if let Some(v) = self.days {
            params.days = v;
        }
        if let Some(v) = self.days_in_year {
            params.days_in_year = v;
        }
        if let Some(v) = self.loser_threshold {
            params.loser_threshold = v;
        }
        if let Some(v) = self.difference_threshold {
            params.difference_threshold = v;
        }

        Ok(params)
    }

    fn policy(&self) -> FailurePolicy {
        match self.on_failure {
            OnFailure::Abort => FailurePolicy::Abort,
            OnFailure::Skip => FailurePolicy::Skip,
            OnFailure::Retry => FailurePolicy::Retry {
                attempts: self.retries,
            },
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let params = cli.parameters()?;

    if let Some(replicates) = cli.replicates {
        let reports = run_replicates(&params, replicates, cli.seed)?;
        let summary = ReplicateSummary::from_reports(&reports);
        println!("Replicates: {}", summary.runs);
        println!("Significant: {}", summary.significant);
        println!("Failed: {}", summary.failed);
        match summary.significance_rate() {
            Some(rate) => println!("Significance rate: {:.2}%", rate * 100.0),
            None => println!("Significance rate: n/a"),
        }
        return Ok(());
    }

    let mut provider: Box<dyn SeasonDataProvider> = match &cli.data {
        Some(path) => Box::new(
            RecordedProvider::read_from_file(path)
                .with_context(|| format!("reading season data from {}", path.display()))?,
        ),
        None => Box::new(SyntheticProvider::new(cli.seed)),
    };

    println!("Progress");
    let run = process_seasons(&params, provider.as_mut(), cli.policy(), |year, pct| {
        println!("{}", format_progress(year, pct));
    })?;

    if !run.skipped_years.is_empty() {
        println!("Skipped seasons: {:?}", run.skipped_years);
    }

    let report = run.report().context("summarizing seasons")?;
    println!();
    println!("Results");
    println!("{}", report);

    Ok(())
}
