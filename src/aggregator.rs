use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{AnalysisError, Result};
use crate::params::Parameters;
use crate::provider::{SeasonDataProvider, SyntheticProvider};
use crate::report::Report;
use crate::season::SeasonStatistics;

/// What to do when the provider fails for a season.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run and return the provider error.
    #[default]
    Abort,

    /// Ask again up to `attempts` more times, then abort.
    Retry { attempts: u32 },

    /// Leave the season out and carry on.
    Skip,
}

/// Everything a run over a year range produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeasonRun {
    /// Totals over every season processed
    pub statistics: SeasonStatistics,

    /// Accuracy percentage of each season with games, in year order
    pub percentages: Vec<f64>,

    /// `(year, percentage)` events in the order they were delivered
    pub progress: Vec<(i32, f64)>,

    /// Seasons left out under `FailurePolicy::Skip`
    pub skipped_years: Vec<i32>,
}

impl SeasonRun {
    /// Summarize the run.
    pub fn report(&self) -> Result<Report> {
        Report::new(&self.percentages, &self.statistics)
    }
}

/// Fold every season in the parameter range into a single run.
///
/// Seasons are requested one at a time in ascending year order. Each season
/// with games adds its percentage and calls `progress(year, percentage)`
/// before the next season is requested. A tally is only added to the totals
/// after it has been fetched and checked in full.
pub fn process_seasons<P, F>(
    params: &Parameters,
    provider: &mut P,
    policy: FailurePolicy,
    mut progress: F,
) -> Result<SeasonRun>
where
    P: SeasonDataProvider + ?Sized,
    F: FnMut(i32, f64),
{
    params.validate()?;

    let mut run = SeasonRun::default();

    for year in params.years() {
        let Some(season) = fetch_with_policy(provider, year, params, policy)? else {
            run.skipped_years.push(year);
            continue;
        };

        season
            .check()
            .map_err(|reason| AnalysisError::InvalidTally { year, reason })?;

        run.statistics = run
            .statistics
            .checked_add(&season)
            .ok_or_else(|| AnalysisError::InvalidTally {
                year,
                reason: "counter overflow".to_string(),
            })?;

        if let Some(percentage) = season.season_percentage() {
            debug!(year, percentage, games = season.total_games, "season processed");
            run.percentages.push(percentage);
            run.progress.push((year, percentage));
            progress(year, percentage);
        } else {
            debug!(year, "season had no games");
        }
    }

    info!(
        start_year = params.start_year,
        end_year = params.end_year,
        seasons = run.percentages.len(),
        skipped = run.skipped_years.len(),
        total_games = run.statistics.total_games,
        "run complete"
    );

    Ok(run)
}

/// Fetch one season, applying the failure policy.
///
/// `Ok(None)` means the season was skipped.
fn fetch_with_policy<P>(
    provider: &mut P,
    year: i32,
    params: &Parameters,
    policy: FailurePolicy,
) -> Result<Option<SeasonStatistics>>
where
    P: SeasonDataProvider + ?Sized,
{
    let retries = match policy {
        FailurePolicy::Retry { attempts } => attempts,
        _ => 0,
    };

    let mut attempt = 0;
    loop {
        match provider.fetch_season(year, params) {
            Ok(season) => return Ok(Some(season)),
            Err(err) if attempt < retries => {
                attempt += 1;
                warn!(year, attempt, error = %err, "season fetch failed, retrying");
            }
            Err(err) if policy == FailurePolicy::Skip => {
                warn!(year, error = %err, "season fetch failed, skipping");
                return Ok(None);
            }
            Err(source) => return Err(AnalysisError::Provider { year, source }),
        }
    }
}

/// Run `replicates` independent synthetic analyses of the same range.
///
/// Replicates run in parallel; each gets its own provider seeded from a
/// master stream, so a fixed `seed` gives the same reports in the same order.
pub fn run_replicates(
    params: &Parameters,
    replicates: usize,
    seed: Option<u64>,
) -> Result<Vec<Result<Report>>> {
    params.validate()?;

    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let seeds: Vec<u64> = (0..replicates).map(|_| rng.gen::<u64>()).collect();

    let reports = seeds
        .into_par_iter()
        .map(|replicate_seed| {
            let mut provider = SyntheticProvider::new(Some(replicate_seed));
            process_seasons(params, &mut provider, FailurePolicy::Abort, |_, _| {})?.report()
        })
        .collect();

    Ok(reports)
}

/// How often replicate runs came out significant.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReplicateSummary {
    pub runs: usize,
    pub significant: usize,
    pub failed: usize,
}

impl ReplicateSummary {
    pub fn from_reports(reports: &[Result<Report>]) -> Self {
        let mut summary = ReplicateSummary {
            runs: reports.len(),
            ..Default::default()
        };
        for report in reports {
            match report {
                Ok(r) if r.significant => summary.significant += 1,
                Ok(_) => {}
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Share of successful runs that were significant, `None` if none succeeded.
    pub fn significance_rate(&self) -> Option<f64> {
        let completed = self.runs - self.failed;
        if completed == 0 {
            None
        } else {
            Some(self.significant as f64 / completed as f64)
        }
    }
}
