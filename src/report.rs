use std::fmt;

use crate::constants::{COMPOSITE_BASELINE, DEFAULT_ALPHA};
use crate::error::{AnalysisError, Result};
use crate::season::SeasonStatistics;
use crate::stats::{is_significant, mean, standard_deviation};

/// Summary statistics for a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    /// Population standard deviation of the per-season percentages
    pub standard_deviation: f64,

    /// Mean of the per-season percentages
    pub mean_percentage: f64,

    /// `((27 - stddev) * 2 + mean) / 2`, rewarding consistent seasons
    pub composite_score: f64,

    /// Overall accuracy differs from 0.5 at the default alpha
    pub significant: bool,

    pub total_games: u64,
    pub correct_predictions: u64,

    pub total_losers_games: u64,
    pub losers_wins: u64,
    pub losers_percentage: f64,
}

impl Report {
    /// Build a report from per-season percentages and the run totals.
    ///
    /// Fails with `NoData` when no season had games and with
    /// `ZeroDenominator` when there were no games or no "<500" games overall.
    pub fn new(percentages: &[f64], statistics: &SeasonStatistics) -> Result<Self> {
        let mean_percentage = mean(percentages)?;
        let standard_deviation = standard_deviation(percentages)?;
        let significant = is_significant(
            statistics.correct_predictions,
            statistics.total_games,
            DEFAULT_ALPHA,
        )?;

        if statistics.total_losers_games == 0 {
            return Err(AnalysisError::ZeroDenominator {
                quantity: "<500 team accuracy",
            });
        }
        let losers_percentage =
            statistics.losers_wins as f64 / statistics.total_losers_games as f64 * 100.0;

        Ok(Report {
            standard_deviation,
            mean_percentage,
            composite_score: composite_score(standard_deviation, mean_percentage),
            significant,
            total_games: statistics.total_games,
            correct_predictions: statistics.correct_predictions,
            total_losers_games: statistics.total_losers_games,
            losers_wins: statistics.losers_wins,
            losers_percentage,
        })
    }
}

/// Blend of consistency and accuracy: `((27 - stddev) * 2 + mean) / 2`.
pub fn composite_score(standard_deviation: f64, mean_percentage: f64) -> f64 {
    ((COMPOSITE_BASELINE - standard_deviation) * 2.0 + mean_percentage) / 2.0
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Standard deviation of percentages: {:.2}%",
            self.standard_deviation
        )?;
        writeln!(
            f,
            "Percentage + standard deviation: {:.2}%",
            self.composite_score
        )?;
        writeln!(f, "Significant: {}", self.significant)?;
        writeln!(f)?;
        writeln!(f, "Total games: {}", self.total_games)?;
        writeln!(f, "Correct predictions: {}", self.correct_predictions)?;
        writeln!(f, "Accuracy: {:.2}%", self.mean_percentage)?;
        writeln!(f)?;
        writeln!(f, "Total games of <500 teams: {}", self.total_losers_games)?;
        writeln!(f, "Correct predictions: {}", self.losers_wins)?;
        write!(f, "Accuracy: {:.2}%", self.losers_percentage)
    }
}

/// Render the plain-text report for a run.
pub fn format_report(percentages: &[f64], statistics: &SeasonStatistics) -> Result<String> {
    Ok(Report::new(percentages, statistics)?.to_string())
}

/// Render one progress line, e.g. `2000: 50.0%`.
pub fn format_progress(year: i32, percentage: f64) -> String {
    format!("{}: {:.1}%", year, percentage)
}
