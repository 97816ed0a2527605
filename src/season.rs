use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Prediction tallies for one season, or the running total of many.
///
/// Counters only ever grow: totals are built by adding season tallies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeasonStatistics {
    /// Games a prediction was made for
    pub total_games: u64,

    /// Games where the prediction was right
    pub correct_predictions: u64,

    /// Wins by "<500" teams
    pub losers_wins: u64,

    /// Games involving a "<500" team
    pub total_losers_games: u64,
}

impl SeasonStatistics {
    pub fn new(
        total_games: u64,
        correct_predictions: u64,
        losers_wins: u64,
        total_losers_games: u64,
    ) -> Self {
        SeasonStatistics {
            total_games,
            correct_predictions,
            losers_wins,
            total_losers_games,
        }
    }

    /// Check the counter invariants, returning a description of the first
    /// violation found.
    pub fn check(&self) -> Result<(), String> {
        if self.correct_predictions > self.total_games {
            return Err(format!(
                "{} correct predictions out of {} games",
                self.correct_predictions, self.total_games
            ));
        }
        if self.losers_wins > self.total_losers_games {
            return Err(format!(
                "{} <500 wins out of {} <500 games",
                self.losers_wins, self.total_losers_games
            ));
        }
        Ok(())
    }

    /// Prediction accuracy as a percentage rounded to one decimal, or `None`
    /// for a season without games.
    pub fn season_percentage(&self) -> Option<f64> {
        if self.total_games == 0 {
            return None;
        }
        let pct = self.correct_predictions as f64 / self.total_games as f64 * 100.0;
        Some(round_to_tenth(pct))
    }
}

impl SeasonStatistics {
    /// Add two tallies, or `None` if any counter would overflow.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        Some(SeasonStatistics {
            total_games: self.total_games.checked_add(other.total_games)?,
            correct_predictions: self
                .correct_predictions
                .checked_add(other.correct_predictions)?,
            losers_wins: self.losers_wins.checked_add(other.losers_wins)?,
            total_losers_games: self
                .total_losers_games
                .checked_add(other.total_losers_games)?,
        })
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl AddAssign for SeasonStatistics {
    fn add_assign(&mut self, other: Self) {
        self.total_games += other.total_games;
        self.correct_predictions += other.correct_predictions;
        self.losers_wins += other.losers_wins;
        self.total_losers_games += other.total_losers_games;
    }
}

impl Add for SeasonStatistics {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Sum for SeasonStatistics {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(SeasonStatistics::default(), Add::add)
    }
}

impl<'a> Sum<&'a SeasonStatistics> for SeasonStatistics {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
