use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::constants::{
    GAMES_PER_SEASON, SYNTHETIC_MAX_CORRECT, SYNTHETIC_MAX_LOSERS_GAMES, SYNTHETIC_MAX_LOSERS_WINS,
};
use crate::error::ProviderError;
use crate::params::Parameters;
use crate::season::SeasonStatistics;

/// Source of per-season prediction tallies.
///
/// The aggregator asks for one season at a time, in ascending year order.
pub trait SeasonDataProvider {
    fn fetch_season(
        &mut self,
        year: i32,
        params: &Parameters,
    ) -> Result<SeasonStatistics, ProviderError>;
}

/// Random stand-in for real season data.
///
/// Every season has a full 162-game schedule with a uniformly random number
/// of correct predictions below 100.
#[derive(Clone, Debug)]
pub struct SyntheticProvider {
    rng: ChaCha8Rng,
}

impl SyntheticProvider {
    /// Create a provider. With a seed the generated seasons are reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        SyntheticProvider { rng }
    }
}

impl SeasonDataProvider for SyntheticProvider {
    fn fetch_season(
        &mut self,
        _year: i32,
        _params: &Parameters,
    ) -> Result<SeasonStatistics, ProviderError> {
        let correct_predictions = self.rng.gen_range(0..SYNTHETIC_MAX_CORRECT);
        let total_losers_games = self.rng.gen_range(0..SYNTHETIC_MAX_LOSERS_GAMES);
        // Wins can't exceed games played
        let max_wins = SYNTHETIC_MAX_LOSERS_WINS.min(total_losers_games + 1);
        let losers_wins = self.rng.gen_range(0..max_wins);

        Ok(SeasonStatistics::new(
            GAMES_PER_SEASON,
            correct_predictions,
            losers_wins,
            total_losers_games,
        ))
    }
}

/// Season tallies recorded ahead of time, keyed by year.
#[derive(Clone, Debug, Default)]
pub struct RecordedProvider {
    seasons: BTreeMap<i32, SeasonStatistics>,
}

impl RecordedProvider {
    pub fn new() -> Self {
        RecordedProvider {
            seasons: BTreeMap::new(),
        }
    }

    /// Read tallies from a CSV file.
    /// Format: year,total_games,correct_predictions,losers_wins,total_losers_games
    pub fn read_from_file(filepath: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let text = fs::read_to_string(filepath)?;
        Self::from_csv(&text)
    }

    /// Parse tallies from CSV text.
    ///
    /// Blank lines and `#` comments are skipped, as is a `year,...` header
    /// when it is the first record. A year listed twice is a parse error.
    pub fn from_csv(text: &str) -> Result<Self, ProviderError> {
        let mut provider = RecordedProvider::new();
        let mut first_record = true;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            let is_header = first_record && parts[0].eq_ignore_ascii_case("year");
            first_record = false;
            if is_header {
                continue;
            }
            if parts.len() != 5 {
                return Err(ProviderError::Parse {
                    line: line_no,
                    message: format!("expected 5 fields, found {}", parts.len()),
                });
            }

            let year: i32 = parse_field(parts[0], "year", line_no)?;
            let stats = SeasonStatistics::new(
                parse_field(parts[1], "total_games", line_no)?,
                parse_field(parts[2], "correct_predictions", line_no)?,
                parse_field(parts[3], "losers_wins", line_no)?,
                parse_field(parts[4], "total_losers_games", line_no)?,
            );

            if provider.seasons.contains_key(&year) {
                return Err(ProviderError::Parse {
                    line: line_no,
                    message: format!("season {} is listed more than once", year),
                });
            }
            provider.add_season(year, stats);
        }

        Ok(provider)
    }

    /// Add or replace the tally for a season.
    pub fn add_season(&mut self, year: i32, stats: SeasonStatistics) {
        self.seasons.insert(year, stats);
    }

    pub fn get(&self, year: i32) -> Option<&SeasonStatistics> {
        self.seasons.get(&year)
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    name: &str,
    line: usize,
) -> Result<T, ProviderError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e| ProviderError::Parse {
        line,
        message: format!("invalid {} {:?}: {}", name, raw, e),
    })
}

impl SeasonDataProvider for RecordedProvider {
    fn fetch_season(
        &mut self,
        year: i32,
        _params: &Parameters,
    ) -> Result<SeasonStatistics, ProviderError> {
        self.get(year)
            .copied()
            .ok_or(ProviderError::MissingSeason { year })
    }
}
