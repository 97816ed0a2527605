use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use crate::constants::{
    DEFAULT_DAYS, DEFAULT_DAYS_IN_YEAR, DEFAULT_DIFFERENCE_THRESHOLD, DEFAULT_END_YEAR,
    DEFAULT_LOSER_THRESHOLD, DEFAULT_START_YEAR,
};
use crate::error::{AnalysisError, Result};

/// The six analysis parameters.
///
/// Only the year range drives the aggregation loop; the remaining fields are
/// passed through to the season data provider, which decides how to use them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// First season analyzed (inclusive)
    pub start_year: i32,

    /// Last season analyzed (inclusive)
    pub end_year: i32,

    /// Rolling window, in days, used to rate teams
    pub days: i32,

    /// Days of a season considered per year
    pub days_in_year: i32,

    /// Win percentage below which a team is a "<500" team
    pub loser_threshold: i32,

    /// Minimum rating difference for a prediction to be made
    pub difference_threshold: i32,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            days: DEFAULT_DAYS,
            days_in_year: DEFAULT_DAYS_IN_YEAR,
            loser_threshold: DEFAULT_LOSER_THRESHOLD,
            difference_threshold: DEFAULT_DIFFERENCE_THRESHOLD,
        }
    }
}

impl Parameters {
    /// Parameters for a year range, everything else at its default.
    pub fn for_years(start_year: i32, end_year: i32) -> Self {
        Parameters {
            start_year,
            end_year,
            ..Parameters::default()
        }
    }

    /// Parse parameters from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| AnalysisError::Config(e.to_string()))
    }

    /// Read parameters from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| AnalysisError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Check the preconditions of a run.
    pub fn validate(&self) -> Result<()> {
        if self.end_year < self.start_year {
            return Err(invalid(format!(
                "end year {} is before start year {}",
                self.end_year, self.start_year
            )));
        }
        if self.days <= 0 {
            return Err(invalid(format!("days must be positive, got {}", self.days)));
        }
        if self.days_in_year <= 0 {
            return Err(invalid(format!(
                "days in year must be positive, got {}",
                self.days_in_year
            )));
        }
        if !(0..=100).contains(&self.loser_threshold) {
            return Err(invalid(format!(
                "loser threshold must be a percentage in 0..=100, got {}",
                self.loser_threshold
            )));
        }
        if self.difference_threshold < 0 {
            return Err(invalid(format!(
                "difference threshold must not be negative, got {}",
                self.difference_threshold
            )));
        }
        Ok(())
    }

    /// Seasons covered by the run, in ascending order.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }
}

fn invalid(reason: String) -> AnalysisError {
    AnalysisError::InvalidParameters { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = Parameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.years().count(), 40);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let params = Parameters::for_years(2010, 2000);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidParameters { .. }));
    }

    #[test]
    fn test_single_year_range() {
        let params = Parameters::for_years(2000, 2000);
        assert!(params.validate().is_ok());
        assert_eq!(params.years().collect::<Vec<_>>(), vec![2000]);
    }

    #[test]
    fn test_window_sizes_must_be_positive() {
        let params = Parameters {
            days: 0,
            ..Parameters::default()
        };
        assert!(params.validate().is_err());

        let params = Parameters {
            days_in_year: -3,
            ..Parameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_loser_threshold_bounds() {
        let params = Parameters {
            loser_threshold: 101,
            ..Parameters::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let params = Parameters::from_toml_str("start_year = 1995\nend_year = 1999\n").unwrap();
        assert_eq!(params.start_year, 1995);
        assert_eq!(params.end_year, 1999);
        assert_eq!(params.days, DEFAULT_DAYS);
        assert_eq!(params.loser_threshold, DEFAULT_LOSER_THRESHOLD);
    }

    #[test]
    fn test_unknown_toml_key_rejected() {
        let err = Parameters::from_toml_str("start_yr = 1995").unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }
}
