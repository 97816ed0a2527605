//! Rivalry Core - significance statistics for season-by-season game predictions.
//!
//! Season tallies come from a [`SeasonDataProvider`]; the aggregator folds
//! them over a year range and the report layer summarizes accuracy with a
//! z-test against chance. Python bindings are available behind the `python`
//! feature.

pub mod aggregator;
pub mod constants;
pub mod error;
pub mod params;
pub mod provider;
pub mod report;
pub mod season;
pub mod stats;

#[cfg(feature = "python")]
mod python;

pub use aggregator::{process_seasons, run_replicates, FailurePolicy, ReplicateSummary, SeasonRun};
pub use constants::{DEFAULT_ALPHA, EXPECTED_PROPORTION};
pub use error::{AnalysisError, ProviderError, Result};
pub use params::Parameters;
pub use provider::{RecordedProvider, SeasonDataProvider, SyntheticProvider};
pub use report::{format_report, Report};
pub use season::SeasonStatistics;
pub use stats::{is_significant, mean, normal_cdf, p_value, standard_deviation, z_statistic};
