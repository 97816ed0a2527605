//! Python bindings, built with `--features python`.

use pyo3::prelude::*;

use crate::aggregator::{process_seasons, FailurePolicy};
use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_DAYS, DEFAULT_DAYS_IN_YEAR, DEFAULT_DIFFERENCE_THRESHOLD,
    DEFAULT_LOSER_THRESHOLD,
};
use crate::params::Parameters;
use crate::provider::SyntheticProvider;
use crate::stats;

/// Standard normal CDF (Zelen & Severo approximation).
#[pyfunction]
fn normal_cdf(z: f64) -> f64 {
    stats::normal_cdf(z)
}

/// Population standard deviation of a non-empty list.
#[pyfunction]
fn standard_deviation(values: Vec<f64>) -> PyResult<f64> {
    Ok(stats::standard_deviation(&values)?)
}

/// Two-tailed z-test of `successes / total` against 0.5.
#[pyfunction]
#[pyo3(signature = (successes, total, alpha = DEFAULT_ALPHA))]
fn is_significant(successes: u64, total: u64, alpha: f64) -> PyResult<bool> {
    Ok(stats::is_significant(successes, total, alpha)?)
}

/// Run a synthetic analysis.
///
/// Returns the report text and the `(year, percentage)` progress events.
#[pyfunction]
#[pyo3(signature = (
    start_year,
    end_year,
    days = DEFAULT_DAYS,
    days_in_year = DEFAULT_DAYS_IN_YEAR,
    loser_threshold = DEFAULT_LOSER_THRESHOLD,
    difference_threshold = DEFAULT_DIFFERENCE_THRESHOLD,
    seed = None
))]
fn analyze(
    start_year: i32,
    end_year: i32,
    days: i32,
    days_in_year: i32,
    loser_threshold: i32,
    difference_threshold: i32,
    seed: Option<u64>,
) -> PyResult<(String, Vec<(i32, f64)>)> {
    let params = Parameters {
        start_year,
        end_year,
        days,
        days_in_year,
        loser_threshold,
        difference_threshold,
    };
    let mut provider = SyntheticProvider::new(seed);
    let run = process_seasons(&params, &mut provider, FailurePolicy::Abort, |_, _| {})?;
    let report = run.report()?;
    Ok((report.to_string(), run.progress))
}

/// Python module definition
#[pymodule]
fn rivalry_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(normal_cdf, m)?)?;
    m.add_function(wrap_pyfunction!(standard_deviation, m)?)?;
    m.add_function(wrap_pyfunction!(is_significant, m)?)?;
    m.add_function(wrap_pyfunction!(analyze, m)?)?;

    m.add("DEFAULT_ALPHA", DEFAULT_ALPHA)?;

    Ok(())
}
