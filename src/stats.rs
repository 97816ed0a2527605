use statrs::statistics::Statistics;

use crate::constants::{CDF_C, CDF_COEFFICIENTS, CDF_P, EXPECTED_PROPORTION};
use crate::error::{AnalysisError, Result};

/// Arithmetic mean of a non-empty sequence.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(AnalysisError::NoData);
    }
    Ok(values.iter().mean())
}

/// Population standard deviation (divides by N, not N - 1).
///
/// Returns `AnalysisError::NoData` for an empty sequence instead of `NaN`.
/// Squared deviations are taken around the mean in a second pass, so a run
/// of identical values gives exactly zero.
pub fn standard_deviation(values: &[f64]) -> Result<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).mean();
    Ok(variance.sqrt())
}

/// Standard normal cumulative distribution function.
///
/// Zelen & Severo polynomial approximation (Abramowitz & Stegun 26.2.17).
/// Maximum absolute error is about 7.5e-8.
pub fn normal_cdf(z: f64) -> f64 {
    if z < 0.0 {
        return 1.0 - normal_cdf(-z);
    }

    let t = 1.0 / (1.0 + CDF_P * z);
    let density = CDF_C * (-z * z / 2.0).exp();

    // Horner form of a1*t + a2*t^2 + ... + a5*t^5
    let poly = CDF_COEFFICIENTS
        .iter()
        .rev()
        .fold(0.0, |acc, &a| (acc + a) * t);

    1.0 - density * poly
}

/// z-statistic of a one-sample proportion test against p = 0.5.
///
/// Computes `(successes/total - p) / sqrt(p*(1-p)/total)`, scaled through by
/// `total` so that `successes` and `total - successes` give exactly opposite
/// values.
pub fn z_statistic(successes: u64, total: u64) -> Result<f64> {
    if total == 0 {
        return Err(AnalysisError::ZeroDenominator {
            quantity: "z-statistic",
        });
    }
    if successes > total {
        return Err(AnalysisError::InvalidParameters {
            reason: format!("{} successes out of {} trials", successes, total),
        });
    }

    let n = total as f64;
    let p = EXPECTED_PROPORTION;
    Ok((successes as f64 - p * n) / (p * (1.0 - p) * n).sqrt())
}

/// Two-tailed p-value, `2 * (1 - Φ(|z|))`.
pub fn p_value(successes: u64, total: u64) -> Result<f64> {
    let z = z_statistic(successes, total)?;
    Ok(2.0 * (1.0 - normal_cdf(z.abs())))
}

/// Whether the observed proportion differs from 0.5 at significance `alpha`.
pub fn is_significant(successes: u64, total: u64, alpha: f64) -> Result<bool> {
    Ok(p_value(successes, total)? < alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_ALPHA;
    use statrs::distribution::{ContinuousCDF, Normal};

    #[test]
    fn test_single_season_zero_deviation() {
        let values = [50.0];
        assert_eq!(mean(&values).unwrap(), 50.0);
        assert_eq!(standard_deviation(&values).unwrap(), 0.0);
    }

    #[test]
    fn test_repeated_fractional_seasons_zero_deviation() {
        for (value, len) in [(61.7, 6), (55.6, 7), (44.4, 7), (0.1, 6)] {
            let values = vec![value; len];
            assert_eq!(standard_deviation(&values).unwrap(), 0.0, "{} x {}", value, len);
            assert_eq!(mean(&values).unwrap(), value);
        }
    }

    #[test]
    fn test_population_deviation() {
        // Population variance of 2,4,4,4,5,5,7,9 is 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((standard_deviation(&values).unwrap() - 2.0).abs() < 1e-12);
        assert!((mean(&values).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_is_no_data() {
        assert!(matches!(standard_deviation(&[]), Err(AnalysisError::NoData)));
        assert!(matches!(mean(&[]), Err(AnalysisError::NoData)));
    }

    #[test]
    fn test_cdf_at_zero() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_cdf_known_values() {
        assert!((normal_cdf(1.96) - 0.9750021).abs() < 1e-6);
        assert!((normal_cdf(-1.0) - 0.1586553).abs() < 1e-6);
    }

    #[test]
    fn test_cdf_close_to_exact() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        for i in -60..=60 {
            let z = i as f64 / 10.0;
            let err = (normal_cdf(z) - normal.cdf(z)).abs();
            assert!(err < 1e-7, "error {} at z = {}", err, z);
        }
    }

    #[test]
    fn test_significant_above_chance() {
        // z ~ 2.99, p ~ 0.0028
        let z = z_statistic(100, 162).unwrap();
        assert!((z - 2.9854).abs() < 1e-3);
        let p = p_value(100, 162).unwrap();
        assert!(p > 0.002 && p < 0.004, "p = {}", p);
        assert!(is_significant(100, 162, DEFAULT_ALPHA).unwrap());
    }

    #[test]
    fn test_not_significant_at_chance() {
        assert_eq!(z_statistic(81, 162).unwrap(), 0.0);
        assert!((p_value(81, 162).unwrap() - 1.0).abs() < 1e-6);
        assert!(!is_significant(81, 162, DEFAULT_ALPHA).unwrap());
    }

    #[test]
    fn test_significance_symmetric() {
        assert_eq!(
            is_significant(62, 162, DEFAULT_ALPHA).unwrap(),
            is_significant(100, 162, DEFAULT_ALPHA).unwrap()
        );
        assert_eq!(z_statistic(62, 162).unwrap(), -z_statistic(100, 162).unwrap());
    }

    #[test]
    fn test_zero_total_guarded() {
        assert!(matches!(
            is_significant(0, 0, DEFAULT_ALPHA),
            Err(AnalysisError::ZeroDenominator { .. })
        ));
    }

    #[test]
    fn test_successes_beyond_total_rejected() {
        assert!(z_statistic(11, 10).is_err());
    }
}
