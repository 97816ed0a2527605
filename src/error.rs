use thiserror::Error;

/// Errors raised while computing statistics or running an analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("invalid parameters: {reason}")]
    InvalidParameters { reason: String },

    /// No season produced a percentage, so mean and deviation are undefined.
    #[error("no data: no season in the range produced any games")]
    NoData,

    #[error("cannot compute {quantity}: denominator is zero")]
    ZeroDenominator { quantity: &'static str },

    #[error("season {year} returned an inconsistent tally: {reason}")]
    InvalidTally { year: i32, reason: String },

    #[error("season data provider failed for {year}")]
    Provider {
        year: i32,
        #[source]
        source: ProviderError,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Failures reported by a season data provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("no data recorded for season {year}")]
    MissingSeason { year: i32 },

    #[error("failed to read season data: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed season record on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(feature = "python")]
impl From<AnalysisError> for pyo3::PyErr {
    fn from(err: AnalysisError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
