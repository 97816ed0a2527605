/// Proportion of correct predictions expected from pure chance
pub const EXPECTED_PROPORTION: f64 = 0.5;

/// Default significance level for the two-tailed z-test
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Baseline standard deviation used by the composite score
pub const COMPOSITE_BASELINE: f64 = 27.0;

/// Zelen & Severo (A&S 26.2.17) scale factor for `t = 1 / (1 + p*z)`
pub const CDF_P: f64 = 0.2316419;

/// Standard normal density at zero, 1/sqrt(2*pi) truncated
pub const CDF_C: f64 = 0.39894228;

/// Zelen & Severo polynomial coefficients a1..a5
pub const CDF_COEFFICIENTS: [f64; 5] = [
    0.31938153,
    -0.356563782,
    1.781477937,
    -1.821255978,
    1.330274429,
];

/// Games in a regular MLB season
pub const GAMES_PER_SEASON: u64 = 162;

/// Upper bound (exclusive) for synthetic correct predictions per season
pub const SYNTHETIC_MAX_CORRECT: u64 = 100;

/// Upper bound (exclusive) for synthetic "<500" team wins per season
pub const SYNTHETIC_MAX_LOSERS_WINS: u64 = 50;

/// Upper bound (exclusive) for synthetic "<500" team games per season
pub const SYNTHETIC_MAX_LOSERS_GAMES: u64 = 100;

/// Default analysis parameters
pub const DEFAULT_START_YEAR: i32 = 1980;
pub const DEFAULT_END_YEAR: i32 = 2019;
pub const DEFAULT_DAYS: i32 = 20;
pub const DEFAULT_DAYS_IN_YEAR: i32 = 30;
pub const DEFAULT_LOSER_THRESHOLD: i32 = 40;
pub const DEFAULT_DIFFERENCE_THRESHOLD: i32 = 30;
