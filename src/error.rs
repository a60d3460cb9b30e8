// Error taxonomy for the metrics core
//
// ParseFailure never leaves the formatter (it falls back to a default display value).
// Everything else is a domain violation: the arithmetic or the accounting identity
// would otherwise produce an undefined result.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("amount is not parseable: {input:?}")]
    ParseFailure { input: String },

    #[error("division by zero (numerator {numerator})")]
    ZeroDenominator { numerator: f64 },

    #[error("identity `{identity}` does not hold: expected {expected}, got {actual}")]
    IdentityMismatch {
        identity: &'static str,
        expected: f64,
        actual: f64,
    },

    #[error("figure `{field}` is not finite")]
    NonFiniteFigure { field: &'static str },

    #[error("thresholds must satisfy high_cut > mid_cut (got {high_cut} / {mid_cut})")]
    InvalidThresholds { high_cut: f64, mid_cut: f64 },
}

impl MetricsError {
    /// True for errors caused by the numbers themselves rather than by their encoding.
    pub fn is_domain_violation(&self) -> bool {
        matches!(
            self,
            MetricsError::ZeroDenominator { .. }
                | MetricsError::IdentityMismatch { .. }
                | MetricsError::NonFiniteFigure { .. }
        )
    }
}

pub type MetricsResult<T> = Result<T, MetricsError>;
