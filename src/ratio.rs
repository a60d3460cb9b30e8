// ➗ Ratio computation with an explicit zero-denominator branch

use crate::error::{MetricsError, MetricsResult};
use crate::format::{format_percent, NOT_AVAILABLE};

/// `numerator / denominator` as a fraction.
///
/// A zero denominator or a non-finite operand is a domain violation, never NaN or infinity.
pub fn ratio(numerator: f64, denominator: f64) -> MetricsResult<f64> {
    if !numerator.is_finite() {
        return Err(MetricsError::NonFiniteFigure { field: "numerator" });
    }
    if !denominator.is_finite() {
        return Err(MetricsError::NonFiniteFigure { field: "denominator" });
    }
    if denominator == 0.0 {
        return Err(MetricsError::ZeroDenominator { numerator });
    }
    Ok(numerator / denominator)
}

/// Percentage string with one decimal ("13.3%"), or "N/A" when undefined.
pub fn compute_ratio(numerator: f64, denominator: f64) -> String {
    match ratio(numerator, denominator) {
        Ok(fraction) => format_percent(fraction),
        Err(err) => {
            tracing::warn!(error = %err, "ratio undefined");
            NOT_AVAILABLE.to_string()
        }
    }
}

/// Share of `part` in `whole` as a 0-100 percentage; 0 when `whole` is zero.
pub fn percent_of(part: f64, whole: f64) -> f64 {
    ratio(part, whole).map(|fraction| fraction * 100.0).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(10_000_000.0, 16_000_000.0), Ok(0.625));
        assert_eq!(ratio(-300_000.0, 1_500_000.0), Ok(-0.2));
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(
            ratio(2_000_000.0, 0.0),
            Err(MetricsError::ZeroDenominator { numerator: 2_000_000.0 })
        );
    }

    #[test]
    fn test_ratio_non_finite_operands() {
        assert_eq!(
            ratio(f64::INFINITY, 1.0),
            Err(MetricsError::NonFiniteFigure { field: "numerator" })
        );
        assert_eq!(
            ratio(1.0, f64::NAN),
            Err(MetricsError::NonFiniteFigure { field: "denominator" })
        );
        assert_eq!(compute_ratio(f64::NAN, 0.0), "N/A");
    }

    #[test]
    fn test_compute_ratio() {
        assert_eq!(compute_ratio(2_000_000.0, 15_000_000.0), "13.3%");
        assert_eq!(compute_ratio(10_000_000.0, 16_000_000.0), "62.5%");
        assert_eq!(compute_ratio(0.0, 15_000_000.0), "0.0%");
    }

    #[test]
    fn test_compute_ratio_zero_denominator_is_not_available() {
        assert_eq!(compute_ratio(2_000_000.0, 0.0), "N/A");
        assert_eq!(compute_ratio(0.0, 0.0), "N/A");
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(6_000_000.0, 15_000_000.0), 40.0);
        assert_eq!(percent_of(1.0, 0.0), 0.0);
    }
}
