// 🚦 Three-level status classification

use crate::error::{MetricsError, MetricsResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Medium,
    Caution,
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Good => "good",
            Status::Medium => "medium",
            Status::Caution => "caution",
        }
    }
}

/// Ordered cut points: above `high_cut` is good, above `mid_cut` is medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub high_cut: f64,
    pub mid_cut: f64,
}

/// Equity ratio (equity / total assets), as a fraction.
pub const EQUITY_RATIO_THRESHOLDS: Thresholds = Thresholds {
    high_cut: 0.5,
    mid_cut: 0.3,
};

/// Profit margin (profit / revenue), as a fraction.
pub const PROFIT_MARGIN_THRESHOLDS: Thresholds = Thresholds {
    high_cut: 0.1,
    mid_cut: 0.05,
};

/// Liquidity is classified on the absolute cash balance, in yen.
pub const LIQUIDITY_THRESHOLDS: Thresholds = Thresholds {
    high_cut: 3_000_000.0,
    mid_cut: 1_000_000.0,
};

impl Thresholds {
    pub fn new(high_cut: f64, mid_cut: f64) -> MetricsResult<Self> {
        let thresholds = Thresholds { high_cut, mid_cut };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Thresholds built by deserialization skip `new`, so loaders call this.
    pub fn validate(&self) -> MetricsResult<()> {
        if self.high_cut.is_finite() && self.mid_cut.is_finite() && self.high_cut > self.mid_cut {
            Ok(())
        } else {
            Err(MetricsError::InvalidThresholds {
                high_cut: self.high_cut,
                mid_cut: self.mid_cut,
            })
        }
    }
}

/// `good` strictly above `high_cut`, `medium` strictly above `mid_cut`, else `caution`.
pub fn classify_status(value: f64, thresholds: Thresholds) -> Status {
    if value > thresholds.high_cut {
        Status::Good
    } else if value > thresholds.mid_cut {
        Status::Medium
    } else {
        Status::Caution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_equity_ratio() {
        assert_eq!(classify_status(0.625, EQUITY_RATIO_THRESHOLDS), Status::Good);
        assert_eq!(classify_status(0.4, EQUITY_RATIO_THRESHOLDS), Status::Medium);
        assert_eq!(classify_status(0.1, EQUITY_RATIO_THRESHOLDS), Status::Caution);
    }

    #[test]
    fn test_classify_boundaries_are_strict() {
        assert_eq!(classify_status(0.5, EQUITY_RATIO_THRESHOLDS), Status::Medium);
        assert_eq!(classify_status(0.3, EQUITY_RATIO_THRESHOLDS), Status::Caution);
        assert_eq!(classify_status(0.1, PROFIT_MARGIN_THRESHOLDS), Status::Medium);
        assert_eq!(classify_status(3_000_000.0, LIQUIDITY_THRESHOLDS), Status::Medium);
        assert_eq!(classify_status(1_000_000.0, LIQUIDITY_THRESHOLDS), Status::Caution);
    }

    #[test]
    fn test_classify_margin_scenario() {
        // 2M profit on 15M revenue
        let margin = 2_000_000.0 / 15_000_000.0;
        assert_eq!(classify_status(margin, PROFIT_MARGIN_THRESHOLDS), Status::Good);
    }

    #[test]
    fn test_classify_liquidity_on_absolute_cash() {
        assert_eq!(classify_status(5_000_000.0, LIQUIDITY_THRESHOLDS), Status::Good);
        assert_eq!(classify_status(2_000_000.0, LIQUIDITY_THRESHOLDS), Status::Medium);
        assert_eq!(classify_status(-100.0, LIQUIDITY_THRESHOLDS), Status::Caution);
    }

    #[test]
    fn test_nan_is_caution() {
        assert_eq!(classify_status(f64::NAN, EQUITY_RATIO_THRESHOLDS), Status::Caution);
    }

    #[test]
    fn test_thresholds_must_be_ordered() {
        assert!(Thresholds::new(0.5, 0.3).is_ok());
        assert_eq!(
            Thresholds::new(0.3, 0.5),
            Err(MetricsError::InvalidThresholds { high_cut: 0.3, mid_cut: 0.5 })
        );
        assert!(Thresholds::new(0.3, 0.3).is_err());
        assert!(Thresholds::new(f64::NAN, 0.3).is_err());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Good).unwrap(), "\"good\"");
        assert_eq!(serde_json::to_string(&Status::Caution).unwrap(), "\"caution\"");
        assert_eq!(Status::Medium.as_str(), "medium");
    }
}
