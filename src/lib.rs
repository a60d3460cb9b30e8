// Statement Visualizer - Core Library
// Formatting + derived metrics for the balance sheet, income statement and cash flow,
// shared by the TUI, the JSON report and the API server

pub mod error;
pub mod amount;
pub mod format;
pub mod ratio;
pub mod status;
pub mod bars;
pub mod statements;
pub mod indicators;
pub mod views;
pub mod sample;
pub mod settings;
pub mod telemetry;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{MetricsError, MetricsResult};
pub use amount::{normalize_amount, AmountElement, NormalizedAmount, RawAmount};
pub use format::{
    format_currency, format_percent, format_percent_label,
    FALLBACK_CURRENCY, MILLION_YEN_SUFFIX, NOT_AVAILABLE,
};
pub use ratio::{compute_ratio, percent_of, ratio};
pub use status::{
    classify_status, Status, Thresholds,
    EQUITY_RATIO_THRESHOLDS, LIQUIDITY_THRESHOLDS, PROFIT_MARGIN_THRESHOLDS,
};
pub use bars::{compute_bar_widths, compute_bars, Bar, BarTone};
pub use statements::{
    Assets, BalanceSheet, CashFlowPeriod, FinancialStatements, IncomeStatement, Liabilities,
};
pub use indicators::{health_indicators, HealthIndicator, IndicatorKind, IndicatorThresholds};
pub use views::{
    balance_view, cash_flow_view, dashboard_report, income_view, overview_view,
    Activity, ActivityGuide, BalanceView, CashFlowView, DashboardReport, Explanation, IncomeView,
    LineItem, OverviewView, ViewTab,
};
pub use sample::sample_statements;
pub use settings::{load_from_env, load_settings, Settings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Statements for the shells: the built-in sample, validated unless settings say otherwise.
pub fn load_statements(settings: &Settings) -> MetricsResult<FinancialStatements> {
    let statements = sample_statements();
    if settings.validate_identities {
        statements.validate()?;
    }
    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_statements_validates_sample() {
        let statements = load_statements(&Settings::default()).unwrap();
        assert_eq!(statements.cash_flow.len(), 6);
    }

    #[test]
    fn test_formatter_contract() {
        let list = vec![AmountElement::from(5_000_000.0), AmountElement::from("ignored")];
        assert_eq!(format_currency(list), "5.0百万円");
        assert_eq!(format_currency(RawAmount::Missing), FALLBACK_CURRENCY);
        assert_eq!(compute_bar_widths(&[0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
        assert_eq!(classify_status(0.5, EQUITY_RATIO_THRESHOLDS), Status::Medium);
    }
}
