// 🩺 Health indicators - derived from the statements, never stored

use crate::error::MetricsResult;
use crate::format::{format_percent, round_to, to_millions, MILLION_YEN_SUFFIX, NOT_AVAILABLE};
use crate::ratio::ratio;
use crate::statements::FinancialStatements;
use crate::status::{
    classify_status, Status, Thresholds, EQUITY_RATIO_THRESHOLDS, LIQUIDITY_THRESHOLDS,
    PROFIT_MARGIN_THRESHOLDS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    EquityRatio,
    ProfitMargin,
    Liquidity,
}

impl IndicatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::EquityRatio => "自己資本比率",
            IndicatorKind::ProfitMargin => "利益率",
            IndicatorKind::Liquidity => "流動性",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            IndicatorKind::EquityRatio => "借金に頼らない健全性",
            IndicatorKind::ProfitMargin => "売上からどれだけ利益が出るか",
            IndicatorKind::Liquidity => "すぐに使える現金",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            IndicatorKind::EquityRatio | IndicatorKind::ProfitMargin => "%",
            IndicatorKind::Liquidity => MILLION_YEN_SUFFIX,
        }
    }
}

/// Threshold set per indicator. Defaults are the house rules for a small shop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorThresholds {
    pub equity_ratio: Thresholds,
    pub profit_margin: Thresholds,
    pub liquidity: Thresholds,
}

impl Default for IndicatorThresholds {
    fn default() -> Self {
        IndicatorThresholds {
            equity_ratio: EQUITY_RATIO_THRESHOLDS,
            profit_margin: PROFIT_MARGIN_THRESHOLDS,
            liquidity: LIQUIDITY_THRESHOLDS,
        }
    }
}

impl IndicatorThresholds {
    pub fn validate(&self) -> MetricsResult<()> {
        self.equity_ratio.validate()?;
        self.profit_margin.validate()?;
        self.liquidity.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthIndicator {
    pub kind: IndicatorKind,
    pub name: String,
    /// Displayed number: percent for ratios, millions of yen for liquidity
    pub value: f64,
    pub unit: String,
    pub display: String,
    pub status: Status,
    pub description: String,
}

impl HealthIndicator {
    fn new(kind: IndicatorKind, value: f64, display: String, status: Status) -> Self {
        HealthIndicator {
            kind,
            name: kind.name().to_string(),
            value,
            unit: kind.unit().to_string(),
            display,
            status,
            description: kind.description().to_string(),
        }
    }
}

/// Indicator over `numerator / denominator`.
///
/// An undefined ratio shows "N/A" with value 0 and is classified as caution.
fn ratio_indicator(kind: IndicatorKind, numerator: f64, denominator: f64, thresholds: Thresholds) -> HealthIndicator {
    match ratio(numerator, denominator) {
        Ok(fraction) => HealthIndicator::new(
            kind,
            round_to(fraction * 100.0, 1),
            format_percent(fraction),
            classify_status(fraction, thresholds),
        ),
        Err(err) => {
            tracing::warn!(indicator = kind.name(), error = %err, "indicator undefined");
            HealthIndicator::new(kind, 0.0, NOT_AVAILABLE.to_string(), Status::Caution)
        }
    }
}

pub fn equity_ratio(statements: &FinancialStatements, thresholds: Thresholds) -> HealthIndicator {
    let bs = &statements.balance_sheet;
    ratio_indicator(IndicatorKind::EquityRatio, bs.equity, bs.assets.total, thresholds)
}

pub fn profit_margin(statements: &FinancialStatements, thresholds: Thresholds) -> HealthIndicator {
    let income = &statements.income_statement;
    ratio_indicator(IndicatorKind::ProfitMargin, income.profit, income.revenue, thresholds)
}

/// Liquidity classifies the absolute cash balance, not a ratio.
pub fn liquidity(statements: &FinancialStatements, thresholds: Thresholds) -> HealthIndicator {
    let cash = statements.balance_sheet.assets.cash;
    let millions = to_millions(cash);
    HealthIndicator::new(
        IndicatorKind::Liquidity,
        millions,
        format!("{:.1}{}", millions, MILLION_YEN_SUFFIX),
        classify_status(cash, thresholds),
    )
}

/// All three indicators, in dashboard order.
pub fn health_indicators(statements: &FinancialStatements, thresholds: &IndicatorThresholds) -> Vec<HealthIndicator> {
    vec![
        equity_ratio(statements, thresholds.equity_ratio),
        profit_margin(statements, thresholds.profit_margin),
        liquidity(statements, thresholds.liquidity),
    ]
}
