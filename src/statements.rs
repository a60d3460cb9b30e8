// ⚖️ Financial statement snapshots + accounting identities
//
// Identities checked on validated construction:
//   assets.total      = cash + inventory + equipment
//   liabilities.total = loans + payables
//   assets.total      = liabilities.total + equity
//   profit            = revenue - costs - expenses
//
// Same tolerance idea as a bank reconciliation: figures are floats, so
// "equal" means within IDENTITY_TOLERANCE.

use crate::error::{MetricsError, MetricsResult};
use serde::{Deserialize, Serialize};

/// Absolute tolerance for identity checks, in yen.
pub const IDENTITY_TOLERANCE: f64 = 0.01;

// ============================================================================
// BALANCE SHEET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assets {
    pub cash: f64,
    pub inventory: f64,
    pub equipment: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liabilities {
    pub loans: f64,
    pub payables: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub assets: Assets,
    pub liabilities: Liabilities,
    pub equity: f64,
}

impl BalanceSheet {
    pub fn validate(&self) -> MetricsResult<()> {
        ensure_finite(&[
            ("assets.cash", self.assets.cash),
            ("assets.inventory", self.assets.inventory),
            ("assets.equipment", self.assets.equipment),
            ("assets.total", self.assets.total),
            ("liabilities.loans", self.liabilities.loans),
            ("liabilities.payables", self.liabilities.payables),
            ("liabilities.total", self.liabilities.total),
            ("equity", self.equity),
        ])?;

        ensure_identity(
            "assets.total = cash + inventory + equipment",
            self.assets.cash + self.assets.inventory + self.assets.equipment,
            self.assets.total,
        )?;
        ensure_identity(
            "liabilities.total = loans + payables",
            self.liabilities.loans + self.liabilities.payables,
            self.liabilities.total,
        )?;
        ensure_identity(
            "assets.total = liabilities.total + equity",
            self.liabilities.total + self.equity,
            self.assets.total,
        )
    }

    /// Right-hand side of the balance check (liabilities + equity).
    pub fn liabilities_and_equity(&self) -> f64 {
        self.liabilities.total + self.equity
    }

    pub fn is_balanced(&self) -> bool {
        (self.assets.total - self.liabilities_and_equity()).abs() < IDENTITY_TOLERANCE
    }
}

// ============================================================================
// INCOME STATEMENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub revenue: f64,
    pub costs: f64,
    pub expenses: f64,
    pub profit: f64,
}

impl IncomeStatement {
    pub fn validate(&self) -> MetricsResult<()> {
        ensure_finite(&[
            ("revenue", self.revenue),
            ("costs", self.costs),
            ("expenses", self.expenses),
            ("profit", self.profit),
        ])?;

        ensure_identity(
            "profit = revenue - costs - expenses",
            self.revenue - self.costs - self.expenses,
            self.profit,
        )
    }

    /// Revenue left after cost of goods.
    pub fn gross_profit(&self) -> f64 {
        self.revenue - self.costs
    }

    pub fn total_costs(&self) -> f64 {
        self.costs + self.expenses
    }
}

// ============================================================================
// CASH FLOW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowPeriod {
    pub label: String,
    pub operating: f64,
    pub investing: f64,
    pub financing: f64,
}

impl CashFlowPeriod {
    pub fn new(label: &str, operating: f64, investing: f64, financing: f64) -> Self {
        CashFlowPeriod {
            label: label.to_string(),
            operating,
            investing,
            financing,
        }
    }

    pub fn net(&self) -> f64 {
        self.operating + self.investing + self.financing
    }

    pub fn flows(&self) -> [f64; 3] {
        [self.operating, self.investing, self.financing]
    }

    pub fn validate(&self) -> MetricsResult<()> {
        ensure_finite(&[
            ("cash_flow.operating", self.operating),
            ("cash_flow.investing", self.investing),
            ("cash_flow.financing", self.financing),
        ])
    }
}

// ============================================================================
// BUNDLE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatements {
    pub balance_sheet: BalanceSheet,
    pub income_statement: IncomeStatement,
    pub cash_flow: Vec<CashFlowPeriod>,
}

impl FinancialStatements {
    /// Build the bundle, rejecting figures that break an accounting identity.
    pub fn new(
        balance_sheet: BalanceSheet,
        income_statement: IncomeStatement,
        cash_flow: Vec<CashFlowPeriod>,
    ) -> MetricsResult<Self> {
        let statements = Self::trusted(balance_sheet, income_statement, cash_flow);
        statements.validate()?;
        Ok(statements)
    }

    /// Build the bundle as given, without checking identities.
    pub fn trusted(
        balance_sheet: BalanceSheet,
        income_statement: IncomeStatement,
        cash_flow: Vec<CashFlowPeriod>,
    ) -> Self {
        FinancialStatements {
            balance_sheet,
            income_statement,
            cash_flow,
        }
    }

    pub fn validate(&self) -> MetricsResult<()> {
        self.balance_sheet.validate()?;
        self.income_statement.validate()?;
        for period in &self.cash_flow {
            period.validate()?;
        }
        Ok(())
    }

    /// Every cash-flow figure across all periods, in period order.
    pub fn all_flows(&self) -> Vec<f64> {
        self.cash_flow.iter().flat_map(|p| p.flows()).collect()
    }
}

fn ensure_finite(fields: &[(&'static str, f64)]) -> MetricsResult<()> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, _)) => Err(MetricsError::NonFiniteFigure { field: *field }),
        None => Ok(()),
    }
}

fn ensure_identity(identity: &'static str, expected: f64, actual: f64) -> MetricsResult<()> {
    if (expected - actual).abs() < IDENTITY_TOLERANCE {
        Ok(())
    } else {
        tracing::warn!(identity, expected, actual, "accounting identity does not hold");
        Err(MetricsError::IdentityMismatch {
            identity,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_statements;

    #[test]
    fn test_sample_balance_sheet_identity() {
        let statements = sample_statements();
        let bs = &statements.balance_sheet;

        assert_eq!(bs.assets.total, 16_000_000.0);
        assert_eq!(bs.liabilities_and_equity(), 16_000_000.0);
        assert!(bs.is_balanced());
        assert!(bs.validate().is_ok());
    }

    #[test]
    fn test_sample_income_identity() {
        let income = sample_statements().income_statement;

        assert!(income.validate().is_ok());
        assert_eq!(income.gross_profit(), 6_000_000.0);
        assert_eq!(income.total_costs(), 13_000_000.0);
    }

    #[test]
    fn test_validated_construction_rejects_unbalanced_sheet() {
        let mut statements = sample_statements();
        statements.balance_sheet.equity = 9_000_000.0;

        let result = FinancialStatements::new(
            statements.balance_sheet,
            statements.income_statement,
            statements.cash_flow,
        );

        assert_eq!(
            result,
            Err(MetricsError::IdentityMismatch {
                identity: "assets.total = liabilities.total + equity",
                expected: 15_000_000.0,
                actual: 16_000_000.0,
            })
        );
    }

    #[test]
    fn test_validated_construction_rejects_wrong_component_sum() {
        let mut bs = sample_statements().balance_sheet;
        bs.assets.cash = 4_000_000.0;

        let err = bs.validate().unwrap_err();
        assert!(matches!(
            err,
            MetricsError::IdentityMismatch { identity: "assets.total = cash + inventory + equipment", .. }
        ));
        assert!(err.is_domain_violation());
    }

    #[test]
    fn test_validated_construction_rejects_wrong_profit() {
        let mut statements = sample_statements();
        statements.income_statement.profit = 2_500_000.0;

        let result = FinancialStatements::new(
            statements.balance_sheet,
            statements.income_statement,
            statements.cash_flow,
        );

        assert!(matches!(
            result,
            Err(MetricsError::IdentityMismatch { identity: "profit = revenue - costs - expenses", .. })
        ));
    }

    #[test]
    fn test_trusted_construction_keeps_inputs_as_given() {
        let mut statements = sample_statements();
        statements.income_statement.profit = 2_500_000.0;

        let trusted = FinancialStatements::trusted(
            statements.balance_sheet,
            statements.income_statement,
            statements.cash_flow,
        );

        assert_eq!(trusted.income_statement.profit, 2_500_000.0);
        assert!(trusted.validate().is_err());
    }

    #[test]
    fn test_small_float_noise_is_tolerated() {
        let mut bs = sample_statements().balance_sheet;
        bs.equity += 0.001;
        assert!(bs.validate().is_ok());
    }

    #[test]
    fn test_non_finite_figures_rejected() {
        let mut bs = sample_statements().balance_sheet;
        bs.assets.inventory = f64::NAN;
        assert_eq!(
            bs.validate(),
            Err(MetricsError::NonFiniteFigure { field: "assets.inventory" })
        );

        let period = CashFlowPeriod::new("7月", f64::INFINITY, 0.0, 0.0);
        assert!(period.validate().is_err());
    }

    #[test]
    fn test_cash_flow_period_helpers() {
        let period = CashFlowPeriod::new("3月", 900_000.0, -800_000.0, 500_000.0);

        assert_eq!(period.net(), 600_000.0);
        assert_eq!(period.flows(), [900_000.0, -800_000.0, 500_000.0]);
    }

    #[test]
    fn test_all_flows_flattens_periods() {
        let statements = sample_statements();
        let flows = statements.all_flows();

        assert_eq!(flows.len(), statements.cash_flow.len() * 3);
        assert_eq!(flows[0], 800_000.0);
        assert_eq!(flows[1], -500_000.0);
    }

    #[test]
    fn test_statements_deserialize_from_json() {
        let json = serde_json::to_string(&sample_statements()).unwrap();
        let parsed: FinancialStatements = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_statements());
    }
}
