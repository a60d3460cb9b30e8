// Built-in sample company: a small shop, six months of cash flow.

use crate::statements::{Assets, BalanceSheet, CashFlowPeriod, FinancialStatements, IncomeStatement, Liabilities};

pub fn sample_balance_sheet() -> BalanceSheet {
    BalanceSheet {
        assets: Assets {
            cash: 5_000_000.0,
            inventory: 3_000_000.0,
            equipment: 8_000_000.0,
            total: 16_000_000.0,
        },
        liabilities: Liabilities {
            loans: 4_000_000.0,
            payables: 2_000_000.0,
            total: 6_000_000.0,
        },
        equity: 10_000_000.0,
    }
}

pub fn sample_income_statement() -> IncomeStatement {
    IncomeStatement {
        revenue: 15_000_000.0,
        costs: 9_000_000.0,
        expenses: 4_000_000.0,
        profit: 2_000_000.0,
    }
}

pub fn sample_cash_flow() -> Vec<CashFlowPeriod> {
    vec![
        CashFlowPeriod::new("1月", 800_000.0, -500_000.0, -200_000.0),
        CashFlowPeriod::new("2月", 1_200_000.0, -300_000.0, 0.0),
        CashFlowPeriod::new("3月", 900_000.0, -800_000.0, 500_000.0),
        CashFlowPeriod::new("4月", 1_500_000.0, -200_000.0, -300_000.0),
        CashFlowPeriod::new("5月", 1_100_000.0, -600_000.0, 0.0),
        CashFlowPeriod::new("6月", 1_300_000.0, -400_000.0, -200_000.0),
    ]
}

/// The sample bundle, unchecked. Shells decide whether to validate it.
pub fn sample_statements() -> FinancialStatements {
    FinancialStatements::trusted(sample_balance_sheet(), sample_income_statement(), sample_cash_flow())
}
