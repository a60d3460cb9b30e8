// 🖼️ View models - one stateless transformation per tab
//
// Each function takes a slice of the statements and returns a display-ready record.
// Shells (TUI, JSON report, HTTP) only lay these records out.

use crate::bars::{compute_bars, shared_scale, BarTone};
use crate::format::{format_currency, format_percent_label};
use crate::indicators::{health_indicators, HealthIndicator, IndicatorThresholds};
use crate::ratio::{compute_ratio, percent_of};
use crate::statements::{BalanceSheet, FinancialStatements, IncomeStatement};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// TAB SELECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewTab {
    Overview,
    Balance,
    Income,
    CashFlow,
}

impl ViewTab {
    pub const ALL: [ViewTab; 4] = [ViewTab::Overview, ViewTab::Balance, ViewTab::Income, ViewTab::CashFlow];

    pub fn next(&self) -> Self {
        match self {
            ViewTab::Overview => ViewTab::Balance,
            ViewTab::Balance => ViewTab::Income,
            ViewTab::Income => ViewTab::CashFlow,
            ViewTab::CashFlow => ViewTab::Overview,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            ViewTab::Overview => ViewTab::CashFlow,
            ViewTab::Balance => ViewTab::Overview,
            ViewTab::Income => ViewTab::Balance,
            ViewTab::CashFlow => ViewTab::Income,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ViewTab::Overview => "全体概要",
            ViewTab::Balance => "貸借対照表",
            ViewTab::Income => "損益計算書",
            ViewTab::CashFlow => "キャッシュフロー",
        }
    }
}

// ============================================================================
// SHARED RECORDS
// ============================================================================

/// One labelled, formatted amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub label: &'static str,
    pub amount: f64,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

impl LineItem {
    fn new(label: &'static str, amount: f64) -> Self {
        LineItem {
            label,
            amount,
            display: format_currency(amount),
            note: None,
        }
    }

    /// Shown with a leading minus, e.g. costs deducted from revenue.
    fn deducted(label: &'static str, amount: f64) -> Self {
        LineItem {
            label,
            amount,
            display: format!("-{}", format_currency(amount)),
            note: None,
        }
    }

    fn with_note(mut self, note: &'static str) -> Self {
        self.note = Some(note);
        self
    }
}

/// A titled plain-language explanation shown next to the figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Explanation {
    pub title: &'static str,
    pub body: &'static str,
}

pub const BALANCE_SHEET_EXPLANATION: Explanation = Explanation {
    title: "貸借対照表とは？",
    body: "会社が「何を持っているか（資産）」と「どこからお金を調達したか（負債・純資産）」を表します。\
           家計で言うと、家や車、預金（資産）と、住宅ローンや借金（負債）、自分のお金（純資産）のようなものです。",
};

pub const INCOME_STATEMENT_EXPLANATION: Explanation = Explanation {
    title: "損益計算書とは？",
    body: "一定期間（通常1年間）にどれだけ稼いで、どれだけ使って、最終的にいくら儲かったかを表します。\
           家計簿の収入と支出を会社版にしたようなものです。",
};

// ============================================================================
// OVERVIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView {
    pub description: &'static str,
    pub indicators: Vec<HealthIndicator>,
    /// Company size at a glance: total assets, revenue, profit, equity
    pub scale: Vec<LineItem>,
    pub explanations: [Explanation; 2],
}

pub fn overview_view(statements: &FinancialStatements, thresholds: &IndicatorThresholds) -> OverviewView {
    let bs = &statements.balance_sheet;
    let income = &statements.income_statement;

    OverviewView {
        description: "会計知識がなくても分かる、会社のお金の流れ",
        indicators: health_indicators(statements, thresholds),
        scale: vec![
            LineItem::new("総資産", bs.assets.total),
            LineItem::new("年間売上", income.revenue),
            LineItem::new("年間利益", income.profit),
            LineItem::new("純資産", bs.equity),
        ],
        explanations: [BALANCE_SHEET_EXPLANATION, INCOME_STATEMENT_EXPLANATION],
    }
}

// ============================================================================
// BALANCE SHEET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceCheck {
    pub assets: String,
    pub liabilities: String,
    pub equity: String,
    pub balanced: bool,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceView {
    pub description: &'static str,
    pub assets: Vec<LineItem>,
    pub assets_total: LineItem,
    pub liabilities: Vec<LineItem>,
    pub liabilities_total: LineItem,
    pub equity: LineItem,
    pub check: BalanceCheck,
}

pub fn balance_view(bs: &BalanceSheet) -> BalanceView {
    BalanceView {
        description: "会社を一軒の家に例えて、何を持っていて、どんな借金があるかを見てみましょう",
        assets: vec![
            LineItem::new("現金・預金", bs.assets.cash),
            LineItem::new("在庫（商品）", bs.assets.inventory),
            LineItem::new("設備・機械", bs.assets.equipment),
        ],
        assets_total: LineItem::new("合計", bs.assets.total),
        liabilities: vec![
            LineItem::new("銀行からの借入", bs.liabilities.loans),
            LineItem::new("支払い予定", bs.liabilities.payables),
        ],
        liabilities_total: LineItem::new("借金合計", bs.liabilities.total),
        equity: LineItem::new("会社の正味価値", bs.equity).with_note("※資産から借金を引いた残り"),
        check: BalanceCheck {
            assets: format_currency(bs.assets.total),
            liabilities: format_currency(bs.liabilities.total),
            equity: format_currency(bs.equity),
            balanced: bs.is_balanced(),
            note: "資産 = 負債 + 純資産（このバランスが取れていることが大切）",
        },
    }
}

// ============================================================================
// INCOME STATEMENT
// ============================================================================

/// One step of the revenue-to-profit waterfall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterfallBar {
    pub label: &'static str,
    pub display: String,
    pub width_pct: f64,
    pub width_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeView {
    pub description: &'static str,
    pub revenue: LineItem,
    pub costs: LineItem,
    pub expenses: LineItem,
    pub profit: LineItem,
    pub total_costs: LineItem,
    pub waterfall: Vec<WaterfallBar>,
    pub margin: String,
}

fn waterfall_bar(label: &'static str, amount: f64, revenue: f64) -> WaterfallBar {
    let percent = percent_of(amount, revenue);
    WaterfallBar {
        label,
        display: format_currency(amount),
        // A loss still draws a bar; the label keeps the sign
        width_pct: percent.abs(),
        width_label: format_percent_label(percent),
    }
}

pub fn income_view(income: &IncomeStatement) -> IncomeView {
    // Revenue is the 100% reference bar; a zero revenue leaves every bar empty
    let revenue_width = if income.revenue == 0.0 { 0.0 } else { 100.0 };
    let revenue_bar = WaterfallBar {
        label: "売上収入",
        display: format_currency(income.revenue),
        width_pct: revenue_width,
        width_label: format_percent_label(revenue_width),
    };

    IncomeView {
        description: "お店の1年間の売上から、最終的にいくら儲かったかを見てみましょう",
        revenue: LineItem::new("売上収入", income.revenue).with_note("商品・サービスを売って得たお金"),
        costs: LineItem::deducted("商品原価", income.costs).with_note("商品を作る・仕入れるのにかかった費用"),
        expenses: LineItem::deducted("運営費用", income.expenses)
            .with_note("人件費、家賃、光熱費などの運営コスト"),
        profit: LineItem::new("最終利益", income.profit).with_note("結果的に会社に残ったお金"),
        total_costs: LineItem::new("総コスト", income.total_costs()),
        waterfall: vec![
            revenue_bar,
            waterfall_bar("原価差引後", income.gross_profit(), income.revenue),
            waterfall_bar("最終利益", income.profit, income.revenue),
        ],
        margin: compute_ratio(income.profit, income.revenue),
    }
}

// ============================================================================
// CASH FLOW
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Operating,
    Investing,
    Financing,
}

impl Activity {
    pub const ALL: [Activity; 3] = [Activity::Operating, Activity::Investing, Activity::Financing];

    pub fn label(&self) -> &'static str {
        match self {
            Activity::Operating => "営業活動",
            Activity::Investing => "投資活動",
            Activity::Financing => "財務活動",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Activity::Operating => "本業でのお金の出入り",
            Activity::Investing => "将来への投資",
            Activity::Financing => "お金の調達・返済",
        }
    }

    pub fn examples(&self) -> [&'static str; 3] {
        match self {
            Activity::Operating => ["商品売上の入金", "仕入れ代金の支払い", "給料・家賃の支払い"],
            Activity::Investing => ["設備・機械の購入", "店舗の改装", "システム導入"],
            Activity::Financing => ["銀行からの借入", "借金の返済", "株主への配当"],
        }
    }

    pub fn guide(&self) -> ActivityGuide {
        ActivityGuide {
            activity: *self,
            label: self.label(),
            summary: self.summary(),
            examples: self.examples(),
        }
    }
}

/// Legend entry explaining one activity category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityGuide {
    pub activity: Activity,
    pub label: &'static str,
    pub summary: &'static str,
    pub examples: [&'static str; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowBar {
    pub activity: Activity,
    pub amount: f64,
    pub display: String,
    pub width_pct: f64,
    pub tone: BarTone,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodFlows {
    pub label: String,
    pub bars: Vec<FlowBar>,
    pub net: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowView {
    pub description: &'static str,
    pub periods: Vec<PeriodFlows>,
    /// Largest |flow| across all periods and activities; every width is relative to it
    pub scale: f64,
    pub activities: Vec<ActivityGuide>,
}

pub fn cash_flow_view(statements: &FinancialStatements) -> CashFlowView {
    let magnitudes = statements.all_flows();
    let scale = shared_scale(&magnitudes);

    // all_flows yields operating, investing, financing per period, in Activity::ALL order
    let bars = compute_bars(&magnitudes);
    let periods = statements
        .cash_flow
        .iter()
        .zip(bars.chunks(Activity::ALL.len()))
        .map(|(period, period_bars)| PeriodFlows {
            label: period.label.clone(),
            bars: Activity::ALL
                .iter()
                .zip(period_bars)
                .map(|(activity, bar)| FlowBar {
                    activity: *activity,
                    amount: bar.value,
                    display: format_currency(bar.value),
                    width_pct: bar.width_pct,
                    tone: bar.tone,
                })
                .collect(),
            net: format_currency(period.net()),
        })
        .collect();

    CashFlowView {
        description: "会社のお金の流れを川の流れに例えて見てみましょう",
        periods,
        scale,
        activities: Activity::ALL.iter().map(Activity::guide).collect(),
    }
}

// ============================================================================
// FULL REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub overview: OverviewView,
    pub balance: BalanceView,
    pub income: IncomeView,
    pub cash_flow: CashFlowView,
    pub generated_at: DateTime<Utc>,
}

impl DashboardReport {
    pub fn summary(&self) -> String {
        let statuses: Vec<String> = self
            .overview
            .indicators
            .iter()
            .map(|i| format!("{} {} ({})", i.name, i.display, i.status.as_str()))
            .collect();
        format!(
            "Dashboard: {} | margin {} | {} cash-flow periods",
            statuses.join(", "),
            self.income.margin,
            self.cash_flow.periods.len()
        )
    }
}

pub fn dashboard_report(statements: &FinancialStatements, thresholds: &IndicatorThresholds) -> DashboardReport {
    DashboardReport {
        overview: overview_view(statements, thresholds),
        balance: balance_view(&statements.balance_sheet),
        income: income_view(&statements.income_statement),
        cash_flow: cash_flow_view(statements),
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_statements;
    use crate::statements::CashFlowPeriod;
    use crate::status::Status;

    #[test]
    fn test_tab_cycles() {
        let mut tab = ViewTab::Overview;
        for _ in 0..ViewTab::ALL.len() {
            tab = tab.next();
        }
        assert_eq!(tab, ViewTab::Overview);

        assert_eq!(ViewTab::Overview.previous(), ViewTab::CashFlow);
        assert_eq!(ViewTab::CashFlow.next(), ViewTab::Overview);
        assert_eq!(ViewTab::Income.title(), "損益計算書");
    }

    #[test]
    fn test_overview_scale_figures() {
        let view = overview_view(&sample_statements(), &IndicatorThresholds::default());
        let displays: Vec<&str> = view.scale.iter().map(|i| i.display.as_str()).collect();

        assert_eq!(displays, vec!["16.0百万円", "15.0百万円", "2.0百万円", "10.0百万円"]);
        assert!(view.indicators.iter().all(|i| i.status == Status::Good));
    }

    #[test]
    fn test_balance_view() {
        let view = balance_view(&sample_statements().balance_sheet);

        assert_eq!(view.assets[0].display, "5.0百万円");
        assert_eq!(view.assets_total.display, "16.0百万円");
        assert_eq!(view.liabilities_total.display, "6.0百万円");
        assert_eq!(view.equity.display, "10.0百万円");
        assert!(view.check.balanced);
    }

    #[test]
    fn test_balance_view_flags_unbalanced_sheet() {
        let mut bs = sample_statements().balance_sheet;
        bs.equity = 9_000_000.0;

        assert!(!balance_view(&bs).check.balanced);
    }

    #[test]
    fn test_income_view_waterfall() {
        let view = income_view(&sample_statements().income_statement);

        assert_eq!(view.costs.display, "-9.0百万円");
        assert_eq!(view.expenses.display, "-4.0百万円");
        assert_eq!(view.total_costs.display, "13.0百万円");
        assert_eq!(view.margin, "13.3%");

        let labels: Vec<&str> = view.waterfall.iter().map(|b| b.width_label.as_str()).collect();
        assert_eq!(labels, vec!["100%", "40%", "13%"]);
        assert_eq!(view.waterfall[1].display, "6.0百万円");
    }

    #[test]
    fn test_income_view_zero_revenue() {
        let income = IncomeStatement {
            revenue: 0.0,
            costs: 0.0,
            expenses: 100_000.0,
            profit: -100_000.0,
        };
        let view = income_view(&income);

        assert_eq!(view.margin, "N/A");
        assert!(view.waterfall.iter().all(|b| b.width_pct == 0.0));
    }

    #[test]
    fn test_cash_flow_view_shares_one_scale() {
        let view = cash_flow_view(&sample_statements());

        assert_eq!(view.scale, 1_500_000.0);
        assert_eq!(view.periods.len(), 6);

        // April operating flow is the largest magnitude
        let april = &view.periods[3];
        assert_eq!(april.bars[0].width_pct, 100.0);

        let march = &view.periods[2];
        assert_eq!(march.bars[1].display, "-0.8百万円");
        assert_eq!(march.bars[1].tone, BarTone::Outflow);
        assert_eq!(march.bars[2].tone, BarTone::Inflow);
        assert_eq!(march.net, "0.6百万円");
    }

    #[test]
    fn test_cash_flow_view_all_zero() {
        let sample = sample_statements();
        let statements = FinancialStatements::trusted(
            sample.balance_sheet,
            sample.income_statement,
            vec![CashFlowPeriod::new("1月", 0.0, 0.0, 0.0)],
        );
        let view = cash_flow_view(&statements);

        assert_eq!(view.scale, 0.0);
        assert!(view.periods[0].bars.iter().all(|b| b.width_pct == 0.0));
    }

    #[test]
    fn test_dashboard_report_summary() {
        let report = dashboard_report(&sample_statements(), &IndicatorThresholds::default());
        let summary = report.summary();

        assert!(summary.contains("自己資本比率 62.5% (good)"));
        assert!(summary.contains("margin 13.3%"));
        assert!(summary.contains("6 cash-flow periods"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overview"]["indicators"][1]["status"], "good");
        assert_eq!(json["cash_flow"]["periods"][0]["bars"][1]["tone"], "outflow");
    }

    #[test]
    fn test_report_carries_explanations() {
        let report = dashboard_report(&sample_statements(), &IndicatorThresholds::default());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["overview"]["explanations"][0]["title"], "貸借対照表とは？");
        assert_eq!(json["overview"]["explanations"][1]["title"], "損益計算書とは？");
        assert!(json["overview"]["explanations"][1]["body"]
            .as_str()
            .unwrap()
            .contains("家計簿の収入と支出"));
        assert!(json["balance"]["description"].as_str().unwrap().starts_with("会社を一軒の家に例えて"));
        assert_eq!(json["balance"]["equity"]["note"], "※資産から借金を引いた残り");
        assert!(json["income"]["description"].as_str().unwrap().starts_with("お店の1年間の売上から"));
        assert_eq!(json["income"]["costs"]["note"], "商品を作る・仕入れるのにかかった費用");

        let guides = &json["cash_flow"]["activities"];
        assert_eq!(guides[0]["summary"], "本業でのお金の出入り");
        assert_eq!(guides[2]["summary"], "お金の調達・返済");
        assert_eq!(guides[1]["examples"][0], "設備・機械の購入");

        // Line items without a note leave the field out
        assert!(json["balance"]["assets"][0].get("note").is_none());
    }

    #[test]
    fn test_cash_flow_bars_follow_activity_order() {
        let statements = sample_statements();
        let view = cash_flow_view(&statements);

        for (period, flows) in view.periods.iter().zip(&statements.cash_flow) {
            let amounts: Vec<f64> = period.bars.iter().map(|b| b.amount).collect();
            assert_eq!(amounts, flows.flows().to_vec());
            assert_eq!(period.bars[2].activity, Activity::Financing);
        }
    }
}
