use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame, Terminal,
};
use statement_visualizer::{
    balance_view, cash_flow_view, income_view, overview_view, Activity, BalanceView, BarTone,
    CashFlowView, FinancialStatements, IncomeView, IndicatorThresholds, LineItem, OverviewView,
    Status, ViewTab,
};
use std::io;

/// Width of a cash-flow bar at 100%, in terminal cells
const FLOW_BAR_CELLS: usize = 30;

pub struct App {
    pub current_tab: ViewTab,
    pub overview: OverviewView,
    pub balance: BalanceView,
    pub income: IncomeView,
    pub cash_flow: CashFlowView,
}

impl App {
    pub fn new(statements: &FinancialStatements, thresholds: &IndicatorThresholds) -> Self {
        Self {
            current_tab: ViewTab::Overview,
            overview: overview_view(statements, thresholds),
            balance: balance_view(&statements.balance_sheet),
            income: income_view(&statements.income_statement),
            cash_flow: cash_flow_view(statements),
        }
    }

    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
    }

    /// Jump with the number keys (1-based).
    pub fn select_tab(&mut self, number: usize) {
        if let Some(tab) = number.checked_sub(1).and_then(|i| ViewTab::ALL.get(i)) {
            self.current_tab = *tab;
        }
    }

    /// Intro line of the current tab.
    pub fn description(&self) -> &'static str {
        match self.current_tab {
            ViewTab::Overview => self.overview.description,
            ViewTab::Balance => self.balance.description,
            ViewTab::Income => self.income.description,
            ViewTab::CashFlow => self.cash_flow.description,
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "UI loop failed");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_tab();
                    } else {
                        app.next_tab();
                    }
                }
                KeyCode::BackTab | KeyCode::Left => app.previous_tab(),
                KeyCode::Right => app.next_tab(),
                KeyCode::Char(c @ '1'..='4') => app.select_tab(c as usize - '0' as usize),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with tabs
            Constraint::Length(1), // Tab description
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let description = Paragraph::new(Line::from(Span::styled(
        format!(" {}", app.description()),
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
    )));
    f.render_widget(description, chunks[1]);

    match app.current_tab {
        ViewTab::Overview => render_overview(f, chunks[2], &app.overview),
        ViewTab::Balance => render_balance(f, chunks[2], &app.balance),
        ViewTab::Income => render_income(f, chunks[2], &app.income),
        ViewTab::CashFlow => render_cash_flow(f, chunks[2], &app.cash_flow),
    }

    render_status_bar(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![];
    for (i, tab) in ViewTab::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *tab == app.current_tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(format!("{} {}", i + 1, tab.title()), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" 財務諸表ビジュアライザー "),
    );

    f.render_widget(header, area);
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Good => Color::Green,
        Status::Medium => Color::Yellow,
        Status::Caution => Color::Red,
    }
}

fn render_overview(f: &mut Frame, area: Rect, view: &OverviewView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(view.indicators.len() as u16 * 2 + 3),
            Constraint::Length(view.scale.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let mut lines = vec![Line::from("")];
    for indicator in &view.indicators {
        let color = status_color(indicator.status);
        lines.push(Line::from(vec![
            Span::styled("  ● ", Style::default().fg(color)),
            Span::styled(
                format!("{:<8}", indicator.name),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:>10}", indicator.display),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(indicator.status.as_str(), Style::default().fg(color)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("      {}", indicator.description),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let health = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" 会社の健康診断 "),
    );
    f.render_widget(health, chunks[0]);

    let rows = view.scale.iter().map(|item| {
        Row::new(vec![
            Cell::from(item.label),
            Cell::from(item.display.clone()).style(Style::default().fg(Color::Yellow)),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(16), Constraint::Length(16)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" 会社の規模感 "),
    );
    f.render_widget(table, chunks[1]);

    let mut lines = vec![];
    for explanation in &view.explanations {
        lines.push(Line::from(Span::styled(
            format!("  {}", explanation.title),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("    {}", explanation.body)));
    }

    let explanations = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" 簡単解説 "),
        );
    f.render_widget(explanations, chunks[2]);
}

fn line_row(item: &LineItem, color: Color) -> Row<'static> {
    Row::new(vec![
        Cell::from(item.label),
        Cell::from(item.display.clone()).style(Style::default().fg(color)),
        Cell::from(item.note.unwrap_or("")).style(Style::default().fg(Color::DarkGray)),
    ])
}

fn amount_table<'a>(title: &'a str, mut rows: Vec<Row<'a>>, total: Option<&LineItem>, color: Color) -> Table<'a> {
    if let Some(item) = total {
        rows.push(line_row(item, color).style(Style::default().fg(color).add_modifier(Modifier::BOLD)));
    }

    Table::new(rows, [Constraint::Length(18), Constraint::Length(14), Constraint::Min(0)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
}

fn render_balance(f: &mut Frame, area: Rect, view: &BalanceView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(columns[1]);

    let assets = amount_table(
        " 家の中身（資産） ",
        view.assets.iter().map(|i| line_row(i, Color::Green)).collect(),
        Some(&view.assets_total),
        Color::Green,
    );
    f.render_widget(assets, columns[0]);

    let liabilities = amount_table(
        " 借金（負債） ",
        view.liabilities.iter().map(|i| line_row(i, Color::Red)).collect(),
        Some(&view.liabilities_total),
        Color::Red,
    );
    f.render_widget(liabilities, right[0]);

    let equity = amount_table(
        " 実質的な財産（純資産） ",
        vec![line_row(&view.equity, Color::Blue)],
        None,
        Color::Blue,
    );
    f.render_widget(equity, right[1]);

    let (mark, mark_color) = if view.check.balanced {
        ("✓", Color::Green)
    } else {
        ("✗", Color::Red)
    };
    let check = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("  {} ", mark), Style::default().fg(mark_color).add_modifier(Modifier::BOLD)),
            Span::styled(view.check.assets.clone(), Style::default().fg(Color::Green)),
            Span::raw(" = "),
            Span::styled(view.check.liabilities.clone(), Style::default().fg(Color::Red)),
            Span::raw(" + "),
            Span::styled(view.check.equity.clone(), Style::default().fg(Color::Blue)),
        ]),
        Line::from(Span::styled(
            format!("    {}", view.check.note),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(mark_color))
            .title(" バランスチェック "),
    );
    f.render_widget(check, rows[1]);
}

fn render_income(f: &mut Frame, area: Rect, view: &IncomeView) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let items = amount_table(
        " 損益計算書 ",
        vec![
            line_row(&view.revenue, Color::Yellow),
            line_row(&view.costs, Color::Yellow),
            line_row(&view.expenses, Color::Yellow),
            line_row(&view.total_costs, Color::Yellow),
            Row::new(vec![
                Cell::from("利益率"),
                Cell::from(view.margin.clone()).style(Style::default().fg(Color::Yellow)),
            ]),
        ],
        Some(&view.profit),
        Color::Yellow,
    );
    f.render_widget(items, columns[0]);

    let mut constraints = vec![Constraint::Length(3); view.waterfall.len()];
    constraints.push(Constraint::Min(0));
    let bars = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(columns[1]);

    let colors = [Color::Green, Color::Blue, Color::Magenta];
    for (i, bar) in view.waterfall.iter().enumerate() {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} {} ", bar.label, bar.display)),
            )
            .gauge_style(Style::default().fg(colors[i % colors.len()]))
            .percent(bar.width_pct.clamp(0.0, 100.0).round() as u16)
            .label(bar.width_label.clone());
        f.render_widget(gauge, bars[i]);
    }
}

fn activity_color(activity: Activity, tone: BarTone) -> Color {
    match (activity, tone) {
        (_, BarTone::Outflow) => Color::Red,
        (Activity::Operating, BarTone::Inflow) => Color::Green,
        (Activity::Investing, BarTone::Inflow) => Color::Yellow,
        (Activity::Financing, BarTone::Inflow) => Color::Blue,
    }
}

/// Text bar proportional to `width_pct`, at most `cells` wide.
fn bar_string(width_pct: f64, cells: usize) -> String {
    let filled = ((width_pct.clamp(0.0, 100.0) / 100.0) * cells as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "·".repeat(cells - filled))
}

fn render_cash_flow(f: &mut Frame, area: Rect, view: &CashFlowView) {
    let mut lines = vec![];
    for period in &view.periods {
        lines.push(Line::from(Span::styled(
            format!("  {}  (純増減 {})", period.label, period.net),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        for bar in &period.bars {
            let color = activity_color(bar.activity, bar.tone);
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(format!("{:<6}", bar.activity.label()), Style::default().fg(Color::White)),
                Span::raw(" "),
                Span::styled(bar_string(bar.width_pct, FLOW_BAR_CELLS), Style::default().fg(color)),
                Span::styled(format!(" {:>10}", bar.display), Style::default().fg(color)),
            ]));
        }
    }

    lines.push(Line::from(""));
    for guide in &view.activities {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}: ", guide.label), Style::default().fg(Color::Yellow)),
            Span::raw(guide.summary),
            Span::styled(
                format!(" ({})", guide.examples.join("、")),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" 月別キャッシュフロー "),
    );

    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect) {
    let status_spans = vec![
        Span::styled(" Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Next | "),
        Span::styled("Shift+Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Prev | "),
        Span::styled("1-4", Style::default().fg(Color::Yellow)),
        Span::raw(" Jump | "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(" Quit"),
    ];

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
