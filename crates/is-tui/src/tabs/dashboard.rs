use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Sparkline, Table};
use ratatui::Frame;

use crate::app::App;
use is_api_types::ConnectionStatus;

/// Tab 1: KPI cards, sales trend, inventory by region, recent records.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // KPI cards
            Constraint::Min(8),     // charts
            Constraint::Length(9),  // recent records table
        ])
        .split(area);

    render_kpi_cards(frame, app, chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_sales_trend(frame, app, charts[0]);
    render_inventory_chart(frame, app, charts[1]);
    render_recent_records(frame, app, chunks[2]);
}

fn render_kpi_cards(frame: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let total_sales: u64 = app.records.iter().map(|r| u64::from(r.sales)).sum();
    let total_profit: u64 = app.records.iter().map(|r| u64::from(r.profit)).sum();
    let margin = if total_sales > 0 {
        total_profit as f64 / total_sales as f64 * 100.0
    } else {
        0.0
    };
    let connected = app
        .sources
        .iter()
        .filter(|s| s.status == ConnectionStatus::Connected)
        .count();

    let cards: [(&str, String, Color); 4] = [
        ("Total Revenue", format!("${}", group_thousands(total_sales)), Color::Green),
        ("Profit Margin", format!("{margin:.1}%"), Color::Cyan),
        ("Connected DBs", format!("{connected} Active"), Color::Blue),
        ("Records", format!("{}", app.records.len()), Color::Magenta),
    ];

    for (i, (title, value, color)) in cards.iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title))
            .border_style(Style::default().fg(*color));
        let text = Paragraph::new(Line::from(Span::styled(
            value.clone(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(text, cols[i]);
    }
}

fn render_sales_trend(frame: &mut Frame, app: &App, area: Rect) {
    let data: Vec<u64> = app
        .records
        .iter()
        .take(15)
        .map(|r| u64::from(r.sales))
        .collect();

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Revenue Trend (simulated SQL polling) "),
        )
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    frame.render_widget(sparkline, area);
}

fn render_inventory_chart(frame: &mut Frame, app: &App, area: Rect) {
    let data: Vec<(String, u64)> = app
        .records
        .iter()
        .take(8)
        .map(|r| (r.region.as_str().to_string(), u64::from(r.inventory)))
        .collect();
    let bars: Vec<(&str, u64)> = data.iter().map(|(name, v)| (name.as_str(), *v)).collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Inventory by Region (MS Access mirror) "),
        )
        .data(&bars)
        .bar_width(7)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    frame.render_widget(chart, area);
}

fn render_recent_records(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Source ID", "Date", "Product", "Region", "Value", "Status"])
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let rows: Vec<Row> = app
        .records
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, r)| {
            let row = Row::new(vec![
                Cell::from(format!("#SQL-{}", r.id)),
                Cell::from(r.date.to_string()),
                Cell::from(r.product.as_str()),
                Cell::from(r.region.as_str()),
                Cell::from(format!("${}", group_thousands(u64::from(r.sales)))),
                Cell::from(Span::styled("SYNCED", Style::default().fg(Color::Green))),
            ]);
            if i == app.selected_index {
                row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(9),
            Constraint::Length(9),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Live Polling Buffer "),
    );

    frame.render_widget(table, area);
}

/// 42390 -> "42,390".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
