use std::collections::BTreeMap;

use chrono::Local;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;
use crate::tabs::dashboard::group_thousands;

/// Tab 4: operational performance report aggregated from the current batch.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // report header
            Constraint::Min(6),    // regional breakdown
            Constraint::Length(4), // footer
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_regional_breakdown(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let generated = Local::now().format("%Y-%m-%d").to_string();
    let lines = vec![
        Line::from(Span::styled(
            "Operational Performance Report",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("Generated: ", Style::default().fg(Color::DarkGray)),
            Span::raw(generated),
            Span::styled("   Report ID: ", Style::default().fg(Color::DarkGray)),
            Span::raw("ISR-2023-X92"),
        ]),
    ];
    let header =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Reports "));
    frame.render_widget(header, area);
}

fn render_regional_breakdown(frame: &mut Frame, app: &App, area: Rect) {
    // Region -> (sales, profit), in region display order.
    let mut totals: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for record in &app.records {
        let entry = totals.entry(record.region.as_str()).or_insert((0, 0));
        entry.0 += u64::from(record.sales);
        entry.1 += u64::from(record.profit);
    }

    let header = Row::new(["Region", "Revenue", "Profit", "Margin"]).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = totals
        .iter()
        .map(|(region, (sales, profit))| {
            let margin = if *sales > 0 {
                *profit as f64 / *sales as f64 * 100.0
            } else {
                0.0
            };
            Row::new(vec![
                Cell::from(*region),
                Cell::from(format!("${}", group_thousands(*sales))),
                Cell::from(format!("${}", group_thousands(*profit))),
                Cell::from(format!("{margin:.1}%")),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Revenue Breakdown by Region "),
    );

    frame.render_widget(table, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = format!(
        "Aggregates {} records polled from {} upstream systems via the InsightStream middleware.",
        app.records.len(),
        app.sources.len()
    );
    let footer = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
