use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use is_api_types::{AnalysisResponse, InsightKind};

/// Tab 3: the current analysis, or a hint for running one.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match &app.analysis {
        None => render_empty_state(frame, app, area),
        Some(analysis) => render_analysis(frame, app, analysis, area),
    }
}

fn render_empty_state(frame: &mut Frame, app: &App, area: Rect) {
    let message = if app.is_analyzing {
        "Analyzing... scanning the polling buffer for patterns"
    } else {
        "No AI insights yet.\n\nPress [a] to run a deep analysis of the current record batch."
    };

    let hint = Paragraph::new(message)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" AI Insights "));

    frame.render_widget(hint, area);
}

fn render_analysis(frame: &mut Frame, app: &App, analysis: &AnalysisResponse, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // summary
            Constraint::Min(6),    // insights
            Constraint::Length(8), // recommendations + charts
        ])
        .split(area);

    let summary = Paragraph::new(analysis.summary.clone())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Executive Summary "),
        );
    frame.render_widget(summary, chunks[0]);

    render_insights(frame, app, analysis, chunks[1]);
    render_recommendations(frame, analysis, chunks[2]);
}

fn render_insights(frame: &mut Frame, app: &App, analysis: &AnalysisResponse, area: Rect) {
    let items: Vec<ListItem> = analysis
        .insights
        .iter()
        .enumerate()
        .map(|(i, insight)| {
            let color = kind_color(insight.kind);
            let header = Line::from(vec![
                Span::styled(
                    format!("[{}] ", insight.kind.as_str()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    insight.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {:.0}%", insight.confidence * 100.0),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            let body = Line::from(Span::raw(format!("    {}", insight.description)));

            let item = ListItem::new(vec![header, body]);
            if i == app.selected_index {
                item.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Key Insights ({}) ", analysis.insights.len())),
    );
    frame.render_widget(list, area);
}

fn render_recommendations(frame: &mut Frame, analysis: &AnalysisResponse, area: Rect) {
    let mut lines: Vec<Line> = analysis
        .recommendations
        .iter()
        .map(|rec| {
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Cyan)),
                Span::raw(rec.clone()),
            ])
        })
        .collect();

    if !analysis.suggested_charts.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Suggested charts: ", Style::default().fg(Color::DarkGray)),
            Span::raw(analysis.suggested_charts.join(", ")),
        ]));
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Recommendations "),
    );
    frame.render_widget(panel, area);
}

fn kind_color(kind: InsightKind) -> Color {
    match kind {
        InsightKind::Trend => Color::Blue,
        InsightKind::Warning => Color::Yellow,
        InsightKind::Opportunity => Color::Green,
    }
}
