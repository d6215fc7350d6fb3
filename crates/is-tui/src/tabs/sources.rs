use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::tabs::dashboard::group_thousands;
use is_api_types::{ConnectionStatus, DataSource};

/// Tab 2: one panel per simulated upstream database.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.sources.is_empty() {
        let empty = Paragraph::new("No data sources configured")
            .block(Block::default().borders(Borders::ALL).title(" Data Sources "));
        frame.render_widget(empty, area);
        return;
    }

    let constraints: Vec<Constraint> = app
        .sources
        .iter()
        .map(|_| Constraint::Ratio(1, app.sources.len() as u32))
        .collect();

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, source) in app.sources.iter().enumerate() {
        render_source_panel(frame, app, source, i, panels[i]);
    }
}

fn render_source_panel(frame: &mut Frame, app: &App, source: &DataSource, index: usize, area: Rect) {
    let status_color = match source.status {
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Disconnected => Color::Red,
        ConnectionStatus::Polling => Color::Yellow,
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Status       ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                source.status.as_str(),
                Style::default().fg(status_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Type         ", Style::default().fg(Color::DarkGray)),
            Span::raw(source.kind.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Last Sync    ", Style::default().fg(Color::DarkGray)),
            Span::raw(source.last_sync.clone()),
        ]),
        Line::from(vec![
            Span::styled("Record Count ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} items", group_thousands(source.record_count))),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            if app.is_polling { "polling..." } else { "" },
            Style::default().fg(Color::Yellow),
        )),
    ];

    let border = if index == app.selected_index {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", source.name)),
    );

    frame.render_widget(panel, area);
}
