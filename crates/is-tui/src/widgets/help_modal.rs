use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

const BINDINGS: &[(&str, &str)] = &[
    ("1-4", "Select tab"),
    ("Tab / Shift-Tab", "Next / previous tab"),
    ("j / k", "Move selection"),
    ("p", "Poll data sources (simulated refresh)"),
    ("a", "Run AI deep analysis"),
    ("?", "Toggle this help"),
    ("q / Ctrl-C", "Quit"),
];

/// Centered key-binding overlay.
pub fn render(frame: &mut Frame) {
    let area = centered_rect(46, (BINDINGS.len() + 4) as u16, frame.area());

    let lines: Vec<Line> = BINDINGS
        .iter()
        .map(|(keys, what)| {
            Line::from(vec![
                Span::styled(
                    format!(" {keys:<16}"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(*what),
            ])
        })
        .collect();

    let modal = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help (Esc to close) "),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(modal, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}
