use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;

/// Bottom status bar: key hints left, activity + clock right.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let left = vec![
        Span::styled("[1-4]", Style::default().fg(Color::Yellow)),
        Span::raw(" Tabs  "),
        Span::styled("[p]", Style::default().fg(Color::Yellow)),
        Span::raw(if app.is_polling { " Polling... " } else { " Poll  " }),
        Span::styled("[a]", Style::default().fg(Color::Yellow)),
        Span::raw(if app.is_analyzing {
            " Analyzing... "
        } else {
            " Analyze  "
        }),
        Span::styled("[?]", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("[q]", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    let right_text = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let left_len: usize = left.iter().map(|s| s.content.len()).sum();
    let total_width = area.width as usize;
    let padding = total_width.saturating_sub(left_len + right_text.len()).max(1);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(right_text, Style::default().fg(Color::Gray)));

    let bar = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(bar, area);
}
