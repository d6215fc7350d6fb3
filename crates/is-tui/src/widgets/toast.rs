use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    fn color(self) -> Color {
        match self {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Success => Color::Green,
            ToastLevel::Error => Color::Red,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastLevel::Info => "i",
            ToastLevel::Success => "*",
            ToastLevel::Error => "!",
        }
    }
}

/// Transient notification; errors linger longer than confirmations.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    created: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        let duration = match level {
            ToastLevel::Error => Duration::from_secs(8),
            _ => Duration::from_secs(4),
        };
        Self {
            message: message.into(),
            level,
            created: Instant::now(),
            duration,
        }
    }

    pub fn expired(&self) -> bool {
        self.created.elapsed() >= self.duration
    }
}

const MAX_VISIBLE: usize = 4;
const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 3;

/// Render the newest toasts stacked in the top-right corner.
pub fn render(frame: &mut Frame, toasts: &[Toast]) {
    let area = frame.area();
    if area.width < TOAST_WIDTH + 2 {
        return;
    }

    for (i, toast) in toasts.iter().rev().take(MAX_VISIBLE).enumerate() {
        let y = area.y + 1 + (i as u16) * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x + area.width - TOAST_WIDTH - 1,
            y,
            width: TOAST_WIDTH,
            height: TOAST_HEIGHT,
        };

        let color = toast.level.color();
        let body = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", toast.level.icon()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(toast.message.clone()),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}
