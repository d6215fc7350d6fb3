mod app;
mod tabs;
mod ui;
mod widgets;
mod worker;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use is_core::Config;

use crate::app::{App, WorkerMsg};

fn main() -> Result<()> {
    is_telemetry::init_logging("is-tui", "warn");

    let config = Config::load().context("failed to load configuration")?;

    // Restore the terminal before the panic message prints, or it is lost
    // to the alternate screen.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run(&config);

    restore_terminal()?;
    result
}

/// Run the interactive dashboard with the standard crossterm backend.
fn run(config: &Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let (tx, rx) = flume::unbounded::<WorkerMsg>();
    let tick = Duration::from_millis(config.ui.tick_ms);

    loop {
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }
        app.prune_toasts();

        terminal.draw(|frame| {
            ui::render(frame, &app);
        })?;

        if ct_event::poll(tick)? {
            if let Event::Key(key) = ct_event::read()? {
                if let Some(command) = app.on_key(key) {
                    worker::dispatch(command, &mut app, &tx, config);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    Ok(())
}
