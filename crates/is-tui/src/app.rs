use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use is_api_types::{AnalysisResponse, ConnectionStatus, DataRecord, DataSource};
use is_core::{default_sources, generate_records};
use is_intelligence::AnalysisError;

use crate::widgets::toast::{Toast, ToastLevel};

/// Tab names displayed in the header, in key order (1-4).
pub const TAB_NAMES: &[&str] = &["Dashboard", "Sources", "Analysis", "Reports"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Sources,
    Analysis,
    Reports,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Dashboard, Tab::Sources, Tab::Analysis, Tab::Reports];

    pub fn index(self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Sources => 1,
            Tab::Analysis => 2,
            Tab::Reports => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::ALL.get(index).copied()
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Side-effectful actions a key press can request. The event loop hands
/// these to the worker layer; pure state transitions never produce one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Poll,
    RunAnalysis,
}

/// Completion messages from background workers, drained on the UI thread.
#[derive(Debug)]
pub enum WorkerMsg {
    PollCompleted {
        records: Vec<DataRecord>,
        completed_at: String,
    },
    AnalysisSettled(Result<AnalysisResponse, AnalysisError>),
}

// ---------------------------------------------------------------------------
// App — the view-state controller
// ---------------------------------------------------------------------------

/// All session state. The render layer reads it; workers never touch it —
/// their results come back as [`WorkerMsg`] and are applied here, so every
/// visible update is one atomic step on the UI thread.
pub struct App {
    pub tab: Tab,
    pub records: Vec<DataRecord>,
    pub sources: Vec<DataSource>,
    /// At most one analysis at a time; replaced wholesale on success.
    pub analysis: Option<AnalysisResponse>,
    pub is_polling: bool,
    pub is_analyzing: bool,

    pub should_quit: bool,
    pub show_help: bool,
    pub selected_index: usize,
    pub toasts: Vec<Toast>,
}

impl App {
    /// Initialize the session: populate the record batch and the source
    /// descriptors. Runs exactly once, at construction.
    pub fn new() -> Self {
        Self {
            tab: Tab::Dashboard,
            records: generate_records(),
            sources: default_sources(),
            analysis: None,
            is_polling: false,
            is_analyzing: false,
            should_quit: false,
            show_help: false,
            selected_index: 0,
            toasts: Vec::new(),
        }
    }

    /// Handle one key event. Pure transitions happen in place; `Poll` and
    /// `RunAnalysis` are returned for the caller to dispatch, and are
    /// suppressed here while the matching action is already in flight.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<Command> {
        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }

            KeyCode::Char(c @ '1'..='4') => {
                let idx = (c as usize) - ('1' as usize);
                if let Some(tab) = Tab::from_index(idx) {
                    self.select_tab(tab);
                }
            }
            KeyCode::Tab => self.select_tab(self.tab.next()),
            KeyCode::BackTab => self.select_tab(self.tab.prev()),

            KeyCode::Char('j') | KeyCode::Down => {
                let max = self.current_list_len();
                if max > 0 && self.selected_index < max - 1 {
                    self.selected_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }

            KeyCode::Char('?') => self.show_help = true,

            KeyCode::Char('p') if !self.is_polling => return Some(Command::Poll),
            KeyCode::Char('a') if !self.is_analyzing => return Some(Command::RunAnalysis),

            _ => {}
        }
        None
    }

    /// Pure tab transition; reselecting the active tab is a no-op.
    pub fn select_tab(&mut self, tab: Tab) {
        if tab != self.tab {
            self.tab = tab;
            self.selected_index = 0;
        }
    }

    /// Claim the poll action. Returns false while a poll is in flight —
    /// the guard lives here, not in the key handling or the UI chrome.
    pub fn begin_poll(&mut self) -> bool {
        if self.is_polling {
            return false;
        }
        self.is_polling = true;
        true
    }

    /// Claim the analysis action and snapshot the records to ship.
    /// Returns `None` while an analysis is in flight.
    pub fn begin_analysis(&mut self) -> Option<Vec<DataRecord>> {
        if self.is_analyzing {
            return None;
        }
        self.is_analyzing = true;
        Some(self.records.clone())
    }

    /// Apply one worker completion message.
    pub fn apply(&mut self, msg: WorkerMsg) {
        match msg {
            WorkerMsg::PollCompleted {
                records,
                completed_at,
            } => {
                self.records = records;
                for source in &mut self.sources {
                    source.last_sync = completed_at.clone();
                    source.status = ConnectionStatus::Connected;
                }
                self.is_polling = false;
                self.push_toast(Toast::new("Sources synced", ToastLevel::Success));
            }

            WorkerMsg::AnalysisSettled(result) => {
                // Cleared before inspecting the outcome, so the UI can
                // never stick in a loading state after an error.
                self.is_analyzing = false;

                match result {
                    Ok(analysis) => {
                        self.analysis = Some(analysis);
                        self.select_tab(Tab::Analysis);
                        self.push_toast(Toast::new("Analysis complete", ToastLevel::Success));
                    }
                    Err(err) => {
                        if err.is_contract_violation() {
                            tracing::warn!(error = %err, "analysis returned nonconforming data");
                        } else {
                            tracing::error!(error = %err, "analysis request failed");
                        }
                        // Previous analysis and active tab stay untouched.
                        self.push_toast(Toast::new(
                            format!("AI analysis failed: {err}"),
                            ToastLevel::Error,
                        ));
                    }
                }
            }
        }
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Drop expired toasts; called once per frame.
    pub fn prune_toasts(&mut self) {
        self.toasts.retain(|t| !t.expired());
    }

    fn current_list_len(&self) -> usize {
        match self.tab {
            Tab::Dashboard => self.records.len().min(5),
            Tab::Sources => self.sources.len(),
            Tab::Analysis => self
                .analysis
                .as_ref()
                .map(|a| a.insights.len())
                .unwrap_or(0),
            Tab::Reports => 0,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
