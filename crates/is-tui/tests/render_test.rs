//! Render tests for the four dashboard tabs.
//!
//! Each test draws the full UI into a 120x40 test backend and checks that
//! the expected content shows up in the buffer.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

// Include binary-crate modules via path for testing.
#[path = "../src/app.rs"]
mod app;
#[path = "../src/tabs/mod.rs"]
mod tabs;
#[path = "../src/ui.rs"]
mod ui;
#[path = "../src/widgets/mod.rs"]
mod widgets;

use app::{App, Tab, WorkerMsg};
use chrono::NaiveDate;
use is_api_types::{AnalysisResponse, DataRecord, Insight, InsightKind, Product, Region};

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn render_to_string(app: &App) -> String {
    let backend = TestBackend::new(WIDTH, HEIGHT);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::new();
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn assert_contains(output: &str, needle: &str) {
    assert!(
        output.contains(needle),
        "Expected to find {:?} in rendered output.\nFull output:\n{}",
        needle,
        output
    );
}

fn assert_contains_all(output: &str, needles: &[&str]) {
    for needle in needles {
        assert_contains(output, needle);
    }
}

fn sample_analysis() -> AnalysisResponse {
    AnalysisResponse {
        summary: "Revenue concentration in the North region is increasing.".to_string(),
        insights: vec![
            Insight {
                title: "North region momentum".to_string(),
                description: "North accounts for a growing share of sales.".to_string(),
                kind: InsightKind::Trend,
                confidence: 0.88,
            },
            Insight {
                title: "Inventory shortfall".to_string(),
                description: "Edge Gateway stock is below the reorder point.".to_string(),
                kind: InsightKind::Warning,
                confidence: 0.65,
            },
            Insight {
                title: "Bundle opportunity".to_string(),
                description: "Cloud Connect attaches well to Security Core.".to_string(),
                kind: InsightKind::Opportunity,
                confidence: 0.72,
            },
        ],
        recommendations: vec![
            "Expand the northern sales team.".to_string(),
            "Restock Edge Gateway.".to_string(),
        ],
        suggested_charts: vec!["bar".to_string(), "line".to_string()],
    }
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

#[test]
fn render_tab_bar_shows_title_and_all_tabs() {
    let app = App::new();
    let output = render_to_string(&app);
    assert_contains(&output, "InsightStream");
    assert_contains_all(
        &output,
        &["1:Dashboard", "2:Sources", "3:Analysis", "4:Reports"],
    );
}

#[test]
fn render_status_bar_shows_key_hints() {
    let app = App::new();
    let output = render_to_string(&app);
    assert_contains_all(&output, &["[1-4]", "[p]", "[a]", "[?]", "[q]", "Quit"]);
}

#[test]
fn render_status_bar_reflects_activity_flags() {
    let mut app = App::new();
    app.is_polling = true;
    app.is_analyzing = true;
    let output = render_to_string(&app);
    assert_contains(&output, "Polling...");
    assert_contains(&output, "Analyzing...");
}

// ---------------------------------------------------------------------------
// Tab 1: Dashboard
// ---------------------------------------------------------------------------

#[test]
fn render_dashboard_shows_kpi_cards() {
    let app = App::new();
    let output = render_to_string(&app);
    assert_contains_all(
        &output,
        &["Total Revenue", "Profit Margin", "Connected DBs", "Records"],
    );
}

#[test]
fn render_dashboard_shows_record_count_kpi() {
    let app = App::new();
    let output = render_to_string(&app);
    assert_contains(&output, "100");
    assert_contains(&output, "2 Active");
}

#[test]
fn render_dashboard_shows_charts_and_buffer() {
    let app = App::new();
    let output = render_to_string(&app);
    assert_contains(&output, "Revenue Trend");
    assert_contains(&output, "Inventory by Region");
    assert_contains(&output, "Live Polling Buffer");
    assert_contains(&output, "#SQL-1");
    assert_contains(&output, "SYNCED");
}

// ---------------------------------------------------------------------------
// Tab 2: Sources
// ---------------------------------------------------------------------------

#[test]
fn render_sources_shows_both_systems() {
    let mut app = App::new();
    app.select_tab(Tab::Sources);
    let output = render_to_string(&app);
    assert_contains_all(
        &output,
        &[
            "Main_Production_SQL",
            "Legacy_Sales_Access",
            "SQL Server",
            "MS Access",
        ],
    );
}

#[test]
fn render_sources_shows_status_and_counts() {
    let mut app = App::new();
    app.select_tab(Tab::Sources);
    let output = render_to_string(&app);
    assert_contains(&output, "CONNECTED");
    assert_contains(&output, "15,420 items");
    assert_contains(&output, "4,210 items");
}

#[test]
fn render_sources_shows_polling_indicator() {
    let mut app = App::new();
    app.select_tab(Tab::Sources);
    app.is_polling = true;
    let output = render_to_string(&app);
    assert_contains(&output, "polling...");
}

#[test]
fn render_sources_updated_after_poll_completion() {
    let mut app = App::new();
    app.select_tab(Tab::Sources);
    assert!(app.begin_poll());
    app.apply(WorkerMsg::PollCompleted {
        records: is_core::generate_records(),
        completed_at: "2023-11-21 10:00:00".to_string(),
    });
    let output = render_to_string(&app);
    assert_contains(&output, "2023-11-21 10:00:00");
}

// ---------------------------------------------------------------------------
// Tab 3: Analysis
// ---------------------------------------------------------------------------

#[test]
fn render_analysis_empty_state_hints_at_action() {
    let mut app = App::new();
    app.select_tab(Tab::Analysis);
    let output = render_to_string(&app);
    assert_contains(&output, "No AI insights yet");
    assert_contains(&output, "[a]");
}

#[test]
fn render_analysis_in_flight_state() {
    let mut app = App::new();
    app.select_tab(Tab::Analysis);
    app.is_analyzing = true;
    let output = render_to_string(&app);
    assert_contains(&output, "Analyzing...");
}

#[test]
fn render_analysis_shows_full_result() {
    let mut app = App::new();
    app.apply(WorkerMsg::AnalysisSettled(Ok(sample_analysis())));
    assert_eq!(app.tab, Tab::Analysis);

    let output = render_to_string(&app);
    assert_contains(&output, "Executive Summary");
    assert_contains(&output, "Revenue concentration in the North region");
    assert_contains(&output, "Key Insights (3)");
    assert_contains_all(&output, &["[TREND]", "[WARNING]", "[OPPORTUNITY]"]);
    assert_contains_all(
        &output,
        &["North region momentum", "Inventory shortfall", "Bundle opportunity"],
    );
    assert_contains(&output, "88%");
    assert_contains(&output, "Expand the northern sales team.");
    assert_contains(&output, "Suggested charts: bar, line");
}

// ---------------------------------------------------------------------------
// Tab 4: Reports
// ---------------------------------------------------------------------------

#[test]
fn render_reports_shows_header_and_breakdown() {
    let mut app = App::new();
    app.select_tab(Tab::Reports);
    let output = render_to_string(&app);
    assert_contains(&output, "Operational Performance Report");
    assert_contains(&output, "ISR-2023-X92");
    assert_contains(&output, "Revenue Breakdown by Region");
    assert_contains_all(&output, &["Region", "Revenue", "Profit", "Margin"]);
}

#[test]
fn render_reports_aggregates_the_whole_batch() {
    let mut app = App::new();
    let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    // Eleven North rows and one South row in position 12; the South line
    // only appears if the report sums every record, not a leading window.
    let mut records: Vec<DataRecord> = (1..=12)
        .map(|id| DataRecord {
            id,
            date,
            region: Region::North,
            product: Product::CloudConnect,
            sales: 1000,
            profit: 250,
            inventory: 5,
        })
        .collect();
    records[11].region = Region::South;
    records[11].sales = 4000;
    records[11].profit = 800;
    app.records = records;
    app.select_tab(Tab::Reports);

    let output = render_to_string(&app);
    // North: 11 x 1000 sales, 11 x 250 profit, 25.0% margin.
    assert_contains(&output, "$11,000");
    assert_contains(&output, "25.0%");
    // South: the final row, 800 / 4000 = 20.0% margin.
    assert_contains(&output, "South");
    assert_contains(&output, "$4,000");
    assert_contains(&output, "20.0%");
    assert_contains(&output, "Aggregates 12 records");
}

#[test]
fn render_reports_footer_counts_records_and_sources() {
    let mut app = App::new();
    app.select_tab(Tab::Reports);
    let output = render_to_string(&app);
    assert_contains(&output, "Aggregates 100 records polled from 2 upstream systems");
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

#[test]
fn render_help_modal_lists_bindings() {
    let mut app = App::new();
    app.on_key(key(KeyCode::Char('?')));
    let output = render_to_string(&app);
    assert_contains(&output, "Help");
    assert_contains_all(&output, &["Select tab", "Poll data sources", "Quit"]);
}

#[test]
fn render_toast_after_poll_completion() {
    let mut app = App::new();
    assert!(app.begin_poll());
    app.apply(WorkerMsg::PollCompleted {
        records: is_core::generate_records(),
        completed_at: "2023-11-21 10:00:00".to_string(),
    });
    let output = render_to_string(&app);
    assert_contains(&output, "Sources synced");
}

// ---------------------------------------------------------------------------
// Robustness
// ---------------------------------------------------------------------------

#[test]
fn render_all_tabs_no_panic() {
    let mut app = App::new();
    for tab in Tab::ALL {
        app.select_tab(tab);
        let output = render_to_string(&app);
        assert!(!output.trim().is_empty());
    }
}

#[test]
fn render_all_tabs_at_minimum_size() {
    let mut app = App::new();
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    for tab in Tab::ALL {
        app.select_tab(tab);
        terminal.draw(|frame| ui::render(frame, &app)).unwrap();
    }
}
