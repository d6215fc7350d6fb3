//! Background workers for the two suspension points: the simulated poll
//! round-trip and the remote analysis call. Each worker is a plain
//! `std::thread` that sends exactly one completion message over `flume`,
//! which is what guarantees the in-progress flags always clear.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Local;
use flume::Sender;

use is_api_types::{AnalysisResponse, DataRecord};
use is_core::config::ConfigError;
use is_core::{generate_records, AnalysisConfig, Config};
use is_intelligence::{AnalysisError, DataAnalyzer, GeminiProvider};

use crate::app::{App, Command, WorkerMsg};

/// Dispatch a key-requested command, honouring the action-layer guards.
pub fn dispatch(command: Command, app: &mut App, tx: &Sender<WorkerMsg>, config: &Config) {
    match command {
        Command::Poll => spawn_poll(app, tx, Duration::from_millis(config.ui.poll_delay_ms)),
        Command::RunAnalysis => spawn_analysis(app, tx, config),
    }
}

/// Simulated upstream refresh: wait out the round-trip, then deliver a
/// fresh batch stamped with the completion time. A no-op while a poll is
/// already in flight.
pub fn spawn_poll(app: &mut App, tx: &Sender<WorkerMsg>, delay: Duration) {
    if !app.begin_poll() {
        return;
    }
    let tx = tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let records = generate_records();
        let completed_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let _ = tx.send(WorkerMsg::PollCompleted {
            records,
            completed_at,
        });
    });
}

/// Ship the current record snapshot to the analyzer on a worker thread.
/// A no-op while an analysis is already in flight.
pub fn spawn_analysis(app: &mut App, tx: &Sender<WorkerMsg>, config: &Config) {
    let Some(snapshot) = app.begin_analysis() else {
        return;
    };
    let tx = tx.clone();
    let analysis_config = config.analysis.clone();
    // Resolved here, at first use — not at startup.
    let api_key = config.resolve_api_key();

    thread::spawn(move || {
        let result = run_analysis(&snapshot, analysis_config, api_key);
        let _ = tx.send(WorkerMsg::AnalysisSettled(result));
    });
}

fn run_analysis(
    records: &[DataRecord],
    config: AnalysisConfig,
    api_key: Result<String, ConfigError>,
) -> Result<AnalysisResponse, AnalysisError> {
    let api_key = api_key?;
    let analyzer = DataAnalyzer::new(Arc::new(GeminiProvider::new(api_key)), config);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AnalysisError::Http(format!("failed to start async runtime: {e}")))?;

    runtime.block_on(analyzer.analyze(records))
}
