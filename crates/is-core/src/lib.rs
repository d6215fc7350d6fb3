//! Core support for InsightStream: configuration and the mock data layer.

pub mod config;
pub mod mockdata;

pub use config::{AnalysisConfig, Config, ConfigError, UiConfig};
pub use mockdata::{default_sources, generate_records, RECORD_BATCH_LEN};
