//! Synthetic record batches and the static source descriptors.
//!
//! Stands in for real SQL Server / MS Access connectivity: every poll
//! replaces the whole working set with a fresh batch. No failure path by
//! construction.

use chrono::{Days, NaiveDate};
use rand::Rng;

use is_api_types::{
    ConnectionStatus, DataRecord, DataSource, DatabaseKind, Product, Region,
};

/// Every generated batch has exactly this many rows.
pub const RECORD_BATCH_LEN: usize = 100;

/// Value bounds, half-open. Sales and profit are strictly positive.
pub const SALES_RANGE: std::ops::Range<u32> = 1000..6000;
pub const PROFIT_RANGE: std::ops::Range<u32> = 200..2200;
pub const INVENTORY_RANGE: std::ops::Range<u32> = 0..1000;

/// Generate a fresh batch of [`RECORD_BATCH_LEN`] records.
///
/// Ids are sequential from 1, dates consecutive from 2023-01-01; all other
/// fields are drawn uniformly from their declared bounds.
pub fn generate_records() -> Vec<DataRecord> {
    let mut rng = rand::rng();
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();

    (0..RECORD_BATCH_LEN)
        .map(|i| DataRecord {
            id: i as u32 + 1,
            date: start
                .checked_add_days(Days::new(i as u64))
                .unwrap_or(start),
            region: Region::ALL[rng.random_range(0..Region::ALL.len())],
            product: Product::ALL[rng.random_range(0..Product::ALL.len())],
            sales: rng.random_range(SALES_RANGE),
            profit: rng.random_range(PROFIT_RANGE),
            inventory: rng.random_range(INVENTORY_RANGE),
        })
        .collect()
}

/// The two simulated upstream systems.
pub fn default_sources() -> Vec<DataSource> {
    vec![
        DataSource {
            id: "src-1".to_string(),
            name: "Main_Production_SQL".to_string(),
            kind: DatabaseKind::SqlServer,
            status: ConnectionStatus::Connected,
            last_sync: "2023-11-20 14:30".to_string(),
            record_count: 15_420,
        },
        DataSource {
            id: "src-2".to_string(),
            name: "Legacy_Sales_Access".to_string(),
            kind: DatabaseKind::MsAccess,
            status: ConnectionStatus::Connected,
            last_sync: "2023-11-19 09:15".to_string(),
            record_count: 4_210,
        },
    ]
}
