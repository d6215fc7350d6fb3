//! Shared data contract for InsightStream.
//!
//! Pure serde types exchanged between the mock data layer, the analysis
//! client and the TUI. Wire names match the upstream dashboard contract
//! (`type`, `suggestedCharts`, `SQL_SERVER`, ...), so a recorded analysis
//! payload deserializes unchanged.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record dimensions
// ---------------------------------------------------------------------------

/// Sales region of a record. Fixed set, serialized as the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    North,
    South,
    East,
    West,
    Central,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::North,
        Region::South,
        Region::East,
        Region::West,
        Region::Central,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::South => "South",
            Region::East => "East",
            Region::West => "West",
            Region::Central => "Central",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product line of a record. Fixed set, serialized as the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "Enterprise Suite")]
    EnterpriseSuite,
    #[serde(rename = "Cloud Connect")]
    CloudConnect,
    #[serde(rename = "Edge Gateway")]
    EdgeGateway,
    #[serde(rename = "Security Core")]
    SecurityCore,
}

impl Product {
    pub const ALL: [Product; 4] = [
        Product::EnterpriseSuite,
        Product::CloudConnect,
        Product::EdgeGateway,
        Product::SecurityCore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Product::EnterpriseSuite => "Enterprise Suite",
            Product::CloudConnect => "Cloud Connect",
            Product::EdgeGateway => "Edge Gateway",
            Product::SecurityCore => "Security Core",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DataRecord
// ---------------------------------------------------------------------------

/// One synthetic business transaction row.
///
/// Immutable once created; the generator replaces whole batches, rows are
/// never merged or patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Sequential per batch, starting at 1.
    pub id: u32,
    pub date: NaiveDate,
    pub region: Region,
    pub product: Product,
    pub sales: u32,
    pub profit: u32,
    pub inventory: u32,
}

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// Kind of simulated upstream database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseKind {
    SqlServer,
    MsAccess,
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::SqlServer => f.write_str("SQL Server"),
            DatabaseKind::MsAccess => f.write_str("MS Access"),
        }
    }
}

/// Connection state of a simulated upstream database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Polling,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "CONNECTED",
            ConnectionStatus::Disconnected => "DISCONNECTED",
            ConnectionStatus::Polling => "POLLING",
        }
    }
}

/// Descriptor of a simulated upstream system. Not a live connection: only
/// the poll action touches it, rewriting `last_sync` and forcing
/// `status = Connected` across the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String,
    pub name: String,
    pub kind: DatabaseKind,
    pub status: ConnectionStatus,
    /// Display string, e.g. "2023-11-20 14:30".
    pub last_sync: String,
    pub record_count: u64,
}

// ---------------------------------------------------------------------------
// Analysis result types
// ---------------------------------------------------------------------------

/// Category of a finding returned by the analysis service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    Trend,
    Warning,
    Opportunity,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Trend => "TREND",
            InsightKind::Warning => "WARNING",
            InsightKind::Opportunity => "OPPORTUNITY",
        }
    }
}

/// One categorized, confidence-scored finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Score in [0, 1]. Range is enforced by the parser, not here.
    pub confidence: f64,
}

/// Aggregate result of one analysis request.
///
/// Held as the single "current analysis" value and replaced wholesale by
/// the next successful call; never partially updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub summary: String,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
    #[serde(rename = "suggestedCharts")]
    pub suggested_charts: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_display_names() {
        let record = DataRecord {
            id: 1,
            date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            region: Region::Central,
            product: Product::EdgeGateway,
            sales: 4200,
            profit: 900,
            inventory: 31,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["region"], "Central");
        assert_eq!(json["product"], "Edge Gateway");
        assert_eq!(json["date"], "2023-01-01");
    }

    #[test]
    fn source_enums_use_upstream_wire_names() {
        let json = serde_json::to_string(&DatabaseKind::SqlServer).unwrap();
        assert_eq!(json, "\"SQL_SERVER\"");
        let json = serde_json::to_string(&ConnectionStatus::Disconnected).unwrap();
        assert_eq!(json, "\"DISCONNECTED\"");
    }

    #[test]
    fn insight_kind_round_trips_wire_names() {
        for kind in [
            InsightKind::Trend,
            InsightKind::Warning,
            InsightKind::Opportunity,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: InsightKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn analysis_response_uses_camel_case_chart_field() {
        let resp = AnalysisResponse {
            summary: "ok".into(),
            insights: vec![Insight {
                title: "t".into(),
                description: "d".into(),
                kind: InsightKind::Trend,
                confidence: 0.8,
            }],
            recommendations: vec!["r".into()],
            suggested_charts: vec!["bar".into()],
        };

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("suggestedCharts").is_some());
        assert_eq!(json["insights"][0]["type"], "TREND");
    }

    #[test]
    fn analysis_response_rejects_missing_required_field() {
        // No `summary` — the contract requires all four top-level fields.
        let json = r#"{"insights":[],"recommendations":[],"suggestedCharts":[]}"#;
        let parsed: Result<AnalysisResponse, _> = serde_json::from_str(json);
        assert!(parsed.is_err());
    }
}
