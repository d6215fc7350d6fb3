//! The insight-request client.
//!
//! Samples a bounded prefix of the record set, sends one structured-output
//! request describing the enterprise-database context, and parses the raw
//! text reply into a validated [`AnalysisResponse`]. Failure yields no
//! result at all — never a degraded one.

use std::sync::Arc;

use serde_json::Value;

use is_api_types::{AnalysisResponse, DataRecord};
use is_core::AnalysisConfig;

use crate::llm::{GenerationRequest, TextGenerator};
use crate::AnalysisError;

/// Upper bound on records transmitted per request, to respect the
/// service's payload/token limits. The full set is never sent.
pub const SAMPLE_CAP: usize = 50;

/// Orchestrates one analysis request against a [`TextGenerator`].
pub struct DataAnalyzer {
    generator: Arc<dyn TextGenerator>,
    config: AnalysisConfig,
}

impl DataAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>, config: AnalysisConfig) -> Self {
        Self { generator, config }
    }

    /// Run one analysis over `records`.
    ///
    /// Exactly one outbound call per invocation; no caching, no retry.
    pub async fn analyze(
        &self,
        records: &[DataRecord],
    ) -> Result<AnalysisResponse, AnalysisError> {
        let sample = &records[..records.len().min(SAMPLE_CAP)];

        let request = GenerationRequest {
            instruction: build_prompt(sample)?,
            model: self.config.model.clone(),
            max_output_tokens: self.config.max_output_tokens,
            temperature: self.config.temperature,
            response_schema: Some(response_schema()),
        };

        tracing::debug!(
            sample_len = sample.len(),
            total = records.len(),
            model = %request.model,
            "requesting analysis"
        );

        let response = self.generator.generate(&request).await?;

        tracing::debug!(
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "analysis response received"
        );

        parse_analysis(&response.text)
    }
}

/// Instruction text with the serialized sample embedded.
pub(crate) fn build_prompt(sample: &[DataRecord]) -> Result<String, AnalysisError> {
    let snippet = serde_json::to_string(sample)
        .map_err(|e| AnalysisError::Parse(format!("failed to serialize record sample: {e}")))?;

    Ok(format!(
        "Analyze this dataset from our enterprise databases (SQL Server/MS Access). \
         Data snippet: {snippet}. \
         Provide a comprehensive analysis including a summary, key insights, \
         and business recommendations."
    ))
}

/// The strict output contract: all four top-level fields required, each
/// insight requires all four of its fields, `type` limited to the three
/// known categories.
pub fn response_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "insights": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "type": {
                            "type": "STRING",
                            "enum": ["TREND", "WARNING", "OPPORTUNITY"]
                        },
                        "confidence": { "type": "NUMBER" }
                    },
                    "required": ["title", "description", "type", "confidence"]
                }
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "suggestedCharts": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["summary", "insights", "recommendations", "suggestedCharts"]
    })
}

/// Parse the raw service text into the typed response.
///
/// Anything nonconforming — malformed JSON, a missing required field, an
/// unknown insight category, a confidence outside [0, 1] — becomes a
/// [`AnalysisError::Parse`], logged as a contract violation.
pub fn parse_analysis(text: &str) -> Result<AnalysisResponse, AnalysisError> {
    let parsed: AnalysisResponse = serde_json::from_str(text).map_err(|e| {
        tracing::warn!(error = %e, "analysis service violated the output contract");
        AnalysisError::Parse(e.to_string())
    })?;

    for insight in &parsed.insights {
        if !(0.0..=1.0).contains(&insight.confidence) {
            tracing::warn!(
                confidence = insight.confidence,
                title = %insight.title,
                "analysis service violated the output contract"
            );
            return Err(AnalysisError::Parse(format!(
                "confidence {} outside [0, 1]",
                insight.confidence
            )));
        }
    }

    Ok(parsed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;
    use chrono::NaiveDate;
    use is_api_types::{Product, Region};

    fn records(n: usize) -> Vec<DataRecord> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        (0..n)
            .map(|i| DataRecord {
                id: i as u32 + 1,
                date: start,
                region: Region::North,
                product: Product::CloudConnect,
                sales: 1500,
                profit: 300,
                inventory: 10,
            })
            .collect()
    }

    fn analyzer(mock: Arc<MockGenerator>) -> DataAnalyzer {
        DataAnalyzer::new(mock, AnalysisConfig::default())
    }

    const VALID_RESPONSE: &str = r#"{
        "summary": "Sales are stable across regions.",
        "insights": [{
            "title": "Northern growth",
            "description": "North region trending up.",
            "type": "TREND",
            "confidence": 0.82
        }],
        "recommendations": ["Increase northern inventory"],
        "suggestedCharts": ["sales-by-region"]
    }"#;

    #[tokio::test]
    async fn sample_is_capped_at_fifty_records() {
        let mock = Arc::new(MockGenerator::new().with_text(VALID_RESPONSE));
        analyzer(mock.clone()).analyze(&records(100)).await.unwrap();

        let captured = mock.captured_requests();
        assert_eq!(captured.len(), 1);
        // Record 50 made it into the snippet, record 51 did not.
        assert!(captured[0].instruction.contains("\"id\":50"));
        assert!(!captured[0].instruction.contains("\"id\":51"));
    }

    #[tokio::test]
    async fn small_input_is_sent_whole() {
        let mock = Arc::new(MockGenerator::new().with_text(VALID_RESPONSE));
        analyzer(mock.clone()).analyze(&records(10)).await.unwrap();

        let captured = mock.captured_requests();
        assert!(captured[0].instruction.contains("\"id\":10"));
    }

    #[tokio::test]
    async fn request_always_carries_the_output_schema() {
        let mock = Arc::new(MockGenerator::new().with_text(VALID_RESPONSE));
        analyzer(mock.clone()).analyze(&records(3)).await.unwrap();

        let captured = mock.captured_requests();
        let schema = captured[0].response_schema.as_ref().unwrap();
        assert_eq!(schema["required"][0], "summary");
        assert_eq!(
            schema["properties"]["insights"]["items"]["required"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
    }

    #[tokio::test]
    async fn well_formed_response_parses_into_typed_result() {
        let mock = Arc::new(MockGenerator::new().with_text(VALID_RESPONSE));
        let result = analyzer(mock).analyze(&records(5)).await.unwrap();

        assert_eq!(result.summary, "Sales are stable across regions.");
        assert_eq!(result.insights.len(), 1);
        assert_eq!(result.insights[0].kind, is_api_types::InsightKind::Trend);
        assert!((result.insights[0].confidence - 0.82).abs() < f64::EPSILON);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.suggested_charts, vec!["sales-by-region"]);
    }

    #[tokio::test]
    async fn malformed_json_becomes_parse_error() {
        let mock = Arc::new(MockGenerator::new().with_text("not json at all"));
        let result = analyzer(mock).analyze(&records(5)).await;
        assert!(matches!(result, Err(AnalysisError::Parse(_))));
    }

    #[tokio::test]
    async fn transport_error_propagates_unrecovered() {
        let mock = Arc::new(MockGenerator::new().with_error(AnalysisError::Api {
            status: 503,
            message: "overloaded".into(),
        }));
        let result = analyzer(mock.clone()).analyze(&records(5)).await;
        assert!(matches!(result, Err(AnalysisError::Api { status: 503, .. })));
        // Exactly one outbound call — no retry.
        assert_eq!(mock.captured_requests().len(), 1);
    }

    #[test]
    fn parse_rejects_missing_required_field() {
        let json = r#"{ "summary": "s", "insights": [], "recommendations": [] }"#;
        assert!(matches!(parse_analysis(json), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn parse_rejects_unknown_insight_category() {
        let json = r#"{
            "summary": "s",
            "insights": [{
                "title": "t", "description": "d",
                "type": "GUESS", "confidence": 0.5
            }],
            "recommendations": [],
            "suggestedCharts": []
        }"#;
        assert!(matches!(parse_analysis(json), Err(AnalysisError::Parse(_))));
    }

    #[test]
    fn parse_rejects_confidence_out_of_range() {
        let json = r#"{
            "summary": "s",
            "insights": [{
                "title": "t", "description": "d",
                "type": "WARNING", "confidence": 1.5
            }],
            "recommendations": [],
            "suggestedCharts": []
        }"#;
        let err = parse_analysis(json).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn parse_accepts_confidence_at_the_bounds() {
        let json = r#"{
            "summary": "s",
            "insights": [
                { "title": "a", "description": "d", "type": "TREND", "confidence": 0.0 },
                { "title": "b", "description": "d", "type": "OPPORTUNITY", "confidence": 1.0 }
            ],
            "recommendations": [],
            "suggestedCharts": []
        }"#;
        let parsed = parse_analysis(json).unwrap();
        assert_eq!(parsed.insights.len(), 2);
    }
}
