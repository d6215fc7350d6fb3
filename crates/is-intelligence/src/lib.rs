//! Remote insight generation for InsightStream.
//!
//! One request type: "generate a structured analysis from a bounded record
//! sample". [`llm`] holds the provider abstraction and the Gemini wire
//! client; [`analyzer`] owns the data contract around it — sampling,
//! prompt, output schema, and the validated parse.

pub mod analyzer;
pub mod llm;

pub use analyzer::{DataAnalyzer, SAMPLE_CAP};
pub use llm::{GeminiProvider, GenerationRequest, GenerationResponse, MockGenerator, TextGenerator};

use thiserror::Error;

/// Failure modes of one analysis request.
///
/// `Config` means the credential was never there; `Http`/`Api`/`Timeout`
/// mean the outbound call did not succeed; `Parse` means the service
/// answered but violated the output contract. No variant is retried.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] is_core::ConfigError),

    /// Connection-level failure (DNS, TLS, refused, ...).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    /// The response payload did not conform to the analysis schema.
    #[error("malformed analysis response: {0}")]
    Parse(String),
}

impl AnalysisError {
    /// True when the service answered but broke the schema contract —
    /// worth distinguishing in logs from plain transport trouble.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, AnalysisError::Parse(_))
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::Timeout
        } else {
            AnalysisError::Http(err.to_string())
        }
    }
}
