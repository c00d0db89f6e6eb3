//! Data models for the analysis console.
//!
//! This module contains the payloads exchanged with the analysis service
//! and the result type the console keeps for export.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Status field carried by every service response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
    /// Returned by the benchmark lookup when nothing has been analysed yet.
    NotFound,
    #[serde(other)]
    Unknown,
}

impl Status {
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::Error => write!(f, "error"),
            Status::NotFound => write!(f, "not_found"),
            Status::Unknown => write!(f, "unknown"),
        }
    }
}

/// Text used in alerts when the service omits a message.
const MISSING_MESSAGE: &str = "no message provided";

/// Result of a creative analysis, as returned by the service or the demo generator.
///
/// Fields the console does not interpret are kept in `extra` so an export
/// reproduces the payload verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: Status,
    /// Markdown report text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Creates a successful result carrying `report`.
    pub fn success(report: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            report: Some(report.into()),
            message: None,
            extra: Map::new(),
        }
    }

    /// Returns the report text, or an empty string when the service sent none.
    pub fn report_text(&self) -> &str {
        self.report.as_deref().unwrap_or_default()
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or(MISSING_MESSAGE)
    }
}

/// Response to the market-data upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UploadResponse {
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or(MISSING_MESSAGE)
    }
}

/// Response carrying the market benchmark, from either the analysis trigger
/// or the benchmark lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnaResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winning_dna: Option<WinningDna>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DnaResponse {
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or(MISSING_MESSAGE)
    }
}

/// Summarised attributes of the top-performing market creatives.
///
/// Display-only: the console shows it and then forgets it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WinningDna {
    #[serde(default, deserialize_with = "text_from_any")]
    pub dominant_motivation: String,
    #[serde(default, deserialize_with = "text_from_any")]
    pub avg_pacing: String,
    #[serde(default, deserialize_with = "text_from_any")]
    pub key_mechanic: String,
    /// Any further attributes the benchmark carries (e.g. `visual_trend`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts any JSON value, keeping strings as-is and rendering the rest as JSON text.
fn text_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        other => other.to_string(),
    })
}
