use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Verdict returned by the detection service.
///
/// Only `is_suspicious` and `confidence_score` are required. Fields the client
/// does not know about are kept in `extra`, so serializing the result yields
/// the body the service sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_suspicious: bool,
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_predictions: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraped_data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    /// Confidence as a whole percentage.
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence_score * 100.0).round() as i64
    }
}
