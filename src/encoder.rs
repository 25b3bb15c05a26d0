//! Report encoder
//!
//! Wraps analysis results in a JSON report with producer metadata.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ScoreError;
use crate::types::{DayAnalysis, InsightResult};
use crate::{PRODUCER_NAME, VERSION};

/// Current report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Producer metadata embedded in every report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Analysis report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    /// Present for single-day reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<DayAnalysis>,
    /// Present for history reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightResult>,
}

/// Report encoder
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    fn envelope(&self) -> Report {
        Report {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            day: None,
            insights: None,
        }
    }

    pub fn encode_day(&self, analysis: DayAnalysis) -> Report {
        Report {
            day: Some(analysis),
            ..self.envelope()
        }
    }

    pub fn encode_insights(&self, insights: InsightResult) -> Report {
        Report {
            insights: Some(insights),
            ..self.envelope()
        }
    }

    /// Serialize a report to pretty JSON
    pub fn to_json(&self, report: &Report) -> Result<String, ScoreError> {
        serde_json::to_string_pretty(report)
            .map_err(|e| ScoreError::EncodingError(e.to_string()))
    }
}
