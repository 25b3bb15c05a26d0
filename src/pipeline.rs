//! Analysis pipeline orchestration
//!
//! Public API tying the stages together:
//! input → adapter → scoring → risk → alerts → encoder.

use tracing::debug;

use crate::adapter::{parse_history_array, parse_log, parse_raw_log, parse_record};
use crate::alerts::generate_alerts;
use crate::config::AnalysisConfig;
use crate::encoder::ReportEncoder;
use crate::error::ScoreError;
use crate::insights::generate_insights;
use crate::risk::assess;
use crate::scoring::compute_day_index;
use crate::types::{DailyRecord, DayAnalysis, InsightResult, RawDailyLog};

/// Convert a daily record JSON into a report JSON (stateless, one-shot).
///
/// Uses the dashboard configuration.
pub fn day_to_report(record_json: &str) -> Result<String, ScoreError> {
    let analyzer = Analyzer::new();
    analyzer.analyze_day_json(record_json)
}

/// Convert a history JSON array into an insights report JSON (stateless, one-shot).
pub fn history_to_report(history_json: &str) -> Result<String, ScoreError> {
    let analyzer = Analyzer::new();
    analyzer.insights_json(history_json)
}

/// Analyzer holding a configuration and report encoder.
pub struct Analyzer {
    config: AnalysisConfig,
    encoder: ReportEncoder,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Create an analyzer with the dashboard configuration
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::dashboard(),
            encoder: ReportEncoder::new(),
        }
    }

    /// Create an analyzer with a validated configuration
    pub fn with_config(config: AnalysisConfig) -> Result<Self, ScoreError> {
        config.validate()?;
        Ok(Self {
            config,
            encoder: ReportEncoder::new(),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Score one day: BSI, risks, alerts
    pub fn analyze_day(&self, record: &DailyRecord) -> DayAnalysis {
        let bsi = compute_day_index(record, &self.config.weights);
        let risks = assess(record, self.config.risk_model);
        let alerts = generate_alerts(record, &risks);

        debug!(
            date = %record.date,
            bsi,
            gym_skip_risk = risks.gym_skip_risk,
            junk_craving_risk = risks.junk_craving_risk,
            hydration_drop_risk = risks.hydration_drop_risk,
            alerts = alerts.len(),
            "analysed day"
        );

        DayAnalysis {
            record: record.clone(),
            bsi,
            risks,
            alerts,
        }
    }

    /// Parse a free-text log and score it
    pub fn analyze_log(&self, raw: &RawDailyLog) -> DayAnalysis {
        self.analyze_day(&parse_log(raw))
    }

    /// Aggregate a history
    pub fn insights(&self, history: &[DailyRecord]) -> InsightResult {
        let insights = generate_insights(history, &self.config);
        debug!(
            days = insights.days,
            streak = insights.streak,
            sleep_gym = insights.correlations.sleep_gym,
            "generated insights"
        );
        insights
    }

    /// Score a day given as record JSON and return report JSON
    pub fn analyze_day_json(&self, record_json: &str) -> Result<String, ScoreError> {
        let record = parse_record(record_json)?;
        let report = self.encoder.encode_day(self.analyze_day(&record));
        self.encoder.to_json(&report)
    }

    /// Score a free-text log given as JSON and return report JSON
    pub fn analyze_log_json(&self, log_json: &str) -> Result<String, ScoreError> {
        let raw = parse_raw_log(log_json)?;
        let report = self.encoder.encode_day(self.analyze_log(&raw));
        self.encoder.to_json(&report)
    }

    /// Aggregate a history given as a JSON array and return report JSON
    pub fn insights_json(&self, history_json: &str) -> Result<String, ScoreError> {
        let history = parse_history_array(history_json)?;
        let report = self.encoder.encode_insights(self.insights(&history));
        self.encoder.to_json(&report)
    }
}
