//! Core data types
//!
//! Records flow in as [`DailyRecord`] snapshots and leave as [`DayAnalysis`]
//! or [`InsightResult`] values. Nothing here is mutated after construction.

use serde::{Deserialize, Serialize};

/// One day of behavioural data.
///
/// A history is a slice of these in chronological order (oldest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Day label or ordinal ("Mon", "2024-09-02", ...)
    #[serde(default)]
    pub date: String,
    /// Hours slept
    #[serde(alias = "sleep", default)]
    pub sleep_hours: f64,
    /// Step count
    #[serde(default)]
    pub steps: u32,
    /// Mood rating, nominally 1-10 (not validated)
    #[serde(default = "default_mood")]
    pub mood: i32,
    /// Water intake in liters
    #[serde(alias = "water", default)]
    pub water_liters: f64,
    /// Whether a workout happened
    #[serde(alias = "gym", default)]
    pub worked_out: bool,
    /// Whether junk food was eaten
    #[serde(alias = "junk", default)]
    pub ate_junk_food: bool,
}

pub(crate) fn default_mood() -> i32 {
    5
}

impl DailyRecord {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            sleep_hours: 0.0,
            steps: 0,
            mood: default_mood(),
            water_liters: 0.0,
            worked_out: false,
            ate_junk_food: false,
        }
    }
}

/// Daily log exactly as typed into the form.
///
/// Numeric fields are free text; [`crate::adapter::parse_log`] turns this
/// into a [`DailyRecord`] with parse-with-default semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDailyLog {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub sleep: String,
    #[serde(default)]
    pub steps: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub water: String,
    /// Free-text meal notes (not scored)
    #[serde(default)]
    pub meals: String,
    /// Free-text stress notes (not scored)
    #[serde(default)]
    pub stress: String,
    #[serde(default)]
    pub gym: bool,
    #[serde(default)]
    pub junk: bool,
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Danger,
    Warning,
    Success,
    Info,
}

/// A single alert produced for a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Risk percentages for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Probability of skipping the gym (percent)
    pub gym_skip_risk: u8,
    /// Probability of a junk-food craving (percent)
    pub junk_craving_risk: u8,
    /// Probability of a hydration drop (percent)
    pub hydration_drop_risk: u8,
}

/// Result of analysing a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAnalysis {
    /// The analysed record
    pub record: DailyRecord,
    /// Behaviour Score Index (0-100)
    pub bsi: u8,
    /// Risk predictions
    pub risks: RiskProfile,
    /// Alerts in rule order (never empty)
    pub alerts: Vec<Alert>,
}

/// Pairwise correlations over a history window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlations {
    /// Sleep hours vs workout flag
    pub sleep_gym: f64,
    /// Mood vs junk-food flag
    pub mood_junk: f64,
    /// Steps vs water intake
    pub steps_water: f64,
}

/// Coefficient magnitude at or above which a correlation is strong
pub const STRONG_CORRELATION: f64 = 0.7;

/// Coefficient magnitude at or above which a correlation is moderate
pub const MODERATE_CORRELATION: f64 = 0.5;

/// Strength band of a correlation coefficient, by absolute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

impl CorrelationStrength {
    pub fn from_coefficient(r: f64) -> Self {
        let magnitude = r.abs();
        if magnitude >= STRONG_CORRELATION {
            CorrelationStrength::Strong
        } else if magnitude >= MODERATE_CORRELATION {
            CorrelationStrength::Moderate
        } else {
            CorrelationStrength::Weak
        }
    }
}

/// Strength bands matching [`Correlations`] field by field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationStrengths {
    pub sleep_gym: CorrelationStrength,
    pub mood_junk: CorrelationStrength,
    pub steps_water: CorrelationStrength,
}

impl From<&Correlations> for CorrelationStrengths {
    fn from(c: &Correlations) -> Self {
        Self {
            sleep_gym: CorrelationStrength::from_coefficient(c.sleep_gym),
            mood_junk: CorrelationStrength::from_coefficient(c.mood_junk),
            steps_water: CorrelationStrength::from_coefficient(c.steps_water),
        }
    }
}

/// Result of analysing a history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightResult {
    /// Number of days analysed
    pub days: usize,
    pub correlations: Correlations,
    pub correlation_strength: CorrelationStrengths,
    /// Trailing workout streak in days
    pub streak: u32,
    /// Trailing days without junk food
    pub junk_free_streak: u32,
    /// Mean sleep hours (1 dp)
    pub avg_sleep: f64,
    /// Mean mood (1 dp)
    pub avg_mood: f64,
    /// Mean steps (rounded)
    pub avg_steps: u32,
    /// Mean water liters (1 dp)
    pub avg_water: f64,
    /// Share of days with a workout (percent)
    pub gym_rate: u8,
    /// Share of days with junk food (percent)
    pub junk_rate: u8,
    /// Trailing moving average of sleep, same length as the history
    pub moving_avg_sleep: Vec<f64>,
    /// Behaviour Score Index per day, same length as the history
    pub daily_bsi: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&Severity::Danger).unwrap();
        assert_eq!(json, "\"danger\"");

        let parsed: Severity = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(parsed, Severity::Success);
    }

    #[test]
    fn test_correlation_strength_bands() {
        assert_eq!(CorrelationStrength::from_coefficient(0.74), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(-0.7), CorrelationStrength::Strong);
        assert_eq!(CorrelationStrength::from_coefficient(0.55), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(-0.5), CorrelationStrength::Moderate);
        assert_eq!(CorrelationStrength::from_coefficient(-0.44), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::from_coefficient(0.0), CorrelationStrength::Weak);
        assert_eq!(CorrelationStrength::from_coefficient(f64::NAN), CorrelationStrength::Weak);

        let json = serde_json::to_string(&CorrelationStrength::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }

    #[test]
    fn test_record_accepts_dashboard_aliases() {
        let json = r#"{
            "date": "Mon",
            "sleep": 7.1,
            "steps": 9200,
            "mood": 5,
            "water": 1.6,
            "gym": true,
            "junk": false
        }"#;

        let record: DailyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, "Mon");
        assert_eq!(record.sleep_hours, 7.1);
        assert_eq!(record.water_liters, 1.6);
        assert!(record.worked_out);
        assert!(!record.ate_junk_food);
    }

    #[test]
    fn test_record_defaults_missing_fields() {
        let record: DailyRecord = serde_json::from_str(r#"{"date": "Tue"}"#).unwrap();
        assert_eq!(record.sleep_hours, 0.0);
        assert_eq!(record.steps, 0);
        assert_eq!(record.mood, 5);
        assert!(!record.worked_out);
    }

    #[test]
    fn test_raw_log_deserialization() {
        let json = r#"{"sleep": "6.5", "steps": "8,200", "gym": true}"#;
        let raw: RawDailyLog = serde_json::from_str(json).unwrap();
        assert_eq!(raw.steps, "8,200");
        assert!(raw.gym);
        assert!(raw.mood.is_empty());
    }
}
