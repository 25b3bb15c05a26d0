//! Behaviour Score - On-device behavioural scoring engine for daily fitness logs
//!
//! Turns daily logs (sleep, steps, mood, hydration, workout and junk-food
//! flags) into a Behaviour Score Index, risk predictions, alerts and
//! historical insights through a deterministic pipeline:
//! input adaptation → scoring → risk prediction → alerts → report encoding.
//!
//! ## Modules
//!
//! - **Day analysis**: [`pipeline::Analyzer::analyze_day`] scores one record
//! - **History insights**: [`insights::generate_insights`] aggregates a history
//! - **Coach**: [`coach`] keeps chat state around an external completion API

pub mod adapter;
pub mod alerts;
pub mod coach;
pub mod config;
pub mod encoder;
pub mod error;
pub mod form;
pub mod insights;
pub mod pipeline;
pub mod risk;
pub mod sample;
pub mod scoring;
pub mod stats;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use alerts::generate_alerts;
pub use config::{AnalysisConfig, BsiWeights, RiskModel};
pub use error::ScoreError;
pub use insights::generate_insights;
pub use pipeline::{day_to_report, history_to_report, Analyzer};
pub use risk::{predict_gym_skip_risk, predict_hydration_drop_risk, predict_junk_craving_risk};
pub use scoring::{compute_day_index, weekly_chart_score};
pub use types::{
    Alert, CorrelationStrength, CorrelationStrengths, Correlations, DailyRecord, DayAnalysis,
    InsightResult, RawDailyLog, RiskProfile, Severity,
};

/// Library version embedded in all reports
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for reports
pub const PRODUCER_NAME: &str = "behaviour-score";
