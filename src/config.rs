//! Analysis configuration
//!
//! The dashboard and the daily-log form score days with slightly different
//! constants. Both are presets of the same [`AnalysisConfig`] rather than two
//! copies of the formulas.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::stats::DEFAULT_MOVING_AVERAGE_WINDOW;

/// Flat adjustments applied to the weighted BSI sum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BsiWeights {
    /// Added when a workout happened
    pub workout_bonus: f64,
    /// Subtracted when junk food was eaten
    pub junk_penalty: f64,
}

impl BsiWeights {
    /// Weights used for seeded dashboard data
    pub const fn dashboard() -> Self {
        Self {
            workout_bonus: 10.0,
            junk_penalty: 10.0,
        }
    }

    /// Weights used when analysing a freshly entered log
    pub const fn daily_log() -> Self {
        Self {
            workout_bonus: 15.0,
            junk_penalty: 10.0,
        }
    }
}

impl Default for BsiWeights {
    fn default() -> Self {
        Self::dashboard()
    }
}

/// Which family of risk heuristics fills a [`crate::types::RiskProfile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskModel {
    /// Sigmoid gym-skip, weighted junk craving, stepped hydration table
    #[default]
    Dashboard,
    /// Piecewise-linear heuristics from the log form
    DailyLog,
}

/// Full configuration for an [`crate::pipeline::Analyzer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub weights: BsiWeights,
    #[serde(default)]
    pub risk_model: RiskModel,
    #[serde(default = "default_window")]
    pub moving_average_window: usize,
}

fn default_window() -> usize {
    DEFAULT_MOVING_AVERAGE_WINDOW
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::dashboard()
    }
}

impl AnalysisConfig {
    pub fn dashboard() -> Self {
        Self {
            weights: BsiWeights::dashboard(),
            risk_model: RiskModel::Dashboard,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
        }
    }

    pub fn daily_log() -> Self {
        Self {
            weights: BsiWeights::daily_log(),
            risk_model: RiskModel::DailyLog,
            moving_average_window: DEFAULT_MOVING_AVERAGE_WINDOW,
        }
    }

    /// Look up a preset by name (`dashboard` or `daily_log`)
    pub fn preset(name: &str) -> Result<Self, ScoreError> {
        match name.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "dashboard" => Ok(Self::dashboard()),
            "daily_log" | "log" => Ok(Self::daily_log()),
            other => Err(ScoreError::InvalidConfig(format!(
                "unknown preset '{other}'"
            ))),
        }
    }

    /// Check invariants the scoring functions rely on
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.moving_average_window == 0 {
            return Err(ScoreError::InvalidConfig(
                "moving_average_window must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("workout_bonus", self.weights.workout_bonus),
            ("junk_penalty", self.weights.junk_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoreError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Load and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, ScoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ScoreError> {
        serde_json::to_string_pretty(self).map_err(ScoreError::JsonError)
    }
}
