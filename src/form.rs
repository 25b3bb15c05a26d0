//! Daily log form state
//!
//! Immutable state container for the "log today" form. Every update returns a
//! new snapshot; the last analysis is kept alongside the inputs.

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::pipeline::Analyzer;
use crate::types::{DayAnalysis, RawDailyLog};

/// Form state: current inputs plus the most recent analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogForm {
    pub log: RawDailyLog,
    pub analysis: Option<DayAnalysis>,
}

impl LogForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with one text field replaced
    ///
    /// Accepted fields: `date`, `sleep`, `steps`, `mood`, `water`, `meals`, `stress`.
    pub fn with_field(&self, field: &str, value: impl Into<String>) -> Result<Self, ScoreError> {
        let mut next = self.clone();
        let value = value.into();
        match field {
            "date" => next.log.date = value,
            "sleep" => next.log.sleep = value,
            "steps" => next.log.steps = value,
            "mood" => next.log.mood = value,
            "water" => next.log.water = value,
            "meals" => next.log.meals = value,
            "stress" => next.log.stress = value,
            other => return Err(ScoreError::UnknownField(other.to_string())),
        }
        Ok(next)
    }

    /// Return a copy with one boolean field replaced (`gym` or `junk`)
    pub fn with_flag(&self, field: &str, value: bool) -> Result<Self, ScoreError> {
        let mut next = self.clone();
        match field {
            "gym" => next.log.gym = value,
            "junk" => next.log.junk = value,
            other => return Err(ScoreError::UnknownField(other.to_string())),
        }
        Ok(next)
    }

    /// Return a copy carrying the analysis of the current inputs
    pub fn analyse(&self, analyzer: &Analyzer) -> Self {
        Self {
            log: self.log.clone(),
            analysis: Some(analyzer.analyze_log(&self.log)),
        }
    }

    /// Return an empty form
    pub fn reset(&self) -> Self {
        Self::default()
    }
}
