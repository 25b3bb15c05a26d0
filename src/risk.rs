//! Risk predictors
//!
//! Closed-form heuristics, not trained models. Two families exist: the
//! dashboard predictors (canonical) and the simpler piecewise-linear ones used
//! when analysing a freshly entered log. [`RiskModel`] picks between them.

use crate::config::RiskModel;
use crate::stats::round_half_up;
use crate::types::{DailyRecord, RiskProfile};

/// Upper bound for every risk percentage
pub const MAX_RISK: f64 = 95.0;

/// Lower bound for the dashboard gym-skip risk
pub const MIN_GYM_SKIP_RISK: f64 = 5.0;

/// Logistic coefficient on sleep hours
const GYM_SKIP_SLOPE: f64 = 1.4;

/// Logistic intercept
const GYM_SKIP_INTERCEPT: f64 = 9.2;

/// Clamp to `[min, 95]` and round; NaN maps to `min`.
fn to_percent(value: f64, min: f64) -> u8 {
    if value.is_nan() {
        return min as u8;
    }
    round_half_up(value.clamp(min, MAX_RISK)) as u8
}

// ============================================================================
// Dashboard predictors
// ============================================================================

/// Gym-skip probability from sleep hours
///
/// Formula: `100 / (1 + e^(1.4·sleep − 9.2))`, clamped to 5-95.
/// Monotonically non-increasing in sleep hours.
pub fn predict_gym_skip_risk(sleep_hours: f64) -> u8 {
    let z = GYM_SKIP_SLOPE * sleep_hours - GYM_SKIP_INTERCEPT;
    let p = 1.0 / (1.0 + z.exp());
    to_percent(p * 100.0, MIN_GYM_SKIP_RISK)
}

/// Junk-craving probability from mood and sleep
///
/// Formula: `(1 − mood/10)·60 + (1 − min(sleep, 8)/8)·40 + 15`, capped at 95.
pub fn predict_junk_craving_risk(mood: i32, sleep_hours: f64) -> u8 {
    let mood_component = (1.0 - mood as f64 / 10.0) * 60.0;
    let sleep_component = (1.0 - sleep_hours.min(8.0) / 8.0) * 40.0;
    to_percent(mood_component + sleep_component + 15.0, 0.0)
}

/// Hydration-drop probability from a step-count table
pub fn predict_hydration_drop_risk(steps: u32) -> u8 {
    match steps {
        0..=4_999 => 20,
        5_000..=6_999 => 35,
        7_000..=8_999 => 60,
        _ => 80,
    }
}

// ============================================================================
// Daily-log predictors
// ============================================================================

/// Gym-skip risk used by the log form
///
/// `60 + (6.5 − sleep)·20` below 6.5 hours, otherwise a flat 30. Capped at 95.
pub fn log_gym_skip_risk(sleep_hours: f64) -> u8 {
    let risk = if sleep_hours < 6.5 {
        60.0 + (6.5 - sleep_hours) * 20.0
    } else {
        30.0
    };
    to_percent(risk, 0.0)
}

/// Junk-craving risk used by the log form
///
/// `50 + (6 − mood)·10` for mood below 6, otherwise a flat 30. Capped at 95.
pub fn log_junk_craving_risk(mood: i32) -> u8 {
    let risk = if mood < 6 {
        50.0 + (6.0 - mood as f64) * 10.0
    } else {
        30.0
    };
    to_percent(risk, 0.0)
}

/// Hydration-drop risk used by the log form
///
/// `40 + (steps − 7000)/200` above 7000 steps, otherwise a flat 25. Capped at 95.
pub fn log_hydration_drop_risk(steps: u32) -> u8 {
    let risk = if steps > 7_000 {
        40.0 + (steps - 7_000) as f64 / 200.0
    } else {
        25.0
    };
    to_percent(risk, 0.0)
}

/// Fill a [`RiskProfile`] for a record with the chosen predictor family
pub fn assess(record: &DailyRecord, model: RiskModel) -> RiskProfile {
    match model {
        RiskModel::Dashboard => RiskProfile {
            gym_skip_risk: predict_gym_skip_risk(record.sleep_hours),
            junk_craving_risk: predict_junk_craving_risk(record.mood, record.sleep_hours),
            hydration_drop_risk: predict_hydration_drop_risk(record.steps),
        },
        RiskModel::DailyLog => RiskProfile {
            gym_skip_risk: log_gym_skip_risk(record.sleep_hours),
            junk_craving_risk: log_junk_craving_risk(record.mood),
            hydration_drop_risk: log_hydration_drop_risk(record.steps),
        },
    }
}
