//! Historical insight generation
//!
//! Aggregates an ordered history into correlations, streaks, means and rates.
//! Every statistic is recomputed from scratch on each call.

use crate::config::AnalysisConfig;
use crate::scoring::compute_day_index;
use crate::stats::{
    mean, moving_average, pearson_corr, rate_percent, round_dp, round_half_up, streak_count,
};
use crate::types::{Correlations, CorrelationStrengths, DailyRecord, InsightResult};

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Generate insights from a chronological history (oldest first)
///
/// The per-day index series uses the configured BSI weights. An empty history
/// yields zeroed statistics and empty series.
pub fn generate_insights(history: &[DailyRecord], config: &AnalysisConfig) -> InsightResult {
    let sleep: Vec<f64> = history.iter().map(|d| d.sleep_hours).collect();
    let mood: Vec<f64> = history.iter().map(|d| d.mood as f64).collect();
    let steps: Vec<f64> = history.iter().map(|d| d.steps as f64).collect();
    let water: Vec<f64> = history.iter().map(|d| d.water_liters).collect();
    let gym: Vec<bool> = history.iter().map(|d| d.worked_out).collect();
    let junk: Vec<bool> = history.iter().map(|d| d.ate_junk_food).collect();

    let gym_numeric: Vec<f64> = gym.iter().map(|&g| flag(g)).collect();
    let junk_numeric: Vec<f64> = junk.iter().map(|&j| flag(j)).collect();
    let junk_free: Vec<bool> = junk.iter().map(|&j| !j).collect();

    let correlations = Correlations {
        sleep_gym: pearson_corr(&sleep, &gym_numeric),
        mood_junk: pearson_corr(&mood, &junk_numeric),
        steps_water: pearson_corr(&steps, &water),
    };

    InsightResult {
        days: history.len(),
        correlation_strength: CorrelationStrengths::from(&correlations),
        correlations,
        streak: streak_count(&gym),
        junk_free_streak: streak_count(&junk_free),
        avg_sleep: round_dp(mean(&sleep), 1),
        avg_mood: round_dp(mean(&mood), 1),
        avg_steps: round_half_up(mean(&steps)) as u32,
        avg_water: round_dp(mean(&water), 1),
        gym_rate: rate_percent(&gym),
        junk_rate: rate_percent(&junk),
        moving_avg_sleep: moving_average(&sleep, config.moving_average_window),
        daily_bsi: history
            .iter()
            .map(|d| compute_day_index(d, &config.weights))
            .collect(),
    }
}
