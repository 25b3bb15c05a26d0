//! Behaviour Score Index
//!
//! Composite 0-100 wellness index computed from one day of data.

use crate::config::BsiWeights;
use crate::stats::round_half_up;
use crate::types::DailyRecord;

/// Sleep hours that earn a full sleep sub-score
const SLEEP_TARGET_HOURS: f64 = 8.0;

/// Steps that earn a full step sub-score
const STEP_TARGET: f64 = 10_000.0;

/// Water liters that earn a full hydration sub-score
const WATER_TARGET_LITERS: f64 = 2.5;

const SLEEP_WEIGHT: f64 = 0.30;
const STEP_WEIGHT: f64 = 0.25;
const MOOD_WEIGHT: f64 = 0.20;
const WATER_WEIGHT: f64 = 0.25;

/// Per-metric sub-scores before weighting (0-100, mood uncapped)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub sleep: f64,
    pub steps: f64,
    pub mood: f64,
    pub water: f64,
}

impl SubScores {
    pub fn from_record(record: &DailyRecord) -> Self {
        Self {
            sleep: (record.sleep_hours / SLEEP_TARGET_HOURS * 100.0).min(100.0),
            steps: (record.steps as f64 / STEP_TARGET * 100.0).min(100.0),
            mood: record.mood as f64 / 10.0 * 100.0,
            water: (record.water_liters / WATER_TARGET_LITERS * 100.0).min(100.0),
        }
    }

    /// Formula: `0.30·sleep + 0.25·steps + 0.20·mood + 0.25·water`
    pub fn weighted_sum(&self) -> f64 {
        SLEEP_WEIGHT * self.sleep
            + STEP_WEIGHT * self.steps
            + MOOD_WEIGHT * self.mood
            + WATER_WEIGHT * self.water
    }
}

/// Compute the Behaviour Score Index for a day
///
/// Weighted sub-score sum, plus the workout bonus, minus the junk penalty,
/// clamped to 0-100 and rounded.
pub fn compute_day_index(record: &DailyRecord, weights: &BsiWeights) -> u8 {
    let mut score = SubScores::from_record(record).weighted_sum();
    if record.worked_out {
        score += weights.workout_bonus;
    }
    if record.ate_junk_food {
        score -= weights.junk_penalty;
    }
    if score.is_nan() {
        return 0;
    }
    round_half_up(score.clamp(0.0, 100.0)) as u8
}

/// Raw weekly-chart score used by the patterns bar chart
///
/// Formula: `8·sleep + 7·mood + 25·steps/10000 + 10·water`, plus 15 for a
/// workout, minus 8 for junk food. Not normalised to 0-100 and unrelated to
/// [`BsiWeights`]; negative results floor at 0.
pub fn weekly_chart_score(record: &DailyRecord) -> u16 {
    let mut score = record.sleep_hours * 8.0
        + record.mood as f64 * 7.0
        + record.steps as f64 / STEP_TARGET * 25.0
        + record.water_liters * 10.0;
    if record.worked_out {
        score += 15.0;
    }
    if record.ate_junk_food {
        score -= 8.0;
    }
    if score.is_nan() {
        return 0;
    }
    round_half_up(score.clamp(0.0, u16::MAX as f64)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_week;

    fn record(sleep: f64, steps: u32, mood: i32, water: f64, gym: bool, junk: bool) -> DailyRecord {
        DailyRecord {
            date: "test".to_string(),
            sleep_hours: sleep,
            steps,
            mood,
            water_liters: water,
            worked_out: gym,
            ate_junk_food: junk,
        }
    }

    #[test]
    fn test_sub_scores_worked_example() {
        let day = record(5.9, 4100, 4, 1.2, false, true);
        let subs = SubScores::from_record(&day);

        assert!((subs.sleep - 73.75).abs() < 1e-9);
        assert!((subs.steps - 41.0).abs() < 1e-9);
        assert!((subs.mood - 40.0).abs() < 1e-9);
        assert!((subs.water - 48.0).abs() < 1e-9);
        assert!((subs.weighted_sum() - 52.375).abs() < 1e-9);
    }

    #[test]
    fn test_worked_example_index() {
        let day = record(5.9, 4100, 4, 1.2, false, true);
        assert_eq!(compute_day_index(&day, &BsiWeights::dashboard()), 42);
    }

    #[test]
    fn test_sub_scores_are_capped() {
        let subs = SubScores::from_record(&record(12.0, 25_000, 10, 4.0, false, false));
        assert_eq!(subs.sleep, 100.0);
        assert_eq!(subs.steps, 100.0);
        assert_eq!(subs.water, 100.0);
    }

    #[test]
    fn test_workout_bonus_differs_between_presets() {
        let day = record(7.5, 8800, 7, 2.1, true, false);
        // 85.125 weighted
        assert_eq!(compute_day_index(&day, &BsiWeights::dashboard()), 95);
        assert_eq!(compute_day_index(&day, &BsiWeights::daily_log()), 100);
    }

    #[test]
    fn test_index_clamped_low() {
        let day = record(0.0, 0, 0, 0.0, false, true);
        assert_eq!(compute_day_index(&day, &BsiWeights::dashboard()), 0);
    }

    #[test]
    fn test_index_clamped_high_with_out_of_range_mood() {
        let day = record(9.0, 12_000, 40, 3.0, true, false);
        assert_eq!(compute_day_index(&day, &BsiWeights::daily_log()), 100);
    }

    #[test]
    fn test_sample_week_indices() {
        let scores: Vec<u8> = sample_week()
            .iter()
            .map(|d| compute_day_index(d, &BsiWeights::dashboard()))
            .collect();
        assert_eq!(scores, vec![86, 42, 95, 84, 41, 94, 63]);
    }

    #[test]
    fn test_weekly_chart_scores_sample_week() {
        let scores: Vec<u16> = sample_week().iter().map(weekly_chart_score).collect();
        assert_eq!(scores, vec![146, 89, 167, 148, 91, 175, 130]);
    }

    #[test]
    fn test_weekly_chart_score_floors_at_zero() {
        let day = record(0.0, 0, -40, 0.0, false, true);
        assert_eq!(weekly_chart_score(&day), 0);
    }

    #[test]
    fn test_index_always_in_range() {
        for sleep in [0.0, 3.0, 6.0, 8.0, 14.0] {
            for steps in [0, 4000, 10_000, 30_000] {
                for mood in [-3, 1, 5, 10, 15] {
                    for (gym, junk) in [(false, false), (true, false), (false, true), (true, true)] {
                        let day = record(sleep, steps, mood, 1.5, gym, junk);
                        let bsi = compute_day_index(&day, &BsiWeights::daily_log());
                        assert!(bsi <= 100);
                    }
                }
            }
        }
    }
}
