//! Built-in sample week
//!
//! Fixed Mon-Sun history used by the dashboard before any real logs exist,
//! and pinned by regression tests.

use crate::types::DailyRecord;

fn day(
    date: &str,
    sleep_hours: f64,
    steps: u32,
    mood: i32,
    water_liters: f64,
    worked_out: bool,
    ate_junk_food: bool,
) -> DailyRecord {
    DailyRecord {
        date: date.to_string(),
        sleep_hours,
        steps,
        mood,
        water_liters,
        worked_out,
        ate_junk_food,
    }
}

/// The seven-day sample history, oldest first
pub fn sample_week() -> Vec<DailyRecord> {
    vec![
        day("Mon", 7.1, 9200, 5, 1.6, true, false),
        day("Tue", 5.9, 4100, 4, 1.2, false, true),
        day("Wed", 7.5, 8800, 7, 2.1, true, false),
        day("Thu", 6.8, 7400, 6, 1.8, true, false),
        day("Fri", 5.4, 3900, 5, 1.1, false, true),
        day("Sat", 8.2, 6100, 8, 2.3, true, false),
        day("Sun", 7.0, 5600, 7, 1.9, false, true),
    ]
}
