//! Alert generation
//!
//! Threshold rules evaluated in a fixed order. Rules 1-4 are independent; the
//! informational fallback only fires when none of them did.

use crate::types::{Alert, DailyRecord, RiskProfile, Severity};

/// Sleep below this is a danger signal (hours)
const SHORT_SLEEP_HOURS: f64 = 6.0;

/// Mood at or below this raises a craving warning
const LOW_MOOD: i32 = 5;

/// Water below this is under the hydration threshold (liters)
const LOW_WATER_LITERS: f64 = 1.5;

/// Sleep at or above this, combined with a workout, earns a success alert
const GOOD_SLEEP_HOURS: f64 = 7.0;

/// Generate the alerts for a day in rule order
pub fn generate_alerts(record: &DailyRecord, risks: &RiskProfile) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if record.sleep_hours < SHORT_SLEEP_HOURS {
        alerts.push(Alert::new(
            Severity::Danger,
            format!(
                "Only {}h sleep. Gym skip risk is critically high ({}%). A light workout at minimum keeps the habit alive.",
                record.sleep_hours, risks.gym_skip_risk
            ),
        ));
    }

    if record.mood <= LOW_MOOD {
        alerts.push(Alert::new(
            Severity::Warning,
            format!(
                "Mood at {}/10. Junk craving probability is elevated ({}%). Prepare a healthy snack before evening.",
                record.mood, risks.junk_craving_risk
            ),
        ));
    }

    if record.water_liters < LOW_WATER_LITERS {
        alerts.push(Alert::new(
            Severity::Warning,
            format!(
                "Only {}L hydration logged, below threshold. Drink 500ml now.",
                record.water_liters
            ),
        ));
    }

    if record.sleep_hours >= GOOD_SLEEP_HOURS && record.worked_out {
        alerts.push(Alert::new(
            Severity::Success,
            format!(
                "Excellent combo: {}h sleep + gym session. Your BSI will reflect this positively.",
                record.sleep_hours
            ),
        ));
    }

    if alerts.is_empty() {
        alerts.push(Alert::new(
            Severity::Info,
            "Today's log looks solid. Keep it consistent and your BSI will trend up over the week.",
        ));
    }

    alerts
}
