//! Input adapter
//!
//! Turns free-text form input and JSON/NDJSON histories into typed
//! [`DailyRecord`] values. Numeric parsing never fails: unparseable text
//! falls back to a default so scoring always has a defined input.

use tracing::{debug, warn};

use crate::error::ScoreError;
use crate::types::{default_mood, DailyRecord, RawDailyLog};

/// Longest leading numeric prefix of `text` (after leading whitespace).
///
/// Accepts an optional sign and digits. With `allow_fraction` it also accepts
/// at most one decimal point and an exponent (`e`/`E`, optional sign, at least
/// one digit). Returns `None` when no digit is found.
fn numeric_prefix(text: &str, allow_fraction: bool) -> Option<&str> {
    let trimmed = text.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;

    for (i, c) in trimmed.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if allow_fraction && !seen_point => seen_point = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    if allow_fraction {
        end += exponent_len(&trimmed[end..]);
    }
    Some(&trimmed[..end])
}

/// Length of a complete exponent at the start of `rest`, `0` if there is none
fn exponent_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let mut len = 1;
    if matches!(bytes.get(len), Some(b'+' | b'-')) {
        len += 1;
    }
    let digits = bytes[len..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        0
    } else {
        len + digits
    }
}

/// Parse a real number leniently, `0.0` when nothing numeric is found
///
/// Reads the longest prefix of the form `[+-]digits[.digits][e[+-]digits]`,
/// so `"1e3"` is `1000.0` and `"7.5h"` is `7.5`. Values that overflow to
/// infinity also become `0.0`.
pub fn parse_real(text: &str) -> f64 {
    numeric_prefix(text, true)
        .and_then(|prefix| prefix.trim_end_matches('.').parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a step count, ignoring thousands separators
///
/// Negative or unparseable values become `0`; counts beyond `u32::MAX`
/// saturate.
pub fn parse_steps(text: &str) -> u32 {
    let cleaned: String = text.chars().filter(|&c| c != ',').collect();
    match numeric_prefix(&cleaned, false) {
        Some(prefix) if prefix.starts_with('-') => 0,
        // The prefix is only digits here, so a failed parse means overflow
        Some(prefix) => prefix.trim_start_matches('+').parse().unwrap_or(u32::MAX),
        None => 0,
    }
}

/// Parse a mood rating, `5` when unparseable or zero
pub fn parse_mood(text: &str) -> i32 {
    numeric_prefix(text, false)
        .and_then(|prefix| prefix.parse::<i32>().ok())
        .filter(|&v| v != 0)
        .unwrap_or_else(default_mood)
}

/// Convert a free-text log into a typed record
pub fn parse_log(raw: &RawDailyLog) -> DailyRecord {
    let record = DailyRecord {
        date: raw.date.clone(),
        sleep_hours: parse_real(&raw.sleep),
        steps: parse_steps(&raw.steps),
        mood: parse_mood(&raw.mood),
        water_liters: parse_real(&raw.water),
        worked_out: raw.gym,
        ate_junk_food: raw.junk,
    };
    debug!(
        date = %record.date,
        sleep_hours = record.sleep_hours,
        steps = record.steps,
        mood = record.mood,
        water_liters = record.water_liters,
        "parsed daily log"
    );
    record
}

/// Parse a single record from JSON
pub fn parse_record(json: &str) -> Result<DailyRecord, ScoreError> {
    serde_json::from_str(json)
        .map_err(|e| ScoreError::ParseError(format!("Failed to parse daily record: {}", e)))
}

/// Parse a free-text log from JSON
pub fn parse_raw_log(json: &str) -> Result<RawDailyLog, ScoreError> {
    serde_json::from_str(json)
        .map_err(|e| ScoreError::ParseError(format!("Failed to parse daily log: {}", e)))
}

/// Parse a history given as a JSON array
pub fn parse_history_array(json: &str) -> Result<Vec<DailyRecord>, ScoreError> {
    serde_json::from_str(json)
        .map_err(|e| ScoreError::ParseError(format!("Failed to parse history: {}", e)))
}

/// Parse a history given as NDJSON (one record per line, blank lines skipped)
pub fn parse_history_ndjson(input: &str) -> Result<Vec<DailyRecord>, ScoreError> {
    let mut records = Vec::new();
    for (line_no, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let record = serde_json::from_str(trimmed).map_err(|e| {
            warn!(line = line_no + 1, error = %e, "rejected history line");
            ScoreError::ParseError(format!("line {}: {}", line_no + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_real() {
        assert_eq!(parse_real("7.5"), 7.5);
        assert_eq!(parse_real("  6.25h"), 6.25);
        assert_eq!(parse_real("8."), 8.0);
        assert_eq!(parse_real("1.2.3"), 1.2);
        assert_eq!(parse_real(""), 0.0);
        assert_eq!(parse_real("lots"), 0.0);
        assert_eq!(parse_real("-"), 0.0);
    }

    #[test]
    fn test_parse_real_exponent() {
        assert_eq!(parse_real("1e3"), 1000.0);
        assert_eq!(parse_real("2.5E-1"), 0.25);
        assert_eq!(parse_real("7e+1 hours"), 70.0);
        // Incomplete exponents are left out of the prefix
        assert_eq!(parse_real("1e"), 1.0);
        assert_eq!(parse_real("3e-"), 3.0);
        assert_eq!(parse_real("1e999"), 0.0);
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_steps("8,340"), 8340);
        assert_eq!(parse_steps("12000 steps"), 12000);
        assert_eq!(parse_steps("4100.7"), 4100);
        assert_eq!(parse_steps("-300"), 0);
        assert_eq!(parse_steps("n/a"), 0);
    }

    #[test]
    fn test_parse_steps_saturates() {
        assert_eq!(parse_steps("4294967295"), u32::MAX);
        assert_eq!(parse_steps("4294967296"), u32::MAX);
        assert_eq!(parse_steps("99,999,999,999,999,999,999,999"), u32::MAX);
        assert_eq!(parse_steps("-99999999999999999999999"), 0);
        assert_eq!(parse_steps("+120"), 120);
        // Exponents are not part of a step count
        assert_eq!(parse_steps("1e3"), 1);
    }

    #[test]
    fn test_parse_mood_defaults_to_five() {
        assert_eq!(parse_mood("7"), 7);
        assert_eq!(parse_mood("8/10"), 8);
        assert_eq!(parse_mood(""), 5);
        assert_eq!(parse_mood("meh"), 5);
        assert_eq!(parse_mood("0"), 5);
        assert_eq!(parse_mood("12"), 12);
    }

    #[test]
    fn test_parse_log() {
        let raw = RawDailyLog {
            date: "Tue".to_string(),
            sleep: "5.9".to_string(),
            steps: "4,100".to_string(),
            mood: "4".to_string(),
            water: "1.2".to_string(),
            meals: "pasta".to_string(),
            stress: "high".to_string(),
            gym: false,
            junk: true,
        };

        let record = parse_log(&raw);
        assert_eq!(
            record,
            DailyRecord {
                date: "Tue".to_string(),
                sleep_hours: 5.9,
                steps: 4100,
                mood: 4,
                water_liters: 1.2,
                worked_out: false,
                ate_junk_food: true,
            }
        );
    }

    #[test]
    fn test_parse_empty_log() {
        let record = parse_log(&RawDailyLog::default());
        assert_eq!(record.sleep_hours, 0.0);
        assert_eq!(record.steps, 0);
        assert_eq!(record.mood, 5);
        assert_eq!(record.water_liters, 0.0);
    }

    #[test]
    fn test_parse_history_ndjson() {
        let input = r#"
{"date": "Mon", "sleep": 7.1, "steps": 9200, "mood": 5, "water": 1.6, "gym": true, "junk": false}

{"date": "Tue", "sleep_hours": 5.9, "steps": 4100, "mood": 4, "water_liters": 1.2}
"#;
        let history = parse_history_ndjson(input).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].date, "Tue");
        assert_eq!(history[1].sleep_hours, 5.9);
    }

    #[test]
    fn test_parse_history_ndjson_reports_line() {
        let input = "{\"date\": \"Mon\"}\nnot json\n";
        let err = parse_history_ndjson(input).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_history_array() {
        let history = parse_history_array(r#"[{"date": "Mon"}, {"date": "Tue"}]"#).unwrap();
        assert_eq!(history.len(), 2);
        assert!(parse_history_array("{").is_err());
    }
}
