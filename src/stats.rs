//! Descriptive statistics over short daily series
//!
//! All functions are total: degenerate input (empty, single element, zero
//! variance) yields a defined value instead of NaN.

/// Default trailing window for moving averages (days)
pub const DEFAULT_MOVING_AVERAGE_WINDOW: usize = 3;

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Round to `dp` decimal places.
pub fn round_dp(x: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (x * factor).round() / factor
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Pearson correlation coefficient rounded to 2 decimal places
///
/// Formula: `Σ(xi−x̄)(yi−ȳ) / sqrt(Σ(xi−x̄)² · Σ(yi−ȳ)²)`
///
/// Returns `0.0` when fewer than two pairs are available or either series has
/// no variance. Series of unequal length are compared over their common prefix.
pub fn pearson_corr(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let mx = mean(x);
    let my = mean(y);

    let num: f64 = x.iter().zip(y).map(|(xi, yi)| (xi - mx) * (yi - my)).sum();
    let sx: f64 = x.iter().map(|xi| (xi - mx).powi(2)).sum();
    let sy: f64 = y.iter().map(|yi| (yi - my).powi(2)).sum();
    let den = (sx * sy).sqrt();

    if den == 0.0 || !den.is_finite() {
        return 0.0;
    }
    round_dp(num / den, 2)
}

/// Trailing moving average with window `k`
///
/// Each output `i` averages `values[i+1-min(k, i+1) ..= i]`: the window grows
/// at the start of the series and never looks ahead. A window of `0` is
/// treated as `1`.
pub fn moving_average(values: &[f64], k: usize) -> Vec<f64> {
    let k = k.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(k);
            mean(&values[start..=i])
        })
        .collect()
}

/// Count consecutive `true` values at the end of the sequence.
pub fn streak_count(flags: &[bool]) -> u32 {
    flags.iter().rev().take_while(|&&f| f).count() as u32
}

/// Share of `true` values as a rounded percentage, `0` for an empty slice.
pub fn rate_percent(flags: &[bool]) -> u8 {
    if flags.is_empty() {
        return 0;
    }
    let hits = flags.iter().filter(|&&f| f).count() as f64;
    round_half_up(hits / flags.len() as f64 * 100.0) as u8
}
