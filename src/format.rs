// 💴 Currency & percentage formatting
//
// All amounts are shown in millions of yen with one decimal place.

use crate::amount::{normalize_amount, NormalizedAmount, RawAmount};

pub const MILLION: f64 = 1_000_000.0;

/// Unit suffix appended to every formatted amount ("million yen").
pub const MILLION_YEN_SUFFIX: &str = "百万円";

/// Display value used whenever an amount cannot be parsed.
pub const FALLBACK_CURRENCY: &str = "0百万円";

/// Placeholder for a percentage whose denominator is zero.
pub const NOT_AVAILABLE: &str = "N/A";

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Keep "-0.0" out of the displayed strings
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Amount in millions, rounded to one decimal, without the suffix.
pub fn to_millions(value: f64) -> f64 {
    round_to(value / MILLION, 1)
}

/// Format any accepted amount shape as millions of yen. Never fails.
///
/// ```
/// use statement_visualizer::format_currency;
///
/// assert_eq!(format_currency(5_000_000.0), "5.0百万円");
/// assert_eq!(format_currency("3000000"), "3.0百万円");
/// assert_eq!(format_currency("abc"), "0百万円");
/// ```
pub fn format_currency(amount: impl Into<RawAmount>) -> String {
    match normalize_amount(amount) {
        NormalizedAmount::Finite(value) => format!("{:.1}{}", to_millions(value), MILLION_YEN_SUFFIX),
        NormalizedAmount::Unparseable => FALLBACK_CURRENCY.to_string(),
    }
}

/// Format a fraction (0.133) as a one-decimal percentage ("13.3%").
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", round_to(fraction * 100.0, 1))
}

/// Whole-number percentage label for a bar ("13%"); halves round up.
pub fn format_percent_label(percent: f64) -> String {
    let whole = (percent + 0.5).floor();
    format!("{}%", if whole == 0.0 { 0.0 } else { whole })
}
