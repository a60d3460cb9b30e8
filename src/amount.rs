// 🔢 Amount Normalization - one canonical number at the boundary
//
// Display code receives amounts as numbers, numeric strings, or lists whose first
// element carries the value. Everything downstream works on NormalizedAmount only.

use crate::error::{MetricsError, MetricsResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// RAW INPUT
// ============================================================================

/// One element of a list-shaped amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountElement {
    Number(f64),
    Text(String),
}

/// Amount as handed over by a caller, before normalization.
///
/// Deserializes from a JSON number, string, array or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
    List(Vec<AmountElement>),
    Missing,
}

impl RawAmount {
    /// Coerce to a finite number, or fail with `ParseFailure`.
    ///
    /// Lists only look at their first element. Text is read up to the first
    /// character that cannot continue a decimal literal.
    pub fn to_finite(&self) -> MetricsResult<f64> {
        let parsed = match self {
            RawAmount::Number(n) => Some(*n),
            RawAmount::Text(text) => parse_leading_decimal(text),
            RawAmount::List(items) => match items.first() {
                Some(AmountElement::Number(n)) => Some(*n),
                Some(AmountElement::Text(text)) => parse_leading_decimal(text),
                None => None,
            },
            RawAmount::Missing => None,
        };

        parsed
            .filter(|n| n.is_finite())
            .ok_or_else(|| MetricsError::ParseFailure {
                input: self.describe(),
            })
    }

    fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<f64> for AmountElement {
    fn from(value: f64) -> Self {
        AmountElement::Number(value)
    }
}

impl From<i64> for AmountElement {
    fn from(value: i64) -> Self {
        AmountElement::Number(value as f64)
    }
}

impl From<&str> for AmountElement {
    fn from(value: &str) -> Self {
        AmountElement::Text(value.to_string())
    }
}

impl From<String> for AmountElement {
    fn from(value: String) -> Self {
        AmountElement::Text(value)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        RawAmount::Number(value as f64)
    }
}

impl From<i32> for RawAmount {
    fn from(value: i32) -> Self {
        RawAmount::Number(value as f64)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        RawAmount::Text(value)
    }
}

impl<T: Into<AmountElement>> From<Vec<T>> for RawAmount {
    fn from(values: Vec<T>) -> Self {
        RawAmount::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RawAmount>> From<Option<T>> for RawAmount {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawAmount::Missing)
    }
}

impl From<NormalizedAmount> for RawAmount {
    fn from(value: NormalizedAmount) -> Self {
        match value {
            NormalizedAmount::Finite(n) => RawAmount::Number(n),
            NormalizedAmount::Unparseable => RawAmount::Missing,
        }
    }
}

// ============================================================================
// NORMALIZED OUTPUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NormalizedAmount {
    Finite(f64),
    Unparseable,
}

impl NormalizedAmount {
    pub fn value(&self) -> Option<f64> {
        match self {
            NormalizedAmount::Finite(n) => Some(*n),
            NormalizedAmount::Unparseable => None,
        }
    }

    pub fn is_parseable(&self) -> bool {
        matches!(self, NormalizedAmount::Finite(_))
    }
}

/// Normalize any accepted amount shape. Parse failures are recovered here.
pub fn normalize_amount(input: impl Into<RawAmount>) -> NormalizedAmount {
    let raw = input.into();
    match raw.to_finite() {
        Ok(n) => NormalizedAmount::Finite(n),
        Err(err) => {
            tracing::debug!(error = %err, "falling back to default amount");
            NormalizedAmount::Unparseable
        }
    }
}

/// Longest decimal prefix after leading whitespace: sign, digits, fraction, exponent.
fn parse_leading_decimal(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            end = j;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < len && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok()
}
