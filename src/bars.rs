// 📊 Proportional bar widths on a shared scale

use serde::{Deserialize, Serialize};

/// Colour category of a bar. Only the sign of the flow decides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarTone {
    Inflow,
    Outflow,
}

impl BarTone {
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            BarTone::Inflow
        } else {
            BarTone::Outflow
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub value: f64,
    /// 0-100, relative to the largest magnitude in the set
    pub width_pct: f64,
    pub tone: BarTone,
}

/// Largest absolute magnitude; 0 for an empty set.
pub fn shared_scale(magnitudes: &[f64]) -> f64 {
    magnitudes
        .iter()
        .filter(|m| m.is_finite())
        .fold(0.0_f64, |scale, m| scale.max(m.abs()))
}

/// `|m| / max|m| * 100` for every magnitude. A zero scale yields 0 for all bars.
pub fn compute_bar_widths(magnitudes: &[f64]) -> Vec<f64> {
    let scale = shared_scale(magnitudes);
    magnitudes.iter().map(|m| width_on_scale(*m, scale)).collect()
}

/// Widths plus tone, for callers that colour by sign.
pub fn compute_bars(magnitudes: &[f64]) -> Vec<Bar> {
    let scale = shared_scale(magnitudes);
    magnitudes
        .iter()
        .map(|m| Bar {
            value: *m,
            width_pct: width_on_scale(*m, scale),
            tone: BarTone::of(*m),
        })
        .collect()
}

pub fn width_on_scale(value: f64, scale: f64) -> f64 {
    if scale == 0.0 || !value.is_finite() {
        return 0.0;
    }
    value.abs() / scale * 100.0
}
