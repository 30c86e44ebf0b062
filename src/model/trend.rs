//! Short-term trend
//!
//! Derived from the current score and the second-to-last reading of a
//! chronological history window.

use serde::Serialize;

use super::reading::Reading;

/// Deltas above this are an improvement, below its negation a decline
pub const TREND_THRESHOLD: f64 = 5.0;

/// Direction of the eco-score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendKind {
    Improving,
    Stable,
    Declining,
}

/// Trend with its display label and colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub kind: TrendKind,
    pub label: &'static str,
    pub color: &'static str,
}

impl Trend {
    pub const IMPROVING: Trend = Trend {
        kind: TrendKind::Improving,
        label: "↗ Mejora",
        color: "#2e7d32",
    };

    pub const STABLE: Trend = Trend {
        kind: TrendKind::Stable,
        label: "→ Estable",
        color: "#555",
    };

    pub const DECLINING: Trend = Trend {
        kind: TrendKind::Declining,
        label: "↘ Empeora",
        color: "#c62828",
    };

    /// Classify a score delta
    pub fn from_delta(delta: f64) -> Self {
        if delta > TREND_THRESHOLD {
            Self::IMPROVING
        } else if delta < -TREND_THRESHOLD {
            Self::DECLINING
        } else {
            Self::STABLE
        }
    }

    /// Trend of `current` against a chronological (oldest first) window.
    ///
    /// Windows shorter than two readings are always stable.
    pub fn compute(current: f64, chronological: &[Reading]) -> Self {
        if chronological.len() < 2 {
            return Self::STABLE;
        }

        let previous = chronological[chronological.len() - 2].ecoscore;
        Self::from_delta(current - previous)
    }
}
