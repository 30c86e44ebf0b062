//! Severity bands
//!
//! Four ordered, contiguous bands covering every score. Upper bounds are
//! exclusive, so 200 is already moderate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores below this are critical and raise the alert
pub const CRITICAL_BELOW: f64 = 200.0;
/// Scores below this (and at least critical) are moderate
pub const MODERATE_BELOW: f64 = 350.0;
/// Scores below this (and at least moderate) are good
pub const GOOD_BELOW: f64 = 450.0;

/// Severity band for an eco-score, in ascending order of quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Moderate,
    Good,
    Excellent,
}

impl Severity {
    /// All bands, worst first
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Moderate,
        Severity::Good,
        Severity::Excellent,
    ];

    /// Classify a score. NaN never satisfies a comparison, so it is pinned to
    /// critical rather than falling through to excellent.
    pub fn classify(score: f64) -> Self {
        if score.is_nan() || score < CRITICAL_BELOW {
            Severity::Critical
        } else if score < MODERATE_BELOW {
            Severity::Moderate
        } else if score < GOOD_BELOW {
            Severity::Good
        } else {
            Severity::Excellent
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Crítico",
            Severity::Moderate => "Moderado",
            Severity::Good => "Bueno",
            Severity::Excellent => "Excelente",
        }
    }

    /// CSS class applied next to `eco-state`
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Moderate => "moderate",
            Severity::Good => "good",
            Severity::Excellent => "excellent",
        }
    }

    /// Human readable score range
    pub fn range_label(&self) -> &'static str {
        match self {
            Severity::Critical => "< 200",
            Severity::Moderate => "200 – < 350",
            Severity::Good => "350 – < 450",
            Severity::Excellent => "≥ 450",
        }
    }

    /// General advice shown for the band
    pub fn advice(&self) -> &'static str {
        match self {
            Severity::Critical => {
                "El ecosistema está en estado CRÍTICO. Se requiere intervención urgente."
            }
            Severity::Moderate => {
                "Estado MODERADO: hay problemas, pero pueden mejorarse con acciones continuas."
            }
            Severity::Good => "Estado BUENO: sigue fortaleciendo los aspectos ambientales.",
            Severity::Excellent => "¡Excelente estado ambiental! Mantén las prácticas actuales.",
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Severity::Critical)
    }
}

/// Reference row describing one band, as shown in the score table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandRow {
    pub range: String,
    pub label: String,
    pub class: String,
}

impl From<Severity> for BandRow {
    fn from(severity: Severity) -> Self {
        Self {
            range: severity.range_label().to_string(),
            label: severity.label().to_string(),
            class: severity.css_class().to_string(),
        }
    }
}

impl Severity {
    /// Reference rows for every band, worst first
    pub fn reference_rows() -> Vec<BandRow> {
        Self::ALL.into_iter().map(BandRow::from).collect()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
