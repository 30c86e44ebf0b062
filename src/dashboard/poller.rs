//! Eco-Score Poller
//!
//! Fetches the latest reading, classifies it, derives the trend and decides
//! whether the critical alert fires.

use std::rc::Rc;
use thiserror::Error;

use super::{ViewEffect, CRITICAL_BORDER, NO_DATA_TEXT};
use crate::client::{ClientError, EcoApi};
use crate::model::{Latest, Reading, Severity, Trend};

/// Errors surfaced by a poll cycle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PollError {
    #[error("latest reading request failed: {0}")]
    Latest(ClientError),

    #[error("trend request failed: {0}")]
    Trend(ClientError),
}

/// How a poll cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum PollStatus {
    /// Card fully refreshed
    Updated {
        score: f64,
        severity: Severity,
        trend: Trend,
    },
    /// Backend has no readings yet; only the placeholder was shown
    NoData,
    /// Cycle stopped early; effects produced before the failure still apply
    Failed(PollError),
}

/// Effects to apply, in order, plus how the cycle ended
#[derive(Debug, Clone, PartialEq)]
pub struct PollReport {
    pub effects: Vec<ViewEffect>,
    pub status: PollStatus,
}

/// Latest-reading poller
pub struct Poller<A: EcoApi> {
    api: Rc<A>,
    trend_limit: usize,
}

impl<A: EcoApi> Poller<A> {
    pub fn new(api: Rc<A>, trend_limit: usize) -> Self {
        Self { api, trend_limit }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the latest reading and describe the resulting card update.
    ///
    /// Never fails: errors end up in [`PollStatus::Failed`].
    pub async fn fetch_latest(&self) -> PollReport {
        let mut effects = Vec::new();

        let reading = match self.api.latest().await {
            Ok(Latest::Reading(reading)) => reading,
            Ok(Latest::NoData) => {
                effects.push(ViewEffect::ScoreText(NO_DATA_TEXT.to_string()));
                return PollReport {
                    effects,
                    status: PollStatus::NoData,
                };
            }
            Err(e) => {
                tracing::warn!("Latest reading unavailable: {}", e);
                return PollReport {
                    effects,
                    status: PollStatus::Failed(PollError::Latest(e)),
                };
            }
        };

        let score = reading.ecoscore;
        effects.push(ViewEffect::ScoreText(format_score(&reading)));

        let severity = Severity::classify(score);
        effects.push(ViewEffect::Severity(severity));

        let trend = match self.fetch_trend(score).await {
            Ok(trend) => trend,
            Err(e) => {
                tracing::warn!("Trend unavailable: {}", e);
                return PollReport {
                    effects,
                    status: PollStatus::Failed(PollError::Trend(e)),
                };
            }
        };
        effects.push(ViewEffect::Trend(trend));

        if severity.is_critical() {
            tracing::warn!(score, "Critical eco-score");
            effects.push(ViewEffect::AlertBanner { visible: true });
            effects.push(ViewEffect::CardHighlight {
                border: Some(CRITICAL_BORDER),
            });
            effects.push(ViewEffect::PlayAlertSound);
        } else {
            effects.push(ViewEffect::AlertBanner { visible: false });
            effects.push(ViewEffect::CardHighlight { border: None });
        }

        PollReport {
            effects,
            status: PollStatus::Updated {
                score,
                severity,
                trend,
            },
        }
    }

    /// Trend of `current` against the short history window
    pub async fn fetch_trend(&self, current: f64) -> Result<Trend, ClientError> {
        let window = self.api.history(self.trend_limit).await?;
        Ok(Trend::compute(current, &window.chronological()))
    }
}

/// `"312.46 (2024-05-01 10:00:00)"`
pub fn format_score(reading: &Reading) -> String {
    format!("{:.2} ({})", reading.ecoscore, reading.timestamp)
}
