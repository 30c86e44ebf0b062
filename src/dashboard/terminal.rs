//! Terminal summary card
//!
//! [`ScoreView`] that writes card updates as lines of text.

use std::io::Write;

use super::{ScoreView, ViewEffect};

/// Writes each effect as a line; the alert sound is the terminal bell
pub struct TerminalView<W: Write> {
    out: W,
    bell: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, bell: true }
    }

    /// Disable the terminal bell for critical readings
    pub fn without_bell(mut self) -> Self {
        self.bell = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ScoreView for TerminalView<W> {
    fn apply(&mut self, effect: &ViewEffect) {
        let result = match effect {
            ViewEffect::ScoreText(text) => writeln!(self.out, "EcoScore:  {}", text),
            ViewEffect::Severity(severity) => {
                writeln!(self.out, "Estado:    {} - {}", severity.label(), severity.advice())
            }
            ViewEffect::Trend(trend) => writeln!(self.out, "Tendencia: {}", trend.label),
            ViewEffect::AlertBanner { visible: true } => {
                writeln!(self.out, "!! ALERTA: eco-score en nivel crítico !!")
            }
            ViewEffect::AlertBanner { visible: false } | ViewEffect::CardHighlight { .. } => Ok(()),
            ViewEffect::PlayAlertSound if self.bell => write!(self.out, "\x07"),
            ViewEffect::PlayAlertSound => Ok(()),
        };

        if let Err(e) = result.and_then(|_| self.out.flush()) {
            tracing::debug!("Terminal write failed: {}", e);
        }
    }
}
