//! Global Application State
//!
//! Reactive state of the summary card, fed by the dashboard poller.

use leptos::*;

use ecowatcher::dashboard::ViewEffect;
use ecowatcher::model::{Severity, Trend};

/// Placeholder shown before the first reading arrives
pub const LOADING_TEXT: &str = "Cargando...";

/// Dashboard state provided to all components
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Text of `#ultimo`
    pub score_text: RwSignal<String>,
    /// Severity of the latest reading
    pub severity: RwSignal<Option<Severity>>,
    /// Trend against the previous reading
    pub trend: RwSignal<Option<Trend>>,
    /// Whether the critical banner is shown
    pub alert_visible: RwSignal<bool>,
    /// Border of the summary card
    pub card_border: RwSignal<Option<&'static str>>,
    /// Time of the last completed refresh
    pub last_refresh: RwSignal<Option<String>>,
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() {
    let state = DashboardState {
        score_text: create_rw_signal(LOADING_TEXT.to_string()),
        severity: create_rw_signal(None),
        trend: create_rw_signal(None),
        alert_visible: create_rw_signal(false),
        card_border: create_rw_signal(None),
        last_refresh: create_rw_signal(None),
    };

    provide_context(state);
}

impl DashboardState {
    /// Apply a card update. The alert sound is not state and is ignored.
    pub fn apply(&self, effect: &ViewEffect) {
        match effect {
            ViewEffect::ScoreText(text) => self.score_text.set(text.clone()),
            ViewEffect::Severity(severity) => self.severity.set(Some(*severity)),
            ViewEffect::Trend(trend) => self.trend.set(Some(*trend)),
            ViewEffect::AlertBanner { visible } => self.alert_visible.set(*visible),
            ViewEffect::CardHighlight { border } => self.card_border.set(*border),
            ViewEffect::PlayAlertSound => {}
        }
    }

    /// Record a finished refresh cycle
    pub fn mark_refreshed(&self) {
        let now = chrono::Local::now().format("%H:%M:%S").to_string();
        self.last_refresh.set(Some(now));
    }
}

/// Class of `#estado`
pub fn estado_class(severity: Option<Severity>) -> String {
    match severity {
        Some(severity) => format!("eco-state {}", severity.css_class()),
        None => "eco-state".to_string(),
    }
}

/// Inline border of `#card-principal`
pub fn border_style(border: Option<&'static str>) -> &'static str {
    border.unwrap_or("none")
}
