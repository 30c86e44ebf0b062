//! Dashboard
//!
//! The polling side of EcoWatcher: the [`Poller`] fetches the latest reading
//! and derives what the summary card should show, the [`ChartRenderer`] keeps
//! the history chart current, and [`Dashboard`] runs both once per cycle.
//!
//! Nothing here touches a document directly. The poller describes its
//! updates as [`ViewEffect`]s which a [`ScoreView`] applies, and the chart is
//! drawn through a [`ChartSurface`], so the same code drives the browser
//! frontend and the terminal watcher.

pub mod chart;
pub mod poller;
pub mod terminal;
pub mod text_chart;

pub use chart::{
    ChartError, ChartHandle, ChartRenderer, ChartState, ChartStyle, ChartSurface, LineChartSpec,
    RenderError, RenderOutcome,
};
pub use poller::{PollError, PollReport, PollStatus, Poller};
pub use terminal::TerminalView;
pub use text_chart::TextChart;

use std::rc::Rc;
use std::time::Duration;

use crate::client::EcoApi;
use crate::model::{Severity, Trend};

/// Default refresh interval (60 000 ms)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);
/// Readings shown on the chart
pub const DEFAULT_HISTORY_LIMIT: usize = 30;
/// Readings requested to derive the trend
pub const DEFAULT_TREND_LIMIT: usize = 2;

/// Placeholder shown when the backend has no readings
pub const NO_DATA_TEXT: &str = "No hay datos aún";
/// Border applied to the summary card on critical readings
pub const CRITICAL_BORDER: &str = "3px solid #e53935";

/// A single update to the summary card
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    /// Text of the latest-score element (`#ultimo`)
    ScoreText(String),
    /// Severity label and class (`#estado`)
    Severity(Severity),
    /// Trend label and colour (`#tendencia`)
    Trend(Trend),
    /// Visibility of the alert banner (`#alerta`)
    AlertBanner { visible: bool },
    /// Border of the summary card (`#card-principal`), `None` removes it
    CardHighlight { border: Option<&'static str> },
    /// Restart the alert sound from zero and play it (`#alerta-sound`)
    PlayAlertSound,
}

/// Something that can display the summary card
///
/// Implementations skip effects whose target element does not exist.
pub trait ScoreView {
    fn apply(&mut self, effect: &ViewEffect);
}

impl ScoreView for Vec<ViewEffect> {
    fn apply(&mut self, effect: &ViewEffect) {
        self.push(effect.clone());
    }
}

/// Dashboard timing and window sizes
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub poll_interval: Duration,
    pub history_limit: usize,
    pub trend_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            history_limit: DEFAULT_HISTORY_LIMIT,
            trend_limit: DEFAULT_TREND_LIMIT,
        }
    }
}

/// Outcome of one refresh cycle
#[derive(Debug)]
pub struct TickReport {
    pub poll: PollStatus,
    pub render: RenderOutcome,
}

impl TickReport {
    /// True when neither half of the cycle failed
    pub fn is_ok(&self) -> bool {
        !matches!(self.poll, PollStatus::Failed(_))
            && !matches!(self.render, RenderOutcome::Failed(_))
    }
}

/// Poller and chart renderer sharing one backend client
pub struct Dashboard<A: EcoApi, S: ChartSurface> {
    poller: Poller<A>,
    renderer: ChartRenderer<A, S>,
    config: DashboardConfig,
}

impl<A: EcoApi, S: ChartSurface> Dashboard<A, S> {
    pub fn new(api: A, config: DashboardConfig) -> Self {
        let api = Rc::new(api);
        Self {
            poller: Poller::new(Rc::clone(&api), config.trend_limit),
            renderer: ChartRenderer::new(api, config.history_limit),
            config,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn poller(&self) -> &Poller<A> {
        &self.poller
    }

    pub fn renderer(&self) -> &ChartRenderer<A, S> {
        &self.renderer
    }

    /// Refresh the summary card, then redraw the chart.
    ///
    /// Failures are logged and reported, never propagated; whatever the view
    /// showed before a failed step stays on screen.
    pub async fn tick<V: ScoreView>(&self, view: &mut V, surface: Option<&S>) -> TickReport {
        let report = self.poller.fetch_latest().await;
        for effect in &report.effects {
            view.apply(effect);
        }

        if let PollStatus::Failed(e) = &report.status {
            tracing::error!("Error loading latest eco-score: {}", e);
        }

        let render = self.renderer.render(surface).await;
        match &render {
            RenderOutcome::Failed(e) => tracing::error!("Error drawing chart: {}", e),
            RenderOutcome::NoCanvas => tracing::debug!("No chart surface, skipping render"),
            RenderOutcome::Drawn { points } => tracing::debug!(points, "Chart redrawn"),
        }

        TickReport {
            poll: report.status,
            render,
        }
    }
}

/// Tick immediately, then every `poll_interval`, until `shutdown` resolves.
///
/// Cycles run back to back on one task, so they cannot overlap here.
#[cfg(feature = "native")]
pub async fn watch<A, S, V, F>(
    dashboard: &Dashboard<A, S>,
    view: &mut V,
    surface: Option<&S>,
    shutdown: F,
) -> u64
where
    A: EcoApi,
    S: ChartSurface,
    V: ScoreView,
    F: std::future::Future<Output = ()>,
{
    let mut interval = tokio::time::interval(dashboard.config().poll_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut cycles = 0;
    loop {
        tokio::select! {
            _ = interval.tick() => {
                let report = dashboard.tick(view, surface).await;
                cycles += 1;
                tracing::debug!(cycle = cycles, ok = report.is_ok(), "Refresh cycle finished");
            }
            _ = &mut shutdown => {
                tracing::info!("Stopping watcher after {} cycles", cycles);
                break;
            }
        }
    }

    cycles
}
