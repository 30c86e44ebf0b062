//! Chart Renderer
//!
//! Turns the history window into a line-chart spec and redraws it. The
//! renderer owns the only handle to the live chart; a redraw destroys the
//! previous chart before drawing the next, so a surface never carries more
//! than one chart at a time.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

use crate::client::{ClientError, EcoApi};
use crate::model::Reading;

/// Errors raised by a chart surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("2d context unavailable")]
    NoContext,

    #[error("surface already holds a chart")]
    SurfaceBusy,

    #[error("draw failed: {0}")]
    Draw(String),
}

/// Errors surfaced by a render cycle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("history request failed: {0}")]
    History(#[from] ClientError),

    #[error("chart error: {0}")]
    Chart(#[from] ChartError),
}

/// How a render cycle ended
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// A new chart with this many points replaced the previous one
    Drawn { points: usize },
    /// No surface to draw on; nothing was requested or changed
    NoCanvas,
    Failed(RenderError),
}

/// Fixed visual style of the eco-score chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub line_width: f64,
    pub tension: f64,
    pub line_color: &'static str,
    pub point_color: &'static str,
    pub point_radius: f64,
    pub point_hover_radius: f64,
    pub animation: bool,
    pub responsive: bool,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_width: 3.0,
            tension: 0.3,
            line_color: "#666",
            point_color: "#444",
            point_radius: 4.0,
            point_hover_radius: 6.0,
            animation: false,
            responsive: true,
            y_min: 0.0,
            y_max: 500.0,
        }
    }
}

/// Everything a surface needs to draw the chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub dataset_label: &'static str,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub style: ChartStyle,
}

impl LineChartSpec {
    /// Build the spec from chronological readings
    pub fn from_readings(readings: &[Reading]) -> Self {
        Self {
            dataset_label: "EcoScore",
            labels: readings.iter().map(|r| r.timestamp.clone()).collect(),
            values: readings.iter().map(|r| r.ecoscore).collect(),
            style: ChartStyle::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Map a value to `[0, 1]` on the fixed y axis (clamped)
    pub fn y_fraction(&self, value: f64) -> f64 {
        let span = self.style.y_max - self.style.y_min;
        ((value - self.style.y_min) / span).clamp(0.0, 1.0)
    }
}

/// A drawn chart. Destroying it releases its surface.
pub trait ChartHandle {
    fn destroy(self);
}

/// Something a line chart can be drawn on
pub trait ChartSurface {
    type Handle: ChartHandle;

    fn draw(&self, spec: &LineChartSpec) -> Result<Self::Handle, ChartError>;
}

/// Owned slot for the live chart
pub struct ChartState<H: ChartHandle> {
    current: Option<H>,
}

impl<H: ChartHandle> Default for ChartState<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ChartHandle> ChartState<H> {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&H> {
        self.current.as_ref()
    }

    /// Destroy the live chart, if any
    pub fn destroy(&mut self) {
        if let Some(old) = self.current.take() {
            old.destroy();
        }
    }

    /// Destroy the live chart and keep `handle` instead
    pub fn replace(&mut self, handle: H) {
        self.destroy();
        self.current = Some(handle);
    }
}

/// History chart renderer
pub struct ChartRenderer<A: EcoApi, S: ChartSurface> {
    api: Rc<A>,
    history_limit: usize,
    state: RefCell<ChartState<S::Handle>>,
}

impl<A: EcoApi, S: ChartSurface> ChartRenderer<A, S> {
    pub fn new(api: Rc<A>, history_limit: usize) -> Self {
        Self::with_state(api, history_limit, ChartState::new())
    }

    /// Renderer over an existing chart slot
    pub fn with_state(api: Rc<A>, history_limit: usize, state: ChartState<S::Handle>) -> Self {
        Self {
            api,
            history_limit,
            state: RefCell::new(state),
        }
    }

    /// True while a chart drawn by this renderer is live
    pub fn has_chart(&self) -> bool {
        self.state.borrow().is_live()
    }

    /// History window, oldest first
    pub async fn fetch_history(&self) -> Result<Vec<Reading>, ClientError> {
        let window = self.api.history(self.history_limit).await?;
        Ok(window.chronological())
    }

    /// Fetch the history and redraw the chart on `surface`.
    ///
    /// A failed fetch leaves the previous chart in place. The previous chart
    /// is destroyed before drawing, so a failed draw leaves none.
    pub async fn render(&self, surface: Option<&S>) -> RenderOutcome {
        let Some(surface) = surface else {
            return RenderOutcome::NoCanvas;
        };

        let readings = match self.fetch_history().await {
            Ok(readings) => readings,
            Err(e) => return RenderOutcome::Failed(e.into()),
        };
        let spec = LineChartSpec::from_readings(&readings);

        let mut state = self.state.borrow_mut();
        state.destroy();
        match surface.draw(&spec) {
            Ok(handle) => {
                state.replace(handle);
                RenderOutcome::Drawn { points: spec.len() }
            }
            Err(e) => RenderOutcome::Failed(e.into()),
        }
    }
}
