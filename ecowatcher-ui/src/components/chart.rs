//! Chart Component
//!
//! Eco-score history chart drawn on an HTML5 Canvas.

use leptos::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use ecowatcher::dashboard::{ChartError, ChartHandle, ChartSurface, LineChartSpec};

/// Space reserved around the plot for axis labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    fn for_canvas(width: f64, height: f64) -> Self {
        let (margin_left, margin_right, margin_top, margin_bottom) = (45.0, 15.0, 30.0, 35.0);
        Self {
            left: margin_left,
            top: margin_top,
            width: (width - margin_left - margin_right).max(1.0),
            height: (height - margin_top - margin_bottom).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Canvas coordinates of every plottable value, in order
pub fn plot_points(spec: &LineChartSpec, area: &PlotArea) -> Vec<(f64, f64)> {
    let n = spec.len();
    spec.values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(i, value)| {
            let x = if n > 1 {
                area.left + area.width * i as f64 / (n - 1) as f64
            } else {
                area.left + area.width / 2.0
            };
            let y = area.bottom() - spec.y_fraction(*value) * area.height;
            (x, y)
        })
        .collect()
}

/// Bezier control points for each segment of a curve through `points`.
///
/// `tension` 0 gives straight segments.
pub fn control_points(points: &[(f64, f64)], tension: f64) -> Vec<((f64, f64), (f64, f64))> {
    if points.len() < 2 {
        return Vec::new();
    }

    let last = points.len() - 1;
    (0..last)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(last)];

            let k = tension / 2.0;
            let c1 = (p1.0 + (p2.0 - p0.0) * k / 2.0, p1.1 + (p2.1 - p0.1) * k / 2.0);
            let c2 = (p2.0 - (p3.0 - p1.0) * k / 2.0, p2.1 - (p3.1 - p1.1) * k / 2.0);
            (c1, c2)
        })
        .collect()
}

/// "HH:MM" part of a backend timestamp, or the label unchanged
pub fn short_label(label: &str) -> &str {
    label.get(11..16).unwrap_or(label)
}

/// Canvas holding at most one live chart
#[derive(Clone)]
pub struct CanvasChart {
    canvas: NodeRef<html::Canvas>,
    live: Rc<Cell<bool>>,
}

/// The chart currently painted on a [`CanvasChart`]
pub struct CanvasChartHandle {
    canvas: HtmlCanvasElement,
    live: Rc<Cell<bool>>,
}

impl ChartHandle for CanvasChartHandle {
    fn destroy(self) {
        if let Some(ctx) = context_2d(&self.canvas) {
            ctx.clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        }
        self.live.set(false);
    }
}

impl CanvasChart {
    pub fn new(canvas: NodeRef<html::Canvas>) -> Self {
        Self {
            canvas,
            live: Rc::new(Cell::new(false)),
        }
    }

    /// True once the canvas element is in the document
    pub fn is_mounted(&self) -> bool {
        self.canvas.get_untracked().is_some()
    }
}

impl ChartSurface for CanvasChart {
    type Handle = CanvasChartHandle;

    fn draw(&self, spec: &LineChartSpec) -> Result<CanvasChartHandle, ChartError> {
        if self.live.get() {
            return Err(ChartError::SurfaceBusy);
        }

        let canvas: HtmlCanvasElement = match self.canvas.get_untracked() {
            Some(canvas) => (*canvas).clone(),
            None => return Err(ChartError::NoContext),
        };
        let ctx = context_2d(&canvas).ok_or(ChartError::NoContext)?;

        if spec.style.responsive {
            let client_width = canvas.client_width();
            if client_width > 0 {
                canvas.set_width(client_width as u32);
            }
        }

        draw_line_chart(&canvas, &ctx, spec).map_err(|e| ChartError::Draw(format!("{:?}", e)))?;

        self.live.set(true);
        Ok(CanvasChartHandle {
            canvas,
            live: Rc::clone(&self.live),
        })
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

/// Paint `spec` onto the canvas
fn draw_line_chart(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    spec: &LineChartSpec,
) -> Result<(), JsValue> {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let area = PlotArea::for_canvas(width, height);
    let style = &spec.style;

    ctx.clear_rect(0.0, 0.0, width, height);

    // Horizontal grid every 100 points
    ctx.set_stroke_style(&"#e0e0e0".into());
    ctx.set_line_width(1.0);
    ctx.set_fill_style(&"#777".into());
    ctx.set_font("11px sans-serif");
    let steps = ((style.y_max - style.y_min) / 100.0).round().max(1.0) as usize;
    for i in 0..=steps {
        let fraction = i as f64 / steps as f64;
        let y = area.bottom() - fraction * area.height;
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.left + area.width, y);
        ctx.stroke();

        let value = style.y_min + fraction * (style.y_max - style.y_min);
        ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0)?;
    }

    // Legend
    ctx.set_fill_style(&style.line_color.into());
    ctx.fill_rect(area.left, 8.0, 24.0, 10.0);
    ctx.set_fill_style(&"#333".into());
    ctx.set_font("12px sans-serif");
    ctx.fill_text(&spec.dataset_label, area.left + 30.0, 17.0)?;

    let points = plot_points(spec, &area);
    if points.is_empty() {
        ctx.set_fill_style(&"#999".into());
        ctx.set_font("14px sans-serif");
        ctx.fill_text("Sin lecturas", width / 2.0 - 40.0, height / 2.0)?;
        return Ok(());
    }

    // Line
    ctx.set_stroke_style(&style.line_color.into());
    ctx.set_line_width(style.line_width);
    ctx.begin_path();
    ctx.move_to(points[0].0, points[0].1);
    for (i, (c1, c2)) in control_points(&points, style.tension).into_iter().enumerate() {
        let end = points[i + 1];
        ctx.bezier_curve_to(c1.0, c1.1, c2.0, c2.1, end.0, end.1);
    }
    ctx.stroke();

    // Points
    ctx.set_fill_style(&style.point_color.into());
    for (x, y) in &points {
        ctx.begin_path();
        ctx.arc(*x, *y, style.point_radius, 0.0, std::f64::consts::PI * 2.0)?;
        ctx.fill();
    }

    // X-axis labels: at most six, always the first and the last
    ctx.set_fill_style(&"#777".into());
    ctx.set_font("11px sans-serif");
    let n = spec.labels.len();
    let every = n.div_ceil(6).max(1);
    for (i, label) in spec.labels.iter().enumerate() {
        if i % every != 0 && i != n - 1 {
            continue;
        }
        let x = if n > 1 {
            area.left + area.width * i as f64 / (n - 1) as f64
        } else {
            area.left + area.width / 2.0
        };
        ctx.fill_text(short_label(label), x - 15.0, height - 12.0)?;
    }

    Ok(())
}

/// Canvas element of the history chart (`#grafico`)
#[component]
pub fn EcoChart(canvas_ref: NodeRef<html::Canvas>) -> impl IntoView {
    view! {
        <div class="chart-container">
            <canvas id="grafico" node_ref=canvas_ref width="800" height="350" />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecowatcher::model::Reading;

    fn spec(values: &[f64]) -> LineChartSpec {
        let readings: Vec<Reading> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Reading::new(*v, format!("2024-05-01 10:{:02}:00", i)))
            .collect();
        LineChartSpec::from_readings(&readings)
    }

    fn area() -> PlotArea {
        PlotArea {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 500.0,
        }
    }

    #[test]
    fn test_plot_points_span_area() {
        let points = plot_points(&spec(&[0.0, 250.0, 500.0]), &area());
        assert_eq!(points, vec![(0.0, 500.0), (50.0, 250.0), (100.0, 0.0)]);
    }

    #[test]
    fn test_single_point_is_centered() {
        assert_eq!(plot_points(&spec(&[100.0]), &area()), vec![(50.0, 400.0)]);
    }

    #[test]
    fn test_values_are_clamped_to_axis() {
        let points = plot_points(&spec(&[-20.0, 900.0]), &area());
        assert_eq!(points[0].1, 500.0);
        assert_eq!(points[1].1, 0.0);
    }

    #[test]
    fn test_straight_line_controls_stay_on_line() {
        let points = vec![(0.0, 0.0), (10.0, 10.0), (20.0, 20.0)];
        for (c1, c2) in control_points(&points, 0.3) {
            assert_eq!(c1.0, c1.1);
            assert_eq!(c2.0, c2.1);
        }
        assert!(control_points(&points[..1], 0.3).is_empty());
    }

    #[test]
    fn test_zero_tension_is_straight() {
        let points = vec![(0.0, 0.0), (10.0, 40.0), (20.0, 5.0)];
        let controls = control_points(&points, 0.0);
        assert_eq!(controls[0], ((0.0, 0.0), (10.0, 40.0)));
        assert_eq!(controls[1], ((10.0, 40.0), (20.0, 5.0)));
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("2024-05-01 10:59:00"), "10:59");
        assert_eq!(short_label("ayer"), "ayer");
    }
}
