//! Terminal chart
//!
//! Plain-text rendition of the eco-score line chart for the CLI watcher.

use std::cell::RefCell;
use std::rc::Rc;

use super::chart::{ChartError, ChartHandle, ChartSurface, LineChartSpec};
use crate::model::Reading;

/// Text surface holding at most one rendered chart
pub struct TextChart {
    height: usize,
    echo: bool,
    canvas: Rc<RefCell<Option<String>>>,
}

/// Handle to the chart currently on a [`TextChart`]
pub struct TextChartHandle {
    canvas: Rc<RefCell<Option<String>>>,
}

impl ChartHandle for TextChartHandle {
    fn destroy(self) {
        self.canvas.borrow_mut().take();
    }
}

impl Default for TextChart {
    fn default() -> Self {
        Self::new(10)
    }
}

impl TextChart {
    /// Surface with `height` plot rows (at least two)
    pub fn new(height: usize) -> Self {
        Self {
            height: height.max(2),
            echo: false,
            canvas: Rc::new(RefCell::new(None)),
        }
    }

    /// Also print every chart to stdout as it is drawn
    pub fn with_echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// The chart currently drawn, if any
    pub fn rendered(&self) -> Option<String> {
        self.canvas.borrow().clone()
    }
}

impl ChartSurface for TextChart {
    type Handle = TextChartHandle;

    fn draw(&self, spec: &LineChartSpec) -> Result<TextChartHandle, ChartError> {
        let mut canvas = self.canvas.borrow_mut();
        if canvas.is_some() {
            return Err(ChartError::SurfaceBusy);
        }

        let text = render(spec, self.height);
        if self.echo {
            println!("{}", text);
        }
        *canvas = Some(text);
        Ok(TextChartHandle {
            canvas: Rc::clone(&self.canvas),
        })
    }
}

fn render(spec: &LineChartSpec, height: usize) -> String {
    let mut out = format!("{}\n", spec.dataset_label);

    if spec.is_empty() {
        out.push_str("  (sin lecturas)\n");
        return out;
    }

    let columns = spec.len() * 2;
    let mut grid = vec![vec![' '; columns]; height];

    for (i, value) in spec.values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        let fraction = spec.y_fraction(*value);
        let row = height - 1 - (fraction * (height - 1) as f64).round() as usize;
        grid[row][i * 2] = '*';
    }

    let span = spec.style.y_max - spec.style.y_min;
    for (r, row) in grid.iter().enumerate() {
        let tick = spec.style.y_max - span * r as f64 / (height - 1) as f64;
        let line: String = row.iter().collect();
        out.push_str(&format!("{:>5.0} |{}\n", tick, line.trim_end()));
    }

    out.push_str(&format!("      +{}\n", "-".repeat(columns)));

    let first = short_label(&spec.labels[0]);
    let last = short_label(&spec.labels[spec.labels.len() - 1]);
    if spec.len() > 1 {
        let gap = columns.saturating_sub(first.len() + last.len()).max(1);
        out.push_str(&format!("       {}{}{}\n", first, " ".repeat(gap), last));
    } else {
        out.push_str(&format!("       {}\n", first));
    }

    out
}

/// `HH:MM` for backend timestamps, the raw label otherwise
fn short_label(label: &str) -> String {
    Reading::new(0.0, label)
        .parsed_timestamp()
        .map(|ts| ts.format("%H:%M").to_string())
        .unwrap_or_else(|| label.to_string())
}
