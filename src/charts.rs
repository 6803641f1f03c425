//! Charts
//!
//! Chart specifications for the two dashboard canvases and the registry
//! that owns their live instances. Drawing is left to a [`ChartSurface`];
//! the registry guarantees at most one live instance per canvas.

use serde::Serialize;
use std::collections::HashMap;

use crate::format;
use crate::model::{CategoryBreakdown, SalesOverview};

/// Fallback segment colors when the server sends none
pub const SEGMENT_COLORS: [&str; 5] = ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

/// Dashboard canvases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CanvasId {
    Sales,
    Category,
}

impl CanvasId {
    /// Element id of the canvas
    pub fn dom_id(&self) -> &'static str {
        match self {
            CanvasId::Sales => "salesChart",
            CanvasId::Category => "categoryChart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendPosition {
    Top,
    Right,
}

/// One series (line) or one ring (doughnut)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    /// Line color; doughnuts have none
    pub border_color: Option<String>,
    /// Area fill for lines, one color per segment for doughnuts
    pub background: Vec<String>,
    pub tension: f64,
    pub fill: bool,
}

/// Everything a surface needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub legend: LegendPosition,
    /// Inner radius of a doughnut, in percent of the outer radius
    pub cutout_percent: Option<u8>,
}

impl ChartSpec {
    /// This week vs. last week line chart
    pub fn sales_overview(data: &SalesOverview) -> Self {
        Self {
            kind: ChartKind::Line,
            labels: data.labels.clone(),
            datasets: vec![
                Dataset {
                    label: "This Week".to_string(),
                    data: data.current_week.clone(),
                    border_color: Some("#2563eb".to_string()),
                    background: vec!["rgba(37, 99, 235, 0.1)".to_string()],
                    tension: 0.4,
                    fill: true,
                },
                Dataset {
                    label: "Last Week".to_string(),
                    data: data.prev_week.clone(),
                    border_color: Some("#94a3b8".to_string()),
                    background: vec!["rgba(148, 163, 184, 0.1)".to_string()],
                    tension: 0.4,
                    fill: true,
                },
            ],
            legend: LegendPosition::Top,
            cutout_percent: None,
        }
    }

    /// Category share doughnut
    pub fn sales_by_category(data: &CategoryBreakdown) -> Self {
        let datasets = data
            .datasets
            .iter()
            .map(|ds| {
                let background = if ds.background_color.is_empty() {
                    (0..ds.data.len())
                        .map(|i| SEGMENT_COLORS[i % SEGMENT_COLORS.len()].to_string())
                        .collect()
                } else {
                    ds.background_color.clone()
                };

                Dataset {
                    label: ds.label.clone().unwrap_or_default(),
                    // Gaps become empty segments so labels stay aligned
                    data: ds.data.iter().map(|v| v.unwrap_or(0.0)).collect(),
                    border_color: None,
                    background,
                    tension: 0.0,
                    fill: true,
                }
            })
            .collect();

        Self {
            kind: ChartKind::Doughnut,
            labels: data.labels.clone(),
            datasets,
            legend: LegendPosition::Right,
            cutout_percent: Some(70),
        }
    }

    /// Upper bound of the value axis; the axis always starts at zero
    pub fn value_ceiling(&self) -> f64 {
        self.datasets
            .iter()
            .flat_map(|ds| ds.data.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Y-axis ticks from zero up to the first tick at or above the ceiling.
    /// The step is rounded to 1, 2 or 5 times a power of ten, aiming for
    /// about `steps` intervals.
    pub fn y_ticks(&self, steps: usize) -> Vec<(f64, String)> {
        let ceiling = match self.value_ceiling() {
            c if c > 0.0 => c,
            _ => 1000.0,
        };
        let step = nice_step(ceiling / steps.max(1) as f64);
        let count = (ceiling / step - 1e-9).ceil().max(1.0) as usize;

        (0..=count)
            .map(|i| {
                let value = step * i as f64;
                (value, format::thousands_tick(value))
            })
            .collect()
    }

    /// Sum of a dataset
    pub fn total(&self, dataset: usize) -> f64 {
        self.datasets
            .get(dataset)
            .map(|ds| ds.data.iter().sum())
            .unwrap_or(0.0)
    }

    /// Tooltip text for one data point
    pub fn tooltip(&self, dataset: usize, index: usize) -> Option<String> {
        let ds = self.datasets.get(dataset)?;
        let value = *ds.data.get(index)?;

        Some(match self.kind {
            ChartKind::Line => format::series_tooltip(&ds.label, Some(value)),
            ChartKind::Doughnut => {
                let label = self.labels.get(index).map(String::as_str).unwrap_or("");
                format::segment_tooltip(label, value, self.total(dataset))
            }
        })
    }
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let nice = match raw / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    };
    nice * magnitude
}

/// Something charts can be drawn on
pub trait ChartSurface {
    type Instance;

    /// Whether the canvas exists in the host document
    fn has_canvas(&self, canvas: CanvasId) -> bool;

    /// Draw a new chart on the canvas
    fn create(&mut self, canvas: CanvasId, spec: &ChartSpec) -> Option<Self::Instance>;

    /// Release a chart and clear what it drew
    fn destroy(&mut self, instance: Self::Instance);
}

/// Live chart instances, at most one per canvas
#[derive(Debug)]
pub struct ChartRegistry<I> {
    live: HashMap<CanvasId, I>,
}

impl<I> Default for ChartRegistry<I> {
    fn default() -> Self {
        Self {
            live: HashMap::new(),
        }
    }
}

impl<I> ChartRegistry<I> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the chart on a canvas. A missing canvas is a no-op and
    /// leaves any existing instance alone. Returns whether a chart was drawn.
    pub fn render<S>(&mut self, surface: &mut S, canvas: CanvasId, spec: &ChartSpec) -> bool
    where
        S: ChartSurface<Instance = I>,
    {
        if !surface.has_canvas(canvas) {
            tracing::debug!(canvas = canvas.dom_id(), "Canvas missing, chart skipped");
            return false;
        }

        if let Some(previous) = self.live.remove(&canvas) {
            surface.destroy(previous);
        }

        match surface.create(canvas, spec) {
            Some(instance) => {
                self.live.insert(canvas, instance);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, canvas: CanvasId) -> Option<&I> {
        self.live.get(&canvas)
    }

    /// Number of live instances across all canvases
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Destroy every live instance
    pub fn teardown<S>(&mut self, surface: &mut S)
    where
        S: ChartSurface<Instance = I>,
    {
        for (_, instance) in self.live.drain() {
            surface.destroy(instance);
        }
    }
}
