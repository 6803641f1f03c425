//! Chart Component
//!
//! Sales line chart and category doughnut drawn on HTML5 Canvas. The
//! controller's chart registry creates and destroys [`CanvasChart`]s through
//! [`CanvasSurface`]; the component only hosts the canvas and its tooltip.

use leptos::*;
use std::f64::consts::PI;
use storefront_dashboard::{CanvasId, ChartKind, ChartSpec, ChartSurface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::state::use_dashboard;

const GRID_COLOR: &str = "#e2e8f0";
const LABEL_COLOR: &str = "#64748b";
const EMPTY_RING: &str = "#e2e8f0";
const Y_STEPS: usize = 5;

/// Drawing area inside the canvas margins
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl PlotArea {
    fn line(width: f64, height: f64) -> Self {
        let (left, right, top, bottom) = (60.0, 20.0, 40.0, 30.0);
        Self {
            left,
            top,
            width: (width - left - right).max(1.0),
            height: (height - top - bottom).max(1.0),
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// X of the `index`th of `count` evenly spaced points
    fn x(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.left + self.width / 2.0;
        }
        self.left + self.width * index as f64 / (count - 1) as f64
    }

    /// Y of a value on an axis from zero to `ceiling`
    fn y(&self, value: f64, ceiling: f64) -> f64 {
        self.bottom() - self.height * (value / ceiling).clamp(0.0, 1.0)
    }

    /// Index of the point nearest to `x`, if `x` is inside the area
    fn index_at(&self, x: f64, count: usize) -> Option<usize> {
        if count == 0 || x < self.left - 10.0 || x > self.left + self.width + 10.0 {
            return None;
        }
        if count == 1 {
            return Some(0);
        }
        let step = self.width / (count - 1) as f64;
        let index = ((x - self.left) / step).round().max(0.0) as usize;
        Some(index.min(count - 1))
    }
}

/// Doughnut geometry
#[derive(Debug, Clone, Copy, PartialEq)]
struct Ring {
    cx: f64,
    cy: f64,
    outer: f64,
    inner: f64,
}

impl Ring {
    fn new(width: f64, height: f64, cutout_percent: u8) -> Self {
        let cx = width * 0.35;
        let cy = height / 2.0;
        let outer = (cx.min(cy) * 0.85).max(1.0);
        Self {
            cx,
            cy,
            outer,
            inner: outer * f64::from(cutout_percent) / 100.0,
        }
    }

    /// Segment under a point, given the segments' start/end angles
    fn segment_at(&self, x: f64, y: f64, angles: &[(f64, f64)]) -> Option<usize> {
        let (dx, dy) = (x - self.cx, y - self.cy);
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < self.inner || distance > self.outer {
            return None;
        }

        // Angles start at twelve o'clock and run clockwise
        let mut angle = dy.atan2(dx);
        if angle < -PI / 2.0 {
            angle += 2.0 * PI;
        }
        angles
            .iter()
            .position(|(start, end)| angle >= *start && angle < *end)
    }
}

/// Start and end angle of each segment, clockwise from twelve o'clock
fn segment_angles(data: &[f64]) -> Vec<(f64, f64)> {
    let total: f64 = data.iter().filter(|v| **v > 0.0).sum();
    let mut start = -PI / 2.0;

    data.iter()
        .map(|value| {
            let sweep = if total > 0.0 {
                value.max(0.0) / total * 2.0 * PI
            } else {
                0.0
            };
            let segment = (start, start + sweep);
            start += sweep;
            segment
        })
        .collect()
}

/// A chart drawn on a canvas
pub struct CanvasChart {
    element: HtmlCanvasElement,
}

/// Draws charts on the dashboard's canvases
pub struct CanvasSurface;

fn find_canvas(canvas: CanvasId) -> Option<HtmlCanvasElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(canvas.dom_id())?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

impl ChartSurface for CanvasSurface {
    type Instance = CanvasChart;

    fn has_canvas(&self, canvas: CanvasId) -> bool {
        find_canvas(canvas).is_some()
    }

    fn create(&mut self, canvas: CanvasId, spec: &ChartSpec) -> Option<CanvasChart> {
        let element = find_canvas(canvas)?;
        let ctx = context_2d(&element)?;
        let (width, height) = (f64::from(element.width()), f64::from(element.height()));

        ctx.clear_rect(0.0, 0.0, width, height);
        match spec.kind {
            ChartKind::Line => draw_line_chart(&ctx, width, height, spec),
            ChartKind::Doughnut => draw_doughnut_chart(&ctx, width, height, spec),
        }

        Some(CanvasChart { element })
    }

    fn destroy(&mut self, chart: CanvasChart) {
        if let Some(ctx) = context_2d(&chart.element) {
            let (width, height) = (f64::from(chart.element.width()), f64::from(chart.element.height()));
            ctx.clear_rect(0.0, 0.0, width, height);
        }
    }
}

/// Draw the two weekly series with their grid and legend
fn draw_line_chart(ctx: &CanvasRenderingContext2d, width: f64, height: f64, spec: &ChartSpec) {
    let area = PlotArea::line(width, height);
    let ticks = spec.y_ticks(Y_STEPS);
    let ceiling = ticks.last().map(|(value, _)| *value).unwrap_or(1.0);
    let count = spec.labels.len();

    // Horizontal grid and y-axis labels
    ctx.set_font("12px sans-serif");
    ctx.set_line_width(1.0);
    for (value, label) in &ticks {
        let y = area.y(*value, ceiling);
        ctx.set_stroke_style(&GRID_COLOR.into());
        ctx.begin_path();
        ctx.move_to(area.left, y);
        ctx.line_to(area.left + area.width, y);
        ctx.stroke();

        ctx.set_fill_style(&LABEL_COLOR.into());
        ctx.set_text_align("right");
        let _ = ctx.fill_text(label, area.left - 8.0, y + 4.0);
    }

    // X-axis labels
    ctx.set_text_align("center");
    for (i, label) in spec.labels.iter().enumerate() {
        let _ = ctx.fill_text(label, area.x(i, count), height - 10.0);
    }

    for ds in &spec.datasets {
        if ds.data.is_empty() {
            continue;
        }
        let points: Vec<(f64, f64)> = ds
            .data
            .iter()
            .enumerate()
            .map(|(i, value)| (area.x(i, count), area.y(*value, ceiling)))
            .collect();

        if ds.fill {
            if let Some(fill) = ds.background.first() {
                trace_curve(ctx, &points, ds.tension);
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    ctx.line_to(last.0, area.bottom());
                    ctx.line_to(first.0, area.bottom());
                }
                ctx.close_path();
                ctx.set_fill_style(&fill.as_str().into());
                ctx.fill();
            }
        }

        let color = ds.border_color.as_deref().unwrap_or(LABEL_COLOR);
        ctx.set_stroke_style(&color.into());
        ctx.set_line_width(2.0);
        trace_curve(ctx, &points, ds.tension);
        ctx.stroke();

        ctx.set_fill_style(&color.into());
        for (x, y) in &points {
            ctx.begin_path();
            let _ = ctx.arc(*x, *y, 3.0, 0.0, PI * 2.0);
            ctx.fill();
        }
    }

    // Legend along the top
    let mut x = area.left;
    ctx.set_text_align("left");
    for ds in &spec.datasets {
        let color = ds.border_color.as_deref().unwrap_or(LABEL_COLOR);
        ctx.set_fill_style(&color.into());
        ctx.fill_rect(x, 12.0, 12.0, 12.0);
        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&ds.label, x + 18.0, 22.0);
        let text_width = ctx.measure_text(&ds.label).map(|m| m.width()).unwrap_or(60.0);
        x += text_width + 40.0;
    }
}

/// Begin a path through `points`, smoothed by `tension`
fn trace_curve(ctx: &CanvasRenderingContext2d, points: &[(f64, f64)], tension: f64) {
    ctx.begin_path();
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.move_to(first.0, first.1);

    let mut previous = *first;
    for &(x, y) in rest {
        let pull = (x - previous.0) * tension.clamp(0.0, 1.0);
        ctx.bezier_curve_to(previous.0 + pull, previous.1, x - pull, y, x, y);
        previous = (x, y);
    }
}

/// Draw the category ring with its legend on the right
fn draw_doughnut_chart(ctx: &CanvasRenderingContext2d, width: f64, height: f64, spec: &ChartSpec) {
    let Some(ds) = spec.datasets.first() else {
        return;
    };
    let ring = Ring::new(width, height, spec.cutout_percent.unwrap_or(0));
    let angles = segment_angles(&ds.data);

    if spec.total(0) <= 0.0 {
        draw_ring_segment(ctx, &ring, -PI / 2.0, 1.5 * PI, EMPTY_RING);
    } else {
        for (i, (start, end)) in angles.iter().enumerate() {
            if end > start {
                let color = ds.background.get(i).map(String::as_str).unwrap_or(EMPTY_RING);
                draw_ring_segment(ctx, &ring, *start, *end, color);
            }
        }
    }

    // Legend on the right
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");
    let legend_x = width * 0.7;
    let mut y = (height / 2.0 - spec.labels.len() as f64 * 11.0).max(12.0);
    for (i, label) in spec.labels.iter().enumerate() {
        let color = ds.background.get(i).map(String::as_str).unwrap_or(EMPTY_RING);
        ctx.set_fill_style(&color.into());
        ctx.fill_rect(legend_x, y - 10.0, 12.0, 12.0);
        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(label, legend_x + 18.0, y);
        y += 22.0;
    }
}

fn draw_ring_segment(ctx: &CanvasRenderingContext2d, ring: &Ring, start: f64, end: f64, color: &str) {
    ctx.begin_path();
    let _ = ctx.arc(ring.cx, ring.cy, ring.outer, start, end);
    let _ = ctx.arc_with_anticlockwise(ring.cx, ring.cy, ring.inner, end, start, true);
    ctx.close_path();
    ctx.set_fill_style(&color.into());
    ctx.fill();
}

/// Tooltip text for a point on a chart's canvas
fn tooltip_at(spec: &ChartSpec, x: f64, y: f64, width: f64, height: f64) -> Option<String> {
    match spec.kind {
        ChartKind::Line => {
            let area = PlotArea::line(width, height);
            let index = area.index_at(x, spec.labels.len())?;
            let lines: Vec<String> = (0..spec.datasets.len())
                .filter_map(|ds| spec.tooltip(ds, index))
                .collect();
            let label = spec.labels.get(index)?;
            Some(format!("{}\n{}", label, lines.join("\n")))
        }
        ChartKind::Doughnut => {
            let ds = spec.datasets.first()?;
            let ring = Ring::new(width, height, spec.cutout_percent.unwrap_or(0));
            let index = ring.segment_at(x, y, &segment_angles(&ds.data))?;
            spec.tooltip(0, index)
        }
    }
}

/// A chart panel hosting one dashboard canvas
#[component]
pub fn ChartPanel(
    /// Panel heading
    title: &'static str,
    /// Canvas the registry draws on
    canvas: CanvasId,
) -> impl IntoView {
    let state = use_dashboard();
    let canvas_ref = create_node_ref::<html::Canvas>();
    let tooltip = create_rw_signal(None::<String>);

    let on_move = move |ev: ev::MouseEvent| {
        let Some(element) = canvas_ref.get() else {
            return;
        };
        let (width, height) = (f64::from(element.width()), f64::from(element.height()));
        // Canvas is scaled by CSS; map the pointer into canvas pixels
        let scale_x = width / f64::from(element.client_width().max(1));
        let scale_y = height / f64::from(element.client_height().max(1));
        let (x, y) = (f64::from(ev.offset_x()) * scale_x, f64::from(ev.offset_y()) * scale_y);

        let text = state.view.with(|view| {
            let spec = match canvas {
                CanvasId::Sales => view.sales_chart.as_ref(),
                CanvasId::Category => view.category_chart.as_ref(),
            }?;
            tooltip_at(spec, x, y, width, height)
        });
        tooltip.set(text);
    };

    view! {
        <div class="chart-card">
            <div class="chart-header">
                <h3>{title}</h3>
            </div>
            <div class="chart-body" style="position: relative;">
                <canvas
                    id=canvas.dom_id()
                    node_ref=canvas_ref
                    width="800"
                    height="320"
                    style="width: 100%; height: 320px;"
                    on:mousemove=on_move
                    on:mouseleave=move |_| tooltip.set(None)
                />
                {move || tooltip.get().map(|text| view! {
                    <div class="chart-tooltip" style="white-space: pre-line;">{text}</div>
                })}
            </div>
        </div>
    }
}
