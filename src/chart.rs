//! Line chart model, layout and drawing.
//!
//! Everything here is backend independent: a [`Chart`] lays itself out for a
//! window size and draws through the [`ChartCanvas`] trait, which the piston
//! window implements for real and tests implement by recording commands.

use anyhow::Result;

use crate::colors::*;
use crate::constants::*;
use crate::sim::Sample;
use crate::vec2::F64x2;

/// primitive drawing operations a chart needs, in screen space (y down)
pub trait ChartCanvas {
    fn line(&mut self, color: Color, radius: f64, from: F64x2, to: F64x2);

    /// filled rectangle between two corners
    fn rect(&mut self, color: Color, c0: F64x2, c1: F64x2);

    /// `at` is the left end of the baseline
    fn text(&mut self, color: Color, size: u32, at: F64x2, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// data space
    pub points: Vec<F64x2>,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chart {
    pub series: Vec<Series>,
    pub grid: Option<GridStyle>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub legend: bool,
}

/// data space rectangle shown by the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: F64x2,
    pub max: F64x2,
}

impl Bounds {
    /// Smallest box holding every point, padded by 5% per side. Degenerate
    /// ranges are widened so the screen mapping stays finite; no points at
    /// all gives the unit square.
    pub fn of(series: &[Series]) -> Self {
        let mut points = series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|p| p.x.is_finite() && p.y.is_finite());

        let first = match points.next() {
            Some(p) => *p,
            None => {
                return Self {
                    min: F64x2::zero(),
                    max: F64x2::splat(1.0),
                }
            }
        };
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                F64x2::new(min.x.min(p.x), min.y.min(p.y)),
                F64x2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });

        let (min_x, max_x) = pad_range(min.x, max.x);
        let (min_y, max_y) = pad_range(min.y, max.y);
        Self {
            min: F64x2::new(min_x, min_y),
            max: F64x2::new(max_x, max_y),
        }
    }

    pub fn size(&self) -> F64x2 {
        self.max - self.min
    }
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if max > min {
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    } else {
        let half = if min == 0.0 { 0.5 } else { min.abs() * 0.05 };
        (min - half, max + half)
    }
}

/// Roughly `target` round tick values (1, 2 or 5 times a power of ten) inside
/// `[min, max]`, together with the step between them.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, f64) {
    let range = max - min;
    if !range.is_finite() || range <= 0.0 || target == 0 {
        return (vec![min], 0.0);
    }

    let raw_step = range / target as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = match raw_step / magnitude {
        n if n <= 1.0 => 1.0,
        n if n <= 2.0 => 2.0,
        n if n <= 5.0 => 5.0,
        _ => 10.0,
    } * magnitude;

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    let ticks = (first..=last)
        .map(|k| k as f64 * step)
        // no "-0"
        .map(|v| if v == 0.0 { 0.0 } else { v })
        .collect();
    (ticks, step)
}

/// tick label with only as many decimals as the step needs
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    format!("{:.*}", decimals, value)
}

/// Splits the segment `from -> to` into `dash` long pieces separated by `gap`.
/// The last dash is cut short at `to`.
pub fn dashed_segments(from: F64x2, to: F64x2, dash: f64, gap: f64) -> Vec<(F64x2, F64x2)> {
    let delta = to - from;
    let len = delta.x.hypot(delta.y);
    if len == 0.0 || dash <= 0.0 {
        return vec![];
    }
    let dir = delta / len;

    let mut segments = vec![];
    let mut start = 0.0;
    while start < len {
        let end = (start + dash).min(len);
        segments.push((from + dir * start, from + dir * end));
        start = end + gap.max(0.0);
    }
    segments
}

pub fn text_width(text: &str, size: u32) -> f64 {
    text.chars().count() as f64 * size as f64 * GLYPH_ADVANCE
}

/// where everything goes for one window size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// top left corner of the plot area
    pub plot_min: F64x2,
    /// bottom right corner of the plot area
    pub plot_max: F64x2,
    pub bounds: Bounds,
    pub x_ticks: Vec<f64>,
    pub x_step: f64,
    pub y_ticks: Vec<f64>,
    pub y_step: f64,
}

impl Layout {
    pub fn to_screen(&self, p: F64x2) -> F64x2 {
        let data = self.bounds.size();
        let area = self.plot_max - self.plot_min;
        F64x2::new(
            self.plot_min.x + (p.x - self.bounds.min.x) / data.x * area.x,
            self.plot_max.y - (p.y - self.bounds.min.y) / data.y * area.y,
        )
    }
}

impl Chart {
    pub fn add_series(&mut self, label: impl Into<String>, points: Vec<F64x2>) {
        let color = series_color(self.series.len());
        self.series.push(Series {
            label: label.into(),
            points,
            color,
        });
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.label.as_str())
    }

    pub fn layout(&self, size: F64x2) -> Layout {
        let [left, top, right, bottom] = PLOT_MARGINS;
        let plot_min = F64x2::new(left, top);
        // never let the plot area invert on tiny windows
        let plot_max = F64x2::new((size.x - right).max(left + 1.0), (size.y - bottom).max(top + 1.0));

        let bounds = Bounds::of(&self.series);
        let (x_ticks, x_step) = nice_ticks(bounds.min.x, bounds.max.x, TARGET_TICKS);
        let (y_ticks, y_step) = nice_ticks(bounds.min.y, bounds.max.y, TARGET_TICKS);
        trace!("chart layout for {:?}: {:?}", size, bounds);

        Layout {
            plot_min,
            plot_max,
            bounds,
            x_ticks,
            x_step,
            y_ticks,
            y_step,
        }
    }

    pub fn draw<C: ChartCanvas>(&self, canvas: &mut C, size: F64x2) {
        let layout = self.layout(size);
        let (min, max) = (layout.plot_min, layout.plot_max);

        canvas.rect(WHITE, F64x2::zero(), size);

        if let Some(style) = self.grid {
            let mut grid_line = |from: F64x2, to: F64x2| match style {
                GridStyle::Solid => canvas.line(GRID_GREY, 0.5, from, to),
                GridStyle::Dashed => {
                    for (a, b) in dashed_segments(from, to, GRID_DASH[0], GRID_DASH[1]) {
                        canvas.line(GRID_GREY, 0.5, a, b);
                    }
                }
            };
            for &x in &layout.x_ticks {
                let sx = layout.to_screen(F64x2::new(x, layout.bounds.min.y)).x;
                grid_line(F64x2::new(sx, min.y), F64x2::new(sx, max.y));
            }
            for &y in &layout.y_ticks {
                let sy = layout.to_screen(F64x2::new(layout.bounds.min.x, y)).y;
                grid_line(F64x2::new(min.x, sy), F64x2::new(max.x, sy));
            }
        }

        for series in &self.series {
            let points: Vec<F64x2> = series.points.iter().map(|p| layout.to_screen(*p)).collect();
            for pair in points.windows(2) {
                canvas.line(series.color, SERIES_LINE_RADIUS, pair[0], pair[1]);
            }
        }

        self.draw_axes(canvas, &layout);

        if self.legend && !self.series.is_empty() {
            self.draw_legend(canvas, &layout);
        }
    }

    fn draw_axes<C: ChartCanvas>(&self, canvas: &mut C, layout: &Layout) {
        let (min, max) = (layout.plot_min, layout.plot_max);
        let font = FONT_SIZE as f64;

        // frame
        canvas.line(BLACK, 0.5, F64x2::new(min.x, max.y), max);
        canvas.line(BLACK, 0.5, min, F64x2::new(min.x, max.y));
        canvas.line(BLACK, 0.5, min, F64x2::new(max.x, min.y));
        canvas.line(BLACK, 0.5, F64x2::new(max.x, min.y), max);

        for &x in &layout.x_ticks {
            let sx = layout.to_screen(F64x2::new(x, layout.bounds.min.y)).x;
            canvas.line(BLACK, 0.5, F64x2::new(sx, max.y), F64x2::new(sx, max.y + TICK_LEN));
            let label = format_tick(x, layout.x_step);
            let at = F64x2::new(sx - text_width(&label, FONT_SIZE) / 2.0, max.y + TICK_LEN + font + 2.0);
            canvas.text(BLACK, FONT_SIZE, at, &label);
        }
        for &y in &layout.y_ticks {
            let sy = layout.to_screen(F64x2::new(layout.bounds.min.x, y)).y;
            canvas.line(BLACK, 0.5, F64x2::new(min.x - TICK_LEN, sy), F64x2::new(min.x, sy));
            let label = format_tick(y, layout.y_step);
            let at = F64x2::new(
                min.x - TICK_LEN - 4.0 - text_width(&label, FONT_SIZE),
                sy + font / 3.0,
            );
            canvas.text(BLACK, FONT_SIZE, at, &label);
        }

        if let Some(label) = &self.x_label {
            let at = F64x2::new(
                (min.x + max.x - text_width(label, FONT_SIZE)) / 2.0,
                max.y + TICK_LEN + 2.0 * font + 12.0,
            );
            canvas.text(BLACK, FONT_SIZE, at, label);
        }
        // no rotated text, so the y label sits above its axis
        if let Some(label) = &self.y_label {
            let at = F64x2::new(
                (min.x - text_width(label, FONT_SIZE) / 2.0).max(2.0),
                min.y - font / 2.0,
            );
            canvas.text(BLACK, FONT_SIZE, at, label);
        }
    }

    /// upper left corner of the plot area, where distance curves never are
    fn draw_legend<C: ChartCanvas>(&self, canvas: &mut C, layout: &Layout) {
        let font = FONT_SIZE as f64;
        let row = font + 6.0;
        let swatch = 24.0;
        let pad = 8.0;

        let widest = self
            .labels()
            .map(|l| text_width(l, FONT_SIZE))
            .fold(0.0, f64::max);
        let c0 = layout.plot_min + F64x2::splat(pad);
        let c1 = c0 + F64x2::new(3.0 * pad + swatch + widest, pad + row * self.series.len() as f64);

        canvas.rect(LEGEND_BG, c0, c1);
        canvas.line(GRID_GREY, 0.5, c0, F64x2::new(c1.x, c0.y));
        canvas.line(GRID_GREY, 0.5, F64x2::new(c1.x, c0.y), c1);
        canvas.line(GRID_GREY, 0.5, c1, F64x2::new(c0.x, c1.y));
        canvas.line(GRID_GREY, 0.5, F64x2::new(c0.x, c1.y), c0);

        for (i, series) in self.series.iter().enumerate() {
            let mid = c0.y + pad / 2.0 + row * (i as f64 + 0.5);
            canvas.line(
                series.color,
                SERIES_LINE_RADIUS,
                F64x2::new(c0.x + pad, mid),
                F64x2::new(c0.x + pad + swatch, mid),
            );
            canvas.text(
                BLACK,
                FONT_SIZE,
                F64x2::new(c0.x + 2.0 * pad + swatch, mid + font / 3.0),
                &series.label,
            );
        }
    }
}

/// Collects simulated runs into one chart and shows it.
#[derive(Debug, Default)]
pub struct PlotReporter {
    chart: Chart,
}

impl PlotReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// one series, `t` against `distance`
    pub fn plot(&mut self, samples: &[Sample], label: impl Into<String>) {
        let points = samples
            .iter()
            .map(|s| F64x2::new(s.t as f64, s.distance))
            .collect();
        self.chart.add_series(label, points);
    }

    pub fn grid(&mut self, style: GridStyle) -> &mut Self {
        self.chart.grid = Some(style);
        self
    }

    pub fn x_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.chart.x_label = Some(label.into());
        self
    }

    pub fn y_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.chart.y_label = Some(label.into());
        self
    }

    pub fn legend(&mut self) -> &mut Self {
        self.chart.legend = true;
        self
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn into_chart(self) -> Chart {
        self.chart
    }

    /// blocks until the window is closed
    pub fn show(self) -> Result<()> {
        info!("showing {} series", self.chart.series.len());
        crate::window::show(&self.chart)
    }
}
