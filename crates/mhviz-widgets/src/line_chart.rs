#![forbid(unsafe_code)]

//! Multi-series line chart on a Braille canvas.
//!
//! Layout inside the (margin-reduced) area, top to bottom: optional legend
//! row (top), optional y-axis title, plot with y tick labels on the left,
//! x axis, x tick labels, optional x-axis title, optional legend row
//! (bottom). A right-hand legend takes a column instead of a row.
//!
//! An empty [`ChartData`] still draws axes and ticks over the configured or
//! default bounds.

use crate::canvas::{COLS_PER_CELL, Painter, ROWS_PER_CELL};
use crate::chart::{
    ChartData, ChartStyle, LegendPosition, draw_legend_column, draw_legend_row, legend_entries,
    tick_label, ticks,
};
use crate::text::display_width;
use crate::{Widget, apply_style, draw_text_span};
use mhviz_core::geometry::Rect;
use mhviz_render::buffer::Buffer;
use mhviz_render::cell::{Cell, PackedRgba};
use mhviz_render::frame::Frame;
use mhviz_style::Style;

/// Horizontal marker at a fixed y value.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub label: String,
    pub y: f64,
    pub color: PackedRgba,
}

impl ReferenceLine {
    pub fn new(label: impl Into<String>, y: f64, color: PackedRgba) -> Self {
        Self {
            label: label.into(),
            y,
            color,
        }
    }
}

/// Line chart over a shared [`ChartData`] and [`ChartStyle`].
#[derive(Debug, Clone)]
pub struct LineChart<'a> {
    data: &'a ChartData,
    style: &'a ChartStyle,
    x_bounds: Option<(f64, f64)>,
    y_bounds: Option<(f64, f64)>,
    cursor: Option<f64>,
    reference_lines: Vec<ReferenceLine>,
    x_ticks: usize,
}

/// Resolved geometry of one render.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Plot {
    area: Rect,
    x: (f64, f64),
    y: (f64, f64),
}

impl Plot {
    /// Dot position of a data point, unbounded.
    fn to_px(&self, x: f64, y: f64) -> (f64, f64) {
        let px_w = f64::from(self.area.width * COLS_PER_CELL);
        let px_h = f64::from(self.area.height * ROWS_PER_CELL);
        let px = (x - self.x.0) / (self.x.1 - self.x.0) * (px_w - 1.0);
        let py = (self.y.1 - y) / (self.y.1 - self.y.0) * (px_h - 1.0);
        let px = if px.is_nan() { 0.0 } else { px };
        let py = if py.is_nan() { 0.0 } else { py };
        (px, py)
    }

    /// Terminal row of a y value, if inside the plot.
    fn row_of(&self, y: f64) -> Option<u16> {
        if !(self.y.0..=self.y.1).contains(&y) {
            return None;
        }
        let t = (self.y.1 - y) / (self.y.1 - self.y.0);
        let row = (t * f64::from(self.area.height - 1)).round() as u16;
        Some(self.area.y + row)
    }

    /// Terminal column of an x value, if inside the plot.
    fn col_of(&self, x: f64) -> Option<u16> {
        if !(self.x.0..=self.x.1).contains(&x) {
            return None;
        }
        let t = (x - self.x.0) / (self.x.1 - self.x.0);
        let col = (t * f64::from(self.area.width - 1)).round() as u16;
        Some(self.area.x + col)
    }
}

fn widen_degenerate((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo.min(hi), lo.max(hi))
    }
}

impl<'a> LineChart<'a> {
    pub fn new(data: &'a ChartData, style: &'a ChartStyle) -> Self {
        Self {
            data,
            style,
            x_bounds: None,
            y_bounds: None,
            cursor: None,
            reference_lines: Vec::new(),
            x_ticks: 5,
        }
    }

    /// Fix the x domain instead of fitting it to the data.
    pub fn x_bounds(mut self, min: f64, max: f64) -> Self {
        self.x_bounds = Some((min, max));
        self
    }

    /// Fix the y domain instead of fitting it to the data.
    pub fn y_bounds(mut self, min: f64, max: f64) -> Self {
        self.y_bounds = Some((min, max));
        self
    }

    /// Highlight the column at this x value.
    pub fn cursor(mut self, x: Option<f64>) -> Self {
        self.cursor = x;
        self
    }

    pub fn reference_line(mut self, line: ReferenceLine) -> Self {
        self.reference_lines.push(line);
        self
    }

    pub fn x_ticks(mut self, count: usize) -> Self {
        self.x_ticks = count;
        self
    }

    /// Effective x and y domains.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let x = self
            .x_bounds
            .or_else(|| self.data.x_range())
            .unwrap_or((0.0, 1.0));
        let y = self.y_bounds.unwrap_or_else(|| {
            let refs = self.reference_lines.iter().map(|r| r.y);
            match self.data.y_range() {
                Some((lo, hi)) => refs.fold((lo, hi), |(lo, hi), y| (lo.min(y), hi.max(y))),
                None => {
                    let mut refs = refs.peekable();
                    if refs.peek().is_none() {
                        (0.0, 1.0)
                    } else {
                        refs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
                            (lo.min(y), hi.max(y))
                        })
                    }
                }
            }
        });
        (widen_degenerate(x), widen_degenerate(y))
    }

    fn draw_styled(buf: &mut Buffer, x: u16, y: u16, c: char, style: Style) {
        let mut cell = Cell::from_char(c);
        apply_style(&mut cell, style);
        buf.set(x, y, cell);
    }
}

impl Widget for LineChart<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "LineChart",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height,
            series = self.data.series.len()
        )
        .entered();

        let mut area = area.inner(self.style.margin);
        if area.is_empty() {
            return;
        }
        let buf = &mut frame.buffer;
        let style = self.style;
        let has_series = !self.data.series.is_empty();
        let entries = legend_entries(self.data, style);

        // Legend.
        match style.legend {
            LegendPosition::Top if has_series && area.height > 1 => {
                draw_legend_row(buf, &entries, area.x, area.y, area.right(), style.label_style);
                area.y += 1;
                area.height -= 1;
            }
            LegendPosition::Bottom if has_series && area.height > 1 => {
                area.height -= 1;
                draw_legend_row(buf, &entries, area.x, area.bottom(), area.right(), style.label_style);
            }
            LegendPosition::Right if has_series => {
                let widest = self
                    .data
                    .series
                    .iter()
                    .map(|s| display_width(&s.display_name))
                    .max()
                    .unwrap_or(0) as u16;
                let legend_w = (widest + 3).min(area.width / 3);
                if legend_w > 2 {
                    area.width -= legend_w;
                    let legend_area = Rect::new(area.right() + 1, area.y, legend_w - 1, area.height);
                    draw_legend_column(buf, &entries, legend_area, style.label_style);
                }
            }
            _ => {}
        }

        // Axis titles.
        if let Some(title) = &style.y_title
            && area.height > 1
        {
            draw_text_span(buf, area.x, area.y, title, style.label_style, area.right());
            area.y += 1;
            area.height -= 1;
        }
        if let Some(title) = &style.x_title
            && area.height > 1
        {
            area.height -= 1;
            let w = display_width(title).min(area.width as usize) as u16;
            let x = area.x + (area.width - w) / 2;
            draw_text_span(buf, x, area.bottom(), title, style.label_style, area.right());
        }

        let ((x_min, x_max), (y_min, y_max)) = self.bounds();

        // Y tick labels decide the left gutter.
        let y_tick_count = usize::from(area.height.saturating_sub(2) / 2 + 1).clamp(2, 5);
        let y_ticks = ticks(y_min, y_max, y_tick_count);
        let y_labels: Vec<String> = y_ticks
            .iter()
            .map(|v| tick_label(*v, y_max - y_min))
            .collect();
        let gutter = y_labels.iter().map(|l| display_width(l)).max().unwrap_or(0) as u16 + 1;

        let plot = Plot {
            area: Rect::new(
                area.x.saturating_add(gutter),
                area.y,
                area.width.saturating_sub(gutter),
                area.height.saturating_sub(2),
            ),
            x: (x_min, x_max),
            y: (y_min, y_max),
        };
        if plot.area.width < 2 || plot.area.height < 2 {
            return;
        }

        // Grid underneath everything else.
        if style.grid {
            for tick in &y_ticks {
                if let Some(row) = plot.row_of(*tick) {
                    for x in plot.area.x..plot.area.right() {
                        Self::draw_styled(buf, x, row, '┈', style.grid_style);
                    }
                }
            }
        }

        for line in &self.reference_lines {
            let Some(row) = plot.row_of(line.y) else { continue };
            let line_style = Style::new().fg(line.color);
            for x in plot.area.x..plot.area.right() {
                Self::draw_styled(buf, x, row, '╌', line_style);
            }
            let label_w = display_width(&line.label) as u16;
            if label_w < plot.area.width {
                let lx = plot.area.right() - label_w;
                draw_text_span(buf, lx, row, &line.label, line_style, plot.area.right());
            }
        }

        if let Some(col) = self.cursor.and_then(|x| plot.col_of(x)) {
            for y in plot.area.y..plot.area.bottom() {
                Self::draw_styled(buf, col, y, '┊', style.axis_style);
            }
        }

        let mut painter = Painter::for_area(plot.area);
        for (i, series) in self.data.series.iter().enumerate() {
            let color = style.series_color(series, i);
            let points = self.data.points(&series.key);
            match points.as_slice() {
                [] => {}
                [(x, y)] => {
                    let (px, py) = plot.to_px(*x, *y);
                    // `as` saturates; off-canvas dots are dropped by the painter.
                    painter.point_colored(px.round() as i32, py.round() as i32, color);
                }
                _ => {
                    for w in points.windows(2) {
                        let from = plot.to_px(w[0].0, w[0].1);
                        let to = plot.to_px(w[1].0, w[1].1);
                        painter.segment(from, to, Some(color));
                    }
                }
            }
        }
        painter.render_to_buffer(plot.area, buf, Style::new());

        // Axes.
        let axis_x = plot.area.x - 1;
        let axis_y = plot.area.bottom();
        for y in plot.area.y..plot.area.bottom() {
            Self::draw_styled(buf, axis_x, y, '│', style.axis_style);
        }
        for x in plot.area.x..plot.area.right() {
            Self::draw_styled(buf, x, axis_y, '─', style.axis_style);
        }
        Self::draw_styled(buf, axis_x, axis_y, '└', style.axis_style);

        for (tick, label) in y_ticks.iter().zip(&y_labels) {
            if let Some(row) = plot.row_of(*tick) {
                let w = display_width(label) as u16;
                let x = axis_x.saturating_sub(w);
                draw_text_span(buf, x, row, label, style.label_style, axis_x);
            }
        }

        let label_row = axis_y + 1;
        let x_span = x_max - x_min;
        let mut next_free = plot.area.x;
        for tick in ticks(x_min, x_max, self.x_ticks) {
            let Some(col) = plot.col_of(tick) else { continue };
            let label = tick_label(tick, x_span);
            let w = display_width(&label) as u16;
            let x = col.saturating_sub(w / 2).max(next_free);
            if x + w > area.right() {
                break;
            }
            next_free = draw_text_span(buf, x, label_row, &label, style.label_style, area.right()) + 1;
        }
    }
}
