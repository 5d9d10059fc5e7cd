#![forbid(unsafe_code)]

//! Radar (spider) chart for bounded scores.
//!
//! Record `i` of the [`ChartData`] holds the values on axis `i`. Axes are
//! spread evenly clockwise from twelve o'clock; each series is drawn as a
//! closed polygon whose vertex on an axis sits at `value / max` of the
//! radius.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::canvas::{COLS_PER_CELL, Painter, ROWS_PER_CELL};
use crate::chart::{ChartData, ChartStyle, LegendPosition, draw_legend_row, legend_entries};
use crate::text::{display_width, truncate_to_width};
use crate::{Widget, draw_text_span};
use mhviz_core::geometry::Rect;
use mhviz_render::frame::Frame;

/// Spider chart over categories.
#[derive(Debug, Clone)]
pub struct RadarChart<'a> {
    axes: &'a [String],
    data: &'a ChartData,
    style: &'a ChartStyle,
    max: f64,
    rings: usize,
}

impl<'a> RadarChart<'a> {
    pub fn new(axes: &'a [String], data: &'a ChartData, style: &'a ChartStyle) -> Self {
        Self {
            axes,
            data,
            style,
            max: 100.0,
            rings: 2,
        }
    }

    /// Value at the outer ring.
    pub fn max(mut self, max: f64) -> Self {
        self.max = if max.is_finite() && max > 0.0 { max } else { 100.0 };
        self
    }

    /// Number of grid rings drawn when the style enables the grid.
    pub fn rings(mut self, rings: usize) -> Self {
        self.rings = rings;
        self
    }

    /// Unit direction of axis `i` in dot space (y grows downwards).
    fn direction(&self, i: usize) -> (f64, f64) {
        let n = self.axes.len().max(1) as f64;
        let angle = -FRAC_PI_2 + TAU * i as f64 / n;
        (angle.cos(), angle.sin())
    }
}

impl Widget for RadarChart<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "RadarChart",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height,
            axes = self.axes.len()
        )
        .entered();

        let mut area = area.inner(self.style.margin);
        if area.is_empty() {
            return;
        }
        let buf = &mut frame.buffer;
        let style = self.style;
        let entries = legend_entries(self.data, style);

        match style.legend {
            LegendPosition::Top if !entries.is_empty() && area.height > 1 => {
                draw_legend_row(buf, &entries, area.x, area.y, area.right(), style.label_style);
                area.y += 1;
                area.height -= 1;
            }
            LegendPosition::Bottom | LegendPosition::Right
                if !entries.is_empty() && area.height > 1 =>
            {
                area.height -= 1;
                draw_legend_row(buf, &entries, area.x, area.bottom(), area.right(), style.label_style);
            }
            _ => {}
        }

        // Keep one row above and below, and a label column each side.
        let label_w = self
            .axes
            .iter()
            .map(|a| display_width(a))
            .max()
            .unwrap_or(0)
            .min(16) as u16;
        let plot = Rect::new(
            area.x.saturating_add(label_w),
            area.y.saturating_add(1),
            area.width.saturating_sub(label_w * 2),
            area.height.saturating_sub(2),
        );
        if plot.width < 2 || plot.height < 2 || self.axes.is_empty() {
            return;
        }

        let mut painter = Painter::for_area(plot);
        let (px_w, px_h) = painter.size();
        let cx = f64::from(px_w - 1) / 2.0;
        let cy = f64::from(px_h - 1) / 2.0;
        let radius = cx.min(cy);
        let vertex = |i: usize, t: f64| -> (i32, i32) {
            let (dx, dy) = self.direction(i);
            (
                (cx + dx * radius * t).round() as i32,
                (cy + dy * radius * t).round() as i32,
            )
        };

        for (si, descriptor) in self.data.series.iter().enumerate() {
            let color = style.series_color(descriptor, si);
            let vertices: Vec<(i32, i32)> = (0..self.axes.len())
                .map(|i| {
                    let value = self
                        .data
                        .records
                        .get(i)
                        .and_then(|r| r.get(&descriptor.key))
                        .filter(|v| v.is_finite())
                        .unwrap_or(0.0);
                    vertex(i, (value / self.max).clamp(0.0, 1.0))
                })
                .collect();
            painter.polygon(&vertices, Some(color));
        }
        painter.render_to_buffer(plot, buf, style.axis_style);

        // Grid goes into a second painter so series colours win.
        if style.grid {
            let mut grid = Painter::for_area(plot);
            for ring in 1..=self.rings {
                let t = ring as f64 / self.rings as f64;
                let ring_vertices: Vec<(i32, i32)> =
                    (0..self.axes.len()).map(|i| vertex(i, t)).collect();
                grid.polygon(&ring_vertices, None);
            }
            for i in 0..self.axes.len() {
                let (x1, y1) = vertex(i, 1.0);
                grid.line(cx.round() as i32, cy.round() as i32, x1, y1);
            }
            let mut under = buf.clone();
            grid.render_to_buffer(plot, &mut under, style.grid_style);
            for y in plot.y..plot.bottom() {
                for x in plot.x..plot.right() {
                    let painted = buf.get(x, y).is_some_and(|c| !c.is_empty());
                    if !painted && let Some(cell) = under.get(x, y) {
                        buf.set(x, y, *cell);
                    }
                }
            }
        }

        // Axis labels just outside the outer ring.
        for (i, axis) in self.axes.iter().enumerate() {
            let (dx, dy) = self.direction(i);
            let (px, py) = vertex(i, 1.0);
            let col = plot.x as i32 + px / i32::from(COLS_PER_CELL);
            let row = plot.y as i32 + py / i32::from(ROWS_PER_CELL);
            let label = truncate_to_width(axis, label_w.max(4) as usize);
            let w = display_width(&label) as i32;
            let (lx, ly) = if dy < -0.9 {
                (col - w / 2, row - 1)
            } else if dy > 0.9 {
                (col - w / 2, row + 1)
            } else if dx > 0.0 {
                (col + 1, row)
            } else {
                (col - w, row)
            };
            let lx = lx.clamp(i32::from(area.x), i32::from(area.right()) - w.min(i32::from(area.width)));
            let ly = ly.clamp(i32::from(area.y), i32::from(area.bottom()) - 1);
            draw_text_span(buf, lx as u16, ly as u16, &label, style.label_style, area.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{PointRecord, SeriesDescriptor};
    use mhviz_render::cell::PackedRgba;

    fn axes() -> Vec<String> {
        ["Qualité", "Vitesse", "Stabilité", "Exploration", "Exploitation"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn data(value: f64) -> ChartData {
        ChartData::new(
            vec![SeriesDescriptor::new("H", "Hybrid").color(PackedRgba::rgb(255, 115, 0))],
            (0..5)
                .map(|i| PointRecord::new(i as f64).value("H", value))
                .collect(),
        )
    }

    fn render(data: &ChartData, style: &ChartStyle) -> Frame {
        let axes = axes();
        let mut frame = Frame::new(60, 20);
        RadarChart::new(&axes, data, style).render(frame.area(), &mut frame);
        frame
    }

    fn series_cells(frame: &Frame) -> usize {
        frame
            .buffer
            .cells()
            .iter()
            .filter(|c| c.fg == PackedRgba::rgb(255, 115, 0) && !c.is_empty())
            .count()
    }

    #[test]
    fn axis_labels_are_drawn() {
        let style = ChartStyle::default().legend(LegendPosition::Hidden);
        let frame = render(&data(90.0), &style);
        let text: String = (0..20).map(|y| frame.buffer.row_text(y)).collect();
        assert!(text.contains("Qualité"));
        assert!(text.contains("Exploitation"));
    }

    #[test]
    fn larger_scores_draw_larger_polygons() {
        let style = ChartStyle::default().legend(LegendPosition::Hidden).grid(false);
        let small = series_cells(&render(&data(20.0), &style));
        let large = series_cells(&render(&data(95.0), &style));
        assert!(large > small, "{large} <= {small}");
    }

    #[test]
    fn grid_does_not_hide_series() {
        let plain = ChartStyle::default().legend(LegendPosition::Hidden).grid(false);
        let gridded = ChartStyle::default().legend(LegendPosition::Hidden);
        assert_eq!(
            series_cells(&render(&data(60.0), &plain)),
            series_cells(&render(&data(60.0), &gridded))
        );
    }

    #[test]
    fn no_axes_draws_nothing_but_legend() {
        let style = ChartStyle::default();
        let data = data(50.0);
        let mut frame = Frame::new(30, 10);
        RadarChart::new(&[], &data, &style).render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(9).trim_end(), "■ Hybrid");
        assert!((0..9).all(|y| frame.buffer.row_text(y).trim().is_empty()));
    }
}
