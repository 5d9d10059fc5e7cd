#![forbid(unsafe_code)]

//! Grouped vertical bar chart for bounded scores.
//!
//! Record `i` of the [`ChartData`] holds the values of category `i`; each
//! series becomes one bar inside every category group. Categories keep
//! their input order. The value axis runs from zero to a fixed maximum
//! (100 by default) so scores from different charts are comparable.

use crate::chart::{
    ChartData, ChartStyle, LegendPosition, draw_legend_row, legend_entries, tick_label, ticks,
};
use crate::text::{display_width, truncate_to_width};
use crate::{Widget, apply_style, draw_text_span};
use mhviz_core::geometry::Rect;
use mhviz_render::cell::Cell;
use mhviz_render::frame::Frame;

/// Eighth-block characters for the fractional top of a bar.
const BAR_CHARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Grouped bars over categories.
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    categories: &'a [String],
    data: &'a ChartData,
    style: &'a ChartStyle,
    max: f64,
    max_bar_width: u16,
    bar_gap: u16,
}

impl<'a> BarChart<'a> {
    pub fn new(categories: &'a [String], data: &'a ChartData, style: &'a ChartStyle) -> Self {
        Self {
            categories,
            data,
            style,
            max: 100.0,
            max_bar_width: 4,
            bar_gap: 0,
        }
    }

    /// Top of the value axis; values above it are clipped.
    pub fn max(mut self, max: f64) -> Self {
        self.max = if max.is_finite() && max > 0.0 { max } else { 100.0 };
        self
    }

    pub fn max_bar_width(mut self, width: u16) -> Self {
        self.max_bar_width = width.max(1);
        self
    }

    pub fn bar_gap(mut self, gap: u16) -> Self {
        self.bar_gap = gap;
        self
    }

    /// Bar height in eighths of a cell for `value` on `rows` rows.
    fn eighths(&self, value: f64, rows: u16) -> u32 {
        let t = if value.is_finite() { (value / self.max).clamp(0.0, 1.0) } else { 0.0 };
        (t * f64::from(rows) * 8.0).round() as u32
    }
}

impl Widget for BarChart<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "BarChart",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height,
            categories = self.categories.len()
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

        let value_ticks = ticks(0.0, self.max, 3);
        let labels: Vec<String> = value_ticks.iter().map(|v| tick_label(*v, self.max)).collect();
        let gutter = labels.iter().map(|l| display_width(l)).max().unwrap_or(0) as u16 + 1;

        // Plot rows exclude the axis row and the category label row.
        let plot = Rect::new(
            area.x.saturating_add(gutter),
            area.y,
            area.width.saturating_sub(gutter),
            area.height.saturating_sub(2),
        );
        if plot.width < 2 || plot.height < 1 {
            return;
        }

        let axis_x = plot.x - 1;
        let axis_y = plot.bottom();
        for y in plot.y..plot.bottom() {
            let mut cell = Cell::from_char('│');
            apply_style(&mut cell, style.axis_style);
            buf.set(axis_x, y, cell);
        }
        for x in plot.x..plot.right() {
            let mut cell = Cell::from_char('─');
            apply_style(&mut cell, style.axis_style);
            buf.set(x, axis_y, cell);
        }
        let mut corner = Cell::from_char('└');
        apply_style(&mut corner, style.axis_style);
        buf.set(axis_x, axis_y, corner);

        for (tick, label) in value_ticks.iter().zip(&labels) {
            let t = tick / self.max;
            let row = plot.bottom() - 1 - (t * f64::from(plot.height - 1)).round() as u16;
            let x = axis_x.saturating_sub(display_width(label) as u16);
            draw_text_span(buf, x, row, label, style.label_style, axis_x);
        }

        let groups = self.categories.len() as u16;
        let series = self.data.series.len() as u16;
        if groups == 0 || series == 0 {
            return;
        }

        // One column of padding on each side of every group.
        let slot = plot.width / groups;
        let inner = slot.saturating_sub(2);
        let gaps = self.bar_gap * (series - 1);
        let bar_width = (inner.saturating_sub(gaps) / series).clamp(1, self.max_bar_width);
        let group_width = bar_width * series + gaps;

        for (gi, category) in self.categories.iter().enumerate() {
            let slot_x = plot.x + gi as u16 * slot;
            let mut x = slot_x + slot.saturating_sub(group_width) / 2;
            let record = self.data.records.get(gi);

            for (si, descriptor) in self.data.series.iter().enumerate() {
                let color = style.series_color(descriptor, si);
                let value = record.and_then(|r| r.get(&descriptor.key));
                if let Some(value) = value {
                    let eighths = self.eighths(value, plot.height);
                    let full = (eighths / 8) as u16;
                    let frac = (eighths % 8) as usize;
                    for dx in 0..bar_width {
                        let bx = x + dx;
                        if bx >= plot.right() {
                            break;
                        }
                        for row in 0..full.min(plot.height) {
                            buf.set(bx, axis_y - 1 - row, Cell::from_char('█').with_fg(color));
                        }
                        if frac > 0 && full < plot.height {
                            buf.set(bx, axis_y - 1 - full, Cell::from_char(BAR_CHARS[frac]).with_fg(color));
                        }
                    }
                }
                x += bar_width + self.bar_gap;
            }

            let label = truncate_to_width(category, slot.saturating_sub(1) as usize);
            let w = display_width(&label) as u16;
            let lx = slot_x + slot.saturating_sub(w) / 2;
            draw_text_span(buf, lx, axis_y + 1, &label, style.label_style, plot.right());
        }
    }
}
