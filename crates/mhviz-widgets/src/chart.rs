#![forbid(unsafe_code)]

//! Shared chart data and style contract.
//!
//! Every chart widget takes the same two inputs:
//!
//! - [`ChartData`]: a list of [`SeriesDescriptor`]s plus a list of
//!   [`PointRecord`]s. A record holds one x value and at most one y value
//!   per series key, so series of different lengths merge naturally: a key
//!   simply stops appearing in later records.
//! - [`ChartStyle`]: palette, keyed colours, grid, legend placement, value
//!   formatting, and axis text. One default style is shared by every chart;
//!   callers override individual fields with the builder methods.
//!
//! Colours resolve in order: the descriptor's explicit colour, then the
//! style's keyed colour for the series key, then `palette[index % len]`.

use std::collections::BTreeMap;

use mhviz_core::geometry::{Rect, Sides};
use mhviz_render::buffer::Buffer;
use mhviz_render::cell::{Cell, PackedRgba};
use mhviz_style::Style;

use crate::draw_text_span;
use crate::text::truncate_to_width;

/// Placeholder shown when a value cannot be formatted.
pub const PLACEHOLDER: &str = "N/A";

/// How tooltip and label values are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Fixed number of decimal places.
    Fixed(u8),
    /// Shortest round-trip representation.
    Raw,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self::Fixed(2)
    }
}

impl ValueFormat {
    /// Format a value; NaN and infinities become [`PLACEHOLDER`].
    pub fn format(self, value: f64) -> String {
        if !value.is_finite() {
            return PLACEHOLDER.to_string();
        }
        let value = if value == 0.0 { 0.0 } else { value };
        match self {
            Self::Fixed(decimals) => {
                let decimals = usize::from(decimals);
                format!("{value:.decimals$}")
            }
            Self::Raw => format!("{value}"),
        }
    }
}

/// Where the legend is drawn relative to the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    Top,
    #[default]
    Bottom,
    Right,
    Hidden,
}

/// Visual configuration shared by all charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Colours for series without an explicit or keyed colour, cycled.
    pub palette: Vec<PackedRgba>,
    /// Fixed colour per series key.
    pub keyed: BTreeMap<String, PackedRgba>,
    pub grid: bool,
    pub legend: LegendPosition,
    pub value_format: ValueFormat,
    pub axis_style: Style,
    pub label_style: Style,
    pub grid_style: Style,
    /// Space kept free around the plot.
    pub margin: Sides,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            palette: vec![
                PackedRgba::rgb(0x88, 0x84, 0xd8),
                PackedRgba::rgb(0x82, 0xca, 0x9d),
                PackedRgba::rgb(0xff, 0xc6, 0x58),
                PackedRgba::rgb(0xff, 0x73, 0x00),
            ],
            keyed: BTreeMap::new(),
            grid: true,
            legend: LegendPosition::default(),
            value_format: ValueFormat::default(),
            axis_style: Style::new().fg(PackedRgba::rgb(148, 163, 184)),
            label_style: Style::new().fg(PackedRgba::rgb(148, 163, 184)),
            grid_style: Style::new().fg(PackedRgba::rgb(51, 65, 85)),
            margin: Sides::default(),
            x_title: None,
            y_title: None,
        }
    }
}

impl ChartStyle {
    pub fn palette(mut self, palette: impl IntoIterator<Item = PackedRgba>) -> Self {
        self.palette = palette.into_iter().collect();
        self
    }

    /// Pin a colour to a series key.
    pub fn key_color(mut self, key: impl Into<String>, color: PackedRgba) -> Self {
        self.keyed.insert(key.into(), color);
        self
    }

    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    pub fn value_format(mut self, format: ValueFormat) -> Self {
        self.value_format = format;
        self
    }

    pub fn margin(mut self, margin: Sides) -> Self {
        self.margin = margin;
        self
    }

    pub fn x_title(mut self, title: impl Into<String>) -> Self {
        self.x_title = Some(title.into());
        self
    }

    pub fn y_title(mut self, title: impl Into<String>) -> Self {
        self.y_title = Some(title.into());
        self
    }

    pub fn axis_style(mut self, style: Style) -> Self {
        self.axis_style = style;
        self
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    pub fn grid_style(mut self, style: Style) -> Self {
        self.grid_style = style;
        self
    }

    /// Keyed colour for `key`, else the palette entry for `index`.
    pub fn color_for(&self, key: &str, index: usize) -> PackedRgba {
        if let Some(color) = self.keyed.get(key) {
            return *color;
        }
        if self.palette.is_empty() {
            PackedRgba::WHITE
        } else {
            self.palette[index % self.palette.len()]
        }
    }

    /// Resolved colour of the `index`-th series.
    pub fn series_color(&self, series: &SeriesDescriptor, index: usize) -> PackedRgba {
        series
            .color
            .unwrap_or_else(|| self.color_for(&series.key, index))
    }
}

/// Identity and presentation of one series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesDescriptor {
    /// Field name in [`PointRecord::values`].
    pub key: String,
    /// Shown in legends and tooltips.
    pub display_name: String,
    /// Overrides the style's colour resolution.
    pub color: Option<PackedRgba>,
}

impl SeriesDescriptor {
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            color: None,
        }
    }

    pub fn color(mut self, color: PackedRgba) -> Self {
        self.color = Some(color);
        self
    }
}

/// One x position with a value per series key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointRecord {
    pub x: f64,
    pub values: BTreeMap<String, f64>,
}

impl PointRecord {
    pub fn new(x: f64) -> Self {
        Self {
            x,
            values: BTreeMap::new(),
        }
    }

    pub fn value(mut self, key: impl Into<String>, y: f64) -> Self {
        self.values.insert(key.into(), y);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

/// One tooltip row.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub name: String,
    pub color: PackedRgba,
    pub text: String,
}

/// Values of every series at one x position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub x: f64,
    pub entries: Vec<TooltipEntry>,
}

/// Series descriptors plus point records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub series: Vec<SeriesDescriptor>,
    pub records: Vec<PointRecord>,
}

impl ChartData {
    pub fn new(series: Vec<SeriesDescriptor>, records: Vec<PointRecord>) -> Self {
        Self { series, records }
    }

    /// Merge per-series `(x, y)` columns into records ordered by x.
    ///
    /// `columns[i]` belongs to `series[i]`. Columns may have different
    /// lengths; each record only carries the series that have a sample at
    /// its x. Extra columns without a descriptor are ignored.
    pub fn from_columns(series: Vec<SeriesDescriptor>, columns: &[Vec<(f64, f64)>]) -> Self {
        let mut samples: Vec<(f64, usize, f64)> = series
            .iter()
            .enumerate()
            .zip(columns)
            .flat_map(|((i, _), column)| column.iter().map(move |&(x, y)| (x, i, y)))
            .filter(|(x, _, _)| x.is_finite())
            .collect();
        samples.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut records: Vec<PointRecord> = Vec::new();
        for (x, i, y) in samples {
            match records.last_mut() {
                Some(last) if last.x == x => {
                    last.values.insert(series[i].key.clone(), y);
                }
                _ => records.push(PointRecord::new(x).value(series[i].key.clone(), y)),
            }
        }
        Self { series, records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.iter().all(|r| r.values.is_empty())
    }

    /// Plottable points of one series: present and finite, in record order.
    pub fn points(&self, key: &str) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.get(key).filter(|y| y.is_finite()).map(|y| (r.x, y)))
            .collect()
    }

    /// Smallest and largest x over all records, if any.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let mut xs = self
            .records
            .iter()
            .filter(|r| !r.values.is_empty())
            .map(|r| r.x);
        let first = xs.next()?;
        Some(xs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
    }

    /// Smallest and largest finite y over all series, if any.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let mut ys = self
            .records
            .iter()
            .flat_map(|r| r.values.values().copied())
            .filter(|y| y.is_finite());
        let first = ys.next()?;
        Some(ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Tooltip for the record nearest to `x`.
    ///
    /// Every series appears in descriptor order; a series with no value in
    /// that record shows the placeholder.
    pub fn tooltip_at(&self, x: f64, style: &ChartStyle) -> Option<Tooltip> {
        let record = self
            .records
            .iter()
            .filter(|r| !r.values.is_empty())
            .min_by(|a, b| (a.x - x).abs().total_cmp(&(b.x - x).abs()))?;
        let entries = self
            .series
            .iter()
            .enumerate()
            .map(|(i, s)| TooltipEntry {
                name: s.display_name.clone(),
                color: style.series_color(s, i),
                text: record
                    .get(&s.key)
                    .map_or_else(|| PLACEHOLDER.to_string(), |y| style.value_format.format(y)),
            })
            .collect();
        Some(Tooltip {
            x: record.x,
            entries,
        })
    }
}

/// Legend entries `(display name, colour)` in series order.
pub fn legend_entries(data: &ChartData, style: &ChartStyle) -> Vec<(String, PackedRgba)> {
    data.series
        .iter()
        .enumerate()
        .map(|(i, s)| (s.display_name.clone(), style.series_color(s, i)))
        .collect()
}

/// Draw `■ name  ■ name ...` on one row.
pub(crate) fn draw_legend_row(
    buf: &mut Buffer,
    entries: &[(String, PackedRgba)],
    x: u16,
    y: u16,
    max_x: u16,
    label_style: Style,
) {
    let mut cursor = x;
    for (i, (name, color)) in entries.iter().enumerate() {
        if i > 0 {
            cursor = cursor.saturating_add(2);
        }
        if cursor >= max_x {
            break;
        }
        let mut marker = Cell::from_char('■');
        marker.fg = *color;
        buf.set(cursor, y, marker);
        cursor = draw_text_span(buf, cursor.saturating_add(2), y, name, label_style, max_x);
    }
}

/// Draw one legend entry per row down `area`.
pub(crate) fn draw_legend_column(
    buf: &mut Buffer,
    entries: &[(String, PackedRgba)],
    area: Rect,
    label_style: Style,
) {
    for (row, (name, color)) in (0..area.height).zip(entries) {
        let y = area.y + row;
        let mut marker = Cell::from_char('■');
        marker.fg = *color;
        buf.set(area.x, y, marker);
        let name = truncate_to_width(name, area.width.saturating_sub(2) as usize);
        draw_text_span(buf, area.x + 2, y, &name, label_style, area.right());
    }
}

/// `count` evenly spaced values from `min` to `max`, inclusive.
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        n => (0..n)
            .map(|i| min + (max - min) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Compact axis label for a tick value.
pub fn tick_label(value: f64, span: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if span.abs() >= 10.0 {
        format!("{:.0}", value.round() + 0.0)
    } else if span.abs() >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors() -> Vec<SeriesDescriptor> {
        vec![
            SeriesDescriptor::new("BPSO", "BPSO"),
            SeriesDescriptor::new("BGSA", "BGSA"),
        ]
    }

    #[test]
    fn value_format_fixed_and_placeholder() {
        assert_eq!(ValueFormat::Fixed(2).format(141277.333), "141277.33");
        assert_eq!(ValueFormat::Fixed(2).format(-0.0), "0.00");
        assert_eq!(ValueFormat::Raw.format(0.5), "0.5");
        assert_eq!(ValueFormat::Fixed(2).format(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn palette_cycles_and_keys_win() {
        let style = ChartStyle::default()
            .palette([PackedRgba::rgb(1, 0, 0), PackedRgba::rgb(2, 0, 0)])
            .key_color("Hybrid", PackedRgba::rgb(9, 9, 9));
        assert_eq!(style.color_for("a", 0), PackedRgba::rgb(1, 0, 0));
        assert_eq!(style.color_for("a", 3), PackedRgba::rgb(2, 0, 0));
        assert_eq!(style.color_for("Hybrid", 0), PackedRgba::rgb(9, 9, 9));
        let explicit = SeriesDescriptor::new("Hybrid", "H").color(PackedRgba::rgb(5, 5, 5));
        assert_eq!(style.series_color(&explicit, 0), PackedRgba::rgb(5, 5, 5));
    }

    #[test]
    fn from_columns_merges_by_x() {
        let data = ChartData::from_columns(
            descriptors(),
            &[
                vec![(0.0, 1.0), (20.0, 2.0), (40.0, 3.0)],
                vec![(0.0, 10.0), (20.0, 20.0)],
            ],
        );
        assert_eq!(data.records.len(), 3);
        assert_eq!(data.records[0].get("BGSA"), Some(10.0));
        assert_eq!(data.records[2].get("BGSA"), None);
        assert_eq!(data.points("BPSO").len(), 3);
        assert_eq!(data.points("BGSA").len(), 2);
        assert_eq!(data.x_range(), Some((0.0, 40.0)));
        assert_eq!(data.y_range(), Some((1.0, 20.0)));
    }

    #[test]
    fn non_finite_values_are_not_plotted() {
        let data = ChartData::new(
            descriptors(),
            vec![
                PointRecord::new(0.0).value("BPSO", f64::NAN),
                PointRecord::new(1.0).value("BPSO", 2.0),
            ],
        );
        assert_eq!(data.points("BPSO"), [(1.0, 2.0)]);
    }

    #[test]
    fn tooltip_picks_nearest_record() {
        let data = ChartData::from_columns(
            descriptors(),
            &[vec![(0.0, 1.0), (20.0, 2.5)], vec![(0.0, 10.0)]],
        );
        let tip = data.tooltip_at(14.0, &ChartStyle::default()).unwrap();
        assert_eq!(tip.x, 20.0);
        assert_eq!(tip.entries[0].text, "2.50");
        assert_eq!(tip.entries[1].text, PLACEHOLDER);
    }

    #[test]
    fn empty_data_has_no_ranges() {
        let data = ChartData::new(descriptors(), vec![]);
        assert!(data.is_empty());
        assert_eq!(data.x_range(), None);
        assert!(data.tooltip_at(0.0, &ChartStyle::default()).is_none());
    }

    #[test]
    fn ticks_are_inclusive() {
        assert_eq!(ticks(0.0, 100.0, 3), [0.0, 50.0, 100.0]);
        assert_eq!(tick_label(130000.4, 12000.0), "130000");
        assert_eq!(tick_label(0.25, 0.5), "0.25");
    }
}
