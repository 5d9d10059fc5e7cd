#![forbid(unsafe_code)]

//! Widgets for the mhviz dashboard.
//!
//! Two kinds of widget live here:
//!
//! - Layout chrome: [`block::Block`], [`paragraph::Paragraph`],
//!   [`tabs::Tabs`], [`info_card::InfoCard`], [`stats_grid::StatsGrid`].
//! - Data rendering: [`table::Table`] renders a column schema plus keyed
//!   records, and the chart widgets ([`line_chart::LineChart`],
//!   [`bar_chart::BarChart`], [`radar::RadarChart`]) render a
//!   [`chart::ChartData`] under one shared [`chart::ChartStyle`].
//!
//! All widgets are pure functions of their inputs: rendering the same
//! values into the same area always produces the same cells.

pub mod bar_chart;
pub mod block;
pub mod canvas;
pub mod chart;
pub mod info_card;
pub mod line_chart;
pub mod paragraph;
pub mod radar;
pub mod stats_grid;
pub mod table;
pub mod tabs;
pub mod text;

use mhviz_core::geometry::Rect;
use mhviz_render::buffer::Buffer;
use mhviz_render::cell::Cell;
use mhviz_render::frame::Frame;
use mhviz_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A renderable component.
pub trait Widget {
    /// Render the widget into the frame within `area`.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Apply the set fields of a style to a cell.
#[inline]
pub(crate) fn apply_style(cell: &mut Cell, style: Style) {
    style.apply_to(cell);
}

/// Apply a style to every cell in an area, keeping content.
pub fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                apply_style(cell, style);
            }
        }
    }
}

/// Draw a text span at `(x, y)`, stopping before `max_x`.
///
/// Returns the x position after the last drawn character.
pub fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = UnicodeWidthStr::width(grapheme);
        if w == 0 {
            continue;
        }
        if x as usize + w > max_x as usize {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            apply_style(&mut cell, style);
            buf.set(x, y, cell);
        }
        x = x.saturating_add(w as u16);
    }
    x
}
