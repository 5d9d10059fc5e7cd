#![forbid(unsafe_code)]

//! A row of headline figures.

use crate::block::{Alignment, Block, BorderType};
use crate::text::fit_to_width;
use crate::{Widget, draw_text_span};
use mhviz_core::geometry::Rect;
use mhviz_layout::{Constraint, Flex};
use mhviz_render::cell::PackedRgba;
use mhviz_render::frame::Frame;
use mhviz_style::Style;

/// One headline figure: label above, value in the middle, caption below.
#[derive(Debug, Clone, PartialEq)]
pub struct StatTile {
    pub label: String,
    pub value: String,
    pub caption: String,
    pub accent: PackedRgba,
}

impl StatTile {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            caption: String::new(),
            accent: PackedRgba::WHITE,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn accent(mut self, accent: PackedRgba) -> Self {
        self.accent = accent;
        self
    }
}

/// Equal-width tiles laid out left to right.
#[derive(Debug, Clone)]
pub struct StatsGrid<'a> {
    tiles: &'a [StatTile],
    border_style: Style,
    label_style: Style,
    gap: u16,
}

impl<'a> StatsGrid<'a> {
    /// Rows a grid needs: three lines of text inside a border.
    pub const HEIGHT: u16 = 5;

    pub fn new(tiles: &'a [StatTile]) -> Self {
        Self {
            tiles,
            border_style: Style::new(),
            label_style: Style::new().dim(),
            gap: 1,
        }
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    fn render_tile(&self, tile: &StatTile, area: Rect, frame: &mut Frame) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.border_style);
        block.render(area, frame);
        let inner = block.inner(area);
        if inner.is_empty() {
            return;
        }
        let width = inner.width as usize;
        let lines = [
            (&tile.label, self.label_style),
            (&tile.value, Style::new().fg(tile.accent).bold()),
            (&tile.caption, self.label_style),
        ];
        for (row, (text, style)) in (0..inner.height).zip(lines) {
            let text = fit_to_width(text, width, Alignment::Center);
            draw_text_span(&mut frame.buffer, inner.x, inner.y + row, &text, style, inner.right());
        }
    }
}

impl Widget for StatsGrid<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "StatsGrid",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() || self.tiles.is_empty() {
            return;
        }
        let cells = Flex::horizontal()
            .constraints(self.tiles.iter().map(|_| Constraint::Fill))
            .gap(self.gap)
            .split(area);
        for (tile, cell) in self.tiles.iter().zip(cells) {
            if !cell.is_empty() {
                self.render_tile(tile, cell, frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles() -> Vec<StatTile> {
        vec![
            StatTile::new("Meilleur", "BWOA").caption("141278.00"),
            StatTile::new("Plus stable", "BWOA").caption("σ 3.59"),
        ]
    }

    #[test]
    fn tiles_share_width() {
        let tiles = tiles();
        let mut frame = Frame::new(25, StatsGrid::HEIGHT);
        StatsGrid::new(&tiles).render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "╭──────────╮ ╭──────────╮");
        assert_eq!(frame.buffer.row_text(1), "│ Meilleur │ │Plus stab…│");
        assert_eq!(frame.buffer.row_text(2), "│   BWOA   │ │   BWOA   │");
        assert_eq!(frame.buffer.row_text(3), "│141278.00 │ │  σ 3.59  │");
    }

    #[test]
    fn value_uses_accent() {
        let accent = PackedRgba::rgb(220, 38, 38);
        let tiles = vec![StatTile::new("Best", "BWOA").accent(accent)];
        let mut frame = Frame::new(12, 5);
        StatsGrid::new(&tiles).render(frame.area(), &mut frame);
        let row = frame.buffer.row_text(2);
        let x = row.chars().position(|c| c == 'B').unwrap() as u16;
        assert_eq!(frame.buffer.get(x, 2).unwrap().fg, accent);
    }

    #[test]
    fn empty_grid_draws_nothing() {
        let mut frame = Frame::new(10, 5);
        StatsGrid::new(&[]).render(frame.area(), &mut frame);
        assert!(frame.buffer.cells().iter().all(|c| c.is_empty()));
    }
}
