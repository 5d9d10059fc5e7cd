#![forbid(unsafe_code)]

//! Bordered container with an optional title.

use crate::{Widget, apply_style, draw_text_span, set_style_area};
use mhviz_core::geometry::Rect;
use mhviz_render::buffer::Buffer;
use mhviz_render::cell::Cell;
use mhviz_render::frame::Frame;
use mhviz_style::Style;

bitflags::bitflags! {
    /// Which edges of a block get a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Borders: u8 {
        const TOP    = 0b0001;
        const RIGHT  = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT   = 0b1000;
        const ALL    = Self::TOP.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::LEFT.bits();
    }
}

impl Default for Borders {
    fn default() -> Self {
        Self::empty()
    }
}

/// Border character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    #[default]
    Square,
    Rounded,
    Heavy,
}

#[derive(Debug, Clone, Copy)]
struct BorderSet {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
}

impl BorderType {
    const fn set(self) -> BorderSet {
        match self {
            Self::Square => BorderSet {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
            },
            Self::Rounded => BorderSet {
                horizontal: '─',
                vertical: '│',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
            },
            Self::Heavy => BorderSet {
                horizontal: '━',
                vertical: '┃',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
            },
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A block with optional borders and a title on the top edge.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    borders: Borders,
    border_style: Style,
    border_type: BorderType,
    title: Option<&'a str>,
    title_style: Option<Style>,
    title_alignment: Alignment,
    style: Style,
}

impl<'a> Block<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block with all four borders.
    pub fn bordered() -> Self {
        Self::default().borders(Borders::ALL)
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Title style; defaults to the border style.
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = Some(style);
        self
    }

    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    /// Style applied to the whole block area before borders are drawn.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Area left inside the borders.
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }

    /// Columns and rows consumed by borders.
    pub fn chrome_size(&self) -> (u16, u16) {
        let horizontal = u16::from(self.borders.contains(Borders::LEFT))
            + u16::from(self.borders.contains(Borders::RIGHT));
        let vertical = u16::from(self.borders.contains(Borders::TOP))
            + u16::from(self.borders.contains(Borders::BOTTOM));
        (horizontal, vertical)
    }

    fn border_cell(&self, c: char) -> Cell {
        let mut cell = Cell::from_char(c);
        apply_style(&mut cell, self.border_style);
        cell
    }

    fn render_borders(&self, area: Rect, buf: &mut Buffer) {
        let set = self.border_type.set();

        if self.borders.contains(Borders::LEFT) {
            for y in area.y..area.bottom() {
                buf.set(area.x, y, self.border_cell(set.vertical));
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            let x = area.right() - 1;
            for y in area.y..area.bottom() {
                buf.set(x, y, self.border_cell(set.vertical));
            }
        }
        if self.borders.contains(Borders::TOP) {
            for x in area.x..area.right() {
                buf.set(x, area.y, self.border_cell(set.horizontal));
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            let y = area.bottom() - 1;
            for x in area.x..area.right() {
                buf.set(x, y, self.border_cell(set.horizontal));
            }
        }

        // Corners overwrite the edge characters.
        if self.borders.contains(Borders::LEFT | Borders::TOP) {
            buf.set(area.x, area.y, self.border_cell(set.top_left));
        }
        if self.borders.contains(Borders::RIGHT | Borders::TOP) {
            buf.set(area.right() - 1, area.y, self.border_cell(set.top_right));
        }
        if self.borders.contains(Borders::LEFT | Borders::BOTTOM) {
            buf.set(area.x, area.bottom() - 1, self.border_cell(set.bottom_left));
        }
        if self.borders.contains(Borders::RIGHT | Borders::BOTTOM) {
            buf.set(area.right() - 1, area.bottom() - 1, self.border_cell(set.bottom_right));
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let Some(title) = self.title else {
            return;
        };
        let left = area.x + u16::from(self.borders.contains(Borders::LEFT));
        let right = area.right() - u16::from(self.borders.contains(Borders::RIGHT));
        if right <= left + 2 {
            return;
        }
        let available = (right - left - 2) as usize;
        let text = crate::text::truncate_to_width(title, available);
        let width = crate::text::display_width(&text) as u16;
        let x = match self.title_alignment {
            Alignment::Left => left + 1,
            Alignment::Center => left + (right - left).saturating_sub(width) / 2,
            Alignment::Right => right.saturating_sub(width + 1),
        };
        let style = self.title_style.unwrap_or(self.border_style);
        draw_text_span(buf, x, area.y, &text, style, right);
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Block",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        set_style_area(&mut frame.buffer, area, self.style);
        self.render_borders(area, &mut frame.buffer);
        self.render_title(area, &mut frame.buffer);
    }
}
