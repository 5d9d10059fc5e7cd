#![forbid(unsafe_code)]

//! Optional-field style values.
//!
//! Every field is optional so styles can be layered: [`Style::patch`]
//! overlays the set fields of one style onto another, and
//! [`Style::apply_to`] writes only the set fields into a cell.

use mhviz_render::cell::{Cell, PackedRgba, StyleFlags};

/// Foreground, background, and attribute overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// An empty style that changes nothing.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[inline]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    #[inline]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attribute flags on top of any already set.
    #[inline]
    pub fn add(mut self, flags: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or(StyleFlags::empty()) | flags);
        self
    }

    #[inline]
    pub fn bold(self) -> Self {
        self.add(StyleFlags::BOLD)
    }

    #[inline]
    pub fn dim(self) -> Self {
        self.add(StyleFlags::DIM)
    }

    #[inline]
    pub fn italic(self) -> Self {
        self.add(StyleFlags::ITALIC)
    }

    #[inline]
    pub fn reversed(self) -> Self {
        self.add(StyleFlags::REVERSE)
    }

    /// True when no field is set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Overlay `other` onto `self`: fields set in `other` win, attributes union.
    pub fn patch(self, other: Style) -> Style {
        let attrs = match (self.attrs, other.attrs) {
            (Some(a), Some(b)) => Some(a | b),
            (a, b) => b.or(a),
        };
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs,
        }
    }

    /// Write the set fields into a cell, preserving its content.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.attrs |= attrs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_style_is_noop() {
        let mut cell = Cell::from_char('Z');
        let before = cell;
        Style::new().apply_to(&mut cell);
        assert_eq!(cell, before);
        assert!(Style::default().is_empty());
    }

    #[test]
    fn apply_sets_fields_and_keeps_content() {
        let mut cell = Cell::from_char('Z');
        Style::new()
            .fg(PackedRgba::rgb(1, 2, 3))
            .bg(PackedRgba::BLACK)
            .bold()
            .apply_to(&mut cell);
        assert_eq!(cell.content.as_char(), Some('Z'));
        assert_eq!(cell.fg, PackedRgba::rgb(1, 2, 3));
        assert_eq!(cell.bg, PackedRgba::BLACK);
        assert!(cell.attrs.contains(StyleFlags::BOLD));
    }

    #[test]
    fn patch_prefers_other_and_unions_attrs() {
        let base = Style::new().fg(PackedRgba::WHITE).bold();
        let over = Style::new().fg(PackedRgba::BLACK).italic();
        let merged = base.patch(over);
        assert_eq!(merged.fg, Some(PackedRgba::BLACK));
        let attrs = merged.attrs.unwrap_or(StyleFlags::empty());
        assert!(attrs.contains(StyleFlags::BOLD | StyleFlags::ITALIC));
    }

    #[test]
    fn patch_with_empty_keeps_base() {
        let base = Style::new().bg(PackedRgba::BLACK).dim();
        assert_eq!(base.patch(Style::new()), base);
    }
}
