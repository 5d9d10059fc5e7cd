#![forbid(unsafe_code)]

//! Dashboard theme with semantic colour slots.
//!
//! Widgets never hard-code colours; they take a [`Style`] built from one of
//! these slots so the whole dashboard shifts together when the theme does.

use crate::style::Style;
use mhviz_render::cell::PackedRgba;

/// Semantic colour slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub text: PackedRgba,
    pub text_muted: PackedRgba,
    pub accent: PackedRgba,
    pub border: PackedRgba,
    pub surface: PackedRgba,
    pub info: PackedRgba,
    pub success: PackedRgba,
    pub warning: PackedRgba,
    pub error: PackedRgba,
}

impl Theme {
    /// The default dark theme.
    pub const DARK: Self = Self {
        text: PackedRgba::rgb(226, 232, 240),
        text_muted: PackedRgba::rgb(148, 163, 184),
        accent: PackedRgba::rgb(96, 165, 250),
        border: PackedRgba::rgb(71, 85, 105),
        surface: PackedRgba::rgb(30, 41, 59),
        info: PackedRgba::rgb(59, 130, 246),
        success: PackedRgba::rgb(34, 197, 94),
        warning: PackedRgba::rgb(234, 179, 8),
        error: PackedRgba::rgb(239, 68, 68),
    };

    #[inline]
    pub fn text_style(&self) -> Style {
        Style::new().fg(self.text)
    }

    #[inline]
    pub fn muted_style(&self) -> Style {
        Style::new().fg(self.text_muted)
    }

    #[inline]
    pub fn border_style(&self) -> Style {
        Style::new().fg(self.border)
    }

    #[inline]
    pub fn accent_style(&self) -> Style {
        Style::new().fg(self.accent).bold()
    }

    #[inline]
    pub fn error_style(&self) -> Style {
        Style::new().fg(self.error).bold()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}
