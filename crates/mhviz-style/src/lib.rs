#![forbid(unsafe_code)]

//! Style system: per-span [`Style`] values and the dashboard [`Theme`].

pub mod style;
pub mod theme;

pub use mhviz_render::cell::{PackedRgba, StyleFlags};
pub use style::Style;
pub use theme::Theme;
