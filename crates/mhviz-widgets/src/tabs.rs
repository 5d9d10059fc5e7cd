#![forbid(unsafe_code)]

//! Single-row tab strip.
//!
//! Renders ` 1: Label │ 2: Label │ ...` with the selected tab highlighted.
//! Tabs past the right edge are cut off.

use crate::{Widget, draw_text_span, set_style_area};
use mhviz_core::geometry::Rect;
use mhviz_render::frame::Frame;
use mhviz_style::Style;

const DIVIDER: &str = "│";

#[derive(Debug, Clone)]
pub struct Tabs<'a> {
    titles: &'a [String],
    selected: usize,
    style: Style,
    highlight_style: Style,
    divider_style: Style,
}

impl<'a> Tabs<'a> {
    pub fn new(titles: &'a [String]) -> Self {
        Self {
            titles,
            selected: 0,
            style: Style::new(),
            highlight_style: Style::new().reversed().bold(),
            divider_style: Style::new().dim(),
        }
    }

    pub fn select(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    pub fn divider_style(mut self, style: Style) -> Self {
        self.divider_style = style;
        self
    }

    /// Label drawn for tab `index`, numbered from 1.
    pub fn label(&self, index: usize) -> Option<String> {
        self.titles.get(index).map(|title| format!(" {}: {title} ", index + 1))
    }
}

impl Widget for Tabs<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Tabs",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        let row = area.row(0);
        set_style_area(&mut frame.buffer, row, self.style);

        let max_x = row.right();
        let mut x = row.x;
        for index in 0..self.titles.len() {
            if x >= max_x {
                break;
            }
            if index > 0 {
                x = draw_text_span(&mut frame.buffer, x, row.y, DIVIDER, self.divider_style, max_x);
            }
            let Some(label) = self.label(index) else { break };
            let style = if index == self.selected {
                self.style.patch(self.highlight_style)
            } else {
                self.style
            };
            x = draw_text_span(&mut frame.buffer, x, row.y, &label, style, max_x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhviz_render::cell::StyleFlags;

    fn titles() -> Vec<String> {
        vec!["BPSO".into(), "BGSA".into(), "Comparaison".into()]
    }

    #[test]
    fn labels_are_numbered() {
        let titles = titles();
        let mut frame = Frame::new(40, 1);
        Tabs::new(&titles).render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), " 1: BPSO │ 2: BGSA │ 3: Comparaison    ");
    }

    #[test]
    fn selected_tab_is_highlighted() {
        let titles = titles();
        let mut frame = Frame::new(40, 1);
        Tabs::new(&titles).select(1).render(frame.area(), &mut frame);
        // " 1: BPSO " is 9 wide, then the divider.
        assert!(frame.buffer.get(11, 0).unwrap().attrs.contains(StyleFlags::REVERSE));
        assert!(!frame.buffer.get(2, 0).unwrap().attrs.contains(StyleFlags::REVERSE));
    }

    #[test]
    fn clipped_at_right_edge() {
        let titles = titles();
        let mut frame = Frame::new(12, 1);
        Tabs::new(&titles).render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), " 1: BPSO │ 2");
    }
}
