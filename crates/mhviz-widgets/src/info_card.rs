#![forbid(unsafe_code)]

//! Titled list of findings inside a tinted border.
//!
//! Items render as `• text`. An item starting with `"- "` is a sub-point of
//! the item before it and renders indented without a bullet. Long items
//! wrap under their own text.

use crate::block::{Block, BorderType};
use crate::text::{display_width, wrap};
use crate::{Widget, draw_text_span};
use mhviz_core::geometry::Rect;
use mhviz_render::cell::PackedRgba;
use mhviz_render::frame::Frame;
use mhviz_style::Style;

const BULLET: &str = "• ";
const SUB_INDENT: &str = "    ";

/// A bordered note card.
#[derive(Debug, Clone)]
pub struct InfoCard<'a> {
    title: &'a str,
    items: &'a [String],
    accent: PackedRgba,
    text_style: Style,
}

impl<'a> InfoCard<'a> {
    pub fn new(title: &'a str, items: &'a [String]) -> Self {
        Self {
            title,
            items,
            accent: PackedRgba::rgb(96, 165, 250),
            text_style: Style::new(),
        }
    }

    /// Border and title colour.
    pub fn accent(mut self, color: PackedRgba) -> Self {
        self.accent = color;
        self
    }

    pub fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
        self
    }

    /// Visual lines at an inner width of `width` columns.
    pub fn lines(&self, width: u16) -> Vec<String> {
        let width = width as usize;
        let mut out = Vec::new();
        for item in self.items {
            let (prefix, text) = match item.strip_prefix("- ") {
                Some(sub) => (SUB_INDENT, sub),
                None => (BULLET, item.as_str()),
            };
            let indent = display_width(prefix);
            if width <= indent {
                out.push(prefix.trim_end().to_string());
                continue;
            }
            let hang = " ".repeat(indent);
            for (i, line) in wrap(text, width - indent).into_iter().enumerate() {
                let lead = if i == 0 { prefix } else { hang.as_str() };
                out.push(format!("{lead}{line}"));
            }
        }
        out
    }

    /// Rows needed at an outer width of `width`, borders included.
    pub fn height(&self, width: u16) -> u16 {
        let rows = self.lines(width.saturating_sub(4)).len();
        u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2)
    }
}

impl Widget for InfoCard<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "InfoCard",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(self.accent))
            .title_style(Style::new().fg(self.accent).bold())
            .title(self.title);
        block.render(area, frame);

        // One column of padding inside the border.
        let inner = block.inner(area);
        let body = Rect::new(
            inner.x.saturating_add(1),
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        if body.is_empty() {
            return;
        }
        for (row, line) in (0..body.height).zip(self.lines(body.width)) {
            draw_text_span(&mut frame.buffer, body.x, body.y + row, &line, self.text_style, body.right());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<String> {
        vec![
            "Points forts spécifiques:".into(),
            "- Adaptation dynamique".into(),
            "- Robustesse".into(),
        ]
    }

    #[test]
    fn sub_items_are_indented_without_bullet() {
        let items = items();
        let card = InfoCard::new("Conclusions", &items);
        assert_eq!(
            card.lines(40),
            ["• Points forts spécifiques:", "    Adaptation dynamique", "    Robustesse"]
        );
    }

    #[test]
    fn wrapped_lines_hang_under_text() {
        let items = vec!["Exploration initiale efficace".to_string()];
        let card = InfoCard::new("Encerclement", &items);
        assert_eq!(card.lines(16), ["• Exploration", "  initiale", "  efficace"]);
        assert_eq!(card.height(20), 5);
    }

    #[test]
    fn renders_inside_rounded_border() {
        let items = items();
        let mut frame = Frame::new(34, 5);
        InfoCard::new("Notes", &items).render(frame.area(), &mut frame);
        assert!(frame.buffer.row_text(0).starts_with("╭─Notes"));
        assert_eq!(frame.buffer.row_text(1), "│ • Points forts spécifiques:    │");
        assert_eq!(frame.buffer.row_text(2), "│     Adaptation dynamique       │");
        assert!(frame.buffer.row_text(4).starts_with('╰'));
    }

    #[test]
    fn border_uses_accent() {
        let items = items();
        let accent = PackedRgba::rgb(34, 197, 94);
        let mut frame = Frame::new(30, 5);
        InfoCard::new("Notes", &items).accent(accent).render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.get(0, 0).unwrap().fg, accent);
    }
}
