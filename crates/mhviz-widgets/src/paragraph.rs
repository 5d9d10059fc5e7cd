#![forbid(unsafe_code)]

//! Styled multi-line text.

use crate::block::{Alignment, Block};
use crate::text::{display_width, wrap};
use crate::{Widget, draw_text_span};
use mhviz_core::geometry::Rect;
use mhviz_render::frame::Frame;
use mhviz_style::Style;

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub content: String,
    pub style: Style,
}

impl Span {
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::new(),
        }
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        display_width(&self.content)
    }
}

/// One line of spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::raw(content)],
        }
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            spans: vec![Span::styled(content, style)],
        }
    }

    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Self {
        Self {
            spans: spans.into_iter().collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Concatenated text without styles.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Line::raw(text)
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Line::raw(text)
    }
}

/// Lines of text, optionally wrapped, aligned, and framed.
#[derive(Debug, Clone, Default)]
pub struct Paragraph<'a> {
    lines: Vec<Line>,
    block: Option<Block<'a>>,
    style: Style,
    alignment: Alignment,
    wrap: bool,
}

impl<'a> Paragraph<'a> {
    /// Split `text` on newlines into unstyled lines.
    pub fn new(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(Line::raw))
    }

    pub fn from_lines(lines: impl IntoIterator<Item = Line>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Base style; span styles are patched on top.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Word-wrap lines to the area width.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Rows needed to show every line at `width` columns, borders included.
    pub fn line_count(&self, width: u16) -> u16 {
        let (chrome_w, chrome_h) = self.block.as_ref().map_or((0, 0), Block::chrome_size);
        let inner = width.saturating_sub(chrome_w);
        let rows = self.layout(inner).len();
        u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(chrome_h)
    }

    /// Visual lines after wrapping.
    fn layout(&self, width: u16) -> Vec<Line> {
        if !self.wrap {
            return self.lines.clone();
        }
        let mut out = Vec::new();
        for line in &self.lines {
            // Multi-style lines are clipped rather than wrapped.
            if line.spans.len() != 1 || line.width() <= width as usize {
                out.push(line.clone());
                continue;
            }
            let span = &line.spans[0];
            out.extend(
                wrap(&span.content, width as usize)
                    .into_iter()
                    .map(|text| Line::styled(text, span.style)),
            );
        }
        out
    }
}

impl Widget for Paragraph<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Paragraph",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.is_empty() {
            return;
        }
        let inner = match &self.block {
            Some(block) => {
                block.render(area, frame);
                block.inner(area)
            }
            None => area,
        };
        if inner.is_empty() {
            return;
        }

        for (row, line) in self.layout(inner.width).iter().enumerate() {
            let Ok(row) = u16::try_from(row) else { break };
            if row >= inner.height {
                break;
            }
            let width = line.width().min(inner.width as usize) as u16;
            let mut x = match self.alignment {
                Alignment::Left => inner.x,
                Alignment::Center => inner.x + (inner.width - width) / 2,
                Alignment::Right => inner.right() - width,
            };
            for span in &line.spans {
                let style = self.style.patch(span.style);
                x = draw_text_span(&mut frame.buffer, x, inner.y + row, &span.content, style, inner.right());
            }
        }
    }
}
