#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission.
//!
//! The presenter turns a [`BufferDiff`] into terminal output. It tracks the
//! last emitted colours and attributes so escape sequences are written only
//! when the style actually changes, and it queues everything into one write
//! that is flushed once per frame.
//!
//! # Usage
//!
//! ```ignore
//! let mut presenter = Presenter::new(std::io::stdout());
//! let diff = BufferDiff::compute(&current, &next);
//! presenter.present(&next, &diff)?;
//! ```

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, queue, style};

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent, PackedRgba, StyleFlags};
use crate::diff::BufferDiff;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

/// State-tracked ANSI presenter over any writer.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: W,
    current: Option<CellStyle>,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            current: None,
        }
    }

    /// Emit the cells named by `diff`, reading their content from `buffer`.
    ///
    /// # Errors
    ///
    /// Propagates any write error from the underlying writer.
    pub fn present(&mut self, buffer: &Buffer, diff: &BufferDiff) -> io::Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("present", changes = diff.len()).entered();

        for run in diff.runs() {
            queue!(self.writer, cursor::MoveTo(run.x0, run.y))?;
            for x in run.x0..=run.x1 {
                let Some(cell) = buffer.get(x, run.y) else {
                    continue;
                };
                let glyph = match cell.content {
                    CellContent::Continuation => continue,
                    CellContent::Empty => ' ',
                    CellContent::Char(c) => c,
                };
                self.apply_style(CellStyle::from_cell(cell))?;
                queue!(self.writer, style::Print(glyph))?;
            }
        }
        queue!(self.writer, SetAttribute(Attribute::Reset))?;
        self.current = None;
        self.writer.flush()
    }

    /// Recover the writer, e.g. to inspect captured bytes in tests.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn apply_style(&mut self, next: CellStyle) -> io::Result<()> {
        if self.current == Some(next) {
            return Ok(());
        }
        let attrs_changed = self.current.is_none_or(|cur| cur.attrs != next.attrs);
        if attrs_changed {
            // Reset clears colours too, so force them to be re-emitted.
            queue!(self.writer, SetAttribute(Attribute::Reset))?;
            for (flag, attr) in [
                (StyleFlags::BOLD, Attribute::Bold),
                (StyleFlags::DIM, Attribute::Dim),
                (StyleFlags::ITALIC, Attribute::Italic),
                (StyleFlags::UNDERLINE, Attribute::Underlined),
                (StyleFlags::REVERSE, Attribute::Reverse),
            ] {
                if next.attrs.contains(flag) {
                    queue!(self.writer, SetAttribute(attr))?;
                }
            }
        }
        let prev = if attrs_changed { None } else { self.current };
        if prev.is_none_or(|cur| cur.fg != next.fg) {
            queue!(self.writer, SetForegroundColor(to_color(next.fg)))?;
        }
        if prev.is_none_or(|cur| cur.bg != next.bg) {
            queue!(self.writer, SetBackgroundColor(to_color(next.bg)))?;
        }
        self.current = Some(next);
        Ok(())
    }
}

fn to_color(rgba: PackedRgba) -> Color {
    if rgba.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb {
            r: rgba.r(),
            g: rgba.g(),
            b: rgba.b(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present_to_string(prev: &Buffer, next: &Buffer) -> String {
        let mut presenter = Presenter::new(Vec::new());
        let diff = BufferDiff::compute(prev, next);
        presenter.present(next, &diff).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn unchanged_frame_emits_only_reset() {
        let a = Buffer::new(4, 2);
        let out = present_to_string(&a, &a.clone());
        assert!(!out.contains('H'));
        assert_eq!(out, "\u{1b}[0m");
    }

    #[test]
    fn changed_cells_are_printed() {
        let a = Buffer::new(4, 1);
        let mut b = a.clone();
        b.set(0, 0, Cell::from_char('H'));
        b.set(1, 0, Cell::from_char('i'));
        let out = present_to_string(&a, &b);
        assert!(out.contains("Hi"));
        // MoveTo is 1-indexed on the wire.
        assert!(out.contains("\u{1b}[1;1H"));
    }

    #[test]
    fn same_style_is_emitted_once() {
        let a = Buffer::new(3, 1);
        let mut b = a.clone();
        let red = PackedRgba::rgb(255, 0, 0);
        for x in 0..3 {
            b.set(x, 0, Cell::from_char('x').with_fg(red));
        }
        let out = present_to_string(&a, &b);
        assert_eq!(out.matches("38;2;255;0;0").count(), 1);
    }

    #[test]
    fn continuation_is_skipped() {
        let a = Buffer::new(3, 1);
        let mut b = a.clone();
        b.set(0, 0, Cell::from_char('中'));
        let out = present_to_string(&a, &b);
        assert_eq!(out.matches('中').count(), 1);
    }
}
