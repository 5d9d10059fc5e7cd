#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s representing the terminal display.
//!
//! # Layout
//!
//! Cells are stored in row-major order: `index = y * width + x`.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Writes outside the grid are ignored

use crate::cell::{Cell, CellContent};
use mhviz_core::geometry::Rect;

/// A 2D grid of terminal cells.
///
/// # Example
///
/// ```
/// use mhviz_render::buffer::Buffer;
/// use mhviz_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// assert_eq!(buffer.get(1, 0).and_then(|c| c.content.as_char()), Some('i'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a new buffer filled with default cells.
    ///
    /// A zero dimension yields an empty buffer that ignores all writes.
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rectangle of the buffer.
    #[inline]
    pub const fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Mutable cell at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Write a cell, handling wide characters.
    ///
    /// A wide character that would not fit before the right edge is not
    /// drawn. The cells it covers to the right become continuations.
    /// Overwriting half of an existing wide character clears its other half.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let width = cell.content.width();
        if width > 1 && x as usize + width > self.width as usize {
            return;
        }

        self.clear_wide_remnants(x, y, width.max(1));
        self.cells[idx] = cell;
        for dx in 1..width {
            if let Some(i) = self.index(x + dx as u16, y) {
                self.cells[i] = Cell::CONTINUATION;
            }
        }
    }

    fn clear_wide_remnants(&mut self, x: u16, y: u16, span: usize) {
        // Head of a wide char to the left whose tail we are about to cover.
        if let Some(i) = self.index(x, y)
            && self.cells[i].is_continuation()
        {
            let mut head = x;
            while head > 0 {
                head -= 1;
                if let Some(h) = self.index(head, y) {
                    let is_cont = self.cells[h].is_continuation();
                    self.cells[h] = Cell::default();
                    if !is_cont {
                        break;
                    }
                }
            }
        }
        // Orphaned continuations to the right of the written span.
        let mut tail = x as usize + span;
        while let Some(i) = self.index(tail as u16, y) {
            if !self.cells[i].is_continuation() {
                break;
            }
            self.cells[i] = Cell::default();
            tail += 1;
        }
    }

    /// Fill a rectangle with a cell.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = rect.intersection(&self.area());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Compare content only, ignoring colours and attributes.
    pub fn content_eq(&self, other: &Buffer) -> bool {
        self.width == other.width
            && self.height == other.height
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.content == b.content)
    }

    /// Row `y` as plain text; empty cells become spaces, continuations vanish.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::with_capacity(self.width as usize);
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                match cell.content {
                    CellContent::Empty => out.push(' '),
                    CellContent::Char(c) => out.push(c),
                    CellContent::Continuation => {}
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    fn ch(buf: &Buffer, x: u16, y: u16) -> Option<char> {
        buf.get(x, y).and_then(|c| c.content.as_char())
    }

    #[test]
    fn new_buffer_is_blank() {
        let buf = Buffer::new(4, 2);
        assert_eq!(buf.len(), 8);
        assert!(buf.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn zero_sized_buffer_ignores_writes() {
        let mut buf = Buffer::new(0, 3);
        buf.set(0, 0, Cell::from_char('x'));
        assert!(buf.is_empty());
        assert!(buf.get(0, 0).is_none());
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::from_char('x'));
        assert!(buf.cells().iter().all(Cell::is_empty));
    }

    #[test]
    fn wide_char_writes_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.set(1, 0, Cell::from_char('中'));
        assert_eq!(ch(&buf, 1, 0), Some('中'));
        assert!(buf.get(2, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buf.row_text(0), " 中 ");
    }

    #[test]
    fn wide_char_at_edge_is_dropped() {
        let mut buf = Buffer::new(2, 1);
        buf.set(1, 0, Cell::from_char('中'));
        assert!(buf.get(1, 0).is_some_and(Cell::is_empty));
    }

    #[test]
    fn overwriting_continuation_clears_head() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('中'));
        buf.set(1, 0, Cell::from_char('a'));
        assert!(buf.get(0, 0).is_some_and(Cell::is_empty));
        assert_eq!(ch(&buf, 1, 0), Some('a'));
    }

    #[test]
    fn overwriting_head_clears_tail() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('中'));
        buf.set(0, 0, Cell::from_char('a'));
        assert!(buf.get(1, 0).is_some_and(Cell::is_empty));
    }

    #[test]
    fn fill_is_clipped() {
        let mut buf = Buffer::new(3, 3);
        buf.fill(Rect::new(1, 1, 10, 10), Cell::from_char('#'));
        assert_eq!(buf.row_text(0), "   ");
        assert_eq!(buf.row_text(1), " ##");
        assert_eq!(buf.row_text(2), " ##");
    }

    #[test]
    fn content_eq_ignores_colour() {
        let mut a = Buffer::new(2, 1);
        let mut b = Buffer::new(2, 1);
        a.set(0, 0, Cell::from_char('x').with_fg(PackedRgba::BLACK));
        b.set(0, 0, Cell::from_char('x'));
        assert!(a.content_eq(&b));
        assert_ne!(a, b);
    }
}
