#![forbid(unsafe_code)]

//! Frame: the render target handed to widgets for one pass.

use crate::buffer::Buffer;
use mhviz_core::geometry::Rect;

/// A single render pass target.
///
/// Widgets write into [`Frame::buffer`]; the runtime owns the frame for the
/// duration of `Model::view` and then diffs the buffer against the previous
/// one.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid being painted.
    pub buffer: Buffer,
}

impl Frame {
    /// Create a blank frame.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
        }
    }

    /// Wrap an existing buffer.
    pub fn from_buffer(buffer: Buffer) -> Self {
        Self { buffer }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Full frame area.
    #[inline]
    pub fn area(&self) -> Rect {
        self.buffer.area()
    }

    /// Consume the frame and return the painted buffer.
    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }
}
