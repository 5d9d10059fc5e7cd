#![forbid(unsafe_code)]

//! Buffer diffing.
//!
//! Computes the cells that changed between two buffers of equal size and
//! groups horizontally adjacent changes into runs so the presenter can skip
//! redundant cursor moves.

use crate::buffer::Buffer;

/// A horizontal run of changed cells on one row (`x0..=x1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    pub y: u16,
    pub x0: u16,
    pub x1: u16,
}

/// The set of changes needed to turn one buffer into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferDiff {
    runs: Vec<ChangeRun>,
}

impl BufferDiff {
    /// Diff `prev` against `next`.
    ///
    /// Buffers of different sizes produce a full repaint of `next`.
    pub fn compute(prev: &Buffer, next: &Buffer) -> Self {
        if prev.width() != next.width() || prev.height() != next.height() {
            return Self::full(next);
        }

        let mut runs = Vec::new();
        for y in 0..next.height() {
            let mut open: Option<(u16, u16)> = None;
            for x in 0..next.width() {
                let changed = prev.get(x, y) != next.get(x, y);
                open = match (open, changed) {
                    (None, true) => Some((x, x)),
                    (Some((x0, _)), true) => Some((x0, x)),
                    (Some((x0, x1)), false) => {
                        runs.push(ChangeRun { y, x0, x1 });
                        None
                    }
                    (None, false) => None,
                };
            }
            if let Some((x0, x1)) = open {
                runs.push(ChangeRun { y, x0, x1 });
            }
        }
        Self { runs }
    }

    /// Every row of `buffer` as one run.
    pub fn full(buffer: &Buffer) -> Self {
        if buffer.width() == 0 {
            return Self::default();
        }
        let runs = (0..buffer.height())
            .map(|y| ChangeRun {
                y,
                x0: 0,
                x1: buffer.width() - 1,
            })
            .collect();
        Self { runs }
    }

    #[inline]
    pub fn runs(&self) -> &[ChangeRun] {
        &self.runs
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Total number of changed cells.
    pub fn len(&self) -> usize {
        self.runs
            .iter()
            .map(|r| (r.x1 - r.x0) as usize + 1)
            .sum()
    }
}
