#![forbid(unsafe_code)]

//! Layout primitives.
//!
//! [`Flex`] splits a [`Rect`] along one axis according to a list of
//! [`Constraint`]s. Fixed and percentage sizes are allocated first; the
//! remaining space is shared evenly between `Min`, `Max`, and `Fill` slots,
//! with `Max` slots clamped and their surplus redistributed.
//!
//! ```
//! use mhviz_layout::{Constraint, Flex, Rect};
//!
//! let rows = Flex::vertical()
//!     .constraints([Constraint::Fixed(1), Constraint::Fill, Constraint::Fixed(1)])
//!     .split(Rect::from_size(80, 24));
//! assert_eq!(rows[1].height, 22);
//! ```

use std::cmp::min;

pub use mhviz_core::geometry::{Rect, Sides};

/// A constraint on the size of a layout area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// An exact size in cells.
    Fixed(u16),
    /// A percentage of the total available size (0.0 to 100.0).
    Percentage(f32),
    /// At least this many cells; grows into leftover space.
    Min(u16),
    /// At most this many cells; grows into leftover space up to the cap.
    Max(u16),
    /// Fill remaining space.
    Fill,
}

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// A flexible layout container.
#[derive(Debug, Clone, Default)]
pub struct Flex {
    direction: Direction,
    constraints: Vec<Constraint>,
    margin: Sides,
    gap: u16,
}

impl Flex {
    /// Create a new vertical flex layout.
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    /// Create a new horizontal flex layout.
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    /// Set the constraints.
    pub fn constraints(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints = constraints.into_iter().collect();
        self
    }

    /// Set the margin.
    pub fn margin(mut self, margin: Sides) -> Self {
        self.margin = margin;
        self
    }

    /// Set the gap between items.
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Split the area into one rectangle per constraint.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        let inner = area.inner(self.margin);
        if inner.is_empty() {
            return self.constraints.iter().map(|_| Rect::default()).collect();
        }
        let count = self.constraints.len();
        if count == 0 {
            return Vec::new();
        }

        let total_size = match self.direction {
            Direction::Horizontal => inner.width,
            Direction::Vertical => inner.height,
        };
        let total_gap = ((count - 1) as u64 * self.gap as u64).min(u16::MAX as u64) as u16;
        let available = total_size.saturating_sub(total_gap);
        let sizes = solve_constraints(&self.constraints, available);

        let mut pos = match self.direction {
            Direction::Horizontal => inner.x,
            Direction::Vertical => inner.y,
        };
        sizes
            .into_iter()
            .map(|size| {
                let rect = match self.direction {
                    Direction::Horizontal => Rect::new(pos, inner.y, size, inner.height),
                    Direction::Vertical => Rect::new(inner.x, pos, inner.width, size),
                };
                pos = pos.saturating_add(size).saturating_add(self.gap);
                rect
            })
            .collect()
    }
}

pub(crate) fn solve_constraints(constraints: &[Constraint], available_size: u16) -> Vec<u16> {
    let mut sizes = vec![0u16; constraints.len()];
    let mut remaining = available_size;
    let mut grow = Vec::new();

    for (i, &constraint) in constraints.iter().enumerate() {
        match constraint {
            Constraint::Fixed(size) => {
                let size = min(size, remaining);
                sizes[i] = size;
                remaining -= size;
            }
            Constraint::Percentage(p) => {
                let size = (available_size as f32 * p / 100.0)
                    .round()
                    .clamp(0.0, u16::MAX as f32) as u16;
                let size = min(size, remaining);
                sizes[i] = size;
                remaining -= size;
            }
            Constraint::Min(min_size) => {
                let size = min(min_size, remaining);
                sizes[i] = size;
                remaining -= size;
                grow.push(i);
            }
            Constraint::Max(_) | Constraint::Fill => grow.push(i),
        }
    }

    // Share the leftover evenly; clamp Max slots and redistribute until stable.
    while remaining > 0 && !grow.is_empty() {
        let share = remaining / grow.len() as u16;
        let extra = remaining % grow.len() as u16;
        let mut clamped = Vec::new();
        let mut allocated = 0u16;

        for (k, &i) in grow.iter().enumerate() {
            let want = share + u16::from((k as u16) < extra);
            let give = match constraints[i] {
                Constraint::Max(cap) => {
                    let room = cap.saturating_sub(sizes[i]);
                    if want >= room {
                        clamped.push(i);
                    }
                    min(want, room)
                }
                _ => want,
            };
            sizes[i] += give;
            allocated += give;
        }

        remaining -= allocated;
        if clamped.is_empty() {
            break;
        }
        grow.retain(|i| !clamped.contains(i));
    }

    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fixed_and_fill() {
        let rects = Flex::vertical()
            .constraints([Constraint::Fixed(1), Constraint::Fill, Constraint::Fixed(1)])
            .split(Rect::new(0, 0, 10, 10));
        assert_eq!(rects[0], Rect::new(0, 0, 10, 1));
        assert_eq!(rects[1], Rect::new(0, 1, 10, 8));
        assert_eq!(rects[2], Rect::new(0, 9, 10, 1));
    }

    #[test]
    fn percentage_split() {
        let rects = Flex::horizontal()
            .constraints([Constraint::Percentage(60.0), Constraint::Fill])
            .split(Rect::new(0, 0, 100, 5));
        assert_eq!(rects[0].width, 60);
        assert_eq!(rects[1].x, 60);
        assert_eq!(rects[1].width, 40);
    }

    #[test]
    fn gap_is_respected() {
        let rects = Flex::horizontal()
            .gap(2)
            .constraints([Constraint::Fill, Constraint::Fill])
            .split(Rect::new(0, 0, 12, 1));
        assert_eq!(rects[0], Rect::new(0, 0, 5, 1));
        assert_eq!(rects[1], Rect::new(7, 0, 5, 1));
    }

    #[test]
    fn max_is_clamped_and_surplus_redistributed() {
        let rects = Flex::horizontal()
            .constraints([Constraint::Max(3), Constraint::Fill])
            .split(Rect::new(0, 0, 20, 1));
        assert_eq!(rects[0].width, 3);
        assert_eq!(rects[1].width, 17);
    }

    #[test]
    fn min_gets_at_least_minimum() {
        let rects = Flex::vertical()
            .constraints([Constraint::Min(5), Constraint::Fixed(3)])
            .split(Rect::new(0, 0, 1, 20));
        assert_eq!(rects[0].height, 17);
        assert_eq!(rects[1].height, 3);
    }

    #[test]
    fn empty_area_yields_empty_rects() {
        let rects = Flex::vertical()
            .constraints([Constraint::Fill, Constraint::Fixed(2)])
            .split(Rect::new(0, 0, 0, 10));
        assert_eq!(rects, vec![Rect::default(); 2]);
    }

    #[test]
    fn margin_shrinks_area() {
        let rects = Flex::vertical()
            .margin(Sides::all(1))
            .constraints([Constraint::Fill])
            .split(Rect::new(0, 0, 10, 10));
        assert_eq!(rects[0], Rect::new(1, 1, 8, 8));
    }

    fn arb_constraint() -> impl Strategy<Value = Constraint> {
        prop_oneof![
            (0u16..50).prop_map(Constraint::Fixed),
            (0.0f32..100.0).prop_map(Constraint::Percentage),
            (0u16..50).prop_map(Constraint::Min),
            (0u16..50).prop_map(Constraint::Max),
            Just(Constraint::Fill),
        ]
    }

    proptest! {
        #[test]
        fn sizes_never_exceed_available(
            constraints in proptest::collection::vec(arb_constraint(), 1..8),
            size in 0u16..300,
        ) {
            let sizes = solve_constraints(&constraints, size);
            let total: u32 = sizes.iter().map(|&s| s as u32).sum();
            prop_assert!(total <= size as u32);
            prop_assert_eq!(sizes.len(), constraints.len());
        }

        #[test]
        fn fill_takes_all_leftover(size in 0u16..300, fixed in 0u16..100) {
            let sizes = solve_constraints(&[Constraint::Fixed(fixed), Constraint::Fill], size);
            prop_assert_eq!(sizes[0] as u32 + sizes[1] as u32, size as u32);
        }
    }
}
