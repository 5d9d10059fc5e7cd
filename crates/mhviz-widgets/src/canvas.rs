#![forbid(unsafe_code)]

//! Braille sub-cell canvas.
//!
//! Each terminal cell holds a 2×4 grid of dots (U+2800..U+28FF), which gives
//! line charts eight times the resolution of whole cells. Drawing happens on
//! a [`Painter`]; [`Painter::render_to_buffer`] converts the dots to cells and
//! writes only cells with at least one dot set, so anything drawn underneath
//! (grid lines, labels) stays visible.

use mhviz_core::geometry::Rect;
use mhviz_render::buffer::Buffer;
use mhviz_render::cell::{Cell, PackedRgba};
use mhviz_style::Style;

/// Dot columns per terminal cell.
pub const COLS_PER_CELL: u16 = 2;
/// Dot rows per terminal cell.
pub const ROWS_PER_CELL: u16 = 4;

/// Bit for each dot, indexed `[column][row]`.
const DOT_BITS: [[u8; 4]; 2] = [[0, 1, 2, 6], [3, 4, 5, 7]];

/// Accumulates dots on a virtual grid measured in sub-cell pixels.
#[derive(Debug, Clone)]
pub struct Painter {
    width: u16,
    height: u16,
    pixels: Vec<bool>,
    /// First colour written per pixel.
    colors: Vec<Option<PackedRgba>>,
}

impl Painter {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![false; len],
            colors: vec![None; len],
        }
    }

    /// A painter covering `area` at full dot resolution.
    pub fn for_area(area: Rect) -> Self {
        Self::new(
            area.width.saturating_mul(COLS_PER_CELL),
            area.height.saturating_mul(ROWS_PER_CELL),
        )
    }

    /// Size in dots.
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
        self.colors.fill(None);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Whether a dot is set.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.pixels[i])
    }

    /// Number of dots set.
    pub fn lit(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    pub fn point(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = true;
        }
    }

    /// Set a dot; an existing colour is kept.
    pub fn point_colored(&mut self, x: i32, y: i32, color: PackedRgba) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = true;
            if self.colors[idx].is_none() {
                self.colors[idx] = Some(color);
            }
        }
    }

    /// Bresenham line between two dots, inclusive.
    pub fn line_colored(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<PackedRgba>) {
        self.segment(
            (f64::from(x0), f64::from(y0)),
            (f64::from(x1), f64::from(y1)),
            color,
        );
    }

    /// Line between two dot positions that may lie far off the canvas.
    ///
    /// The segment is clipped to the canvas before rasterising, so only
    /// visible dots are ever stepped through.
    pub fn segment(&mut self, from: (f64, f64), to: (f64, f64), color: Option<PackedRgba>) {
        let Some((from, to)) = self.clip(from, to) else {
            return;
        };
        // Clipped coordinates lie within the canvas, so the casts are exact.
        let (x0, y0) = (from.0.round() as i32, from.1.round() as i32);
        let (x1, y1) = (to.0.round() as i32, to.1.round() as i32);
        self.bresenham(x0, y0, x1, y1, color);
    }

    /// Liang-Barsky clip against `[0, width-1] x [0, height-1]`.
    fn clip(&self, (x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return None;
        }
        let x_max = f64::from(self.width - 1);
        let y_max = f64::from(self.height - 1);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
        Some(((x0 + t0 * dx, y0 + t0 * dy), (x0 + t1 * dx, y0 + t1 * dy)))
    }

    fn bresenham(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Option<PackedRgba>) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: i32 = if x0 < x1 { 1 } else { -1 };
        let sy: i32 = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut cx, mut cy) = (x0, y0);

        loop {
            match color {
                Some(c) => self.point_colored(cx, cy, c),
                None => self.point(cx, cy),
            }
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                if cx == x1 {
                    break;
                }
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                if cy == y1 {
                    break;
                }
                err += dx;
                cy += sy;
            }
        }
    }

    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.line_colored(x0, y0, x1, y1, None);
    }

    /// Closed polygon through `vertices`.
    pub fn polygon(&mut self, vertices: &[(i32, i32)], color: Option<PackedRgba>) {
        match vertices {
            [] => {}
            [(x, y)] => match color {
                Some(c) => self.point_colored(*x, *y, c),
                None => self.point(*x, *y),
            },
            _ => {
                for (i, &(x0, y0)) in vertices.iter().enumerate() {
                    let (x1, y1) = vertices[(i + 1) % vertices.len()];
                    self.line_colored(x0, y0, x1, y1, color);
                }
            }
        }
    }

    fn braille_cell(&self, px_x: i32, px_y: i32) -> Option<(char, Option<PackedRgba>)> {
        let mut bits: u8 = 0;
        let mut color = None;
        for (col, rows) in DOT_BITS.iter().enumerate() {
            for (row, bit) in rows.iter().enumerate() {
                let x = px_x + col as i32;
                let y = px_y + row as i32;
                let Some(idx) = self.index(x, y) else { continue };
                if self.pixels[idx] {
                    bits |= 1 << bit;
                    if color.is_none() {
                        color = self.colors[idx];
                    }
                }
            }
        }
        if bits == 0 {
            return None;
        }
        char::from_u32(0x2800 + u32::from(bits)).map(|ch| (ch, color))
    }

    /// Write dot cells into `area`; cells without dots are left untouched.
    pub fn render_to_buffer(&self, area: Rect, buf: &mut Buffer, style: Style) {
        let cell_cols = area.width.min(self.width.div_ceil(COLS_PER_CELL));
        let cell_rows = area.height.min(self.height.div_ceil(ROWS_PER_CELL));

        for cy in 0..cell_rows {
            for cx in 0..cell_cols {
                let px_x = i32::from(cx * COLS_PER_CELL);
                let px_y = i32::from(cy * ROWS_PER_CELL);
                let Some((ch, color)) = self.braille_cell(px_x, px_y) else {
                    continue;
                };
                let mut cell = Cell::from_char(ch);
                style.apply_to(&mut cell);
                if let Some(c) = color {
                    cell.fg = c;
                }
                buf.set(area.x + cx, area.y + cy, cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_points_are_ignored() {
        let mut p = Painter::new(4, 4);
        p.point(-1, 0);
        p.point(4, 0);
        p.point(0, 4);
        assert_eq!(p.lit(), 0);
    }

    #[test]
    fn diagonal_line_hits_both_ends() {
        let mut p = Painter::new(10, 10);
        p.line(0, 0, 9, 9);
        assert!(p.get(0, 0));
        assert!(p.get(9, 9));
        assert_eq!(p.lit(), 10);
    }

    #[test]
    fn first_colour_wins() {
        let red = PackedRgba::rgb(255, 0, 0);
        let blue = PackedRgba::rgb(0, 0, 255);
        let mut p = Painter::new(2, 4);
        p.point_colored(0, 0, red);
        p.point_colored(0, 0, blue);
        let mut buf = Buffer::new(1, 1);
        p.render_to_buffer(Rect::new(0, 0, 1, 1), &mut buf, Style::new());
        assert_eq!(buf.get(0, 0).unwrap().fg, red);
    }

    #[test]
    fn full_cell_is_all_dots() {
        let mut p = Painter::new(2, 4);
        for x in 0..2 {
            for y in 0..4 {
                p.point(x, y);
            }
        }
        let mut buf = Buffer::new(1, 1);
        p.render_to_buffer(Rect::new(0, 0, 1, 1), &mut buf, Style::new());
        assert_eq!(buf.get(0, 0).unwrap().content.as_char(), Some('⣿'));
    }

    #[test]
    fn empty_cells_do_not_overwrite() {
        let p = Painter::new(2, 4);
        let mut buf = Buffer::new(1, 1);
        buf.set(0, 0, Cell::from_char('x'));
        p.render_to_buffer(Rect::new(0, 0, 1, 1), &mut buf, Style::new());
        assert_eq!(buf.get(0, 0).unwrap().content.as_char(), Some('x'));
    }

    #[test]
    fn polygon_closes() {
        let mut p = Painter::new(10, 10);
        p.polygon(&[(0, 0), (5, 0), (5, 5)], None);
        assert!(p.get(2, 2), "closing edge from (5,5) back to (0,0)");
    }

    #[test]
    fn extreme_endpoints_are_clipped() {
        let mut p = Painter::new(10, 10);
        p.line(i32::MIN, 0, i32::MAX, 0);
        assert_eq!(p.lit(), 10);

        let mut p = Painter::new(10, 10);
        p.segment((5.0, -1e12), (5.0, 1e12), None);
        assert_eq!(p.lit(), 10);
        assert!(p.get(5, 0) && p.get(5, 9));
    }

    #[test]
    fn segments_off_canvas_draw_nothing() {
        let mut p = Painter::new(10, 10);
        p.segment((-5.0, -5.0), (-1.0, -20.0), None);
        p.segment((12.0, 3.0), (1e9, 3.0), None);
        p.segment((f64::NAN, 0.0), (3.0, 3.0), None);
        p.segment((0.0, f64::INFINITY), (3.0, 3.0), None);
        assert_eq!(p.lit(), 0);

        let mut empty = Painter::new(0, 0);
        empty.line(0, 0, 5, 5);
        assert_eq!(empty.lit(), 0);
    }
}

