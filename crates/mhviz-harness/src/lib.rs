#![forbid(unsafe_code)]

//! Buffer comparison helpers for rendering tests.
//!
//! Renders a [`Buffer`] as plain text and compares two buffers cell by cell,
//! printing a line diff when their text differs.
//!
//! ```ignore
//! use mhviz_harness::{assert_buffers_identical, buffer_to_text};
//!
//! #[test]
//! fn reopened_panel_matches_fresh_panel() {
//!     let fresh = render_fresh();
//!     let reopened = render_after_round_trip();
//!     assert_buffers_identical(&fresh, &reopened);
//!     assert!(buffer_to_text(&fresh).contains("Comparaison"));
//! }
//! ```

use std::fmt::Write as FmtWrite;

use mhviz_render::buffer::Buffer;

// ============================================================================
// Buffer → Text Conversion
// ============================================================================

/// One line per row; empty cells become spaces and continuation cells are
/// skipped so wide characters keep their display width.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let mut out = String::with_capacity((buf.width() as usize + 1) * buf.height() as usize);
    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        out.push_str(&buf.row_text(y));
    }
    out
}

// ============================================================================
// Diff
// ============================================================================

/// Line diff: ` ` common, `-` expected only, `+` actual only.
///
/// Empty when the inputs are identical.
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..expected_lines.len().max(actual_lines.len()) {
        match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(e), Some(a)) if e == a => {
                let _ = writeln!(out, " {e}");
            }
            (e, a) => {
                if let Some(e) = e {
                    let _ = writeln!(out, "-{e}");
                }
                if let Some(a) = a {
                    let _ = writeln!(out, "+{a}");
                }
                has_diff = true;
            }
        }
    }

    if has_diff { out } else { String::new() }
}

// ============================================================================
// Assertions
// ============================================================================

/// Assert that two buffers hold the same cells, content and style.
///
/// # Panics
///
/// With a text diff when the content differs, or the first differing cell
/// when only styling does.
pub fn assert_buffers_identical(expected: &Buffer, actual: &Buffer) {
    assert_eq!(
        (expected.width(), expected.height()),
        (actual.width(), actual.height()),
        "buffer sizes differ"
    );
    let diff = diff_text(&buffer_to_text(expected), &buffer_to_text(actual));
    assert!(diff.is_empty(), "buffer text differs (- expected, + actual):\n{diff}");
    let mismatch = expected
        .cells()
        .iter()
        .zip(actual.cells())
        .position(|(a, b)| a != b);
    if let Some(index) = mismatch {
        let width = expected.width() as usize;
        panic!(
            "buffer styles differ at ({}, {}): {:?} vs {:?}",
            index % width,
            index / width,
            expected.cells()[index],
            actual.cells()[index]
        );
    }
}
