#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames, diffs, and presentation.
//!
//! Widgets paint into a [`frame::Frame`]; the runtime diffs successive
//! buffers with [`diff::BufferDiff`] and hands the changes to the
//! [`presenter::Presenter`], which emits ANSI through crossterm.

pub mod buffer;
pub mod cell;
pub mod diff;
pub mod frame;
pub mod presenter;
