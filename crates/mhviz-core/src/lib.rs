#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and terminal lifecycle.

pub mod event;
pub mod geometry;
pub mod terminal_session;
