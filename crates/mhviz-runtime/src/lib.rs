#![forbid(unsafe_code)]

//! Runtime for the mhviz dashboard.
//!
//! - [`Model`] - application state, `update` and `view`
//! - [`Cmd`] - side effects returned from `init` and `update`
//! - [`Program`] - drives a model against a real terminal
//! - [`ProgramSimulator`] - drives a model headlessly for tests
//!
//! The runtime consumes canonical events from `mhviz-core`, calls
//! `Model::view` into a fresh [`Frame`](mhviz_render::frame::Frame), and
//! hands the diff against the previous frame to the presenter.

pub mod program;
pub mod simulator;

pub use program::{Cmd, Model, Program, ProgramConfig};
pub use simulator::{CmdRecord, ProgramSimulator};
