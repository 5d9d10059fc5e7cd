#![forbid(unsafe_code)]

//! Terminal dashboard for metaheuristic optimisation results.
//!
//! One analysis panel per algorithm family (parameter table, convergence
//! chart per problem instance, metric chart) plus a cross-algorithm
//! comparison panel (summary statistics and resampled convergence). The
//! [`router::ViewRouter`] mounts exactly one panel at a time; switching
//! away discards its state.

pub mod app;
pub mod chrome;
pub mod cli;
pub mod logging;
pub mod panels;
pub mod router;
pub mod theme;
