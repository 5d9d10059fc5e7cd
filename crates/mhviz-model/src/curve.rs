#![forbid(unsafe_code)]

//! Closed-form convergence curves.
//!
//! The built-in dataset publishes only the start value, the final value,
//! and a time constant for each trajectory. [`ExponentialApproach`]
//! regenerates the per-iteration series from those three numbers.

use crate::dataset::{ConvergenceSeries, SeriesPoint};

/// `value(i) = min(target, start + (target - start) * (1 - exp(-i / tau)))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialApproach {
    pub start: f64,
    pub target: f64,
    pub tau: f64,
}

impl ExponentialApproach {
    #[inline]
    pub const fn new(start: f64, target: f64, tau: f64) -> Self {
        Self { start, target, tau }
    }

    /// Curve starting from zero.
    #[inline]
    pub const fn from_zero(target: f64, tau: f64) -> Self {
        Self::new(0.0, target, tau)
    }

    /// Objective value at an iteration.
    pub fn value_at(&self, iteration: u32) -> f64 {
        if self.tau <= 0.0 {
            return self.target;
        }
        let progress = 1.0 - (-f64::from(iteration) / self.tau).exp();
        (self.start + (self.target - self.start) * progress).min(self.target)
    }

    /// Samples for iterations `0..horizon`.
    pub fn points(&self, horizon: u32) -> Vec<SeriesPoint> {
        (0..horizon)
            .map(|i| SeriesPoint::new(i, self.value_at(i)))
            .collect()
    }

    /// A complete series for one algorithm on one instance.
    pub fn series(
        &self,
        algorithm_id: impl Into<String>,
        instance_id: impl Into<String>,
        horizon: u32,
    ) -> ConvergenceSeries {
        ConvergenceSeries::new(algorithm_id, instance_id, self.points(horizon))
    }
}
