#![forbid(unsafe_code)]

//! Measurement data consumed by the dashboard.
//!
//! Everything here is static, read-only data supplied by a
//! [`DatasetProvider`]: algorithm variants and their parameters,
//! convergence series, and summary statistics per problem instance.
//! The crate also owns the pure transformations the panels apply before
//! rendering:
//!
//! - [`value`]: verbatim and fixed-precision formatting with an `N/A` placeholder
//! - [`resample`]: stride resampling that keeps first and last points
//! - [`validate`]: consistency checks run before a panel renders

pub mod curve;
pub mod dataset;
pub mod error;
pub mod resample;
pub mod sample;
pub mod validate;
pub mod value;

pub use dataset::{
    AlgorithmFamily, AlgorithmVariant, ConvergenceSeries, Dataset, DatasetProvider, InfoNote,
    InstanceComparison, MetricChartKind, MetricRow, MetricTable, NoteTone, ProblemInstance,
    SeriesPoint, SummaryStat, YDomain,
};
pub use error::{ModelError, Result};
pub use resample::{resample, resampled_len};
pub use sample::SampleDataset;
pub use validate::{IssueKind, Severity, ValidationIssue, ValidationReport};
pub use value::{NOT_AVAILABLE, Value, format_fixed};
