#![forbid(unsafe_code)]

//! Consistency checks run before a panel renders.
//!
//! Validation never fails a render outright. It produces a
//! [`ValidationReport`]; the panel shows the report instead of the affected
//! content when any issue has [`Severity::Error`], and shows warnings
//! alongside normal content otherwise.

use std::fmt;

use crate::dataset::{AlgorithmFamily, ConvergenceSeries, InstanceComparison, MetricTable, SummaryStat};

/// How serious an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Renderable, but worth pointing out.
    Warning,
    /// The affected content must not be rendered.
    Error,
}

/// What is wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueKind {
    /// Maximisation results must have `best >= mean`.
    BestBelowMean { best: f64, mean: f64 },
    NegativeStdDev(f64),
    /// A summary field is NaN or infinite.
    NonFiniteStat { field: &'static str },
    /// Iteration indices must strictly increase; `index` is the first offender.
    NonIncreasingIterations { index: usize },
    /// A series sample is NaN or infinite and will be skipped when plotting.
    NonFiniteSample { index: usize },
    /// Series on the same instance have different lengths.
    LengthMismatch { expected: usize, found: usize },
    InvalidDomain { min: f64, max: f64 },
    /// A plotted algorithm has no summary row.
    MissingSummary,
    /// A metric score lies outside `[0, 100]`.
    ScoreOutOfRange { metric: String, value: f64 },
}

impl IssueKind {
    /// Default severity of this kind of issue.
    pub fn severity(&self) -> Severity {
        match self {
            Self::BestBelowMean { .. }
            | Self::NegativeStdDev(_)
            | Self::NonFiniteStat { .. }
            | Self::NonIncreasingIterations { .. }
            | Self::InvalidDomain { .. } => Severity::Error,
            Self::NonFiniteSample { .. }
            | Self::LengthMismatch { .. }
            | Self::MissingSummary
            | Self::ScoreOutOfRange { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestBelowMean { best, mean } => {
                write!(f, "best ({best}) is below mean ({mean})")
            }
            Self::NegativeStdDev(value) => write!(f, "negative standard deviation ({value})"),
            Self::NonFiniteStat { field } => write!(f, "{field} is not a finite number"),
            Self::NonIncreasingIterations { index } => {
                write!(f, "iterations stop increasing at point {index}")
            }
            Self::NonFiniteSample { index } => write!(f, "sample {index} is not a finite number"),
            Self::LengthMismatch { expected, found } => {
                write!(f, "series has {found} points, expected {expected}")
            }
            Self::InvalidDomain { min, max } => write!(f, "invalid y-domain [{min}, {max}]"),
            Self::MissingSummary => write!(f, "no summary statistics"),
            Self::ScoreOutOfRange { metric, value } => {
                write!(f, "{metric} score {value} outside [0, 100]")
            }
        }
    }
}

/// One finding, located by algorithm and/or instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub algorithm_id: Option<String>,
    pub instance_id: Option<String>,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            algorithm_id: None,
            instance_id: None,
        }
    }

    pub fn algorithm(mut self, id: impl Into<String>) -> Self {
        self.algorithm_id = Some(id.into());
        self
    }

    pub fn instance(mut self, id: impl Into<String>) -> Self {
        self.instance_id = Some(id.into());
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.instance_id, &self.algorithm_id) {
            (Some(inst), Some(alg)) => write!(f, "{inst}/{alg}: {}", self.kind),
            (Some(id), None) | (None, Some(id)) => write!(f, "{id}: {}", self.kind),
            (None, None) => write!(f, "{}", self.kind),
        }
    }
}

/// All issues found in one pass, in discovery order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// Whether any error concerns this algorithm on this instance.
    pub fn blocks(&self, algorithm_id: &str, instance_id: &str) -> bool {
        self.errors().any(|i| {
            i.algorithm_id.as_deref() == Some(algorithm_id)
                && i.instance_id.as_deref().is_none_or(|id| id == instance_id)
        })
    }
}

/// Check one summary row.
pub fn check_summary(stat: &SummaryStat) -> ValidationReport {
    let mut report = ValidationReport::new();
    let locate = |kind| {
        ValidationIssue::new(kind)
            .algorithm(&stat.algorithm_id)
            .instance(&stat.instance_id)
    };

    let fields = [("best", stat.best), ("mean", stat.mean), ("stdDev", stat.std_dev)];
    let mut finite = true;
    for (field, value) in fields {
        if !value.is_finite() {
            finite = false;
            report.push(locate(IssueKind::NonFiniteStat { field }));
        }
    }
    if !finite {
        return report;
    }
    if stat.best < stat.mean {
        report.push(locate(IssueKind::BestBelowMean {
            best: stat.best,
            mean: stat.mean,
        }));
    }
    if stat.std_dev < 0.0 {
        report.push(locate(IssueKind::NegativeStdDev(stat.std_dev)));
    }
    report
}

/// Check iteration ordering and sample finiteness of one series.
pub fn check_series(series: &ConvergenceSeries) -> ValidationReport {
    let mut report = ValidationReport::new();
    let locate = |kind| {
        ValidationIssue::new(kind)
            .algorithm(&series.algorithm_id)
            .instance(&series.instance_id)
    };

    if let Some(index) = series
        .points
        .windows(2)
        .position(|w| w[1].iteration <= w[0].iteration)
    {
        report.push(locate(IssueKind::NonIncreasingIterations { index: index + 1 }));
    }
    // One warning per series is enough to flag a bad trajectory.
    if let Some(index) = series.points.iter().position(|p| !p.value.is_finite()) {
        report.push(locate(IssueKind::NonFiniteSample { index }));
    }
    report
}

fn check_metrics(metrics: &MetricTable) -> ValidationReport {
    let mut report = ValidationReport::new();
    for row in &metrics.rows {
        for (algorithm_id, value) in &row.scores {
            if !(0.0..=100.0).contains(value) {
                report.push(
                    ValidationIssue::new(IssueKind::ScoreOutOfRange {
                        metric: row.metric.clone(),
                        value: *value,
                    })
                    .algorithm(algorithm_id),
                );
            }
        }
    }
    report
}

impl AlgorithmFamily {
    /// Validate every series and the metric table of this family.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for series in &self.series {
            report.extend(check_series(series));
        }
        if let Some(metrics) = &self.metrics {
            report.extend(check_metrics(metrics));
        }
        report
    }
}

impl InstanceComparison {
    /// Validate the domain, every summary row, and every series.
    ///
    /// Series shorter than the longest one only produce a warning; the chart
    /// renders the points that exist.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        let instance_id = &self.instance.id;

        if !self.y_domain.is_valid() {
            report.push(
                ValidationIssue::new(IssueKind::InvalidDomain {
                    min: self.y_domain.min,
                    max: self.y_domain.max,
                })
                .instance(instance_id),
            );
        }
        for stat in &self.summaries {
            report.extend(check_summary(stat));
        }

        let expected = self.series.iter().map(ConvergenceSeries::len).max().unwrap_or(0);
        for series in &self.series {
            report.extend(check_series(series));
            if series.len() != expected {
                report.push(
                    ValidationIssue::new(IssueKind::LengthMismatch {
                        expected,
                        found: series.len(),
                    })
                    .algorithm(&series.algorithm_id)
                    .instance(instance_id),
                );
            }
            if self.summary(&series.algorithm_id).is_none() {
                report.push(
                    ValidationIssue::new(IssueKind::MissingSummary)
                        .algorithm(&series.algorithm_id)
                        .instance(instance_id),
                );
            }
        }
        report
    }
}

impl crate::dataset::Dataset {
    /// Validate every family and every comparison.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        for family in &self.families {
            report.extend(family.validate());
        }
        for comparison in &self.comparisons {
            report.extend(comparison.validate());
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{ProblemInstance, SeriesPoint, YDomain};

    fn stat(best: f64, mean: f64, std_dev: f64) -> SummaryStat {
        SummaryStat::new("BPSO", "MKP1", best, mean, std_dev)
    }

    #[test]
    fn consistent_summary_is_clean() {
        assert!(check_summary(&stat(141278.0, 141277.33, 3.59)).is_clean());
        assert!(check_summary(&stat(141278.0, 141278.0, 0.0)).is_clean());
    }

    #[test]
    fn best_below_mean_is_an_error() {
        let report = check_summary(&stat(10.0, 11.0, 1.0));
        assert!(report.has_errors());
        assert_eq!(
            report.issues[0].kind,
            IssueKind::BestBelowMean { best: 10.0, mean: 11.0 }
        );
        assert_eq!(
            report.issues[0].to_string(),
            "MKP1/BPSO: best (10) is below mean (11)"
        );
        assert!(report.blocks("BPSO", "MKP1"));
        assert!(!report.blocks("BGSA", "MKP1"));
    }

    #[test]
    fn negative_std_dev_is_an_error() {
        let report = check_summary(&stat(10.0, 9.0, -0.5));
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::NegativeStdDev(-0.5));
    }

    #[test]
    fn non_finite_fields_skip_ordering_checks() {
        let report = check_summary(&stat(f64::NAN, 9.0, f64::INFINITY));
        let kinds: Vec<_> = report.issues.iter().map(|i| i.kind.clone()).collect();
        assert_eq!(
            kinds,
            [
                IssueKind::NonFiniteStat { field: "best" },
                IssueKind::NonFiniteStat { field: "stdDev" },
            ]
        );
    }

    #[test]
    fn repeated_iteration_is_reported() {
        let series = ConvergenceSeries::new(
            "A",
            "I",
            vec![
                SeriesPoint::new(0, 1.0),
                SeriesPoint::new(1, 2.0),
                SeriesPoint::new(1, 3.0),
            ],
        );
        let report = check_series(&series);
        assert_eq!(
            report.issues[0].kind,
            IssueKind::NonIncreasingIterations { index: 2 }
        );
    }

    #[test]
    fn nan_sample_is_only_a_warning() {
        let series = ConvergenceSeries::new(
            "A",
            "I",
            vec![SeriesPoint::new(0, 1.0), SeriesPoint::new(1, f64::NAN)],
        );
        let report = check_series(&series);
        assert!(!report.has_errors());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn comparison_flags_short_series_and_missing_summary() {
        let comparison = InstanceComparison {
            instance: ProblemInstance::new("MKP1", 28),
            y_domain: YDomain { min: 0.0, max: 10.0 },
            summaries: vec![SummaryStat::new("A", "MKP1", 5.0, 4.0, 1.0)],
            series: vec![
                ConvergenceSeries::new("A", "MKP1", vec![SeriesPoint::new(0, 1.0), SeriesPoint::new(1, 2.0)]),
                ConvergenceSeries::new("B", "MKP1", vec![SeriesPoint::new(0, 1.0)]),
            ],
        };
        let report = comparison.validate();
        assert!(!report.has_errors());
        let kinds: Vec<_> = report.issues.iter().map(|i| i.kind.clone()).collect();
        assert_eq!(
            kinds,
            [
                IssueKind::LengthMismatch { expected: 2, found: 1 },
                IssueKind::MissingSummary,
            ]
        );
    }

    #[test]
    fn inverted_domain_is_an_error() {
        let comparison = InstanceComparison {
            instance: ProblemInstance::new("MKP1", 28),
            y_domain: YDomain { min: 10.0, max: 0.0 },
            summaries: vec![],
            series: vec![],
        };
        assert!(comparison.validate().has_errors());
    }
}
