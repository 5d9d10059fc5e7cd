#![forbid(unsafe_code)]

//! Dataset entities.
//!
//! All entities are immutable once loaded. Identity is the string id; two
//! entities with the same id and fields are interchangeable, which is what
//! makes rendering deterministic across value-equal datasets.

use crate::error::{ModelError, Result};
use crate::value::Value;

/// One configured variant of an optimization algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmVariant {
    pub id: String,
    pub display_name: String,
    /// Parameter name to value, in declaration order.
    pub parameters: Vec<(String, Value)>,
    pub description: Option<String>,
}

impl AlgorithmVariant {
    /// A variant whose display name equals its id and has no parameters.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            parameters: Vec::new(),
            description: None,
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Append a parameter; declaration order is preserved.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

/// A benchmark problem instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInstance {
    pub id: String,
    /// Number of decision variables.
    pub size: u32,
    pub label: String,
}

impl ProblemInstance {
    pub fn new(id: impl Into<String>, size: u32) -> Self {
        let id = id.into();
        Self {
            label: format!("{id} ({size} variables)"),
            id,
            size,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// One sample of a convergence trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub iteration: u32,
    pub value: f64,
}

impl SeriesPoint {
    #[inline]
    pub const fn new(iteration: u32, value: f64) -> Self {
        Self { iteration, value }
    }
}

/// Objective value per iteration for one algorithm on one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceSeries {
    pub algorithm_id: String,
    pub instance_id: String,
    pub points: Vec<SeriesPoint>,
}

impl ConvergenceSeries {
    pub fn new(
        algorithm_id: impl Into<String>,
        instance_id: impl Into<String>,
        points: Vec<SeriesPoint>,
    ) -> Self {
        Self {
            algorithm_id: algorithm_id.into(),
            instance_id: instance_id.into(),
            points,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last iteration index, if any.
    pub fn last_iteration(&self) -> Option<u32> {
        self.points.last().map(|p| p.iteration)
    }

    /// A copy keeping every `stride`-th sample plus the last one.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidStride`] when `stride` is zero.
    pub fn resampled(&self, stride: usize) -> Result<Self> {
        Ok(Self {
            algorithm_id: self.algorithm_id.clone(),
            instance_id: self.instance_id.clone(),
            points: crate::resample::resample(&self.points, stride)?,
        })
    }
}

/// Best/mean/standard deviation of the final objective over repeated runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStat {
    pub algorithm_id: String,
    pub instance_id: String,
    pub best: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl SummaryStat {
    pub fn new(
        algorithm_id: impl Into<String>,
        instance_id: impl Into<String>,
        best: f64,
        mean: f64,
        std_dev: f64,
    ) -> Self {
        Self {
            algorithm_id: algorithm_id.into(),
            instance_id: instance_id.into(),
            best,
            mean,
            std_dev,
        }
    }
}

/// How a metric table is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricChartKind {
    #[default]
    Bar,
    Radar,
}

/// Scores for one named metric, keyed by algorithm id.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub metric: String,
    pub scores: Vec<(String, f64)>,
}

impl MetricRow {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            scores: Vec::new(),
        }
    }

    pub fn score(mut self, algorithm_id: impl Into<String>, value: f64) -> Self {
        self.scores.push((algorithm_id.into(), value));
        self
    }

    /// Score for an algorithm, if present.
    pub fn get(&self, algorithm_id: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(id, _)| id == algorithm_id)
            .map(|(_, v)| *v)
    }
}

/// Discrete metric scores (expected in `[0, 100]`) per algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable {
    pub title: String,
    pub kind: MetricChartKind,
    /// Series order for the chart.
    pub series: Vec<String>,
    /// One row per metric, in display order.
    pub rows: Vec<MetricRow>,
}

/// Visual tone of an informational note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteTone {
    #[default]
    Default,
    Info,
    Success,
    Warning,
}

/// A titled list of findings shown under a panel.
///
/// Items starting with `"- "` are sub-points of the preceding item.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoNote {
    pub title: String,
    pub tone: NoteTone,
    pub items: Vec<String>,
}

impl InfoNote {
    pub fn new(title: impl Into<String>, tone: NoteTone) -> Self {
        Self {
            title: title.into(),
            tone,
            items: Vec::new(),
        }
    }

    pub fn items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items.extend(items.into_iter().map(Into::into));
        self
    }
}

/// Everything the analysis panel shows for one algorithm family.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmFamily {
    pub id: String,
    /// Short name used on the tab strip.
    pub display_name: String,
    /// Panel heading.
    pub title: String,
    pub variants: Vec<AlgorithmVariant>,
    /// Series per (algorithm × instance). Algorithms outside `variants` are
    /// allowed, e.g. a hybrid plotted against its parents.
    pub series: Vec<ConvergenceSeries>,
    pub metrics: Option<MetricTable>,
    /// Draw best/mean of the matching summary statistic as flat lines.
    pub reference_lines: bool,
    pub notes: Vec<InfoNote>,
}

impl AlgorithmFamily {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            id,
            title: title.into(),
            variants: Vec::new(),
            series: Vec::new(),
            metrics: None,
            reference_lines: false,
            notes: Vec::new(),
        }
    }

    /// Instance ids that have at least one series, in first-seen order.
    pub fn instance_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for series in &self.series {
            if !ids.contains(&series.instance_id.as_str()) {
                ids.push(&series.instance_id);
            }
        }
        ids
    }

    /// Series for one instance, in insertion order.
    pub fn series_for(&self, instance_id: &str) -> Vec<&ConvergenceSeries> {
        self.series
            .iter()
            .filter(|s| s.instance_id == instance_id)
            .collect()
    }

    pub fn variant(&self, id: &str) -> Option<&AlgorithmVariant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

/// Explicit y-axis range for one instance's comparison chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YDomain {
    pub min: f64,
    pub max: f64,
}

impl YDomain {
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidDomain`] unless both bounds are finite
    /// and `min < max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let domain = Self { min, max };
        if domain.is_valid() {
            Ok(domain)
        } else {
            Err(ModelError::InvalidDomain { min, max })
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Cross-family data for one problem instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceComparison {
    pub instance: ProblemInstance,
    pub y_domain: YDomain,
    /// One row per family, in display order.
    pub summaries: Vec<SummaryStat>,
    /// One full-resolution series per family.
    pub series: Vec<ConvergenceSeries>,
}

impl InstanceComparison {
    /// Summary for an algorithm on this instance.
    pub fn summary(&self, algorithm_id: &str) -> Option<&SummaryStat> {
        self.summaries
            .iter()
            .find(|s| s.algorithm_id == algorithm_id)
    }
}

/// The full static dataset behind the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub title: String,
    pub families: Vec<AlgorithmFamily>,
    pub comparisons: Vec<InstanceComparison>,
    pub comparison_notes: Vec<InfoNote>,
}

impl Dataset {
    pub fn family(&self, id: &str) -> Option<&AlgorithmFamily> {
        self.families.iter().find(|f| f.id == id)
    }

    /// # Errors
    ///
    /// Returns [`ModelError::UnknownFamily`] when no family has this id.
    pub fn require_family(&self, id: &str) -> Result<&AlgorithmFamily> {
        self.family(id)
            .ok_or_else(|| ModelError::UnknownFamily(id.to_string()))
    }

    pub fn comparison(&self, instance_id: &str) -> Option<&InstanceComparison> {
        self.comparisons
            .iter()
            .find(|c| c.instance.id == instance_id)
    }

    /// Summary statistic for an algorithm on an instance, wherever it lives.
    pub fn summary(&self, algorithm_id: &str, instance_id: &str) -> Option<&SummaryStat> {
        self.comparison(instance_id)
            .and_then(|c| c.summary(algorithm_id))
    }

    /// Instance metadata by id.
    pub fn instance(&self, instance_id: &str) -> Option<&ProblemInstance> {
        self.comparison(instance_id).map(|c| &c.instance)
    }

    /// Human-readable name for any algorithm or family id.
    ///
    /// Variants are searched first, then families; unknown ids are returned
    /// unchanged.
    pub fn display_name<'a>(&'a self, algorithm_id: &'a str) -> &'a str {
        self.families
            .iter()
            .flat_map(|f| f.variants.iter())
            .find(|v| v.id == algorithm_id)
            .map(|v| v.display_name.as_str())
            .or_else(|| {
                self.family(algorithm_id)
                    .map(|f| f.display_name.as_str())
            })
            .unwrap_or(algorithm_id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty() && self.comparisons.is_empty()
    }
}

/// Source of the dashboard's dataset.
///
/// The dashboard never fetches or caches data itself; whatever produces the
/// measurements implements this trait and hands back resident data.
pub trait DatasetProvider {
    /// Produce the dataset.
    ///
    /// # Errors
    ///
    /// Implementations report their own failures as [`ModelError`].
    fn load(&self) -> Result<Dataset>;
}

impl DatasetProvider for Dataset {
    fn load(&self) -> Result<Dataset> {
        if self.is_empty() {
            return Err(ModelError::EmptyDataset);
        }
        Ok(self.clone())
    }
}
