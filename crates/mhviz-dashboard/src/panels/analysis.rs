#![forbid(unsafe_code)]

//! Per-family analysis panel.
//!
//! One generic panel serves every algorithm family. From top to bottom it
//! shows the parameter table, a convergence chart for the selected problem
//! instance next to the family's metric chart, a tooltip line, and the
//! family's info cards.
//!
//! Everything derived from the dataset (table rows, chart data, reference
//! lines) is built once at mount time. Rendering only reads it, so two
//! panels mounted from value-equal datasets draw identical frames.

use std::sync::Arc;

use mhviz_core::event::{Event, KeyCode};
use mhviz_core::geometry::Rect;
use mhviz_layout::{Constraint, Flex};
use mhviz_model::{AlgorithmFamily, Dataset, MetricChartKind, MetricTable, Result, ValidationReport};
use mhviz_render::frame::Frame;
use mhviz_style::Style;
use mhviz_widgets::Widget;
use mhviz_widgets::bar_chart::BarChart;
use mhviz_widgets::block::{Block, BorderType};
use mhviz_widgets::chart::{ChartData, ChartStyle, PointRecord, SeriesDescriptor};
use mhviz_widgets::line_chart::{LineChart, ReferenceLine};
use mhviz_widgets::paragraph::Paragraph;
use mhviz_widgets::radar::RadarChart;
use mhviz_widgets::table::{Column, Record, Table};
use mhviz_widgets::tabs::Tabs;
use tracing::{debug, warn};

use super::{NotePager, Panel};
use crate::chrome::HelpEntry;
use crate::theme::{self, THEME};

/// Upper bound of every metric score.
pub const METRIC_MAX: f64 = 100.0;

/// Below this width the metric chart moves under the convergence chart.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 90;

const VARIANT_KEY: &str = "variant";
const DESCRIPTION_KEY: &str = "description";

/// Columns and rows of a family's parameter table.
///
/// The first column names the variant. Parameter columns follow in the
/// order their names first appear across variants; values render verbatim.
/// A description column is added only when some variant has one.
pub fn parameter_table(family: &AlgorithmFamily) -> (Vec<Column>, Vec<Record>) {
    let mut names: Vec<&str> = Vec::new();
    for variant in &family.variants {
        for (name, _) in &variant.parameters {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
    }
    let has_description = family.variants.iter().any(|v| v.description.is_some());

    let mut columns = vec![Column::new(VARIANT_KEY, "Variante")];
    columns.extend(names.iter().map(|name| Column::new(param_key(name), *name)));
    if has_description {
        columns.push(Column::new(DESCRIPTION_KEY, "Description"));
    }

    let records = family
        .variants
        .iter()
        .map(|variant| {
            let mut record = Record::new().cell(VARIANT_KEY, variant.display_name.as_str());
            for name in &names {
                let text = variant.parameter(name).map(|v| v.render()).unwrap_or_default();
                record = record.cell(param_key(name), text);
            }
            if let Some(description) = &variant.description {
                record = record.cell(DESCRIPTION_KEY, description.as_str());
            }
            record
        })
        .collect();
    (columns, records)
}

fn param_key(name: &str) -> String {
    format!("param:{name}")
}

/// Convergence data of one family on one instance.
///
/// Series keep their input order and are labelled with display names.
pub fn convergence_data(dataset: &Dataset, family: &AlgorithmFamily, instance_id: &str) -> ChartData {
    let series = family.series_for(instance_id);
    let descriptors = series
        .iter()
        .map(|s| SeriesDescriptor::new(&s.algorithm_id, dataset.display_name(&s.algorithm_id)))
        .collect();
    let columns: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|p| (f64::from(p.iteration), p.value))
                .collect()
        })
        .collect();
    ChartData::from_columns(descriptors, &columns)
}

/// Metric categories and chart data; record `i` holds category `i`.
pub fn metric_data(dataset: &Dataset, metrics: &MetricTable) -> (Vec<String>, ChartData) {
    let categories = metrics.rows.iter().map(|row| row.metric.clone()).collect();
    let series = metrics
        .series
        .iter()
        .map(|id| SeriesDescriptor::new(id, dataset.display_name(id)))
        .collect();
    let records = metrics
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.scores
                .iter()
                .fold(PointRecord::new(i as f64), |record, (id, score)| {
                    record.value(id, *score)
                })
        })
        .collect();
    (categories, ChartData::new(series, records))
}

#[derive(Debug, Clone, PartialEq)]
struct InstanceChart {
    instance_id: String,
    label: String,
    data: ChartData,
    references: Vec<ReferenceLine>,
}

#[derive(Debug, Clone, PartialEq)]
struct MetricChart {
    title: String,
    kind: MetricChartKind,
    categories: Vec<String>,
    data: ChartData,
    style: ChartStyle,
}

/// Analysis of one algorithm family.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPanel {
    dataset: Arc<Dataset>,
    family_index: usize,
    report: ValidationReport,
    columns: Vec<Column>,
    records: Vec<Record>,
    charts: Vec<InstanceChart>,
    metric: Option<MetricChart>,
    chart_style: ChartStyle,
    instance: usize,
    cursor: Option<f64>,
    notes: NotePager,
}

impl AnalysisPanel {
    /// Mount the panel for `family_id`.
    ///
    /// # Errors
    ///
    /// [`ModelError::UnknownFamily`](mhviz_model::ModelError::UnknownFamily)
    /// if the dataset has no such family.
    pub fn new(dataset: Arc<Dataset>, family_id: &str) -> Result<Self> {
        let family = dataset.require_family(family_id)?;
        let family_index = dataset
            .families
            .iter()
            .position(|f| f.id == family.id)
            .unwrap_or_default();

        let report = family.validate();
        for issue in &report.issues {
            warn!(family = %family.id, %issue, "validation issue");
        }

        let (columns, records) = parameter_table(family);
        let charts = family
            .instance_ids()
            .into_iter()
            .map(|instance_id| InstanceChart {
                instance_id: instance_id.to_string(),
                label: dataset
                    .instance(instance_id)
                    .map_or_else(|| instance_id.to_string(), |i| i.label.clone()),
                data: convergence_data(&dataset, family, instance_id),
                references: reference_lines(&dataset, family, instance_id),
            })
            .collect::<Vec<_>>();
        let metric = family.metrics.as_ref().map(|metrics| {
            let (categories, data) = metric_data(&dataset, metrics);
            MetricChart {
                title: metrics.title.clone(),
                kind: metrics.kind,
                categories,
                data,
                style: theme::metric_style(metrics.kind == MetricChartKind::Radar),
            }
        });
        debug!(family = %family.id, instances = charts.len(), "analysis panel mounted");

        Ok(Self {
            family_index,
            report,
            columns,
            records,
            charts,
            metric,
            chart_style: theme::convergence_style(),
            instance: 0,
            cursor: None,
            notes: NotePager::default(),
            dataset,
        })
    }

    pub fn family(&self) -> &AlgorithmFamily {
        &self.dataset.families[self.family_index]
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// The parameter table as rendered, without its frame.
    pub fn table(&self) -> Table<'static> {
        Table::new(self.columns.clone(), self.records.clone())
    }

    /// Id of the instance whose convergence chart is shown.
    pub fn selected_instance(&self) -> Option<&str> {
        self.charts.get(self.instance).map(|c| c.instance_id.as_str())
    }

    /// Chart data for the shown instance.
    pub fn chart_data(&self) -> Option<&ChartData> {
        self.charts.get(self.instance).map(|c| &c.data)
    }

    pub fn cursor(&self) -> Option<f64> {
        self.cursor
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let empty = ChartData::default();
        let chart = self.charts.get(self.instance);
        let title = chart.map_or_else(
            || " Convergence ".to_string(),
            |c| format!(" Convergence sur {} ", c.label),
        );
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(THEME.border_style())
            .title(&title)
            .title_style(theme::heading_style());
        let inner = block.inner(area);
        block.render(area, frame);

        let data = chart.map_or(&empty, |c| &c.data);
        let mut line_chart = LineChart::new(data, &self.chart_style).cursor(self.cursor);
        for reference in chart.map(|c| c.references.as_slice()).unwrap_or_default() {
            line_chart = line_chart.reference_line(reference.clone());
        }
        line_chart.render(inner, frame);
    }

    fn render_metric(&self, metric: &MetricChart, frame: &mut Frame, area: Rect) {
        let title = format!(" {} ", metric.title);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(THEME.border_style())
            .title(&title)
            .title_style(theme::heading_style());
        let inner = block.inner(area);
        block.render(area, frame);
        match metric.kind {
            MetricChartKind::Bar => BarChart::new(&metric.categories, &metric.data, &metric.style)
                .max(METRIC_MAX)
                .render(inner, frame),
            MetricChartKind::Radar => {
                RadarChart::new(&metric.categories, &metric.data, &metric.style)
                    .max(METRIC_MAX)
                    .render(inner, frame)
            }
        }
    }

    fn render_tooltip(&self, frame: &mut Frame, area: Rect) {
        let tooltip = self
            .cursor
            .zip(self.chart_data())
            .and_then(|(x, data)| data.tooltip_at(x, &self.chart_style));
        match tooltip {
            Some(tooltip) => Paragraph::from_lines([super::tooltip_line(&tooltip)]).render(area, frame),
            None => Paragraph::new("←/→ inspecter les valeurs   [/] changer d'instance")
                .style(THEME.muted_style())
                .render(area, frame),
        }
    }
}

fn reference_lines(dataset: &Dataset, family: &AlgorithmFamily, instance_id: &str) -> Vec<ReferenceLine> {
    if !family.reference_lines {
        return Vec::new();
    }
    let Some(stat) = dataset.summary(&family.id, instance_id) else {
        return Vec::new();
    };
    [
        ("Meilleure", stat.best, THEME.success),
        ("Moyenne", stat.mean, THEME.warning),
    ]
    .into_iter()
    .filter(|(_, y, _)| y.is_finite())
    .map(|(label, y, color)| ReferenceLine::new(label, y, color))
    .collect()
}

impl Panel for AnalysisPanel {
    fn title(&self) -> &str {
        &self.family().title
    }

    fn update(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        match key.code {
            KeyCode::Char(']') => super::cycle(&mut self.instance, self.charts.len(), true),
            KeyCode::Char('[') => super::cycle(&mut self.instance, self.charts.len(), false),
            KeyCode::Char('n') => {
                let count = self.family().notes.len();
                self.notes.advance(count)
            }
            code @ (KeyCode::Left | KeyCode::Right | KeyCode::Home) => {
                let range = self.chart_data().and_then(ChartData::x_range);
                super::move_cursor(&mut self.cursor, code, range)
            }
            _ => false,
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        if self.report.has_errors() {
            super::render_report(&self.report, frame, area);
            return;
        }

        let table = self
            .table()
            .header_style(theme::header_style())
            .style(THEME.text_style())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(THEME.border_style())
                    .title(" Paramètres des Variantes ")
                    .title_style(theme::heading_style()),
            );
        let notes = self.notes.visible(&self.family().notes, area.width);
        let warning_rows = u16::from(!self.report.is_clean());
        let rows = Flex::vertical()
            .constraints([
                Constraint::Fixed(table.height()),
                Constraint::Fixed(1),
                Constraint::Min(8),
                Constraint::Fixed(1),
                Constraint::Fixed(warning_rows),
                Constraint::Fixed(super::notes_height(&notes, area.width)),
            ])
            .split(area);

        table.render(rows[0], frame);

        let titles: Vec<String> = self.charts.iter().map(|c| c.label.clone()).collect();
        Tabs::new(&titles)
            .select(self.instance)
            .style(THEME.muted_style())
            .highlight_style(Style::new().fg(THEME.accent).reversed().bold())
            .render(rows[1], frame);

        match &self.metric {
            Some(metric) => {
                let side_by_side = rows[2].width >= SIDE_BY_SIDE_MIN_WIDTH;
                let flex = if side_by_side {
                    Flex::horizontal().constraints([Constraint::Fill, Constraint::Percentage(40.0)])
                } else {
                    Flex::vertical().constraints([Constraint::Fill, Constraint::Fill])
                };
                let body = flex.gap(1).split(rows[2]);
                self.render_chart(frame, body[0]);
                self.render_metric(metric, frame, body[1]);
            }
            None => self.render_chart(frame, rows[2]),
        }

        self.render_tooltip(frame, rows[3]);
        super::render_warnings(&self.report, frame, rows[4]);
        super::render_notes(&notes, frame, rows[5]);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![
            HelpEntry {
                key: "[ / ]",
                action: "Instance précédente / suivante",
            },
            HelpEntry {
                key: "← / →",
                action: "Déplacer le curseur",
            },
            HelpEntry {
                key: "Home",
                action: "Masquer le curseur",
            },
            HelpEntry {
                key: "n",
                action: "Note suivante",
            },
        ]
    }

    fn status(&self) -> String {
        let variants = self.family().variants.len();
        match self.charts.get(self.instance) {
            Some(chart) => format!("{} · {variants} variante(s)", chart.label),
            None => format!("{variants} variante(s)"),
        }
    }
}
