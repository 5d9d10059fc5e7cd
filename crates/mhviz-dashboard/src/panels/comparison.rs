#![forbid(unsafe_code)]

//! Cross-family comparison panel.
//!
//! One problem instance is shown at a time: headline tiles, the summary
//! table `[algorithm, best, mean, stdDev]`, and a convergence chart of every
//! family on that instance. Summary values use two decimals. The chart uses
//! the instance's explicit y-domain and plots stride-resampled series.

use std::num::NonZeroUsize;
use std::sync::Arc;

use mhviz_core::event::{Event, KeyCode};
use mhviz_core::geometry::Rect;
use mhviz_layout::{Constraint, Flex};
use mhviz_model::{
    Dataset, InstanceComparison, ProblemInstance, SummaryStat, ValidationReport, format_fixed,
};
use mhviz_render::frame::Frame;
use mhviz_style::Style;
use mhviz_widgets::Widget;
use mhviz_widgets::block::{Alignment, Block, BorderType};
use mhviz_widgets::chart::{ChartData, ChartStyle, SeriesDescriptor};
use mhviz_widgets::line_chart::LineChart;
use mhviz_widgets::paragraph::Paragraph;
use mhviz_widgets::stats_grid::{StatTile, StatsGrid};
use mhviz_widgets::table::{Column, Record, Table};
use mhviz_widgets::tabs::Tabs;
use tracing::{debug, warn};

use super::{NotePager, Panel};
use crate::chrome::HelpEntry;
use crate::theme::{self, THEME};

/// Keep every 20th sample unless told otherwise.
pub const DEFAULT_STRIDE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(stride) => stride,
    None => NonZeroUsize::MIN,
};

/// Decimal places in the summary table and tiles.
const SUMMARY_DECIMALS: usize = 2;

/// Summary table schema.
pub fn summary_columns() -> Vec<Column> {
    vec![
        Column::new("algorithm", "Algorithme"),
        Column::new("best", "Meilleure Solution").alignment(Alignment::Right),
        Column::new("mean", "Moyenne").alignment(Alignment::Right),
        Column::new("std_dev", "Écart-type").alignment(Alignment::Right),
    ]
}

/// One row per summary, in input order.
pub fn summary_records(comparison: &InstanceComparison) -> Vec<Record> {
    comparison
        .summaries
        .iter()
        .map(|stat| {
            Record::new()
                .cell("algorithm", stat.algorithm_id.as_str())
                .cell("best", format_fixed(stat.best, SUMMARY_DECIMALS))
                .cell("mean", format_fixed(stat.mean, SUMMARY_DECIMALS))
                .cell("std_dev", format_fixed(stat.std_dev, SUMMARY_DECIMALS))
        })
        .collect()
}

/// Convergence data of every family on one instance, resampled by `stride`.
///
/// Series of different lengths are kept as they are; each contributes the
/// points it has.
pub fn comparison_data(comparison: &InstanceComparison, stride: NonZeroUsize) -> ChartData {
    let descriptors = comparison
        .series
        .iter()
        .map(|s| SeriesDescriptor::new(&s.algorithm_id, &s.algorithm_id))
        .collect();
    let columns: Vec<Vec<(f64, f64)>> = comparison
        .series
        .iter()
        .map(|s| {
            s.resampled(stride.get())
                .map(|r| {
                    r.points
                        .iter()
                        .map(|p| (f64::from(p.iteration), p.value))
                        .collect()
                })
                .unwrap_or_default()
        })
        .collect();
    ChartData::from_columns(descriptors, &columns)
}

/// Highest `best`; the first one wins a tie.
pub fn best_performer(stats: &[SummaryStat]) -> Option<&SummaryStat> {
    stats
        .iter()
        .filter(|s| s.best.is_finite())
        .fold(None, |acc: Option<&SummaryStat>, s| match acc {
            Some(leader) if leader.best >= s.best => Some(leader),
            _ => Some(s),
        })
}

/// Lowest non-negative `std_dev`; the first one wins a tie.
pub fn most_stable(stats: &[SummaryStat]) -> Option<&SummaryStat> {
    stats
        .iter()
        .filter(|s| s.std_dev.is_finite() && s.std_dev >= 0.0)
        .fold(None, |acc: Option<&SummaryStat>, s| match acc {
            Some(leader) if leader.std_dev <= s.std_dev => Some(leader),
            _ => Some(s),
        })
}

fn headline_tiles(comparison: &InstanceComparison) -> Vec<StatTile> {
    let instance = &comparison.instance;
    let mut tiles = vec![
        StatTile::new("Instance", instance.id.as_str())
            .caption(format!("{} variables", instance.size))
            .accent(THEME.accent),
    ];
    if let Some(stat) = best_performer(&comparison.summaries) {
        tiles.push(
            StatTile::new("Meilleure Solution", stat.algorithm_id.as_str())
                .caption(format_fixed(stat.best, SUMMARY_DECIMALS))
                .accent(THEME.success),
        );
    }
    if let Some(stat) = most_stable(&comparison.summaries) {
        tiles.push(
            StatTile::new("Plus Stable", stat.algorithm_id.as_str())
                .caption(format!("σ = {}", format_fixed(stat.std_dev, SUMMARY_DECIMALS)))
                .accent(THEME.info),
        );
    }
    tiles
}

#[derive(Debug, Clone, PartialEq)]
struct InstanceView {
    instance: ProblemInstance,
    report: ValidationReport,
    records: Vec<Record>,
    best_row: Option<usize>,
    tiles: Vec<StatTile>,
    data: ChartData,
    x_bounds: Option<(f64, f64)>,
    y_bounds: (f64, f64),
}

impl InstanceView {
    fn new(comparison: &InstanceComparison, stride: NonZeroUsize) -> Self {
        let report = comparison.validate();
        for issue in &report.issues {
            warn!(instance = %comparison.instance.id, %issue, "validation issue");
        }
        let data = comparison_data(comparison, stride);
        let best_row = best_performer(&comparison.summaries).and_then(|best| {
            comparison
                .summaries
                .iter()
                .position(|s| s.algorithm_id == best.algorithm_id)
        });
        Self {
            instance: comparison.instance.clone(),
            records: summary_records(comparison),
            best_row,
            tiles: headline_tiles(comparison),
            x_bounds: data.x_range(),
            y_bounds: (comparison.y_domain.min, comparison.y_domain.max),
            data,
            report,
        }
    }

    fn table(&self) -> Table<'static> {
        Table::new(summary_columns(), self.records.clone())
    }
}

/// Comparison of all families, one instance at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPanel {
    dataset: Arc<Dataset>,
    stride: NonZeroUsize,
    views: Vec<InstanceView>,
    chart_style: ChartStyle,
    instance: usize,
    cursor: Option<f64>,
    notes: NotePager,
}

impl ComparisonPanel {
    pub fn new(dataset: Arc<Dataset>, stride: NonZeroUsize) -> Self {
        let views: Vec<InstanceView> = dataset
            .comparisons
            .iter()
            .map(|comparison| InstanceView::new(comparison, stride))
            .collect();
        debug!(instances = views.len(), stride = stride.get(), "comparison panel mounted");
        Self {
            dataset,
            stride,
            views,
            chart_style: theme::comparison_style(),
            instance: 0,
            cursor: None,
            notes: NotePager::default(),
        }
    }

    pub fn stride(&self) -> NonZeroUsize {
        self.stride
    }

    /// Id of the instance on screen.
    pub fn selected_instance(&self) -> Option<&str> {
        self.views.get(self.instance).map(|v| v.instance.id.as_str())
    }

    /// Select an instance by id. Unknown ids change nothing.
    pub fn select_instance(&mut self, instance_id: &str) -> bool {
        match self.views.iter().position(|v| v.instance.id == instance_id) {
            Some(index) => {
                self.instance = index;
                true
            }
            None => false,
        }
    }

    /// Summary table of the instance on screen.
    pub fn table(&self) -> Option<Table<'static>> {
        self.views.get(self.instance).map(InstanceView::table)
    }

    /// Resampled chart data of the instance on screen.
    pub fn chart_data(&self) -> Option<&ChartData> {
        self.views.get(self.instance).map(|v| &v.data)
    }

    /// Validation result of the instance on screen.
    pub fn report(&self) -> Option<&ValidationReport> {
        self.views.get(self.instance).map(|v| &v.report)
    }

    pub fn cursor(&self) -> Option<f64> {
        self.cursor
    }

    fn render_chart(&self, view: &InstanceView, frame: &mut Frame, area: Rect) {
        let title = format!(" Convergence comparée sur {} ", view.instance.label);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(THEME.border_style())
            .title(&title)
            .title_style(theme::heading_style());
        let inner = block.inner(area);
        block.render(area, frame);

        let mut chart = LineChart::new(&view.data, &self.chart_style)
            .y_bounds(view.y_bounds.0, view.y_bounds.1)
            .cursor(self.cursor);
        if let Some((lo, hi)) = view.x_bounds {
            chart = chart.x_bounds(lo, hi);
        }
        chart.render(inner, frame);
    }

    fn render_tooltip(&self, view: &InstanceView, frame: &mut Frame, area: Rect) {
        let tooltip = self
            .cursor
            .and_then(|x| view.data.tooltip_at(x, &self.chart_style));
        match tooltip {
            Some(tooltip) => Paragraph::from_lines([super::tooltip_line(&tooltip)]).render(area, frame),
            None => Paragraph::new("←/→ inspecter les valeurs   [/] changer d'instance")
                .style(THEME.muted_style())
                .render(area, frame),
        }
    }
}

impl Panel for ComparisonPanel {
    fn title(&self) -> &str {
        &self.dataset.title
    }

    fn update(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        match key.code {
            KeyCode::Char(']') => super::cycle(&mut self.instance, self.views.len(), true),
            KeyCode::Char('[') => super::cycle(&mut self.instance, self.views.len(), false),
            KeyCode::Char('n') => {
                let count = self.dataset.comparison_notes.len();
                self.notes.advance(count)
            }
            code @ (KeyCode::Left | KeyCode::Right | KeyCode::Home) => {
                let range = self.views.get(self.instance).and_then(|v| v.x_bounds);
                super::move_cursor(&mut self.cursor, code, range)
            }
            _ => false,
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let Some(view) = self.views.get(self.instance) else {
            Paragraph::new("Aucune comparaison disponible")
                .style(THEME.muted_style())
                .alignment(Alignment::Center)
                .render(area, frame);
            return;
        };

        let titles: Vec<String> = self.views.iter().map(|v| v.instance.label.clone()).collect();
        let notes = self.notes.visible(&self.dataset.comparison_notes, area.width);
        let notes_height = super::notes_height(&notes, area.width);

        if view.report.has_errors() {
            let rows = Flex::vertical()
                .constraints([
                    Constraint::Fixed(1),
                    Constraint::Fill,
                    Constraint::Fixed(notes_height),
                ])
                .split(area);
            Tabs::new(&titles)
                .select(self.instance)
                .style(THEME.muted_style())
                .highlight_style(Style::new().fg(THEME.accent).reversed().bold())
                .render(rows[0], frame);
            super::render_report(&view.report, frame, rows[1]);
            super::render_notes(&notes, frame, rows[2]);
            return;
        }

        let table = view
            .table()
            .header_style(theme::header_style())
            .style(THEME.text_style())
            .highlight(view.best_row, Style::new().fg(THEME.success).bold())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(THEME.border_style())
                    .title(" Statistiques par Algorithme ")
                    .title_style(theme::heading_style()),
            );
        let warning_rows = u16::from(!view.report.is_clean());
        let rows = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Fixed(StatsGrid::HEIGHT),
                Constraint::Fixed(table.height()),
                Constraint::Min(8),
                Constraint::Fixed(1),
                Constraint::Fixed(warning_rows),
                Constraint::Fixed(notes_height),
            ])
            .split(area);

        Tabs::new(&titles)
            .select(self.instance)
            .style(THEME.muted_style())
            .highlight_style(Style::new().fg(THEME.accent).reversed().bold())
            .render(rows[0], frame);
        StatsGrid::new(&view.tiles)
            .border_style(THEME.border_style())
            .label_style(THEME.muted_style())
            .render(rows[1], frame);
        table.render(rows[2], frame);
        self.render_chart(view, frame, rows[3]);
        self.render_tooltip(view, frame, rows[4]);
        super::render_warnings(&view.report, frame, rows[5]);
        super::render_notes(&notes, frame, rows[6]);
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
        match self.views.get(self.instance) {
            Some(view) => format!(
                "{} · {} point(s) tracés · pas {}",
                view.instance.label,
                view.data.records.len(),
                self.stride
            ),
            None => String::new(),
        }
    }
}
