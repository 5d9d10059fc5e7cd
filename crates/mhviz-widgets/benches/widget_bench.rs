//! Benchmarks for widget rendering.
//!
//! Run with: cargo bench -p mhviz-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mhviz_core::geometry::Rect;
use mhviz_render::frame::Frame;
use mhviz_widgets::Widget;
use mhviz_widgets::bar_chart::BarChart;
use mhviz_widgets::chart::{ChartData, ChartStyle, PointRecord, SeriesDescriptor};
use mhviz_widgets::line_chart::LineChart;
use mhviz_widgets::radar::RadarChart;
use mhviz_widgets::table::{Column, Record, Table};
use std::hint::black_box;

fn convergence_data(series: usize, points: usize) -> ChartData {
    let descriptors = (0..series)
        .map(|s| SeriesDescriptor::new(format!("s{s}"), format!("Series {s}")))
        .collect();
    let columns: Vec<Vec<(f64, f64)>> = (0..series)
        .map(|s| {
            let target = 100.0 - s as f64 * 5.0;
            (0..points)
                .map(|i| {
                    let x = i as f64;
                    (x, target * (1.0 - (-x / 150.0).exp()))
                })
                .collect()
        })
        .collect();
    ChartData::from_columns(descriptors, &columns)
}

// ============================================================================
// Line chart
// ============================================================================

fn bench_line_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget/line_chart");
    let style = ChartStyle::default();

    for points in [51usize, 1001] {
        let data = convergence_data(4, points);
        for (w, h) in [(80u16, 24u16), (200, 60)] {
            let area = Rect::from_size(w, h);
            let mut frame = Frame::new(w, h);
            group.bench_with_input(
                BenchmarkId::new(format!("{points}pts"), format!("{w}x{h}")),
                &(),
                |b, _| {
                    b.iter(|| {
                        frame.buffer.clear();
                        LineChart::new(&data, &style).render(area, &mut frame);
                        black_box(&frame.buffer);
                    })
                },
            );
        }
    }

    group.finish();
}

// ============================================================================
// Metric charts
// ============================================================================

fn bench_metric_charts(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget/metric_chart");
    let style = ChartStyle::default();
    let categories: Vec<String> = ["Exploration", "Exploitation", "Convergence", "Stabilité", "Qualité"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let series = vec![
        SeriesDescriptor::new("a", "A"),
        SeriesDescriptor::new("b", "B"),
        SeriesDescriptor::new("c", "C"),
    ];
    let records = (0..categories.len())
        .map(|i| {
            let base = 60.0 + i as f64 * 7.0;
            PointRecord::new(i as f64)
                .value("a", base)
                .value("b", base - 10.0)
                .value("c", base - 20.0)
        })
        .collect();
    let data = ChartData::new(series, records);
    let area = Rect::from_size(80, 24);
    let mut frame = Frame::new(80, 24);

    group.bench_function("bar", |b| {
        b.iter(|| {
            frame.buffer.clear();
            BarChart::new(&categories, &data, &style).render(area, &mut frame);
            black_box(&frame.buffer);
        })
    });
    group.bench_function("radar", |b| {
        b.iter(|| {
            frame.buffer.clear();
            RadarChart::new(&categories, &data, &style).render(area, &mut frame);
            black_box(&frame.buffer);
        })
    });

    group.finish();
}

// ============================================================================
// Table
// ============================================================================

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("widget/table");
    let columns = vec![
        Column::new("alg", "Algorithme"),
        Column::new("best", "Meilleure"),
        Column::new("mean", "Moyenne"),
        Column::new("std", "Écart-type"),
    ];

    for rows in [4usize, 100] {
        let records: Vec<Record> = (0..rows)
            .map(|i| {
                Record::new()
                    .cell("alg", format!("ALG{i}"))
                    .cell("best", format!("{:.2}", 141278.0 - i as f64))
                    .cell("mean", format!("{:.2}", 141270.0 - i as f64))
                    .cell("std", format!("{:.2}", 3.59 + i as f64))
            })
            .collect();
        let table = Table::new(columns.clone(), records);
        let area = Rect::from_size(80, 24);
        let mut frame = Frame::new(80, 24);
        group.bench_with_input(BenchmarkId::new("render", rows), &(), |b, _| {
            b.iter(|| {
                frame.buffer.clear();
                table.render(area, &mut frame);
                black_box(&frame.buffer);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_line_chart, bench_metric_charts, bench_table);
criterion_main!(benches);
