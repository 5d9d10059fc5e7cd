#![forbid(unsafe_code)]

//! Schema-driven table.
//!
//! A [`Table`] is a list of [`Column`]s (key, header, alignment) plus a list
//! of [`Record`]s mapping column keys to already-formatted text. Rows keep
//! input order and cells follow column order. A record that lacks a column
//! key renders a blank cell; nothing else in the row is affected.
//!
//! Column widths are the widest of header and cells. When the total does not
//! fit, the widest column gives up one cell at a time until it does, and
//! shrunk cells end with `…`.

use std::collections::BTreeMap;

use crate::block::{Alignment, Block};
use crate::text::{display_width, fit_to_width};
use crate::{Widget, draw_text_span, set_style_area};
use mhviz_core::geometry::Rect;
use mhviz_render::buffer::Buffer;
use mhviz_render::frame::Frame;
use mhviz_style::Style;

/// Narrowest a column is shrunk to.
const MIN_COLUMN_WIDTH: u16 = 3;

/// One column of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub header: String,
    pub alignment: Alignment,
}

impl Column {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            alignment: Alignment::Left,
        }
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Column key to formatted cell text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    cells: BTreeMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.cells.insert(key.into(), text.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A table of records under a column schema.
#[derive(Debug, Clone, Default)]
pub struct Table<'a> {
    columns: Vec<Column>,
    records: Vec<Record>,
    block: Option<Block<'a>>,
    header_style: Style,
    style: Style,
    highlight: Option<usize>,
    highlight_style: Style,
    column_spacing: u16,
}

impl<'a> Table<'a> {
    pub fn new(columns: impl IntoIterator<Item = Column>, records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            records: records.into_iter().collect(),
            header_style: Style::new().bold(),
            column_spacing: 2,
            ..Default::default()
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = style;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Emphasise one row.
    pub fn highlight(mut self, row: Option<usize>, style: Style) -> Self {
        self.highlight = row;
        self.highlight_style = style;
        self
    }

    pub fn column_spacing(mut self, spacing: u16) -> Self {
        self.column_spacing = spacing;
        self
    }

    /// Cell text in row-major order, blank where a record lacks a key.
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| {
                self.columns
                    .iter()
                    .map(|c| record.get(&c.key).unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    /// Rows needed: header, rule, one per record, plus borders.
    pub fn height(&self) -> u16 {
        let chrome = self.block.as_ref().map_or(0, |b| b.chrome_size().1);
        u16::try_from(self.records.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .saturating_add(chrome)
    }

    /// Column widths fitted into `available` columns.
    pub fn column_widths(&self, available: u16) -> Vec<u16> {
        let mut widths: Vec<u16> = self
            .columns
            .iter()
            .map(|c| {
                let cells = self
                    .records
                    .iter()
                    .map(|r| display_width(r.get(&c.key).unwrap_or_default()));
                cells.fold(display_width(&c.header), usize::max).min(u16::MAX as usize) as u16
            })
            .collect();

        let spacing = self
            .column_spacing
            .saturating_mul(widths.len().saturating_sub(1) as u16);
        let budget = available.saturating_sub(spacing);
        let mut total: u32 = widths.iter().map(|w| u32::from(*w)).sum();
        while total > u32::from(budget) {
            let Some((idx, widest)) = widths
                .iter()
                .copied()
                .enumerate()
                .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            else {
                break;
            };
            if widest <= MIN_COLUMN_WIDTH {
                break;
            }
            widths[idx] -= 1;
            total -= 1;
        }
        widths
    }
}

impl Table<'_> {
    fn draw_row(&self, buf: &mut Buffer, inner: Rect, y: u16, texts: &[&str], widths: &[u16], style: Style) {
        let mut x = inner.x;
        for ((column, text), width) in self.columns.iter().zip(texts).zip(widths) {
            if x >= inner.right() {
                break;
            }
            let cell = fit_to_width(text, *width as usize, column.alignment);
            draw_text_span(buf, x, y, &cell, style, inner.right());
            x = x.saturating_add(*width).saturating_add(self.column_spacing);
        }
    }
}

impl Widget for Table<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Table",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height,
            rows = self.records.len()
        )
        .entered();

        if area.is_empty() {
            return;
        }
        let inner = match &self.block {
            Some(block) => {
                block.render(area, frame);
                block.inner(area)
            }
            None => area,
        };
        if inner.is_empty() || self.columns.is_empty() {
            return;
        }
        let buf = &mut frame.buffer;
        set_style_area(buf, inner, self.style);

        let widths = self.column_widths(inner.width);
        let header_style = self.style.patch(self.header_style);
        self.draw_row(buf, inner, inner.y, &self.headers(), &widths, header_style);
        if inner.height < 2 {
            return;
        }

        let rule_width: u16 = widths.iter().sum::<u16>()
            + self.column_spacing * widths.len().saturating_sub(1) as u16;
        let rule = "─".repeat(rule_width.min(inner.width) as usize);
        draw_text_span(buf, inner.x, inner.y + 1, &rule, self.style, inner.right());

        for (i, row) in self.cells().iter().enumerate() {
            let Ok(offset) = u16::try_from(i + 2) else { break };
            if offset >= inner.height {
                break;
            }
            let y = inner.y + offset;
            let texts: Vec<&str> = row.iter().map(String::as_str).collect();
            let style = if self.highlight == Some(i) {
                self.style.patch(self.highlight_style)
            } else {
                self.style
            };
            if self.highlight == Some(i) {
                set_style_area(buf, Rect::new(inner.x, y, inner.width, 1), self.highlight_style);
            }
            self.draw_row(buf, inner, y, &texts, &widths, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bpso_columns() -> Vec<Column> {
        vec![
            Column::new("id", "Variante"),
            Column::new("w", "Inertie (w)"),
            Column::new("c1", "c1"),
            Column::new("c2", "c2"),
        ]
    }

    #[test]
    fn record_renders_cells_in_column_order() {
        let record = Record::new()
            .cell("c2", "4.0")
            .cell("id", "BPSO2")
            .cell("c1", "8.0")
            .cell("w", "Statique (0.8)");
        let table = Table::new(bpso_columns(), [record]);
        assert_eq!(table.cells(), [["BPSO2", "Statique (0.8)", "8.0", "4.0"]]);
    }

    #[test]
    fn missing_key_is_blank_cell() {
        let record: Record = [("id", "BPSO9"), ("c1", "1.0")].into_iter().collect();
        let table = Table::new(bpso_columns(), [record]);
        assert_eq!(table.cells(), [["BPSO9", "", "1.0", ""]]);
    }

    #[test]
    fn renders_header_rule_and_rows() {
        let table = Table::new(
            [Column::new("a", "Alg"), Column::new("b", "Best").alignment(Alignment::Right)],
            [Record::new().cell("a", "BPSO").cell("b", "1.00")],
        );
        let mut frame = Frame::new(14, 3);
        table.render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "Alg   Best    ");
        assert_eq!(frame.buffer.row_text(1), "──────────    ");
        assert_eq!(frame.buffer.row_text(2), "BPSO  1.00    ");
    }

    #[test]
    fn widths_shrink_widest_first() {
        let table = Table::new(
            [Column::new("a", "aaaaaaaaaa"), Column::new("b", "bbbb")],
            Vec::<Record>::new(),
        )
        .column_spacing(1);
        assert_eq!(table.column_widths(100), [10, 4]);
        assert_eq!(table.column_widths(11), [6, 4]);
        assert_eq!(table.column_widths(2), [3, 3]);
    }

    #[test]
    fn rows_keep_input_order() {
        let records = ["BPSO", "BGSA", "Hybrid", "BWOA"]
            .iter()
            .map(|id| Record::new().cell("a", *id));
        let table = Table::new([Column::new("a", "Alg")], records);
        let first: Vec<String> = table.cells().into_iter().map(|r| r[0].clone()).collect();
        assert_eq!(first, ["BPSO", "BGSA", "Hybrid", "BWOA"]);
        assert_eq!(table.height(), 6);
    }

    #[test]
    fn rows_beyond_area_are_clipped() {
        let records = (0..10).map(|i| Record::new().cell("a", i.to_string()));
        let table = Table::new([Column::new("a", "N")], records);
        let mut frame = Frame::new(5, 4);
        table.render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(3).trim_end(), "1");
    }
}
