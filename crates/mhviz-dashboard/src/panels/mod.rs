#![forbid(unsafe_code)]

//! Panels shown in the dashboard's content area.
//!
//! Each panel implements the [`Panel`] trait. A panel owns its transient
//! view state (selected instance, chart cursor, note page); the
//! [`ViewRouter`](crate::router::ViewRouter) drops that state whenever the
//! user switches away.

pub mod analysis;
pub mod comparison;

use mhviz_core::event::{Event, KeyCode};
use mhviz_core::geometry::Rect;
use mhviz_layout::{Constraint, Flex};
use mhviz_model::{InfoNote, ValidationReport};
use mhviz_render::frame::Frame;
use mhviz_style::Style;
use mhviz_widgets::Widget;
use mhviz_widgets::block::{Block, BorderType};
use mhviz_widgets::chart::Tooltip;
use mhviz_widgets::info_card::InfoCard;
use mhviz_widgets::paragraph::{Line, Paragraph, Span};

use crate::chrome::HelpEntry;
use crate::theme::{self, THEME};

pub use analysis::AnalysisPanel;
pub use comparison::ComparisonPanel;

/// A page of the dashboard.
pub trait Panel {
    /// Heading shown on the content block.
    fn title(&self) -> &str;

    /// Handle a panel-specific event. Returns whether the view changed.
    fn update(&mut self, event: &Event) -> bool;

    /// Render the panel into the given area.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Keybindings specific to this panel for the help overlay.
    fn keybindings(&self) -> Vec<HelpEntry> {
        vec![]
    }

    /// One-line hint for the status bar.
    fn status(&self) -> String {
        String::new()
    }
}

/// Narrowest info card before cards wrap onto fewer columns.
const MIN_CARD_WIDTH: u16 = 36;

/// Tallest the note strip may grow.
const MAX_NOTE_HEIGHT: u16 = 12;

/// Paging over a list of info notes shown side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct NotePager {
    pub(crate) first: usize,
}

impl NotePager {
    /// Advance to the next note, wrapping around.
    pub(crate) fn advance(&mut self, count: usize) -> bool {
        if count < 2 {
            return false;
        }
        self.first = (self.first + 1) % count;
        true
    }

    /// Notes that fit in `width`, starting at the current page.
    pub(crate) fn visible<'a>(&self, notes: &'a [InfoNote], width: u16) -> Vec<&'a InfoNote> {
        if notes.is_empty() {
            return Vec::new();
        }
        let per_row = usize::from((width / MIN_CARD_WIDTH).max(1)).min(notes.len());
        (0..per_row)
            .map(|i| &notes[(self.first + i) % notes.len()])
            .collect()
    }
}

/// Height the note strip needs for the visible cards at `width`.
pub(crate) fn notes_height(notes: &[&InfoNote], width: u16) -> u16 {
    if notes.is_empty() {
        return 0;
    }
    let count = notes.len() as u16;
    let card_width = width.saturating_sub(count - 1) / count;
    notes
        .iter()
        .map(|note| InfoCard::new(&note.title, &note.items).height(card_width))
        .max()
        .unwrap_or(0)
        .min(MAX_NOTE_HEIGHT)
}

/// Render info cards side by side with equal widths.
pub(crate) fn render_notes(notes: &[&InfoNote], frame: &mut Frame, area: Rect) {
    if notes.is_empty() || area.is_empty() {
        return;
    }
    let columns = Flex::horizontal()
        .constraints(notes.iter().map(|_| Constraint::Fill))
        .gap(1)
        .split(area);
    for (note, column) in notes.iter().zip(columns) {
        InfoCard::new(&note.title, &note.items)
            .accent(theme::tone_color(note.tone))
            .text_style(THEME.text_style())
            .render(column, frame);
    }
}

/// Render a validation report in place of content that cannot be drawn.
pub(crate) fn render_report(report: &ValidationReport, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .border_type(BorderType::Heavy)
        .border_style(THEME.error_style())
        .title(" Données invalides ")
        .title_style(THEME.error_style().bold());
    let lines = report
        .errors()
        .map(|issue| {
            Line::from_spans([
                Span::styled("✗ ", THEME.error_style()),
                Span::styled(issue.to_string(), THEME.text_style()),
            ])
        })
        .chain(report.warnings().map(|issue| {
            Line::from_spans([
                Span::styled("! ", Style::new().fg(THEME.warning)),
                Span::styled(issue.to_string(), THEME.muted_style()),
            ])
        }));
    Paragraph::from_lines(lines)
        .block(block)
        .wrap(true)
        .render(area, frame);
}

/// One line listing warnings that did not block rendering.
pub(crate) fn render_warnings(report: &ValidationReport, frame: &mut Frame, area: Rect) {
    let Some(first) = report.warnings().next() else {
        return;
    };
    let count = report.warnings().count();
    let text = if count > 1 {
        format!("! {first} (+{} autres)", count - 1)
    } else {
        format!("! {first}")
    };
    Paragraph::new(&text)
        .style(Style::new().fg(THEME.warning))
        .render(area, frame);
}

/// `Itération 250 │ BPSO1: 141240.33  BPSO2: 141277.33`
pub(crate) fn tooltip_line(tooltip: &Tooltip) -> Line {
    let mut spans = vec![
        Span::styled(format!("Itération {}", tooltip.x), theme::heading_style()),
        Span::styled(" │ ", Style::new().fg(THEME.border)),
    ];
    for (i, entry) in tooltip.entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("{}: ", entry.name),
            Style::new().fg(entry.color),
        ));
        spans.push(Span::styled(entry.text.clone(), THEME.text_style()));
    }
    Line::from_spans(spans)
}

/// Cursor step for the left/right keys over an iteration span.
pub(crate) fn cursor_step(span: f64) -> f64 {
    (span / 50.0).round().max(1.0)
}

/// Move an optional chart cursor in response to a key.
///
/// The first press places the cursor at the near end of the range; `Home`
/// clears it. Returns whether the cursor changed.
pub(crate) fn move_cursor(cursor: &mut Option<f64>, code: KeyCode, range: Option<(f64, f64)>) -> bool {
    let Some((lo, hi)) = range else {
        return false;
    };
    let step = cursor_step(hi - lo);
    let next = match (code, *cursor) {
        (KeyCode::Right, None) => Some(lo),
        (KeyCode::Left, None) => Some(hi),
        (KeyCode::Right, Some(x)) => Some((x + step).min(hi)),
        (KeyCode::Left, Some(x)) => Some((x - step).max(lo)),
        (KeyCode::Home, _) => None,
        _ => return false,
    };
    let changed = next != *cursor;
    *cursor = next;
    changed
}

/// Cycle a selection index forward or backward.
pub(crate) fn cycle(index: &mut usize, len: usize, forward: bool) -> bool {
    if len < 2 {
        return false;
    }
    *index = if forward {
        (*index + 1) % len
    } else {
        (*index + len - 1) % len
    };
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhviz_model::NoteTone;

    fn notes(n: usize) -> Vec<InfoNote> {
        (0..n)
            .map(|i| InfoNote::new(format!("Note {i}"), NoteTone::Info).items(["un point"]))
            .collect()
    }

    #[test]
    fn pager_wraps() {
        let notes = notes(3);
        let mut pager = NotePager::default();
        assert!(pager.advance(notes.len()));
        assert!(pager.advance(notes.len()));
        assert!(pager.advance(notes.len()));
        assert_eq!(pager.first, 0);
    }

    #[test]
    fn pager_single_note_is_static() {
        let mut pager = NotePager::default();
        assert!(!pager.advance(1));
        assert_eq!(pager.first, 0);
    }

    #[test]
    fn visible_notes_fit_width() {
        let notes = notes(4);
        let pager = NotePager { first: 3 };
        let shown = pager.visible(&notes, 80);
        let titles: Vec<&str> = shown.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Note 3", "Note 0"]);
        assert_eq!(pager.visible(&notes, 10).len(), 1);
    }

    #[test]
    fn cursor_starts_at_near_end_and_clamps() {
        let mut cursor = None;
        assert!(move_cursor(&mut cursor, KeyCode::Right, Some((0.0, 999.0))));
        assert_eq!(cursor, Some(0.0));
        assert!(move_cursor(&mut cursor, KeyCode::Right, Some((0.0, 999.0))));
        assert_eq!(cursor, Some(20.0));
        assert!(move_cursor(&mut cursor, KeyCode::Left, Some((0.0, 999.0))));
        assert!(!move_cursor(&mut cursor, KeyCode::Left, Some((0.0, 999.0))));
        assert_eq!(cursor, Some(0.0));
        assert!(move_cursor(&mut cursor, KeyCode::Home, Some((0.0, 999.0))));
        assert_eq!(cursor, None);
    }

    #[test]
    fn cursor_ignores_empty_range() {
        let mut cursor = None;
        assert!(!move_cursor(&mut cursor, KeyCode::Right, None));
        assert_eq!(cursor, None);
    }

    #[test]
    fn cycle_wraps_both_ways() {
        let mut index = 0;
        assert!(cycle(&mut index, 3, false));
        assert_eq!(index, 2);
        assert!(cycle(&mut index, 3, true));
        assert_eq!(index, 0);
        assert!(!cycle(&mut index, 1, true));
    }
}
