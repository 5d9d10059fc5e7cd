#![forbid(unsafe_code)]

//! Shared UI chrome: tab strip, status bar, and help overlay.

use mhviz_core::geometry::Rect;
use mhviz_layout::{Constraint, Flex};
use mhviz_render::frame::Frame;
use mhviz_style::Style;
use mhviz_widgets::block::{Alignment, Block, BorderType};
use mhviz_widgets::paragraph::{Line, Paragraph, Span};
use mhviz_widgets::tabs::Tabs;
use mhviz_widgets::text::{display_width, fit_to_width};
use mhviz_widgets::{Widget, set_style_area};

use crate::theme::{self, THEME};

// ---------------------------------------------------------------------------
// Tab bar
// ---------------------------------------------------------------------------

/// Render the panel tabs with the active one highlighted.
pub fn render_tab_bar(labels: &[String], active: usize, frame: &mut Frame, area: Rect) {
    set_style_area(&mut frame.buffer, area, Style::new().bg(THEME.surface));
    Tabs::new(labels)
        .select(active)
        .style(THEME.muted_style())
        .highlight_style(Style::new().fg(THEME.accent).reversed().bold())
        .divider_style(Style::new().fg(THEME.border))
        .render(area, frame);
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

/// State needed to render the status bar.
pub struct StatusBarState<'a> {
    pub panel_title: &'a str,
    pub panel_index: usize,
    pub panel_count: usize,
    /// Panel-provided hint, may be empty.
    pub hint: &'a str,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

/// Render the status bar at the bottom of the screen.
///
/// Left: position and panel title. Middle: the panel's hint. Right:
/// terminal size and the help key.
pub fn render_status_bar(state: &StatusBarState<'_>, frame: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let bg = Style::new().bg(THEME.surface);
    set_style_area(&mut frame.buffer, area, bg);

    let left = format!(
        " [{}/{}] {} ",
        state.panel_index + 1,
        state.panel_count,
        state.panel_title
    );
    let right = format!(" {}x{}  ? aide  q quitter ", state.terminal_width, state.terminal_height);

    let columns = Flex::horizontal()
        .constraints([
            Constraint::Fixed(display_width(&left) as u16),
            Constraint::Fill,
            Constraint::Fixed(display_width(&right) as u16),
        ])
        .split(area);

    Paragraph::new(&left)
        .style(bg.patch(theme::heading_style()))
        .render(columns[0], frame);
    let hint = fit_to_width(state.hint, usize::from(columns[1].width), Alignment::Center);
    Paragraph::new(&hint)
        .style(bg.patch(THEME.muted_style()))
        .render(columns[1], frame);
    Paragraph::new(&right)
        .style(bg.patch(THEME.muted_style()))
        .render(columns[2], frame);
}

// ---------------------------------------------------------------------------
// Help overlay
// ---------------------------------------------------------------------------

/// Per-panel keybinding entry for the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    pub key: &'static str,
    pub action: &'static str,
}

const GLOBAL_BINDINGS: &[HelpEntry] = &[
    HelpEntry {
        key: "1-9",
        action: "Aller au panneau N",
    },
    HelpEntry {
        key: "Tab",
        action: "Panneau suivant",
    },
    HelpEntry {
        key: "Shift+Tab",
        action: "Panneau précédent",
    },
    HelpEntry {
        key: "?",
        action: "Afficher / masquer l'aide",
    },
    HelpEntry {
        key: "q / Ctrl+C",
        action: "Quitter",
    },
];

/// Render a centred help overlay with global and panel-specific bindings.
pub fn render_help_overlay(
    panel_title: &str,
    panel_bindings: &[HelpEntry],
    frame: &mut Frame,
    area: Rect,
) {
    // 60% width, 70% height, clamped.
    let overlay_width = ((area.width as u32 * 60) / 100).clamp(36, 72) as u16;
    let overlay_height = ((area.height as u32 * 70) / 100).clamp(14, 28) as u16;
    let overlay_width = overlay_width.min(area.width.saturating_sub(2));
    let overlay_height = overlay_height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear what is underneath.
    for row in overlay_area.y..overlay_area.bottom() {
        for col in overlay_area.x..overlay_area.right() {
            if let Some(cell) = frame.buffer.get_mut(col, row) {
                *cell = Default::default();
            }
        }
    }

    let block = Block::bordered()
        .border_type(BorderType::Heavy)
        .border_style(Style::new().fg(THEME.accent))
        .title(" Raccourcis clavier ")
        .title_alignment(Alignment::Center)
        .title_style(Style::new().fg(THEME.accent).bold())
        .style(Style::new().bg(THEME.surface));
    let inner = block.inner(overlay_area);
    block.render(overlay_area, frame);

    if inner.width < 10 || inner.height < 5 {
        return;
    }

    let key_width = GLOBAL_BINDINGS
        .iter()
        .chain(panel_bindings)
        .map(|e| display_width(e.key))
        .max()
        .unwrap_or(0)
        + 2;
    let entry = |e: &HelpEntry| {
        Line::from_spans([
            Span::styled(
                format!(" {:<width$}", e.key, width = key_width),
                Style::new().fg(THEME.accent).bold(),
            ),
            Span::styled(e.action, THEME.text_style()),
        ])
    };

    let mut lines = vec![Line::styled("Général", theme::heading_style())];
    lines.extend(GLOBAL_BINDINGS.iter().map(entry));
    if !panel_bindings.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(panel_title.to_string(), theme::heading_style()));
        lines.extend(panel_bindings.iter().map(entry));
    }

    let content_area = Rect::new(
        inner.x + 1,
        inner.y,
        inner.width.saturating_sub(2),
        inner.height.saturating_sub(1),
    );
    Paragraph::from_lines(lines)
        .style(Style::new().bg(THEME.surface))
        .render(content_area, frame);

    let footer_y = overlay_area.bottom().saturating_sub(1);
    if footer_y > inner.y {
        let footer = " ? ou Échap pour fermer ";
        let footer_w = display_width(footer) as u16;
        let footer_x = inner.x + (inner.width.saturating_sub(footer_w)) / 2;
        Paragraph::new(footer)
            .style(THEME.muted_style())
            .render(Rect::new(footer_x, footer_y, footer_w, 1), frame);
    }
}
