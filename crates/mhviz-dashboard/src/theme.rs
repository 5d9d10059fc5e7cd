#![forbid(unsafe_code)]

//! Shared styles and chart colours for the dashboard.
//!
//! Every panel draws from the same [`Theme`]. Chart colours come in three
//! flavours:
//!
//! | Chart | Colour rule |
//! |-------|-------------|
//! | Convergence (analysis) | palette, cycled by series index |
//! | Convergence (comparison) | fixed colour per algorithm |
//! | Performance profile (radar) | fixed colour per algorithm |

use mhviz_model::NoteTone;
use mhviz_style::{PackedRgba, Style, Theme};
use mhviz_widgets::chart::{ChartStyle, LegendPosition, ValueFormat};

/// The dashboard theme.
pub const THEME: Theme = Theme::DARK;

/// Decimal places for every chart value shown to the user.
pub const VALUE_DECIMALS: u8 = 2;

/// Horizontal axis title on convergence charts.
pub const X_AXIS_TITLE: &str = "Itérations";

/// Vertical axis title on convergence charts.
pub const Y_AXIS_TITLE: &str = "Valeur Objective";

const COMPARISON_COLORS: &[(&str, PackedRgba)] = &[
    ("BPSO", PackedRgba::rgb(0x25, 0x63, 0xeb)),
    ("BGSA", PackedRgba::rgb(0x16, 0xa3, 0x4a)),
    ("Hybrid", PackedRgba::rgb(0xea, 0xb3, 0x08)),
    ("BWOA", PackedRgba::rgb(0xdc, 0x26, 0x26)),
];

const PROFILE_COLORS: &[(&str, PackedRgba)] = &[
    ("BPSO", PackedRgba::rgb(0x82, 0xca, 0x9d)),
    ("BGSA", PackedRgba::rgb(0x88, 0x84, 0xd8)),
    ("Hybrid", PackedRgba::rgb(0xff, 0x73, 0x00)),
];

/// Base style for all charts: theme axes and labels, 2-decimal tooltips.
pub fn chart_style() -> ChartStyle {
    ChartStyle::default()
        .value_format(ValueFormat::Fixed(VALUE_DECIMALS))
        .axis_style(Style::new().fg(THEME.border))
        .label_style(THEME.muted_style())
        .grid_style(Style::new().fg(THEME.surface))
}

/// Convergence charts: base style plus axis titles.
pub fn convergence_style() -> ChartStyle {
    chart_style().x_title(X_AXIS_TITLE).y_title(Y_AXIS_TITLE)
}

/// Convergence chart on the comparison panel, one fixed colour per algorithm.
pub fn comparison_style() -> ChartStyle {
    keyed(convergence_style(), COMPARISON_COLORS)
}

/// Metric charts. Radar profiles use fixed colours per algorithm.
pub fn metric_style(radar: bool) -> ChartStyle {
    let style = chart_style().legend(LegendPosition::Bottom);
    if radar {
        keyed(style.grid(false), PROFILE_COLORS)
    } else {
        style
    }
}

fn keyed(style: ChartStyle, colors: &[(&str, PackedRgba)]) -> ChartStyle {
    colors
        .iter()
        .fold(style, |style, (key, color)| style.key_color(*key, *color))
}

/// Accent colour for an info card.
pub fn tone_color(tone: NoteTone) -> PackedRgba {
    match tone {
        NoteTone::Default => THEME.text_muted,
        NoteTone::Info => THEME.info,
        NoteTone::Success => THEME.success,
        NoteTone::Warning => THEME.warning,
    }
}

/// Section headings inside a panel.
pub fn heading_style() -> Style {
    Style::new().fg(THEME.text).bold()
}

/// Table header row.
pub fn header_style() -> Style {
    Style::new().fg(THEME.accent).bold()
}
