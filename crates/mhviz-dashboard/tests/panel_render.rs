#![forbid(unsafe_code)]

//! Per-panel render tests through the full application chrome.
//!
//! Each registered panel is rendered at a standard size and checked for the
//! text it must show; rendering twice from the same input must give the same
//! cells.
//!
//! Naming convention: `panel_scenario_WIDTHxHEIGHT`

use std::num::NonZeroUsize;
use std::sync::Arc;

use mhviz_dashboard::app::{AppMsg, DashboardApp};
use mhviz_dashboard::panels::Panel;
use mhviz_dashboard::router::PanelId;
use mhviz_harness::{assert_buffers_identical, buffer_to_text};
use mhviz_model::{Dataset, SampleDataset};
use mhviz_render::buffer::Buffer;
use mhviz_runtime::ProgramSimulator;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn dataset() -> Arc<Dataset> {
    Arc::new(SampleDataset::new().build())
}

fn render_panel(id: PanelId, stride: usize, width: u16, height: u16) -> (Buffer, String) {
    let stride = NonZeroUsize::new(stride).expect("non-zero stride");
    let mut sim = ProgramSimulator::new(DashboardApp::new(dataset(), stride));
    sim.init();
    sim.send(AppMsg::SelectPanel(id.clone()));
    assert_eq!(sim.model().router().active(), &id, "panel {id} is registered");
    let title = sim.model().router().mounted().title().to_string();
    (sim.capture_frame(width, height).clone(), title)
}

fn family_ids() -> Vec<String> {
    dataset().families.iter().map(|f| f.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Analysis panels
// ---------------------------------------------------------------------------

#[test]
fn analysis_panels_120x40() {
    for family in family_ids() {
        let (buf, title) = render_panel(PanelId::Analysis(family.clone()), 20, 120, 40);
        let text = buffer_to_text(&buf);
        assert!(text.contains(&title), "{family}: title missing\n{text}");
        assert!(text.contains("Paramètres des Variantes"), "{family}\n{text}");
        assert!(text.contains("Variante"), "{family}\n{text}");
    }
}

#[test]
fn analysis_bpso_shows_verbatim_parameters_120x40() {
    let (buf, _) = render_panel(PanelId::Analysis("BPSO".into()), 20, 120, 40);
    let text = buffer_to_text(&buf);
    let row = text
        .lines()
        .find(|line| line.contains("BPSO2"))
        .unwrap_or_else(|| panic!("BPSO2 row missing\n{text}"));
    for cell in ["Statique (0.8)", "8.0", "4.0"] {
        assert!(row.contains(cell), "{cell} missing from {row:?}");
    }
    assert!(text.contains("Convergence sur MKP1"), "{text}");
}

#[test]
fn analysis_panels_are_deterministic_80x24() {
    for family in family_ids() {
        let (a, _) = render_panel(PanelId::Analysis(family.clone()), 20, 80, 24);
        let (b, _) = render_panel(PanelId::Analysis(family), 20, 80, 24);
        assert_buffers_identical(&a, &b);
    }
}

// ---------------------------------------------------------------------------
// Comparison panel
// ---------------------------------------------------------------------------

#[test]
fn comparison_default_stride_120x40() {
    let (buf, title) = render_panel(PanelId::Comparison, 20, 120, 40);
    let text = buffer_to_text(&buf);
    assert!(text.contains(&title), "{text}");
    assert!(text.contains("Statistiques par Algorithme"), "{text}");
    for cell in ["141278.00", "141277.33", "3.59"] {
        assert!(text.contains(cell), "{cell} missing\n{text}");
    }
    assert!(text.contains("51 point(s) tracés · pas 20"), "{text}");
}

#[test]
fn comparison_stride_5_120x40() {
    let (buf, _) = render_panel(PanelId::Comparison, 5, 120, 40);
    let text = buffer_to_text(&buf);
    assert!(text.contains("201 point(s) tracés · pas 5"), "{text}");
    // The table is stride independent.
    assert!(text.contains("141277.33"), "{text}");

    let (default, _) = render_panel(PanelId::Comparison, 20, 120, 40);
    assert_ne!(buffer_to_text(&default), text);
}

#[test]
fn comparison_is_deterministic_80x24() {
    let (a, _) = render_panel(PanelId::Comparison, 20, 80, 24);
    let (b, _) = render_panel(PanelId::Comparison, 20, 80, 24);
    assert_buffers_identical(&a, &b);
}
