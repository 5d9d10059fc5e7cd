#![forbid(unsafe_code)]

//! End-to-end flows through the dashboard model with the headless simulator.

use std::num::NonZeroUsize;
use std::sync::Arc;

use mhviz_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use mhviz_dashboard::app::{AppMsg, DashboardApp};
use mhviz_dashboard::panels::Panel;
use mhviz_dashboard::router::{MountedPanel, PanelId};
use mhviz_harness::{assert_buffers_identical, buffer_to_text};
use mhviz_model::{Dataset, SampleDataset};
use mhviz_runtime::{CmdRecord, ProgramSimulator};

const WIDTH: u16 = 120;
const HEIGHT: u16 = 40;

fn stride() -> NonZeroUsize {
    NonZeroUsize::new(20).expect("non-zero")
}

fn dataset() -> Arc<Dataset> {
    Arc::new(SampleDataset::new().build())
}

fn simulator() -> ProgramSimulator<DashboardApp> {
    let mut sim = ProgramSimulator::new(DashboardApp::new(dataset(), stride()));
    sim.init();
    sim
}

fn press(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::NONE,
        kind: KeyEventKind::Press,
    })
}

fn release(code: KeyCode) -> Event {
    Event::Key(KeyEvent {
        code,
        modifiers: Modifiers::NONE,
        kind: KeyEventKind::Release,
    })
}

fn active(sim: &ProgramSimulator<DashboardApp>) -> PanelId {
    sim.model().router().active().clone()
}

fn analysis_instance(sim: &ProgramSimulator<DashboardApp>) -> Option<String> {
    match sim.model().router().mounted() {
        MountedPanel::Analysis(panel) => panel.selected_instance().map(str::to_string),
        MountedPanel::Comparison(_) => None,
    }
}

#[test]
fn starts_on_first_family() {
    let mut sim = simulator();
    assert_eq!(active(&sim), PanelId::Analysis("BPSO".into()));
    assert!(sim.is_running());

    let text = buffer_to_text(sim.capture_frame(WIDTH, HEIGHT));
    assert!(text.contains("1: BPSO"), "{text}");
    assert!(text.contains("Comparaison"), "{text}");
    assert!(text.contains("Paramètres des Variantes"), "{text}");
}

#[test]
fn init_logs_active_panel() {
    let sim = simulator();
    assert_eq!(sim.logs(), ["dashboard ready on panel BPSO".to_string()]);
}

#[test]
fn tab_and_backtab_cycle_panels() {
    let mut sim = simulator();
    sim.inject_event(press(KeyCode::Tab));
    assert_eq!(active(&sim), PanelId::Analysis("BGSA".into()));

    sim.inject_event(press(KeyCode::BackTab));
    sim.inject_event(press(KeyCode::BackTab));
    assert_eq!(active(&sim), PanelId::Comparison);
}

#[test]
fn digit_selects_panel_by_position() {
    let mut sim = simulator();
    sim.inject_event(press(KeyCode::Char('5')));
    assert_eq!(active(&sim), PanelId::Comparison);

    let text = buffer_to_text(sim.capture_frame(WIDTH, HEIGHT));
    assert!(text.contains("Statistiques par Algorithme"), "{text}");
    assert!(text.contains("141278.00"), "{text}");

    // Nothing is registered at position 9.
    sim.inject_event(press(KeyCode::Char('9')));
    assert_eq!(active(&sim), PanelId::Comparison);
}

#[test]
fn unknown_panel_message_is_a_noop() {
    let mut sim = simulator();
    sim.inject_event(press(KeyCode::Char(']')));
    let before = sim.model().clone();

    sim.send(AppMsg::SelectPanel(PanelId::Analysis("BXYZ".into())));
    assert_eq!(sim.model(), &before);
}

#[test]
fn round_trip_matches_fresh_mount() {
    let mut fresh = simulator();
    let expected = fresh.capture_frame(WIDTH, HEIGHT).clone();

    let mut sim = simulator();
    sim.inject_events(&[
        press(KeyCode::Char(']')),
        press(KeyCode::Right),
        press(KeyCode::Char('n')),
    ]);
    assert_eq!(analysis_instance(&sim).as_deref(), Some("MKP7"));

    sim.inject_events(&[press(KeyCode::Char('5')), press(KeyCode::Char('1'))]);
    assert_eq!(analysis_instance(&sim).as_deref(), Some("MKP1"));
    assert_eq!(sim.model().router().mounted(), fresh.model().router().mounted());

    let actual = sim.capture_frame(WIDTH, HEIGHT).clone();
    assert_buffers_identical(&expected, &actual);
}

#[test]
fn panel_keys_reach_mounted_panel() {
    let mut sim = simulator();
    let first = buffer_to_text(sim.capture_frame(WIDTH, HEIGHT));
    sim.inject_event(press(KeyCode::Char(']')));
    let second = buffer_to_text(sim.capture_frame(WIDTH, HEIGHT));
    assert_ne!(first, second);
    assert_eq!(analysis_instance(&sim).as_deref(), Some("MKP7"));
}

#[test]
fn release_events_are_ignored() {
    let mut sim = simulator();
    sim.inject_events(&[release(KeyCode::Tab), release(KeyCode::Char('q'))]);
    assert_eq!(active(&sim), PanelId::Analysis("BPSO".into()));
    assert!(sim.is_running());
}

#[test]
fn help_overlay_toggles_and_swallows_panel_keys() {
    let mut sim = simulator();
    sim.inject_event(press(KeyCode::Char('?')));
    assert!(sim.model().help_visible());
    let text = buffer_to_text(sim.capture_frame(WIDTH, HEIGHT));
    assert!(text.contains("Raccourcis clavier"), "{text}");

    sim.inject_event(press(KeyCode::Char(']')));
    assert_eq!(analysis_instance(&sim).as_deref(), Some("MKP1"));

    // Esc closes the overlay instead of quitting.
    sim.inject_event(press(KeyCode::Escape));
    assert!(!sim.model().help_visible());
    assert!(sim.is_running());
}

#[test]
fn q_quits() {
    let mut sim = simulator();
    sim.inject_event(press(KeyCode::Char('q')));
    assert!(!sim.is_running());
    assert!(sim.command_log().contains(&CmdRecord::Quit));
}

#[test]
fn ctrl_c_quits() {
    let mut sim = simulator();
    sim.inject_event(Event::Key(KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: Modifiers::CTRL,
        kind: KeyEventKind::Press,
    }));
    assert!(!sim.is_running());
}

#[test]
fn resize_keeps_state() {
    let mut sim = simulator();
    sim.inject_event(press(KeyCode::Char(']')));
    sim.inject_event(Event::Resize {
        width: 80,
        height: 24,
    });
    assert_eq!(analysis_instance(&sim).as_deref(), Some("MKP7"));
    let text = buffer_to_text(sim.capture_frame(80, 24));
    assert!(text.contains("80x24"), "{text}");
}

#[test]
fn same_input_same_frames() {
    let events = [
        press(KeyCode::Tab),
        press(KeyCode::Char(']')),
        press(KeyCode::Right),
        press(KeyCode::Right),
        press(KeyCode::Char('5')),
        press(KeyCode::Char(']')),
    ];
    let mut a = simulator();
    let mut b = simulator();
    a.inject_events(&events);
    b.inject_events(&events);
    let fa = a.capture_frame(WIDTH, HEIGHT).clone();
    let fb = b.capture_frame(WIDTH, HEIGHT).clone();
    assert_buffers_identical(&fa, &fb);
}

#[test]
fn content_block_carries_panel_title() {
    let mut sim = simulator();
    sim.inject_event(press(KeyCode::Char('5')));
    let title = sim.model().router().mounted().title().to_string();
    let text = buffer_to_text(sim.capture_frame(WIDTH, HEIGHT));
    assert!(text.contains(&title), "{text}");
}
