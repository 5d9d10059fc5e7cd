#![forbid(unsafe_code)]

//! Panel registry and active-panel selection.
//!
//! The registry is closed: one analysis panel per algorithm family, in
//! dataset order, followed by the comparison panel. The first entry is
//! active at start-up. Selecting a panel that is not registered is a no-op.
//!
//! Switching to another panel mounts it fresh, so whatever transient state
//! the previous panel held (instance selection, cursor, note page) is gone.
//! Leaving a panel and coming back is indistinguishable from opening it for
//! the first time.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use mhviz_core::event::Event;
use mhviz_core::geometry::Rect;
use mhviz_model::Dataset;
use mhviz_render::frame::Frame;
use tracing::{info, warn};

use crate::chrome::HelpEntry;
use crate::panels::{AnalysisPanel, ComparisonPanel, Panel};

/// Name accepted by [`ViewRouter::select_panel_by_name`] for the comparison panel.
pub const COMPARISON_NAME: &str = "comparison";

/// Identity of a registered panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// Analysis of the family with this id.
    Analysis(String),
    Comparison,
}

impl PanelId {
    /// Stable name used on the command line.
    pub fn name(&self) -> &str {
        match self {
            PanelId::Analysis(family) => family,
            PanelId::Comparison => COMPARISON_NAME,
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A registry entry: id plus tab label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEntry {
    pub id: PanelId,
    pub label: String,
}

/// The active panel with its transient state.
#[derive(Debug, Clone, PartialEq)]
pub enum MountedPanel {
    Analysis(AnalysisPanel),
    Comparison(ComparisonPanel),
}

impl MountedPanel {
    fn as_panel(&self) -> &dyn Panel {
        match self {
            MountedPanel::Analysis(panel) => panel,
            MountedPanel::Comparison(panel) => panel,
        }
    }

    fn as_panel_mut(&mut self) -> &mut dyn Panel {
        match self {
            MountedPanel::Analysis(panel) => panel,
            MountedPanel::Comparison(panel) => panel,
        }
    }
}

impl Panel for MountedPanel {
    fn title(&self) -> &str {
        self.as_panel().title()
    }

    fn update(&mut self, event: &Event) -> bool {
        self.as_panel_mut().update(event)
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        self.as_panel().view(frame, area);
    }

    fn keybindings(&self) -> Vec<HelpEntry> {
        self.as_panel().keybindings()
    }

    fn status(&self) -> String {
        self.as_panel().status()
    }
}

/// Owns the registry and exactly one mounted panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewRouter {
    dataset: Arc<Dataset>,
    stride: NonZeroUsize,
    registry: Vec<PanelEntry>,
    active: usize,
    mounted: MountedPanel,
}

impl ViewRouter {
    /// Build the registry from the dataset and mount the first panel.
    pub fn new(dataset: Arc<Dataset>, stride: NonZeroUsize) -> Self {
        let mut registry: Vec<PanelEntry> = dataset
            .families
            .iter()
            .map(|family| PanelEntry {
                id: PanelId::Analysis(family.id.clone()),
                label: family.display_name.clone(),
            })
            .collect();
        registry.push(PanelEntry {
            id: PanelId::Comparison,
            label: "Comparaison".to_string(),
        });

        let (active, mounted) = match mount(&dataset, &registry[0].id, stride) {
            Some(panel) => (0, panel),
            None => (
                registry.len() - 1,
                MountedPanel::Comparison(ComparisonPanel::new(dataset.clone(), stride)),
            ),
        };
        info!(panels = registry.len(), active = %registry[active].id, "router ready");
        Self {
            dataset,
            stride,
            registry,
            active,
            mounted,
        }
    }

    pub fn panels(&self) -> &[PanelEntry] {
        &self.registry
    }

    /// Tab labels in registry order.
    pub fn labels(&self) -> Vec<String> {
        self.registry.iter().map(|e| e.label.clone()).collect()
    }

    pub fn active(&self) -> &PanelId {
        &self.registry[self.active].id
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn mounted(&self) -> &MountedPanel {
        &self.mounted
    }

    pub fn mounted_mut(&mut self) -> &mut MountedPanel {
        &mut self.mounted
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Activate the panel at `index` in registry order.
    ///
    /// Returns whether the active panel changed. Out-of-range indices and
    /// the already active panel change nothing.
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(entry) = self.registry.get(index) else {
            warn!(index, "no panel at index");
            return false;
        };
        if index == self.active {
            return false;
        }
        let Some(panel) = mount(&self.dataset, &entry.id, self.stride) else {
            return false;
        };
        info!(from = %self.registry[self.active].id, to = %entry.id, "panel switched");
        self.active = index;
        self.mounted = panel;
        true
    }

    /// Activate a panel by id. Unregistered ids change nothing.
    pub fn select_panel(&mut self, id: &PanelId) -> bool {
        match self.registry.iter().position(|e| &e.id == id) {
            Some(index) => self.select_index(index),
            None => {
                warn!(panel = %id, "unknown panel ignored");
                false
            }
        }
    }

    /// Activate a panel by name, ignoring ASCII case.
    ///
    /// Accepts a family id, a tab label, or `comparison`.
    pub fn select_panel_by_name(&mut self, name: &str) -> bool {
        match self.position_by_name(name) {
            Some(index) => self.select_index(index),
            None => {
                warn!(panel = name, "unknown panel ignored");
                false
            }
        }
    }

    /// Registry position of a panel name, if registered.
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.registry.iter().position(|e| {
            e.id.name().eq_ignore_ascii_case(name) || e.label.eq_ignore_ascii_case(name)
        })
    }

    /// Activate the next panel, wrapping around.
    pub fn next_panel(&mut self) -> bool {
        let next = (self.active + 1) % self.registry.len();
        self.select_index(next)
    }

    /// Activate the previous panel, wrapping around.
    pub fn prev_panel(&mut self) -> bool {
        let len = self.registry.len();
        let prev = (self.active + len - 1) % len;
        self.select_index(prev)
    }
}

fn mount(dataset: &Arc<Dataset>, id: &PanelId, stride: NonZeroUsize) -> Option<MountedPanel> {
    match id {
        PanelId::Analysis(family) => match AnalysisPanel::new(dataset.clone(), family) {
            Ok(panel) => Some(MountedPanel::Analysis(panel)),
            Err(err) => {
                warn!(panel = %id, %err, "panel failed to mount");
                None
            }
        },
        PanelId::Comparison => Some(MountedPanel::Comparison(ComparisonPanel::new(
            dataset.clone(),
            stride,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::comparison::DEFAULT_STRIDE;
    use mhviz_core::event::KeyCode;
    use mhviz_harness::assert_buffers_identical;
    use mhviz_model::SampleDataset;
    use proptest::prelude::*;

    fn router() -> ViewRouter {
        ViewRouter::new(Arc::new(SampleDataset::new().build()), DEFAULT_STRIDE)
    }

    fn analysis(id: &str) -> PanelId {
        PanelId::Analysis(id.to_string())
    }

    fn render(router: &ViewRouter) -> mhviz_render::buffer::Buffer {
        let mut frame = Frame::new(120, 40);
        router.mounted().view(&mut frame, Rect::from_size(120, 40));
        frame.into_buffer()
    }

    #[test]
    fn registry_lists_families_then_comparison() {
        let router = router();
        let ids: Vec<&str> = router.panels().iter().map(|e| e.id.name()).collect();
        assert_eq!(ids, ["BPSO", "BGSA", "Hybrid", "BWOA", "comparison"]);
        assert_eq!(router.active(), &analysis("BPSO"));
        assert_eq!(router.active_index(), 0);
    }

    #[test]
    fn unknown_panel_is_a_no_op() {
        let mut router = router();
        router.mounted_mut().update(&Event::key(KeyCode::Char(']')));
        let before = router.clone();

        assert!(!router.select_panel(&analysis("ACO")));
        assert!(!router.select_panel_by_name("ACO"));
        assert!(!router.select_index(99));
        assert_eq!(router, before);
    }

    #[test]
    fn switch_away_and_back_equals_fresh_mount() {
        let mut router = router();
        assert!(router.select_panel(&analysis("BGSA")));
        let fresh = render(&router);
        let fresh_state = router.mounted().clone();

        // Give BGSA some transient state, then leave and return.
        router.mounted_mut().update(&Event::key(KeyCode::Char(']')));
        router.mounted_mut().update(&Event::key(KeyCode::Right));
        assert_ne!(router.mounted(), &fresh_state);

        assert!(router.select_panel(&PanelId::Comparison));
        assert!(router.select_panel(&analysis("BGSA")));
        assert_eq!(router.mounted(), &fresh_state);
        assert_buffers_identical(&fresh, &render(&router));
    }

    #[test]
    fn selecting_active_panel_keeps_state() {
        let mut router = router();
        router.mounted_mut().update(&Event::key(KeyCode::Char(']')));
        let before = router.mounted().clone();
        assert!(!router.select_panel(&analysis("BPSO")));
        assert_eq!(router.mounted(), &before);
    }

    #[test]
    fn names_match_ignoring_case() {
        let mut router = router();
        assert!(router.select_panel_by_name("COMPARISON"));
        assert_eq!(router.active(), &PanelId::Comparison);
        assert!(router.select_panel_by_name("hybrid"));
        assert_eq!(router.active(), &analysis("Hybrid"));
        assert!(router.select_panel_by_name("Comparaison"));
        assert_eq!(router.active(), &PanelId::Comparison);
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut router = router();
        assert!(router.prev_panel());
        assert_eq!(router.active(), &PanelId::Comparison);
        assert!(router.next_panel());
        assert_eq!(router.active(), &analysis("BPSO"));
    }

    #[test]
    fn value_equal_datasets_render_identically() {
        let a = ViewRouter::new(Arc::new(SampleDataset::new().build()), DEFAULT_STRIDE);
        let b = ViewRouter::new(Arc::new(SampleDataset::new().build()), DEFAULT_STRIDE);
        assert_buffers_identical(&render(&a), &render(&b));
    }

    #[test]
    fn empty_dataset_still_has_comparison() {
        let dataset = Arc::new(Dataset {
            title: "Vide".into(),
            families: Vec::new(),
            comparisons: Vec::new(),
            comparison_notes: Vec::new(),
        });
        let router = ViewRouter::new(dataset, DEFAULT_STRIDE);
        assert_eq!(router.panels().len(), 1);
        assert_eq!(router.active(), &PanelId::Comparison);
    }

    proptest! {
        #[test]
        fn active_panel_is_always_registered(ops in proptest::collection::vec(0usize..12, 0..30)) {
            let mut router = router();
            let count = router.panels().len();
            for op in ops {
                match op {
                    0 => { router.next_panel(); }
                    1 => { router.prev_panel(); }
                    2 => { router.select_panel_by_name("nope"); }
                    n => { router.select_index(n - 3); }
                }
                prop_assert!(router.active_index() < count);
                let expected = &router.panels()[router.active_index()].id;
                prop_assert_eq!(router.active(), expected);
                let mounted_matches = matches!(
                    (router.active(), router.mounted()),
                    (PanelId::Analysis(_), MountedPanel::Analysis(_))
                        | (PanelId::Comparison, MountedPanel::Comparison(_))
                );
                prop_assert!(mounted_matches);
            }
        }
    }
}
