#![forbid(unsafe_code)]

//! Application model: routes input to the router or the active panel and
//! draws the chrome around it.

use std::num::NonZeroUsize;
use std::sync::Arc;

use mhviz_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use mhviz_layout::{Constraint, Flex};
use mhviz_model::Dataset;
use mhviz_render::cell::Cell;
use mhviz_render::frame::Frame;
use mhviz_runtime::{Cmd, Model};
use mhviz_widgets::Widget;
use mhviz_widgets::block::{Alignment, Block, BorderType};
use tracing::debug;

use crate::chrome::{self, StatusBarState};
use crate::panels::Panel;
use crate::router::{PanelId, ViewRouter};
use crate::theme::{self, THEME};

/// Top-level application message.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// A raw terminal event, interpreted by [`DashboardApp::update`].
    PanelEvent(Event),
    /// Switch to a registered panel.
    SelectPanel(PanelId),
    /// Switch to the panel at this registry position.
    SelectIndex(usize),
    NextPanel,
    PrevPanel,
    ToggleHelp,
    /// Terminal resize.
    Resize {
        width: u16,
        height: u16,
    },
    Quit,
}

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        if let Event::Resize { width, height } = event {
            return Self::Resize { width, height };
        }
        Self::PanelEvent(event)
    }
}

/// The dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardApp {
    router: ViewRouter,
    help_visible: bool,
}

impl DashboardApp {
    pub fn new(dataset: Arc<Dataset>, stride: NonZeroUsize) -> Self {
        Self {
            router: ViewRouter::new(dataset, stride),
            help_visible: false,
        }
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut ViewRouter {
        &mut self.router
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Global keys; `None` means the key belongs to the active panel.
    fn global_key(&self, key: &KeyEvent) -> Option<AppMsg> {
        let msg = match (key.code, key.modifiers) {
            (KeyCode::Char('c'), Modifiers::CTRL) => AppMsg::Quit,
            (KeyCode::Escape, _) if self.help_visible => AppMsg::ToggleHelp,
            (KeyCode::Char('q') | KeyCode::Escape, _) => AppMsg::Quit,
            (KeyCode::Char('?'), _) => AppMsg::ToggleHelp,
            (KeyCode::Tab, _) => AppMsg::NextPanel,
            (KeyCode::BackTab, _) => AppMsg::PrevPanel,
            (KeyCode::Char(c @ '1'..='9'), _) => {
                AppMsg::SelectIndex(c as usize - '1' as usize)
            }
            _ => return None,
        };
        Some(msg)
    }
}

impl Model for DashboardApp {
    type Message = AppMsg;

    fn init(&mut self) -> Cmd<AppMsg> {
        Cmd::log(format!("dashboard ready on panel {}", self.router.active()))
    }

    fn update(&mut self, msg: AppMsg) -> Cmd<AppMsg> {
        match msg {
            AppMsg::PanelEvent(event) => {
                if let Event::Key(key) = &event {
                    if key.kind == KeyEventKind::Release {
                        return Cmd::none();
                    }
                    if let Some(msg) = self.global_key(key) {
                        return Cmd::msg(msg);
                    }
                    if self.help_visible {
                        return Cmd::none();
                    }
                }
                self.router.mounted_mut().update(&event);
                Cmd::none()
            }
            AppMsg::SelectPanel(id) => {
                self.router.select_panel(&id);
                Cmd::none()
            }
            AppMsg::SelectIndex(index) => {
                self.router.select_index(index);
                Cmd::none()
            }
            AppMsg::NextPanel => {
                self.router.next_panel();
                Cmd::none()
            }
            AppMsg::PrevPanel => {
                self.router.prev_panel();
                Cmd::none()
            }
            AppMsg::ToggleHelp => {
                self.help_visible = !self.help_visible;
                Cmd::none()
            }
            AppMsg::Resize { width, height } => {
                debug!(width, height, "resize");
                Cmd::none()
            }
            AppMsg::Quit => Cmd::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        frame
            .buffer
            .fill(area, Cell::default().with_fg(THEME.text));

        // Tab bar, content, status bar.
        let chunks = Flex::vertical()
            .constraints([
                Constraint::Fixed(1),
                Constraint::Min(1),
                Constraint::Fixed(1),
            ])
            .split(area);

        chrome::render_tab_bar(&self.router.labels(), self.router.active_index(), frame, chunks[0]);

        let panel = self.router.mounted();
        let title = format!(" {} ", panel.title());
        let content_block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(THEME.border_style())
            .title(&title)
            .title_alignment(Alignment::Center)
            .title_style(theme::heading_style());
        let inner = content_block.inner(chunks[1]);
        content_block.render(chunks[1], frame);
        panel.view(frame, inner);

        let hint = panel.status();
        let status = StatusBarState {
            panel_title: &self.router.panels()[self.router.active_index()].label,
            panel_index: self.router.active_index(),
            panel_count: self.router.panels().len(),
            hint: &hint,
            terminal_width: area.width,
            terminal_height: area.height,
        };
        chrome::render_status_bar(&status, frame, chunks[2]);

        if self.help_visible {
            chrome::render_help_overlay(panel.title(), &panel.keybindings(), frame, area);
        }
    }
}
