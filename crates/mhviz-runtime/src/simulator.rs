#![forbid(unsafe_code)]

//! Deterministic program simulator.
//!
//! [`ProgramSimulator`] runs a [`Model`] with no terminal: events are
//! injected directly, commands are executed in-process and recorded, and
//! frames are captured at any size for assertions.
//!
//! ```ignore
//! let mut sim = ProgramSimulator::new(app);
//! sim.init();
//! sim.inject_event(Event::key(KeyCode::Tab));
//! let frame = sim.capture_frame(100, 30);
//! ```

use std::time::Duration;

use crate::program::{Cmd, Model};
use mhviz_core::event::Event;
use mhviz_render::buffer::Buffer;
use mhviz_render::frame::Frame;

/// A command executed during simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CmdRecord {
    None,
    Quit,
    Msg,
    Batch(usize),
    Tick(Duration),
    Log(String),
}

/// Headless driver for a [`Model`].
pub struct ProgramSimulator<M: Model> {
    model: M,
    frames: Vec<Buffer>,
    command_log: Vec<CmdRecord>,
    logs: Vec<String>,
    running: bool,
    tick_rate: Option<Duration>,
}

impl<M: Model> ProgramSimulator<M> {
    /// Wrap a model. Call [`init`](Self::init) before sending input.
    pub fn new(model: M) -> Self {
        Self {
            model,
            frames: Vec::new(),
            command_log: Vec::new(),
            logs: Vec::new(),
            running: true,
            tick_rate: None,
        }
    }

    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
    }

    /// Convert each event to a message and run it through `update`.
    ///
    /// Events after a quit are dropped.
    pub fn inject_events(&mut self, events: &[Event]) {
        for event in events {
            if !self.running {
                break;
            }
            let msg = M::Message::from(event.clone());
            let cmd = self.model.update(msg);
            self.execute_cmd(cmd);
        }
    }

    pub fn inject_event(&mut self, event: Event) {
        self.inject_events(&[event]);
    }

    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute_cmd(cmd);
    }

    /// Render the model into a fresh `width` x `height` frame and keep it.
    pub fn capture_frame(&mut self, width: u16, height: u16) -> &Buffer {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        let index = self.frames.len();
        self.frames.push(frame.into_buffer());
        &self.frames[index]
    }

    pub fn frames(&self) -> &[Buffer] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&Buffer> {
        self.frames.last()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// `false` once a [`Cmd::Quit`] has run.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_rate(&self) -> Option<Duration> {
        self.tick_rate
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn command_log(&self) -> &[CmdRecord] {
        &self.command_log
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => self.command_log.push(CmdRecord::None),
            Cmd::Quit => {
                self.running = false;
                self.command_log.push(CmdRecord::Quit);
            }
            Cmd::Msg(m) => {
                self.command_log.push(CmdRecord::Msg);
                let cmd = self.model.update(m);
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                self.command_log.push(CmdRecord::Batch(cmds.len()));
                for cmd in cmds {
                    self.execute_cmd(cmd);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(interval) => {
                self.tick_rate = Some(interval);
                self.command_log.push(CmdRecord::Tick(interval));
            }
            Cmd::Log(text) => {
                self.command_log.push(CmdRecord::Log(text.clone()));
                self.logs.push(text);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mhviz_core::event::KeyCode;
    use mhviz_render::cell::Cell;

    struct Counter {
        value: i32,
    }

    #[derive(Debug)]
    enum Msg {
        Inc,
        Dec,
        Quit,
        Log,
    }

    impl From<Event> for Msg {
        fn from(event: Event) -> Self {
            match event {
                Event::Key(k) if k.is_char('-') => Msg::Dec,
                Event::Key(k) if k.is_char('q') => Msg::Quit,
                _ => Msg::Inc,
            }
        }
    }

    impl Model for Counter {
        type Message = Msg;

        fn init(&mut self) -> Cmd<Msg> {
            Cmd::tick(Duration::from_secs(1))
        }

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Inc => self.value += 1,
                Msg::Dec => self.value -= 1,
                Msg::Quit => return Cmd::quit(),
                Msg::Log => return Cmd::log(format!("value={}", self.value)),
            }
            Cmd::none()
        }

        fn view(&self, frame: &mut Frame) {
            for (i, c) in self.value.to_string().chars().enumerate() {
                frame.buffer.set(i as u16, 0, Cell::from_char(c));
            }
        }
    }

    #[test]
    fn init_runs_startup_command() {
        let mut sim = ProgramSimulator::new(Counter { value: 0 });
        sim.init();
        assert_eq!(sim.tick_rate(), Some(Duration::from_secs(1)));
        assert_eq!(sim.command_log(), [CmdRecord::Tick(Duration::from_secs(1))]);
    }

    #[test]
    fn events_convert_to_messages() {
        let mut sim = ProgramSimulator::new(Counter { value: 0 });
        sim.inject_events(&[
            Event::key(KeyCode::Char('+')),
            Event::key(KeyCode::Char('+')),
            Event::key(KeyCode::Char('-')),
        ]);
        assert_eq!(sim.model().value, 1);
    }

    #[test]
    fn quit_drops_later_events() {
        let mut sim = ProgramSimulator::new(Counter { value: 0 });
        sim.inject_events(&[Event::key(KeyCode::Char('q')), Event::key(KeyCode::Char('+'))]);
        assert!(!sim.is_running());
        assert_eq!(sim.model().value, 0);
        sim.send(Msg::Inc);
        assert_eq!(sim.model().value, 0);
    }

    #[test]
    fn logs_are_recorded() {
        let mut sim = ProgramSimulator::new(Counter { value: 3 });
        sim.send(Msg::Log);
        assert_eq!(sim.logs(), ["value=3"]);
    }

    #[test]
    fn frames_are_captured_at_requested_size() {
        let mut sim = ProgramSimulator::new(Counter { value: 42 });
        let frame = sim.capture_frame(5, 2);
        assert_eq!(frame.width(), 5);
        assert_eq!(frame.row_text(0), "42   ");
        sim.capture_frame(3, 1);
        assert_eq!(sim.frame_count(), 2);
        assert_eq!(sim.last_frame().map(Buffer::width), Some(3));
    }
}
