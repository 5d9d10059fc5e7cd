#![forbid(unsafe_code)]

//! Elm-style update/view loop.
//!
//! A [`Model`] owns all application state. Terminal events are converted to
//! the model's message type, `update` returns a [`Cmd`] describing any side
//! effect, and `view` paints the current state into a frame. [`Program`]
//! repaints only after a message was handled or the terminal resized.
//!
//! ```ignore
//! use mhviz_runtime::{Cmd, Model, Program, ProgramConfig};
//!
//! let mut program = Program::new(app, ProgramConfig::fullscreen())?;
//! program.run()?;
//! ```

use std::io::{self, Stdout, Write};
use std::time::Duration;

use mhviz_core::event::Event;
use mhviz_core::terminal_session::{SessionOptions, TerminalSession};
use mhviz_render::buffer::Buffer;
use mhviz_render::diff::BufferDiff;
use mhviz_render::frame::Frame;
use mhviz_render::presenter::Presenter;
use tracing::{debug, debug_span, info};

/// Application state and behaviour.
pub trait Model: Sized {
    /// Messages handled by `update`. Terminal events convert into them.
    type Message: From<Event>;

    /// Called once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Paint the current state.
    ///
    /// Must be a pure function of the model: equal models paint equal frames.
    fn view(&self, frame: &mut Frame);
}

/// Side effects requested by the model.
#[derive(Default)]
pub enum Cmd<M> {
    #[default]
    None,
    /// Stop the program after the current message.
    Quit,
    /// Run each command in order, stopping early on `Quit`.
    Batch(Vec<Cmd<M>>),
    /// Feed a message back into `update`.
    Msg(M),
    /// Deliver [`Event::Tick`] at this interval.
    Tick(Duration),
    /// Emit a log line through `tracing`.
    Log(String),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Tick(d) => f.debug_tuple("Tick").field(d).finish(),
            Self::Log(s) => f.debug_tuple("Log").field(s).finish(),
        }
    }
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    #[inline]
    pub fn tick(interval: Duration) -> Self {
        Self::Tick(interval)
    }

    /// Collapse empty and single-element batches.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => Self::Batch(cmds),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Stable name for tracing.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Quit => "Quit",
            Self::Batch(_) => "Batch",
            Self::Msg(_) => "Msg",
            Self::Tick(_) => "Tick",
            Self::Log(_) => "Log",
        }
    }

    /// Number of atomic commands, counting into batches.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Batch(cmds) => cmds.iter().map(Self::count).sum(),
            _ => 1,
        }
    }
}

/// How the program drives the terminal.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Draw on the alternate screen.
    pub alternate_screen: bool,
    /// Report focus changes as events.
    pub focus_events: bool,
    /// Upper bound on how long to wait for input before re-checking ticks.
    pub poll_interval: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self::fullscreen()
    }
}

impl ProgramConfig {
    /// Alternate screen, restored on exit.
    pub fn fullscreen() -> Self {
        Self {
            alternate_screen: true,
            focus_events: false,
            poll_interval: Duration::from_millis(250),
        }
    }

    /// Draw in the main screen, leaving the last frame in scrollback.
    pub fn inline() -> Self {
        Self {
            alternate_screen: false,
            ..Self::fullscreen()
        }
    }

    pub fn with_focus_events(mut self) -> Self {
        self.focus_events = true;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// Runs a [`Model`] against the real terminal.
pub struct Program<M: Model, W: Write = Stdout> {
    model: M,
    config: ProgramConfig,
    presenter: Presenter<W>,
    previous: Option<Buffer>,
    running: bool,
    dirty: bool,
    tick_rate: Option<Duration>,
}

impl<M: Model> Program<M, Stdout> {
    /// A program writing to stdout.
    pub fn new(model: M, config: ProgramConfig) -> io::Result<Self> {
        Ok(Self::with_writer(model, config, io::stdout()))
    }
}

impl<M: Model, W: Write> Program<M, W> {
    /// A program writing frames to `writer`.
    pub fn with_writer(model: M, config: ProgramConfig, writer: W) -> Self {
        Self {
            model,
            config,
            presenter: Presenter::new(writer),
            previous: None,
            running: true,
            dirty: true,
            tick_rate: None,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run until the model returns [`Cmd::Quit`].
    ///
    /// The terminal is restored on return, including on error.
    pub fn run(&mut self) -> io::Result<()> {
        let session = TerminalSession::new(SessionOptions {
            alternate_screen: self.config.alternate_screen,
            focus_events: self.config.focus_events,
        })?;
        let (mut width, mut height) = session.size()?;
        info!(width, height, "program started");

        let cmd = self.model.init();
        self.execute(cmd);

        while self.running {
            if self.dirty {
                self.render(width, height)?;
            }

            let timeout = self
                .tick_rate
                .map_or(self.config.poll_interval, |tick| tick.min(self.config.poll_interval));
            let event = if session.poll_event(timeout)? {
                session.read_event()?
            } else if self.tick_rate.is_some() {
                Some(Event::Tick)
            } else {
                None
            };
            let Some(event) = event else { continue };

            if let Event::Resize { width: w, height: h } = event {
                debug!(w, h, "terminal resized");
                width = w;
                height = h;
                self.previous = None;
            }
            self.dispatch(event);
        }

        info!("program stopped");
        Ok(())
    }

    fn dispatch(&mut self, event: Event) {
        let msg = M::Message::from(event);
        let cmd = self.model.update(msg);
        self.execute(cmd);
        self.dirty = true;
    }

    fn render(&mut self, width: u16, height: u16) -> io::Result<()> {
        let _span = debug_span!("render", width, height).entered();
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        let buffer = frame.into_buffer();
        let diff = match &self.previous {
            Some(prev) if prev.width() == width && prev.height() == height => {
                BufferDiff::compute(prev, &buffer)
            }
            _ => BufferDiff::full(&buffer),
        };
        self.presenter.present(&buffer, &diff)?;
        self.previous = Some(buffer);
        self.dirty = false;
        Ok(())
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.execute(cmd);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(interval) => self.tick_rate = Some(interval),
            Cmd::Log(text) => info!(target: "mhviz::app", "{text}"),
        }
    }
}
