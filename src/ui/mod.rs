//! Full-screen countdown rendered with ratatui.
//!
//! This module provides:
//!
//! - `DisplaySink` and `SharedCountdown`, the state behind the screen
//! - A block-digit font for the remaining time
//! - Quit-key mapping (`q`, `Q`, Ctrl-C)
//! - `RenderDriver`, the redraw loop on the main thread
//!
//! The driver redraws once per second, or sooner when a terminal event
//! arrives. It returns when a quit key fires the cancellation signal, when
//! something else fires it, or when the session reports that it is done.

pub mod countdown;
pub mod input;
pub mod segment;
pub mod terminal;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};
use thiserror::Error;
use tracing::{debug, warn};

pub use countdown::{CountdownView, DisplaySink, SessionEnd, SharedCountdown};
pub use input::is_quit_key;
pub use terminal::{restore_terminal, TerminalGuard};

use crate::timer::CancellationSignal;
use crate::types::Phase;

/// Default time between redraws.
pub const REDRAW_INTERVAL: Duration = Duration::from_secs(1);

/// Errors from the countdown display.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The terminal could not be set up or written to
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// A thread panicked while holding the countdown state
    #[error("countdown state lock poisoned")]
    StatePoisoned,
}

/// Why the render loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderExit {
    /// The cancellation signal fired
    Cancelled,
    /// The session finished on its own
    Finished,
}

/// Source of terminal input for the render loop.
pub trait EventSource {
    /// Waits up to `timeout` for the next event. Returns `Ok(None)` when the
    /// timeout passes first.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be polled or read.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Reads events from the real terminal.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Redraw loop for the countdown screen.
#[derive(Debug)]
pub struct RenderDriver {
    view: SharedCountdown,
    cancel: CancellationSignal,
    redraw_interval: Duration,
}

impl RenderDriver {
    /// Creates a driver drawing `view` and firing `cancel` on a quit key.
    pub fn new(view: SharedCountdown, cancel: CancellationSignal) -> Self {
        Self {
            view,
            cancel,
            redraw_interval: REDRAW_INTERVAL,
        }
    }

    /// Overrides the time between redraws.
    pub fn with_redraw_interval(mut self, interval: Duration) -> Self {
        self.redraw_interval = interval;
        self
    }

    /// Takes over the terminal and redraws until the session ends.
    ///
    /// `on_frame` runs before every redraw (the tray is pumped from here).
    /// `is_done` reports whether the session task has finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be put into raw mode or the
    /// alternate screen. Failures while drawing a frame are logged and the
    /// loop keeps going.
    pub fn run<F, D>(&self, mut on_frame: F, is_done: D) -> Result<RenderExit, DisplayError>
    where
        F: FnMut(),
        D: Fn() -> bool,
    {
        let guard = TerminalGuard::new();
        guard.enable_raw_mode()?;
        let mut stdout = io::stdout();
        guard.enter_alt_screen(&mut stdout)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let exit = self.frame_loop(&mut terminal, &mut CrosstermEvents, &mut on_frame, &is_done);

        drop(terminal);
        guard.restore();
        exit
    }

    fn frame_loop<B, E, F, D>(
        &self,
        terminal: &mut Terminal<B>,
        events: &mut E,
        on_frame: &mut F,
        is_done: &D,
    ) -> Result<RenderExit, DisplayError>
    where
        B: Backend,
        E: EventSource,
        F: FnMut(),
        D: Fn() -> bool,
    {
        loop {
            on_frame();

            if let Some(exit) = self.exit_reason(is_done) {
                debug!(?exit, "render loop finished");
                return Ok(exit);
            }

            let view = self.view.snapshot()?;
            if let Err(e) = terminal.draw(|frame| draw(frame, &view)) {
                warn!(error = %e, "failed to draw countdown");
            }

            self.handle_input(events);
        }
    }

    /// Waits for one input event, firing the cancellation signal on a quit key.
    fn handle_input<E: EventSource>(&self, events: &mut E) {
        match events.next_event(self.redraw_interval) {
            Ok(Some(Event::Key(key))) if is_quit_key(&key) => {
                debug!(code = ?key.code, "quit key pressed");
                self.cancel.cancel();
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "failed to read terminal event");
                std::thread::sleep(self.redraw_interval);
            }
        }
    }

    fn exit_reason<D: Fn() -> bool>(&self, is_done: &D) -> Option<RenderExit> {
        if self.cancel.is_cancelled() {
            Some(RenderExit::Cancelled)
        } else if is_done() {
            Some(RenderExit::Finished)
        } else {
            None
        }
    }
}

/// Colour of the countdown digits for a phase.
pub fn phase_color(phase: Option<Phase>) -> Color {
    match phase {
        Some(Phase::Work) => Color::Red,
        Some(Phase::Break) => Color::Green,
        None => Color::White,
    }
}

/// Draws one frame of the countdown screen.
pub fn draw(frame: &mut Frame, view: &CountdownView) {
    let area = frame.size();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .title(view.title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(segment::GLYPH_HEIGHT as u16),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let digits: Vec<Line> = segment::render(&view.remaining_display())
        .into_iter()
        .map(Line::from)
        .collect();
    let countdown = Paragraph::new(Text::from(digits))
        .style(
            Style::default()
                .fg(phase_color(view.phase()))
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(countdown, rows[1]);

    let status = Paragraph::new(view.status_line())
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(status, rows[3]);
}
