//! tomatick library
//!
//! This library provides the core functionality for the tomatick CLI.
//! It includes:
//! - Session controller and phase timer driven by tokio
//! - Cooperative cancellation shared by the keyboard, Ctrl-C and the timer
//! - Desktop notifications with an audible beep
//! - Full-screen countdown rendered with ratatui
//! - Optional tray icon mirroring the countdown (rendered on macOS)
//! - CLI flag parsing and configuration validation

pub mod app;
pub mod cli;
pub mod logging;
pub mod menubar;
pub mod notification;
pub mod sound;
pub mod timer;
pub mod types;
pub mod ui;

// Re-export commonly used types for convenience
pub use types::{ConfigError, Phase, Session, SessionConfig, Tick};

pub use timer::{
    CancellationSignal, PhaseOutcome, PhaseTimer, SessionController, SessionOutcome, TimerEvent,
};

pub use app::{AppOptions, EventRouter, EventSink};

pub use notification::{
    DesktopNotifier, MockNotifier, NotificationError, Notifier, NotifierOptions,
};

pub use menubar::{TrayError, TrayIconKind, TrayPublisher, TrayReflector, TrayUpdate};

pub use sound::{Beep, MockSoundPlayer, RodioSoundPlayer, SoundError, SoundPlayer};

pub use ui::{CountdownView, DisplayError, DisplaySink, RenderDriver, SharedCountdown};
