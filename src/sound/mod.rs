//! Audible cue for phase transitions.
//!
//! This module provides:
//!
//! - A `Beep` descriptor (frequency, length, loudness)
//! - The `SoundPlayer` seam with a rodio-backed implementation
//! - A mock player for tests
//! - Graceful degradation when audio is unavailable
//!
//! The rodio output stream is not `Send`; the alert worker creates its
//! player on its own thread and keeps it there.

mod error;
mod player;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};

/// Default beep frequency in Hz.
pub const DEFAULT_BEEP_FREQUENCY_HZ: f32 = 587.0;

/// Default beep length.
pub const DEFAULT_BEEP_DURATION: Duration = Duration::from_millis(500);

/// A sine tone to play on phase change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beep {
    /// Tone frequency in Hz
    pub frequency_hz: f32,
    /// How long the tone lasts
    pub duration: Duration,
    /// Linear gain applied to the tone (0.0 - 1.0)
    pub amplitude: f32,
}

impl Default for Beep {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_BEEP_FREQUENCY_HZ,
            duration: DEFAULT_BEEP_DURATION,
            amplitude: 0.25,
        }
    }
}

/// Trait for sound playback implementations.
pub trait SoundPlayer {
    /// Plays a beep without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, beep: &Beep) -> Result<(), SoundError>;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, beep: &Beep) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, beep)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Arc<T> {
    fn play(&self, beep: &Beep) -> Result<(), SoundError> {
        (**self).play(beep)
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: Mutex<Vec<Beep>>,
    should_fail: AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<Beep> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, beep: &Beep) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(*beep);
        Ok(())
    }
}
