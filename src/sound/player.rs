//! Sound player implementation using rodio.
//!
//! `RodioSoundPlayer` owns the audio output stream, which is not `Send`, so
//! it must be created and used on one thread (the alert worker).

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::Beep;

/// A sound player that synthesises beeps through rodio.
///
/// Playback is non-blocking; the tone continues after `play` returns.
pub struct RodioSoundPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
}

impl RodioSoundPlayer {
    /// Creates a new sound player.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new() -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }

    /// Plays a sine tone described by `beep`.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::StreamError` if no sink can be attached to the
    /// output stream.
    pub fn play(&self, beep: &Beep) -> Result<(), SoundError> {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        let tone = SineWave::new(beep.frequency_hz)
            .take_duration(beep.duration)
            .amplify(beep.amplitude);
        sink.append(tone);
        sink.detach(); // Non-blocking: sound continues after function returns

        debug!(frequency_hz = beep.frequency_hz, "Beep started (detached)");
        Ok(())
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer").finish_non_exhaustive()
    }
}

/// Creates a sound player, returning None if audio is unavailable.
///
/// If audio initialization fails, a warning is logged and None is returned.
#[must_use]
pub fn try_create_player() -> Option<RodioSoundPlayer> {
    match RodioSoundPlayer::new() {
        Ok(player) => Some(player),
        Err(e) => {
            warn!("Audio not available, beep disabled: {}", e);
            None
        }
    }
}
