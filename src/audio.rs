//! Audio boundary
//!
//! The simulation only ever asks for one sound: the hit cue when a player
//! shell destroys an enemy. Playback is fire-and-forget and a failing
//! backend never reaches gameplay code.

use thiserror::Error;

/// Failure reported by an audio backend
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("sound asset not found: {0}")]
    MissingAsset(String),

    #[error("audio device unavailable")]
    Unavailable,

    #[error("playback failed: {0}")]
    Playback(String),
}

/// A backend able to play the hit cue
pub trait AudioSink {
    fn play_hit_cue(&mut self, volume: f32) -> Result<(), AudioError>;
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play_hit_cue(&mut self, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Backend that logs each cue instead of playing it
#[derive(Debug, Default)]
pub struct LogAudio {
    pub cues: u32,
}

impl AudioSink for LogAudio {
    fn play_hit_cue(&mut self, volume: f32) -> Result<(), AudioError> {
        self.cues += 1;
        log::debug!("hit cue #{} (volume {:.2})", self.cues, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(SilentAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            volume: 0.8,
            muted: false,
        }
    }

    /// Set effective volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play the hit cue; backend errors are logged and dropped
    pub fn play_hit_cue(&mut self) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        if let Err(e) = self.sink.play_hit_cue(self.volume) {
            log::warn!("Hit cue failed: {}", e);
        }
    }
}
