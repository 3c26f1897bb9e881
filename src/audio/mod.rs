//! Sound cues and background music
//!
//! The simulation never talks to audio directly: the game driver turns each
//! [`GameEvent`](crate::sim::GameEvent) into a call on an [`AudioSink`].
//! Backends must never block and their failures are only logged.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

use rand::Rng;
use thiserror::Error;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Enemy destroyed
    Explosion,
    /// Player hit, descending four-note phrase
    GameOver,
    /// Run started, rising major chord
    GameStart,
}

/// Errors from an audio backend
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio backend unavailable")]
    Unavailable,
    #[error("audio backend error: {0}")]
    Backend(String),
}

/// Looping melody for the background track (C E G C E F G E)
pub const MELODY_HZ: [f32; 8] = [523.0, 659.0, 784.0, 523.0, 659.0, 698.0, 784.0, 659.0];

/// Time between melody notes
pub const NOTE_INTERVAL_MS: f64 = 800.0;

/// Length of the explosion noise burst
pub const EXPLOSION_SECS: f64 = 0.3;

/// White noise with a quadratic fade-out, `len` samples in `[-1, 1]`
pub fn explosion_noise<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let fade = 1.0 - i as f32 / len as f32;
            (rng.random::<f32>() * 2.0 - 1.0) * fade * fade
        })
        .collect()
}

/// Decides when the next background note is due.
///
/// Pure timing state; backends ask it for a note every frame and synthesize
/// whatever it returns.
#[derive(Debug, Clone, Default)]
pub struct MusicSequencer {
    playing: bool,
    next_note_ms: Option<f64>,
    note_index: usize,
}

impl MusicSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Begin the loop; the first note plays on the next poll
    pub fn start(&mut self) {
        if !self.playing {
            self.playing = true;
            self.next_note_ms = None;
        }
    }

    /// Stop and rewind to the first note
    pub fn stop(&mut self) {
        self.playing = false;
        self.next_note_ms = None;
        self.note_index = 0;
    }

    /// Frequency of the note due at `now_ms`, if any
    pub fn poll(&mut self, now_ms: f64) -> Option<f32> {
        if !self.playing {
            return None;
        }
        if let Some(next) = self.next_note_ms {
            if now_ms < next {
                return None;
            }
        }
        let freq = MELODY_HZ[self.note_index % MELODY_HZ.len()];
        self.note_index += 1;
        self.next_note_ms = Some(now_ms + NOTE_INTERVAL_MS);
        Some(freq)
    }
}

/// Audio collaborator interface
pub trait AudioSink {
    /// Play a one-shot effect. Muted sinks return `Ok` without playing.
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError>;

    /// Start the background loop (ignored while muted)
    fn music_start(&mut self) -> Result<(), AudioError>;

    /// Stop the background loop
    fn music_stop(&mut self);

    /// Mute or unmute everything; muting also stops music
    fn set_muted(&mut self, muted: bool);

    fn is_muted(&self) -> bool;

    /// Advance time-driven audio (background melody). Called once per frame.
    fn update(&mut self, _now_ms: f64) -> Result<(), AudioError> {
        Ok(())
    }

    fn shoot(&mut self) -> Result<(), AudioError> {
        self.play(SoundEffect::Shoot)
    }

    fn explosion(&mut self) -> Result<(), AudioError> {
        self.play(SoundEffect::Explosion)
    }

    fn game_over(&mut self) -> Result<(), AudioError> {
        self.play(SoundEffect::GameOver)
    }

    fn game_start(&mut self) -> Result<(), AudioError> {
        self.play(SoundEffect::GameStart)
    }
}

/// Audio sink for headless runs: logs each cue instead of playing it
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
    music: MusicSequencer,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_music_playing(&self) -> bool {
        self.music.is_playing()
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        if !self.muted {
            log::debug!("sfx: {:?}", effect);
        }
        Ok(())
    }

    fn music_start(&mut self) -> Result<(), AudioError> {
        if !self.muted {
            self.music.start();
            log::debug!("music: start");
        }
        Ok(())
    }

    fn music_stop(&mut self) {
        if self.music.is_playing() {
            log::debug!("music: stop");
        }
        self.music.stop();
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.music_stop();
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn update(&mut self, now_ms: f64) -> Result<(), AudioError> {
        if let Some(freq) = self.music.poll(now_ms) {
            log::trace!("music: note {} Hz", freq);
        }
        Ok(())
    }
}
