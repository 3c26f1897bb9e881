//! Frame driver
//!
//! [`Game`] owns the session state and its collaborators. Each frame it runs
//! at most one tick, then drains the tick's events into audio and storage.
//! Collaborator failures are logged and never interrupt the simulation.

use crate::audio::{AudioError, AudioSink};
use crate::highscores::HighScore;
use crate::persistence::KvStore;
use crate::renderer::Frame;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, InputSnapshot, KeyBindings, TickInput};
use crate::sim::{autopilot, tick};
use crate::tuning::Tuning;

/// A running game: state plus storage, audio and keyboard
pub struct Game<S: KvStore, A: AudioSink> {
    state: GameState,
    store: S,
    audio: A,
    settings: Settings,
    keys: InputSnapshot,
    bindings: KeyBindings,
    /// Ignore the keyboard and let the AI play
    autopilot: bool,
}

impl<S: KvStore, A: AudioSink> Game<S, A> {
    /// Load persisted settings and high score, then sit in the menu
    pub fn new(tuning: Tuning, seed: u64, store: S, mut audio: A) -> Self {
        let settings = Settings::load(&store);
        let mut state = GameState::new(tuning, seed);
        state.high_score = HighScore::load(&store);
        audio.set_muted(settings.muted);
        log::info!(
            "Game ready (seed {}, high score {}, muted {})",
            seed,
            state.high_score,
            settings.muted
        );
        Self {
            state,
            store,
            audio,
            settings,
            keys: InputSnapshot::new(),
            bindings: KeyBindings::default(),
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Give back the store (e.g. to reload from it)
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn autopilot_enabled(&self) -> bool {
        self.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Start a run from the menu or the game-over screen.
    ///
    /// Returns whether a run started; the caller begins scheduling frames.
    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.keys.clear();
        self.dispatch_events();
        true
    }

    /// Go back to the menu from the game-over screen
    pub fn menu(&mut self) -> bool {
        self.state.return_to_menu()
    }

    pub fn key_down(&mut self, key: &str) {
        self.keys.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.keys.key_up(key);
    }

    /// Run one frame at clock reading `now_ms`.
    ///
    /// Returns true while another frame must be scheduled; false once the run
    /// is over (or none is in progress), which halts the frame loop.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if self.state.phase == GamePhase::Playing {
            let input = if self.autopilot {
                autopilot(&self.state)
            } else {
                TickInput::from_keys(&self.keys, &self.bindings)
            };
            tick(&mut self.state, &input, now_ms);
            self.dispatch_events();
        }

        if let Err(e) = self.audio.update(now_ms) {
            log::warn!("Background music failed: {}", e);
        }

        self.state.phase == GamePhase::Playing
    }

    /// View for the renderer
    pub fn view(&self) -> Frame<'_> {
        Frame::from_state(&self.state)
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    /// Mute or unmute, persisting the choice
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.audio.set_muted(muted);
        if !muted && self.state.phase == GamePhase::Playing {
            cue("music start", self.audio.music_start());
        }
        if let Err(e) = self.settings.save(&mut self.store) {
            log::warn!("Could not save settings: {}", e);
        }
    }

    /// Flip mute; returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.audio.is_muted();
        self.set_muted(muted);
        muted
    }

    /// Forward queued events to audio and storage
    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            log::debug!("event: {:?}", event);
            match event {
                GameEvent::Shoot => cue("shoot", self.audio.shoot()),
                GameEvent::Explosion => cue("explosion", self.audio.explosion()),
                GameEvent::GameOver => cue("game over", self.audio.game_over()),
                GameEvent::GameStart => cue("game start", self.audio.game_start()),
                GameEvent::MusicStart => cue("music start", self.audio.music_start()),
                GameEvent::MusicStop => self.audio.music_stop(),
                GameEvent::NewHighScore(score) => {
                    if let Err(e) = HighScore::save(&mut self.store, score) {
                        log::warn!("Could not save high score: {}", e);
                    }
                }
            }
        }
    }
}

/// Log a failed audio cue and carry on
fn cue(name: &str, result: Result<(), AudioError>) {
    if let Err(e) = result {
        log::warn!("Could not play {} sound: {}", name, e);
    }
}
