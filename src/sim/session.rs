//! Session phase transitions
//!
//! ```text
//! Menu ──start──▶ Playing ──player hit──▶ GameOver ──start──▶ Playing
//!                                            └──────menu─────▶ Menu
//! ```
//!
//! There is no pause and no win: a run only ends when the player is hit.

use super::state::{GameEvent, GamePhase, GameState};

impl GameState {
    /// Begin a fresh run from the menu or the game-over screen.
    ///
    /// Returns false (and does nothing) while a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        self.reset_run();
        self.phase = GamePhase::Playing;
        self.emit(GameEvent::GameStart);
        self.emit(GameEvent::MusicStart);
        log::info!("Run started (high score {})", self.high_score);
        true
    }

    /// Leave the game-over screen for the menu. Entities are left as they were.
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::Menu;
        true
    }

    /// End the current run after the player was hit
    pub(crate) fn end_run(&mut self) {
        self.phase = GamePhase::GameOver;
        self.emit(GameEvent::GameOver);
        self.emit(GameEvent::MusicStop);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.new_high_score = true;
            self.emit(GameEvent::NewHighScore(self.score));
        }
        log::info!(
            "Game over after {} ticks: score {}{}",
            self.time_ticks,
            self.score,
            if self.new_high_score { " (new high score)" } else { "" }
        );
    }
}
