//! High score persistence
//!
//! A single best score stored as a decimal string.

use crate::persistence::{KvStore, StorageError};

/// Best score across sessions
pub struct HighScore;

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "spaceShooterHighScore";

    /// Parse a stored value from its leading decimal digits.
    ///
    /// Trailing junk is ignored (`"12.5"` is 12); no digits or a negative
    /// value reads as 0.
    pub fn parse(value: &str) -> u64 {
        let value = value.trim_start();
        let value = value.strip_prefix('+').unwrap_or(value);
        let end = value
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(value.len());
        value[..end].parse().unwrap_or(0)
    }

    /// Load the high score, falling back to 0 when missing, corrupt or
    /// unreadable
    pub fn load<S: KvStore + ?Sized>(store: &S) -> u64 {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(value)) => {
                let score = Self::parse(&value);
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                0
            }
        }
    }

    pub fn save<S: KvStore + ?Sized>(store: &mut S, score: u64) -> Result<(), StorageError> {
        store.set(Self::STORAGE_KEY, &score.to_string())?;
        log::info!("High score saved ({})", score);
        Ok(())
    }
}
