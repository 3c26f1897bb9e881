//! Game settings and preferences
//!
//! Persisted separately from the high score, one key per setting.

use crate::persistence::{KvStore, StorageError};

/// Player preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    /// All audio silenced
    pub muted: bool,
}

impl Settings {
    /// Storage key for the mute flag
    pub const MUTED_KEY: &'static str = "spaceShooterMuted";

    /// Load settings; missing or unreadable values keep their defaults.
    ///
    /// Only the exact string `"true"` mutes.
    pub fn load<S: KvStore + ?Sized>(store: &S) -> Self {
        let muted = match store.get(Self::MUTED_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                log::warn!("Could not read settings, using defaults: {}", e);
                false
            }
        };
        Self { muted }
    }

    pub fn save<S: KvStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        store.set(Self::MUTED_KEY, if self.muted { "true" } else { "false" })?;
        log::info!("Settings saved (muted: {})", self.muted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_when_missing() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_muted_round_trip() {
        let mut store = MemoryStore::new();
        Settings { muted: true }.save(&mut store).unwrap();
        assert_eq!(
            store.get(Settings::MUTED_KEY).unwrap().as_deref(),
            Some("true")
        );
        assert!(Settings::load(&store).muted);

        Settings { muted: false }.save(&mut store).unwrap();
        assert!(!Settings::load(&store).muted);
    }

    #[test]
    fn test_only_exact_true_mutes() {
        let mut store = MemoryStore::new();
        for value in ["TRUE", "1", "yes", ""] {
            store.set(Settings::MUTED_KEY, value).unwrap();
            assert!(!Settings::load(&store).muted, "{value:?} should not mute");
        }
    }
}
