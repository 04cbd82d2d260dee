//! Preference snapshot
//!
//! All resumable state is serialized through one struct and one pair of
//! load/save operations instead of scattered per-field store calls. The
//! store is string-keyed, so every field has a stable textual form.

use tracing::warn;

use crate::store::PreferenceStore;
use crate::types::{RepeatMode, Theme};

/// Store key for the selected track index (`-1` = none)
pub const KEY_TRACK_INDEX: &str = "player.track_index";
/// Store key for the playback position in seconds
pub const KEY_POSITION: &str = "player.position";
/// Store key for the volume, 0.0 to 1.0
pub const KEY_VOLUME: &str = "player.volume";
/// Store key for the shuffle flag
pub const KEY_SHUFFLED: &str = "player.shuffled";
/// Store key for the repeat mode
pub const KEY_REPEAT: &str = "player.repeat";
/// Store key for the UI theme
pub const KEY_THEME: &str = "player.theme";

/// Snapshot of everything the player persists between sessions
#[derive(Debug, Clone, PartialEq)]
pub struct Prefs {
    /// Selected track index in the presentation order, `-1` when none
    pub track_index: i64,

    /// Playback position in seconds
    pub position: f64,

    /// Volume, clamped to 0.0..=1.0
    pub volume: f64,

    /// Whether shuffle was active
    pub shuffled: bool,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// UI theme
    pub theme: Theme,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            track_index: -1,
            position: 0.0,
            volume: 1.0,
            shuffled: false,
            repeat: RepeatMode::Off,
            theme: Theme::Light,
        }
    }
}

impl Prefs {
    /// Read the snapshot from the store
    ///
    /// Missing or unreadable values fall back to their defaults; a half
    /// written store must never prevent the player from starting.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let defaults = Self::default();

        Self {
            track_index: read_parsed(store, KEY_TRACK_INDEX, defaults.track_index),
            position: read_parsed(store, KEY_POSITION, defaults.position).max(0.0),
            volume: read_parsed(store, KEY_VOLUME, defaults.volume).clamp(0.0, 1.0),
            shuffled: store
                .get(KEY_SHUFFLED)
                .map_or(defaults.shuffled, |v| v == "true"),
            repeat: store
                .get(KEY_REPEAT)
                .and_then(|v| RepeatMode::parse(&v))
                .unwrap_or(defaults.repeat),
            theme: store
                .get(KEY_THEME)
                .and_then(|v| Theme::parse(&v))
                .unwrap_or(defaults.theme),
        }
    }

    /// Write the full snapshot back to the store
    pub fn save(&self, store: &mut dyn PreferenceStore) {
        store.set(KEY_TRACK_INDEX, &self.track_index.to_string());
        store.set(KEY_POSITION, &self.position.to_string());
        store.set(KEY_VOLUME, &self.volume.to_string());
        store.set(KEY_SHUFFLED, if self.shuffled { "true" } else { "false" });
        store.set(KEY_REPEAT, self.repeat.as_str());
        store.set(KEY_THEME, self.theme.as_str());
    }
}

fn read_parsed<T: std::str::FromStr + Copy>(
    store: &dyn PreferenceStore,
    key: &'static str,
    default: T,
) -> T {
    match store.get(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "unreadable preference, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn defaults_when_store_is_empty() {
        let store = MemoryStore::new();
        let prefs = Prefs::load(&store);
        assert_eq!(prefs, Prefs::default());
        assert_eq!(prefs.track_index, -1);
        assert_eq!(prefs.volume, 1.0);
    }

    #[test]
    fn save_load_round_trip() {
        let mut store = MemoryStore::new();
        let prefs = Prefs {
            track_index: 4,
            position: 92.5,
            volume: 0.35,
            shuffled: true,
            repeat: RepeatMode::One,
            theme: Theme::Dark,
        };

        prefs.save(&mut store);
        assert_eq!(Prefs::load(&store), prefs);
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(KEY_TRACK_INDEX, "not a number");
        store.set(KEY_VOLUME, "loud");
        store.set(KEY_REPEAT, "sometimes");
        store.set(KEY_THEME, "plaid");

        let prefs = Prefs::load(&store);
        assert_eq!(prefs.track_index, -1);
        assert_eq!(prefs.volume, 1.0);
        assert_eq!(prefs.repeat, RepeatMode::Off);
        assert_eq!(prefs.theme, Theme::Light);
    }

    #[test]
    fn out_of_range_stored_volume_is_clamped() {
        let mut store = MemoryStore::new();
        store.set(KEY_VOLUME, "1.5");
        assert_eq!(Prefs::load(&store).volume, 1.0);

        store.set(KEY_VOLUME, "-0.2");
        assert_eq!(Prefs::load(&store).volume, 0.0);
    }

    #[test]
    fn negative_stored_position_is_reset() {
        let mut store = MemoryStore::new();
        store.set(KEY_POSITION, "-12.0");
        assert_eq!(Prefs::load(&store).position, 0.0);
    }
}
