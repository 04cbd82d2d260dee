//! Domain types shared across the player

use serde::{Deserialize, Serialize};

/// A single playlist entry as delivered by the playlist source
///
/// Immutable once created. The `src` locator doubles as the track's
/// identity key: it is how the session re-finds "the same track" after
/// the presentation order has been reshuffled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Source locator handed to the media transport (identity key)
    pub src: String,

    /// Cover art locator (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,

    /// Duration in seconds, when the playlist document carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Track {
    /// Create a track with just the required fields
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            src: src.into(),
            cover: None,
            duration: None,
        }
    }
}

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the last track ends
    Off,

    /// Loop the whole playlist
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Next mode in the cycle the repeat button walks through
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Stable string form used by the preference store
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }

    /// Parse the stored string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "off" => Some(Self::Off),
            "all" => Some(Self::All),
            "one" => Some(Self::One),
            _ => None,
        }
    }
}

impl Default for RepeatMode {
    fn default() -> Self {
        Self::Off
    }
}

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    /// Light theme
    Light,

    /// Dark theme
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stable string form used by the preference store
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse the stored string form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_mode_cycles_through_all_modes() {
        assert_eq!(RepeatMode::Off.cycled(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycled(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycled(), RepeatMode::Off);
    }

    #[test]
    fn repeat_mode_string_round_trip() {
        for mode in [RepeatMode::Off, RepeatMode::All, RepeatMode::One] {
            assert_eq!(RepeatMode::parse(mode.as_str()), Some(mode));
        }
        assert_eq!(RepeatMode::parse("shuffle"), None);
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("blue"), None);
    }

    #[test]
    fn track_creation() {
        let track = Track::new("My Song", "Someone", "music/song.mp3");
        assert_eq!(track.title, "My Song");
        assert_eq!(track.src, "music/song.mp3");
        assert!(track.cover.is_none());
        assert!(track.duration.is_none());
    }
}
