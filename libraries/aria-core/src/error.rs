/// Core error types for Aria Player
use thiserror::Error;

/// Result type alias using `AriaError`
pub type Result<T> = std::result::Result<T, AriaError>;

/// Core error type for Aria Player
#[derive(Error, Debug)]
pub enum AriaError {
    /// The fetched playlist document had no tracks
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// The playlist document could not be parsed
    #[error("Playlist parse error: {0}")]
    PlaylistParse(#[from] serde_json::Error),

    /// A stored or computed index does not point into the current order
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// No track is currently selected
    #[error("No track selected")]
    NoTrackSelected,

    /// A preference value could not be interpreted
    #[error("Invalid preference value for {key}: {value}")]
    InvalidPreference {
        /// Store key the value was read from
        key: &'static str,
        /// The offending raw value
        value: String,
    },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl AriaError {
    /// Create an invalid preference error
    pub fn invalid_preference(key: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidPreference {
            key,
            value: value.into(),
        }
    }
}
