//! Session events
//!
//! Event-based communication for UI synchronization. The session appends
//! events to an internal queue as commands and transport notifications
//! mutate its state; the presentation layer drains the queue with
//! `PlaybackSession::take_events` and mirrors each event into the
//! visuals. Events carry everything the projection needs so it never has
//! to make decisions of its own.

use std::time::Duration;

use aria_core::{RepeatMode, Theme, Track};
use serde::{Deserialize, Serialize};

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Playing/paused flipped
    StateChanged {
        /// Whether audio should be running now
        playing: bool,
    },

    /// The selected track changed
    TrackChanged {
        /// New index into the presentation order, `None` when deselected
        index: Option<usize>,
        /// The selected track's descriptor, for the metadata display
        track: Option<Track>,
    },

    /// The presentation order was rebuilt (playlist load or shuffle
    /// toggle); the track list needs re-rendering
    OrderChanged,

    /// Periodic playback progress
    Progress {
        /// Position in seconds
        position: f64,
        /// Duration in seconds, when known
        duration: Option<f64>,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume, 0.0 to 1.0
        volume: f64,
    },

    /// Shuffle flag flipped
    ShuffleChanged {
        /// Whether shuffle is now active
        shuffled: bool,
    },

    /// Repeat mode changed
    RepeatChanged {
        /// The new mode
        mode: RepeatMode,
    },

    /// UI theme changed
    ThemeChanged {
        /// The new theme
        theme: Theme,
    },

    /// The playlist could not be loaded; the track list should be
    /// cleared and the message shown until the page is reloaded
    PlaylistFailed {
        /// Human-readable failure description
        message: String,
    },

    /// The transport reported a load/decode failure for a track; shown
    /// inline in place of the track metadata
    TrackFailed {
        /// Index of the failing track in the presentation order
        index: usize,
        /// Its source locator, for the inline error text
        src: String,
    },

    /// The session wants to skip past a failing track once `delay` has
    /// elapsed; the host should call `recover_from_error` then
    SkipScheduled {
        /// How long to wait before delivering the skip
        delay: Duration,
    },
}

/// Coarse session phase, derived from state for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No playlist loaded (or the load failed)
    Empty,

    /// Track list present, nothing playing
    Idle,

    /// Audio running
    Playing,

    /// A transport error was reported and a skip is pending
    Recovering,
}
