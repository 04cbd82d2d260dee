//! Media transport adapter
//!
//! The host platform owns the actual media element. The session drives it
//! through `MediaTransport` and hears back through `TransportEvent`s.
//!
//! Commands are fire-and-forget: a play request in particular is
//! asynchronous on every real platform (autoplay policy, buffering), so
//! its outcome arrives later as `PlayStarted` or `PlayRejected`. The
//! session must treat a late outcome that no longer matches its current
//! track as a no-op.

use serde::{Deserialize, Serialize};

/// Command surface of the host's media element
pub trait MediaTransport {
    /// Point the element at a new source locator
    fn load(&mut self, src: &str);

    /// Ask the element to start playing the loaded source
    ///
    /// The outcome is delivered as `TransportEvent::PlayStarted` or
    /// `TransportEvent::PlayRejected`, never synchronously.
    fn request_play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Seek to an absolute position in seconds
    fn seek(&mut self, position: f64);

    /// Set output volume, 0.0 to 1.0
    fn set_volume(&mut self, volume: f64);
}

/// Notifications emitted by the host's media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TransportEvent {
    /// Metadata for the loaded source is available; seeking is now reliable
    MetadataReady {
        /// Total duration in seconds, when the platform knows it
        duration: Option<f64>,
    },

    /// Periodic position update
    TimeAdvanced {
        /// Current position in seconds
        position: f64,
    },

    /// The current source played to its end
    Ended,

    /// The element failed to load or decode the current source
    Error,

    /// A play request was accepted and audio is running
    PlayStarted,

    /// Playback was paused (by command or by the platform)
    Paused,

    /// A play request was declined, e.g. by autoplay policy
    PlayRejected,

    /// Output volume changed on the element
    VolumeChanged {
        /// New volume, 0.0 to 1.0
        volume: f64,
    },
}
