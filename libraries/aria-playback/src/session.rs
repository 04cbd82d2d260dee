//! Playback session - core state machine
//!
//! Owns the current selection, play/pause state, shuffle and repeat
//! modes, volume, and position, and decides what the transport should do
//! next. UI commands and transport notifications both funnel through
//! here; the presentation layer only mirrors the events this emits.
//!
//! Everything runs on one logical thread: commands and transport events
//! are delivered one at a time, so each method body is atomic with
//! respect to the others. The two asynchronous boundaries (the host's
//! play request and the deferred error skip) come back as
//! `TransportEvent`s / `recover_from_error`, and a stale completion that
//! no longer matches the current selection is a safe no-op.

use tracing::{debug, warn};

use aria_core::{
    AriaError, MediaTransport, PreferenceStore, Prefs, RepeatMode, Result, Theme, Track,
    TransportEvent,
};

use crate::config::SessionConfig;
use crate::events::{Phase, SessionEvent};
use crate::ordering::OrderingEngine;

/// Central playback state machine
pub struct PlaybackSession {
    ordering: OrderingEngine,

    // State
    current: Option<usize>,
    is_playing: bool,
    shuffled: bool,
    repeat: RepeatMode,
    volume: f64,
    position: f64,
    duration: Option<f64>,
    theme: Theme,

    // Persisted selection waiting for the first playlist load
    restore: Option<(i64, f64)>,

    // Whether the transport has been pointed at any source yet
    source_loaded: bool,

    // One-shot deferred seek, applied when the transport reports
    // metadata readiness and preempted by any user-initiated seek
    pending_resume: Option<f64>,

    // Transport error degradation
    recovering: bool,
    playlist_failed: bool,

    config: SessionConfig,
    store: Box<dyn PreferenceStore>,
    transport: Box<dyn MediaTransport>,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl PlaybackSession {
    /// Create a session seeded from the preference store
    ///
    /// Reads the persisted snapshot, pushes the restored volume to the
    /// transport, and queues the events the presentation layer needs to
    /// mirror the restored preferences. The persisted track index and
    /// position are held back until `load_playlist` re-validates them.
    pub fn new(
        store: Box<dyn PreferenceStore>,
        mut transport: Box<dyn MediaTransport>,
        config: SessionConfig,
    ) -> Self {
        let prefs = Prefs::load(store.as_ref());
        transport.set_volume(prefs.volume);

        let mut session = Self {
            ordering: OrderingEngine::new(),
            current: None,
            is_playing: false,
            shuffled: prefs.shuffled,
            repeat: prefs.repeat,
            volume: prefs.volume,
            position: 0.0,
            duration: None,
            theme: prefs.theme,
            restore: Some((prefs.track_index, prefs.position)),
            source_loaded: false,
            pending_resume: None,
            recovering: false,
            playlist_failed: false,
            config,
            store,
            transport,
            pending_events: Vec::new(),
        };

        session.emit(SessionEvent::VolumeChanged {
            volume: session.volume,
        });
        session.emit(SessionEvent::ShuffleChanged {
            shuffled: session.shuffled,
        });
        session.emit(SessionEvent::RepeatChanged {
            mode: session.repeat,
        });
        session.emit(SessionEvent::ThemeChanged {
            theme: session.theme,
        });
        session
    }

    // ===== Playlist =====

    /// Install a freshly fetched canonical playlist
    ///
    /// Rebuilds the presentation order (shuffled if the restored shuffle
    /// flag says so) and reconciles the persisted selection: an index
    /// valid under the new bounds is re-selected paused, with the
    /// persisted position applied once the transport signals readiness.
    /// An invalid index is dropped; the first track is only shown
    /// informationally.
    ///
    /// An empty playlist is an error state the user can only leave by
    /// reloading the page.
    pub fn load_playlist(&mut self, tracks: Vec<Track>) -> Result<()> {
        if tracks.is_empty() {
            self.ordering.set_canonical(Vec::new());
            self.current = None;
            self.is_playing = false;
            self.playlist_failed = true;
            self.source_loaded = false;
            self.emit(SessionEvent::PlaylistFailed {
                message: "Playlist is empty".to_string(),
            });
            return Err(AriaError::EmptyPlaylist);
        }

        self.playlist_failed = false;
        self.source_loaded = false;
        self.ordering.set_canonical(tracks);
        self.ordering.regenerate(self.shuffled, None);

        let (saved_index, saved_position) = self.restore.take().unwrap_or((-1, 0.0));
        let len = self.ordering.len() as i64;
        if (0..len).contains(&saved_index) {
            let index = saved_index as usize;
            self.select_paused(index);
            if saved_position > 0.0 {
                // Keep the restored position as the session position too,
                // or the persist below would overwrite the stored value
                // before the deferred seek fires
                self.pending_resume = Some(saved_position);
                self.position = saved_position;
            }
        } else {
            if saved_index >= 0 {
                debug!(saved_index, len, "persisted index out of bounds, dropped");
            }
            self.current = None;
        }

        self.emit(SessionEvent::OrderChanged);
        self.persist();
        Ok(())
    }

    // ===== Transport commands =====

    /// Flip play/pause; with nothing selected, start the first track
    pub fn toggle_play_pause(&mut self) {
        if self.ordering.is_empty() {
            return;
        }
        match self.current {
            None => self.load_and_play(0),
            Some(_) if self.is_playing => self.pause(),
            Some(_) => self.play(),
        }
    }

    /// Start or resume playback
    pub fn play(&mut self) {
        if self.ordering.is_empty() {
            return;
        }
        match self.current {
            None => self.load_and_play(0),
            Some(index) if !self.source_loaded => self.load_and_play(index),
            Some(_) => {
                self.transport.request_play();
                self.set_playing(true);
            }
        }
    }

    /// Pause playback and record the position
    pub fn pause(&mut self) {
        self.transport.pause();
        self.set_playing(false);
        self.persist();
    }

    /// Advance to the next track, wrapping from last to first
    ///
    /// Wrapping is unconditional; repeat mode only affects what happens
    /// when a track ends on its own.
    pub fn next(&mut self) {
        if self.ordering.is_empty() {
            return;
        }
        let index = match self.current {
            Some(current) => (current + 1) % self.ordering.len(),
            None => 0,
        };
        self.load_and_play(index);
    }

    /// Previous button
    ///
    /// Early in a track this goes back one index (wrapping from the
    /// first track to the last); at or past the restart threshold it
    /// restarts the current track instead, so a double press does not
    /// skip back twice.
    pub fn previous(&mut self) {
        if self.ordering.is_empty() {
            return;
        }
        let Some(current) = self.current else {
            debug!("previous with no selection ignored");
            return;
        };

        if self.position >= self.config.previous_restart_threshold {
            self.transport.seek(0.0);
            self.position = 0.0;
            self.pending_resume = None;
            if !self.is_playing {
                self.transport.request_play();
                self.set_playing(true);
            }
            self.emit_progress();
            self.persist();
            return;
        }

        let index = if current == 0 {
            self.ordering.len() - 1
        } else {
            current - 1
        };
        self.load_and_play(index);
    }

    /// Select a track from the rendered list
    ///
    /// Clicking the selected track toggles play/pause; clicking any
    /// other track switches to it and plays. An out-of-bounds index is
    /// ignored.
    pub fn select(&mut self, index: usize) {
        if index >= self.ordering.len() {
            warn!(index, len = self.ordering.len(), "select out of bounds");
            return;
        }
        if self.current == Some(index) {
            if self.is_playing {
                self.pause();
            } else {
                self.play();
            }
        } else {
            self.load_and_play(index);
        }
    }

    /// Select a track by its identity key
    pub fn select_by_src(&mut self, src: &str) {
        if let Some(index) = self.ordering.index_of(src) {
            self.select(index);
        } else {
            warn!(src, "select by identity: not in current order");
        }
    }

    // ===== Modes =====

    /// Turn shuffle on or off, preserving the current track
    ///
    /// Rebuilds the presentation order and re-points the current index
    /// at the same identity, so playback carries on uninterrupted.
    pub fn set_shuffled(&mut self, shuffled: bool) {
        self.shuffled = shuffled;
        let keep = self
            .current
            .and_then(|i| self.ordering.track_at(i))
            .map(|t| t.src.clone());
        // Re-point the selection at the same identity; with no prior
        // selection the first track of the new order becomes the
        // informational selection, still paused
        self.current = self.ordering.regenerate(shuffled, keep.as_deref());
        self.emit(SessionEvent::ShuffleChanged { shuffled });
        self.emit(SessionEvent::OrderChanged);
        self.emit(SessionEvent::TrackChanged {
            index: self.current,
            track: self.current_track().cloned(),
        });
        self.persist();
    }

    /// Flip the shuffle flag
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffled(!self.shuffled);
    }

    /// Set the repeat mode directly
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.emit(SessionEvent::RepeatChanged { mode });
        self.persist();
    }

    /// Walk the repeat button cycle: off, all, one
    pub fn cycle_repeat(&mut self) {
        self.set_repeat(self.repeat.cycled());
    }

    /// Toggle between light and dark theme
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.emit(SessionEvent::ThemeChanged { theme: self.theme });
        self.persist();
    }

    // ===== Volume & seeking =====

    /// Set the volume, clamped to 0.0..=1.0
    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            warn!(volume, "non-finite volume ignored");
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        self.volume = volume;
        self.transport.set_volume(volume);
        self.emit(SessionEvent::VolumeChanged { volume });
        self.persist();
    }

    /// Nudge the volume, clamping the result to 0.0..=1.0
    pub fn adjust_volume(&mut self, delta: f64) {
        self.set_volume(self.volume + delta);
    }

    /// Seek to a fraction of the current track (position-bar click)
    ///
    /// Ignored until the duration is known. Preempts the one-shot
    /// deferred resume if it has not fired yet.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let Some(duration) = self.duration.filter(|d| *d > 0.0) else {
            debug!("seek before duration is known ignored");
            return;
        };
        if !fraction.is_finite() {
            return;
        }
        let position = fraction.clamp(0.0, 1.0) * duration;
        self.pending_resume = None;
        self.transport.seek(position);
        self.position = position;
        self.emit_progress();
        self.persist();
    }

    // ===== Filtering =====

    /// Presentation-order indices matching a search query
    pub fn filter(&self, query: &str) -> Vec<usize> {
        self.ordering.matching_indices(query)
    }

    // ===== Transport events =====

    /// Feed one transport notification into the state machine
    pub fn on_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::MetadataReady { duration } => {
                if duration.is_some() {
                    self.duration = duration;
                }
                if let Some(position) = self.pending_resume.take() {
                    self.transport.seek(position);
                    self.position = position;
                }
                self.emit_progress();
            }
            TransportEvent::TimeAdvanced { position } => {
                self.position = position.max(0.0);
                self.emit_progress();
                self.persist();
            }
            TransportEvent::Ended => self.handle_track_ended(),
            TransportEvent::Error => self.handle_transport_error(),
            TransportEvent::PlayStarted => {
                // Playing is set optimistically when the request goes
                // out, so a confirmation arriving while paused belongs
                // to a request the user has since countermanded
                if !self.is_playing {
                    debug!("late play confirmation ignored");
                }
            }
            TransportEvent::Paused => {
                if self.is_playing {
                    self.set_playing(false);
                    self.persist();
                }
            }
            TransportEvent::PlayRejected => {
                // Autoplay policy or similar; degrade silently to paused
                warn!("play request rejected by platform");
                self.set_playing(false);
            }
            TransportEvent::VolumeChanged { volume } => {
                if volume.is_finite() {
                    let volume = volume.clamp(0.0, 1.0);
                    if (volume - self.volume).abs() > f64::EPSILON {
                        self.volume = volume;
                        self.emit(SessionEvent::VolumeChanged { volume });
                        self.persist();
                    }
                }
            }
        }
    }

    /// Deferred skip after a transport error
    ///
    /// The host calls this once the `SkipScheduled` delay has elapsed. If
    /// the user has moved on in the meantime (new track, pause), the late
    /// call is a no-op.
    pub fn recover_from_error(&mut self) {
        if !self.recovering {
            return;
        }
        self.recovering = false;
        if self.is_playing {
            self.next();
        }
    }

    // ===== State queries =====

    /// Derived coarse phase
    pub fn phase(&self) -> Phase {
        if self.playlist_failed || self.ordering.is_empty() {
            Phase::Empty
        } else if self.recovering {
            Phase::Recovering
        } else if self.is_playing {
            Phase::Playing
        } else {
            Phase::Idle
        }
    }

    /// Selected index in the presentation order
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.ordering.track_at(i))
    }

    /// Track the metadata display should show: the selection, or the
    /// first track informationally when nothing is selected yet
    pub fn displayed_track(&self) -> Option<&Track> {
        self.current_track().or_else(|| self.ordering.track_at(0))
    }

    /// Whether audio should be running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether shuffle is active
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Current volume, 0.0..=1.0
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Current position in seconds
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Duration of the current track in seconds, when known
    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Current UI theme
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Presentation order, for rendering
    pub fn tracks(&self) -> &[Track] {
        self.ordering.tracks()
    }

    /// Number of tracks in the current order
    pub fn track_count(&self) -> usize {
        self.ordering.len()
    }

    /// Drain queued UI events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    /// Point the transport at `index` and request playback
    fn load_and_play(&mut self, index: usize) {
        let Some(track) = self.ordering.track_at(index) else {
            warn!(index, "load_and_play out of bounds");
            return;
        };
        let src = track.src.clone();
        let track = track.clone();

        self.current = Some(index);
        self.position = 0.0;
        self.duration = track.duration;
        self.pending_resume = None;
        self.recovering = false;
        self.source_loaded = true;

        self.transport.load(&src);
        self.transport.request_play();
        self.set_playing(true);

        self.emit(SessionEvent::TrackChanged {
            index: Some(index),
            track: Some(track),
        });
        self.emit_progress();
        self.persist();
    }

    /// Select `index` without starting playback (session restore)
    fn select_paused(&mut self, index: usize) {
        let Some(track) = self.ordering.track_at(index) else {
            return;
        };
        let src = track.src.clone();
        let track = track.clone();

        self.current = Some(index);
        self.duration = track.duration;
        self.source_loaded = true;
        self.transport.load(&src);

        self.emit(SessionEvent::TrackChanged {
            index: Some(index),
            track: Some(track),
        });
    }

    /// Natural end of the current track
    fn handle_track_ended(&mut self) {
        if self.ordering.is_empty() || self.current.is_none() {
            return;
        }

        match self.repeat {
            RepeatMode::One => {
                self.transport.seek(0.0);
                self.position = 0.0;
                self.transport.request_play();
                self.set_playing(true);
                self.emit_progress();
                self.persist();
            }
            _ => {
                let at_last = self.current == Some(self.ordering.len() - 1);
                if self.repeat == RepeatMode::All || !at_last {
                    self.next();
                } else {
                    // Last track, repeat off: stop where we are
                    self.transport.seek(0.0);
                    self.position = 0.0;
                    self.set_playing(false);
                    self.emit_progress();
                    self.persist();
                }
            }
        }
    }

    /// Transport load/decode failure
    ///
    /// Surfaces the failing track and, if playback was active, schedules
    /// a skip so one bad source cannot stall the whole playlist.
    fn handle_transport_error(&mut self) {
        let Some(index) = self.current else {
            return;
        };
        let src = self
            .ordering
            .track_at(index)
            .map(|t| t.src.clone())
            .unwrap_or_default();
        warn!(index, src = %src, "transport reported an error");
        self.emit(SessionEvent::TrackFailed { index, src });

        if self.is_playing {
            self.recovering = true;
            self.emit(SessionEvent::SkipScheduled {
                delay: self.config.error_skip_delay,
            });
        }
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing != playing {
            self.is_playing = playing;
            self.emit(SessionEvent::StateChanged { playing });
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.pending_events.push(event);
    }

    fn emit_progress(&mut self) {
        self.emit(SessionEvent::Progress {
            position: self.position,
            duration: self.duration,
        });
    }

    /// Write-through persistence of every resumable field
    fn persist(&mut self) {
        let prefs = Prefs {
            track_index: self.current.map_or(-1, |i| i as i64),
            position: self.position,
            volume: self.volume,
            shuffled: self.shuffled,
            repeat: self.repeat,
            theme: self.theme,
        };
        prefs.save(self.store.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aria_core::MemoryStore;

    struct NullTransport;

    impl MediaTransport for NullTransport {
        fn load(&mut self, _src: &str) {}
        fn request_play(&mut self) {}
        fn pause(&mut self) {}
        fn seek(&mut self, _position: f64) {}
        fn set_volume(&mut self, _volume: f64) {}
    }

    fn session() -> PlaybackSession {
        PlaybackSession::new(
            Box::new(MemoryStore::new()),
            Box::new(NullTransport),
            SessionConfig::default(),
        )
    }

    fn tracks(count: usize) -> Vec<Track> {
        (0..count)
            .map(|i| Track::new(format!("Track {i}"), "Artist", format!("{i}.mp3")))
            .collect()
    }

    #[test]
    fn fresh_session_is_empty() {
        let session = session();
        assert_eq!(session.phase(), Phase::Empty);
        assert_eq!(session.current_index(), None);
        assert!(!session.is_playing());
    }

    #[test]
    fn phase_follows_state() {
        let mut session = session();
        session.load_playlist(tracks(2)).unwrap();
        assert_eq!(session.phase(), Phase::Idle);

        session.play();
        assert_eq!(session.phase(), Phase::Playing);

        session.on_transport_event(TransportEvent::Error);
        assert_eq!(session.phase(), Phase::Recovering);

        session.recover_from_error();
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn displayed_track_falls_back_to_first() {
        let mut session = session();
        session.load_playlist(tracks(3)).unwrap();
        assert_eq!(session.current_index(), None);
        assert_eq!(session.displayed_track().unwrap().src, "0.mp3");

        session.select(2);
        assert_eq!(session.displayed_track().unwrap().src, "2.mp3");
    }

    #[test]
    fn commands_on_empty_session_are_noops() {
        let mut session = session();
        session.toggle_play_pause();
        session.next();
        session.previous();
        session.select(0);
        assert_eq!(session.current_index(), None);
        assert!(!session.is_playing());
    }
}
