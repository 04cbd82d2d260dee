//! WASM-compatible PlaybackSession wrapper

use js_sys::Function;
use wasm_bindgen::prelude::*;

use aria_core::{parse_playlist, RepeatMode, Track, TransportEvent};

use super::bridge::{JsPreferenceStore, JsTransport};
use crate::{Phase, PlaybackSession, SessionConfig, SessionEvent};

/// WASM-compatible playback session
///
/// Wraps the core session with a JavaScript-friendly API. The host
/// registers callbacks for session events and transport commands, feeds
/// `<audio>` element events into the typed intake methods, and renders
/// from the emitted events.
#[wasm_bindgen]
pub struct WasmPlaybackSession {
    inner: PlaybackSession,
    on_event: Option<Function>,
    buffered: Vec<SessionEvent>,
}

#[wasm_bindgen]
impl WasmPlaybackSession {
    /// Create a session
    ///
    /// `store_get`/`store_set` bridge the preference store (usually
    /// `localStorage`); `on_transport_command` receives serialized
    /// transport commands for the host's `<audio>` element.
    #[wasm_bindgen(constructor)]
    pub fn new(store_get: Function, store_set: Function, on_transport_command: Function) -> Self {
        console_error_panic_hook::set_once();

        Self {
            inner: PlaybackSession::new(
                Box::new(JsPreferenceStore::new(store_get, store_set)),
                Box::new(JsTransport::new(on_transport_command)),
                SessionConfig::default(),
            ),
            on_event: None,
            buffered: Vec::new(),
        }
    }

    /// Register the session event callback
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
        // Deliver anything queued during construction
        self.flush_events();
    }

    // ===== Playlist =====

    /// Load a playlist from the fetched JSON document text
    #[wasm_bindgen(js_name = loadPlaylistJson)]
    pub fn load_playlist_json(&mut self, json: &str) -> Result<(), JsValue> {
        let result = match parse_playlist(json) {
            Ok(tracks) => self.inner.load_playlist(tracks),
            Err(err) => Err(err),
        };
        self.flush_events();
        result.map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Load a playlist from an already-parsed array of track objects
    #[wasm_bindgen(js_name = loadPlaylist)]
    pub fn load_playlist(&mut self, tracks: JsValue) -> Result<(), JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {e}")))?;
        let result = self.inner.load_playlist(tracks);
        self.flush_events();
        result.map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // ===== Commands =====

    /// Play/pause button
    #[wasm_bindgen(js_name = togglePlayPause)]
    pub fn toggle_play_pause(&mut self) {
        self.inner.toggle_play_pause();
        self.flush_events();
    }

    /// Start or resume playback
    pub fn play(&mut self) {
        self.inner.play();
        self.flush_events();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.inner.pause();
        self.flush_events();
    }

    /// Next button
    pub fn next(&mut self) {
        self.inner.next();
        self.flush_events();
    }

    /// Previous button
    pub fn previous(&mut self) {
        self.inner.previous();
        self.flush_events();
    }

    /// Track list click
    pub fn select(&mut self, index: usize) {
        self.inner.select(index);
        self.flush_events();
    }

    /// Shuffle button
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self) {
        self.inner.toggle_shuffle();
        self.flush_events();
    }

    /// Set shuffle explicitly
    #[wasm_bindgen(js_name = setShuffled)]
    pub fn set_shuffled(&mut self, shuffled: bool) {
        self.inner.set_shuffled(shuffled);
        self.flush_events();
    }

    /// Repeat button
    #[wasm_bindgen(js_name = cycleRepeat)]
    pub fn cycle_repeat(&mut self) {
        self.inner.cycle_repeat();
        self.flush_events();
    }

    /// Set repeat mode ("off" | "all" | "one")
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = RepeatMode::parse(mode)
            .ok_or_else(|| JsValue::from_str("Invalid repeat mode. Use 'off', 'all', or 'one'"))?;
        self.inner.set_repeat(mode);
        self.flush_events();
        Ok(())
    }

    /// Set volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: f64) {
        self.inner.set_volume(volume);
        self.flush_events();
    }

    /// Nudge volume by a delta
    #[wasm_bindgen(js_name = adjustVolume)]
    pub fn adjust_volume(&mut self, delta: f64) {
        self.inner.adjust_volume(delta);
        self.flush_events();
    }

    /// Position-bar click (fraction 0.0 - 1.0)
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        self.inner.seek_to_fraction(fraction);
        self.flush_events();
    }

    /// Theme button
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) {
        self.inner.toggle_theme();
        self.flush_events();
    }

    /// Deferred skip after a transport error (call after the
    /// `SkipScheduled` delay elapsed)
    #[wasm_bindgen(js_name = recoverFromError)]
    pub fn recover_from_error(&mut self) {
        self.inner.recover_from_error();
        self.flush_events();
    }

    // ===== Transport event intake =====

    /// `loadedmetadata` fired on the audio element
    #[wasm_bindgen(js_name = metadataReady)]
    pub fn metadata_ready(&mut self, duration: Option<f64>) {
        self.feed(TransportEvent::MetadataReady { duration });
    }

    /// `timeupdate` fired
    #[wasm_bindgen(js_name = timeAdvanced)]
    pub fn time_advanced(&mut self, position: f64) {
        self.feed(TransportEvent::TimeAdvanced { position });
    }

    /// `ended` fired
    pub fn ended(&mut self) {
        self.feed(TransportEvent::Ended);
    }

    /// `error` fired
    #[wasm_bindgen(js_name = transportError)]
    pub fn transport_error(&mut self) {
        self.feed(TransportEvent::Error);
    }

    /// `play` fired (or the play() promise resolved)
    #[wasm_bindgen(js_name = playStarted)]
    pub fn play_started(&mut self) {
        self.feed(TransportEvent::PlayStarted);
    }

    /// `pause` fired
    pub fn paused(&mut self) {
        self.feed(TransportEvent::Paused);
    }

    /// The play() promise rejected (autoplay policy)
    #[wasm_bindgen(js_name = playRejected)]
    pub fn play_rejected(&mut self) {
        self.feed(TransportEvent::PlayRejected);
    }

    /// `volumechange` fired
    #[wasm_bindgen(js_name = volumeChanged)]
    pub fn volume_changed(&mut self, volume: f64) {
        self.feed(TransportEvent::VolumeChanged { volume });
    }

    // ===== State queries =====

    /// Coarse phase as a string ("empty" | "idle" | "playing" | "recovering")
    #[wasm_bindgen(js_name = getPhase)]
    pub fn get_phase(&self) -> String {
        match self.inner.phase() {
            Phase::Empty => "empty",
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Recovering => "recovering",
        }
        .to_string()
    }

    /// Whether audio should be running
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    /// Selected index, -1 when none
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> i32 {
        self.inner.current_index().map_or(-1, |i| i as i32)
    }

    /// Number of tracks
    #[wasm_bindgen(js_name = trackCount)]
    pub fn track_count(&self) -> usize {
        self.inner.track_count()
    }

    /// Presentation order as an array of track objects
    #[wasm_bindgen(js_name = getTracks)]
    pub fn get_tracks(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.tracks()).unwrap_or(JsValue::NULL)
    }

    /// Current volume (0.0 - 1.0)
    #[wasm_bindgen(js_name = getVolume)]
    pub fn get_volume(&self) -> f64 {
        self.inner.volume()
    }

    /// Current repeat mode as a string
    #[wasm_bindgen(js_name = getRepeat)]
    pub fn get_repeat(&self) -> String {
        self.inner.repeat().as_str().to_string()
    }

    /// Whether shuffle is active
    #[wasm_bindgen(js_name = isShuffled)]
    pub fn is_shuffled(&self) -> bool {
        self.inner.is_shuffled()
    }

    /// Current theme as a string
    #[wasm_bindgen(js_name = getTheme)]
    pub fn get_theme(&self) -> String {
        self.inner.theme().as_str().to_string()
    }

    /// Current position in seconds
    #[wasm_bindgen(js_name = getPosition)]
    pub fn get_position(&self) -> f64 {
        self.inner.position()
    }

    /// Current track duration in seconds, when known
    #[wasm_bindgen(js_name = getDuration)]
    pub fn get_duration(&self) -> Option<f64> {
        self.inner.duration()
    }

    /// Indices matching a search query, for filtering the track list
    pub fn filter(&self, query: &str) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.filter(query)).unwrap_or(JsValue::NULL)
    }

    // ===== Internals =====

    fn feed(&mut self, event: TransportEvent) {
        self.inner.on_transport_event(event);
        self.flush_events();
    }

    fn flush_events(&mut self) {
        self.buffered.extend(self.inner.take_events());

        let Some(ref callback) = self.on_event else {
            // No listener yet; hold events until onEvent registers
            return;
        };

        for event in self.buffered.drain(..) {
            if let Ok(value) = serde_wasm_bindgen::to_value(&event) {
                callback.call1(&JsValue::NULL, &value).ok();
            }
        }
    }
}
