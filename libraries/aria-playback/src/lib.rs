//! Aria Player - Playback Session
//!
//! Platform-agnostic playback state machine and playlist ordering for
//! Aria Player.
//!
//! This crate provides:
//! - The playback session: selection, play/pause, next/previous with the
//!   3-second restart rule, repeat modes (Off, All, One), volume, and
//!   position restore across page loads
//! - The ordering engine: canonical playlist vs. shuffled presentation
//!   order, with identity-preserving shuffle toggles and text filtering
//! - Event-based UI synchronization (`SessionEvent`)
//! - An optional `wasm` feature exposing a JavaScript-friendly wrapper
//!   for the browser host
//!
//! # Architecture
//!
//! `aria-playback` never touches the DOM, the network, or storage. The
//! host supplies a `PreferenceStore` and a `MediaTransport` (from
//! `aria-core`), feeds transport notifications in as `TransportEvent`s,
//! and mirrors the `SessionEvent`s the session emits. All calls happen on
//! one logical thread; a host with real concurrency must serialize them.
//!
//! # Example
//!
//! ```rust
//! use aria_core::{MediaTransport, MemoryStore, Track};
//! use aria_playback::{PlaybackSession, SessionConfig};
//!
//! struct SilentTransport;
//!
//! impl MediaTransport for SilentTransport {
//!     fn load(&mut self, _src: &str) {}
//!     fn request_play(&mut self) {}
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _position: f64) {}
//!     fn set_volume(&mut self, _volume: f64) {}
//! }
//!
//! let mut session = PlaybackSession::new(
//!     Box::new(MemoryStore::new()),
//!     Box::new(SilentTransport),
//!     SessionConfig::default(),
//! );
//!
//! session.load_playlist(vec![
//!     Track::new("First", "Someone", "first.mp3"),
//!     Track::new("Second", "Someone", "second.mp3"),
//! ]).unwrap();
//!
//! session.toggle_play_pause();
//! assert!(session.is_playing());
//! assert_eq!(session.current_index(), Some(0));
//!
//! session.next();
//! assert_eq!(session.current_index(), Some(1));
//! ```

#![forbid(unsafe_code)]

mod config;
mod events;
mod ordering;
mod session;
mod shuffle;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use config::SessionConfig;
pub use events::{Phase, SessionEvent};
pub use ordering::OrderingEngine;
pub use session::PlaybackSession;
