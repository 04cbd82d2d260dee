//! Aria Player Core
//!
//! Platform-agnostic core types, adapter traits, and error handling for
//! Aria Player.
//!
//! The player itself never touches the DOM, the network, or real storage.
//! This crate defines the boundary it talks through:
//! - **Domain Types**: `Track`, `RepeatMode`, `Theme`
//! - **Adapter Traits**: `PreferenceStore` (string key/value persistence),
//!   `MediaTransport` (the host's media element, command side) and
//!   `TransportEvent` (its notification side)
//! - **Playlist Document**: `parse_playlist` for the fetched JSON document
//! - **Preference Snapshot**: `Prefs`, the single serialized form of all
//!   resumable state
//! - **Error Handling**: unified `AriaError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use aria_core::playlist::parse_playlist;
//! use aria_core::store::{MemoryStore, PreferenceStore};
//!
//! let tracks = parse_playlist(
//!     r#"{"tracks": [{"title": "Intro", "artist": "Someone", "src": "intro.mp3"}]}"#,
//! ).unwrap();
//! assert_eq!(tracks[0].title, "Intro");
//!
//! let mut store = MemoryStore::default();
//! store.set("player.volume", "0.5");
//! assert_eq!(store.get("player.volume").as_deref(), Some("0.5"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod playlist;
pub mod prefs;
pub mod store;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use error::{AriaError, Result};
pub use playlist::parse_playlist;
pub use prefs::Prefs;
pub use store::{MemoryStore, PreferenceStore};
pub use transport::{MediaTransport, TransportEvent};
pub use types::{RepeatMode, Theme, Track};
