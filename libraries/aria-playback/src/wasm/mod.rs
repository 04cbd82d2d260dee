//! WASM bindings for browser hosts
//!
//! Exposes the playback session to JavaScript. The browser side keeps
//! ownership of the real `<audio>` element and `localStorage`; the
//! bridges here forward commands out through registered callbacks and
//! feed DOM events back in.

mod bridge;
mod session;

pub use bridge::TransportCommand;
pub use session::WasmPlaybackSession;
