//! JS-backed adapter implementations
//!
//! `JsPreferenceStore` and `JsTransport` satisfy the core adapter traits
//! by calling into JavaScript functions the host registered. Callback
//! failures are swallowed: a broken host callback must not poison the
//! state machine.

use js_sys::Function;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use aria_core::{MediaTransport, PreferenceStore};

/// One transport command, serialized to the host
///
/// The host applies these to its `<audio>` element:
/// `{"cmd":"load","src":...}`, `{"cmd":"play"}`, `{"cmd":"pause"}`,
/// `{"cmd":"seek","position":...}`, `{"cmd":"setVolume","volume":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum TransportCommand {
    /// Point the element at a new source
    Load {
        /// Source locator
        src: String,
    },
    /// Call `audio.play()`; report the promise outcome back as an event
    Play,
    /// Call `audio.pause()`
    Pause,
    /// Set `audio.currentTime`
    Seek {
        /// Absolute position in seconds
        position: f64,
    },
    /// Set `audio.volume`
    SetVolume {
        /// Volume, 0.0 to 1.0
        volume: f64,
    },
}

/// Preference store backed by two JS callbacks (get, set)
pub(crate) struct JsPreferenceStore {
    get: Function,
    set: Function,
}

impl JsPreferenceStore {
    pub(crate) fn new(get: Function, set: Function) -> Self {
        Self { get, set }
    }
}

impl PreferenceStore for JsPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.get
            .call1(&JsValue::NULL, &JsValue::from_str(key))
            .ok()
            .and_then(|value| value.as_string())
    }

    fn set(&mut self, key: &str, value: &str) {
        self.set
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(key),
                &JsValue::from_str(value),
            )
            .ok();
    }
}

/// Transport that serializes commands to a single JS callback
pub(crate) struct JsTransport {
    on_command: Function,
}

impl JsTransport {
    pub(crate) fn new(on_command: Function) -> Self {
        Self { on_command }
    }

    fn send(&self, command: &TransportCommand) {
        if let Ok(value) = serde_wasm_bindgen::to_value(command) {
            self.on_command.call1(&JsValue::NULL, &value).ok();
        }
    }
}

impl MediaTransport for JsTransport {
    fn load(&mut self, src: &str) {
        self.send(&TransportCommand::Load {
            src: src.to_string(),
        });
    }

    fn request_play(&mut self) {
        self.send(&TransportCommand::Play);
    }

    fn pause(&mut self) {
        self.send(&TransportCommand::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.send(&TransportCommand::Seek { position });
    }

    fn set_volume(&mut self, volume: f64) {
        self.send(&TransportCommand::SetVolume { volume });
    }
}
