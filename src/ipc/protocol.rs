//! JSON-lines protocol for driving the calculator from an external UI.
//!
//! Each line is one JSON object. Commands carry a `"cmd"` tag and events a
//! `"event"` tag.

use serde::{Deserialize, Serialize};

// ============================================================================
// IPC Events (calcterm → client)
// ============================================================================

/// Events emitted on stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum IpcEvent {
    /// Sent once on startup
    #[serde(rename = "ready")]
    Ready { version: String, display: String },

    /// Display state after a command
    #[serde(rename = "display")]
    Display {
        text: String,
        buffer: String,
        overwrite: bool,
    },

    /// Malformed or unknown command; the session keeps going
    #[serde(rename = "error")]
    Error { message: String },
}

// ============================================================================
// IPC Commands (client → calcterm)
// ============================================================================

/// Commands read from stdin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd")]
pub enum IpcCommand {
    /// Click a button that carries a literal value (`"7"`, `"."`, `"+"`, `"("`)
    #[serde(rename = "press")]
    Press { value: String },

    /// Click a button that carries a named action (`clear`, `back`, `calculate`, `percent`)
    #[serde(rename = "action")]
    Action { action: String },

    /// Key press using browser-style key names (`"7"`, `"Enter"`, `"Escape"`)
    #[serde(rename = "key")]
    Key { key: String },

    /// Re-emit the current display
    #[serde(rename = "get_display")]
    GetDisplay,

    /// End the session
    #[serde(rename = "quit")]
    Quit,
}
