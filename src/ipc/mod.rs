//! JSON IPC mode for external UI integration.
//!
//! Protocol:
//! - Each line is a JSON object
//! - Events (calcterm → client): {"event": "...", ...}
//! - Commands (client → calcterm): {"cmd": "...", ...}
//!
//! Commands are handled one at a time on the main thread, in arrival order.

mod protocol;
mod session;

#[cfg(test)]
mod tests;

pub use protocol::{IpcCommand, IpcEvent};
pub use session::{run_ipc_mode, run_ipc_session};
