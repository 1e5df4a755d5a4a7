pub mod calc;
pub mod config;
pub mod input;
pub mod ipc;
pub mod keypad;
pub mod telemetry;
pub mod terminal_restore;
pub mod theme;
pub mod ui;
pub mod utf8_safe;

mod app;

pub use app::*;
pub use calc::{InputController, InputMode, Outcome};
pub use input::CalcInput;
