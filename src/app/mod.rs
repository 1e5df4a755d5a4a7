//! Terminal calculator shell: session state plus the file logger that keeps
//! diagnostics off the full-screen UI.

mod logging;
mod state;

#[cfg(test)]
pub(crate) use logging::set_logging_for_tests;
pub use logging::{
    crash_log_path, init_logging, log_debug, log_debug_content, log_file_path, log_panic,
};
pub use state::CalcApp;
