//! Command-line parsing and validation helpers.

mod defaults;
mod validation;

use clap::{Parser, ValueEnum};

pub use defaults::{DEFAULT_THEME, MAX_EVAL_BYTES};

/// CLI options for calcterm. Validated values keep the run modes unambiguous.
#[derive(Debug, Parser, Clone)]
#[command(about = "calcterm terminal calculator", author, version)]
pub struct AppConfig {
    /// Color theme for the display and keypad
    #[arg(long, env = "CALCTERM_THEME", value_enum, default_value_t = DEFAULT_THEME)]
    pub theme: ThemeName,

    /// Leave mouse capture off (keyboard only)
    #[arg(long = "no-mouse", default_value_t = false)]
    pub no_mouse: bool,

    /// Run in JSON IPC mode for external UI integration
    #[arg(long = "json-ipc", default_value_t = false)]
    pub json_ipc: bool,

    /// Evaluate one expression, print the result, and exit
    #[arg(long, value_name = "EXPR", allow_hyphen_values = true)]
    pub eval: Option<String>,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "CALCTERM_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "CALCTERM_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging buffer contents and expressions (debug log only)
    #[arg(
        long = "log-content",
        env = "CALCTERM_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,
}

impl AppConfig {
    /// True when either debug log or telemetry should be written.
    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}

/// Selectable color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Coral,
    Ansi,
    None,
}

impl ThemeName {
    pub fn label(self) -> &'static str {
        match self {
            ThemeName::Coral => "coral",
            ThemeName::Ansi => "ansi",
            ThemeName::None => "none",
        }
    }
}
