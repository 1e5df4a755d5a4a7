//! Structured trace of calculator sessions as JSON lines.
//!
//! Events name what happened (`evaluate`, `rejected`, session start/end) and
//! never carry the buffer, so the trace is safe to share without
//! `--log-content`.

use crate::calc::Outcome;
use crate::config::AppConfig;
use crate::input::CalcInput;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::UtcTime;

/// Where the trace came from, recorded on every outcome event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceSource {
    Tui,
    Ipc,
}

impl TraceSource {
    fn label(self) -> &'static str {
        match self {
            TraceSource::Tui => "tui",
            TraceSource::Ipc => "ipc",
        }
    }
}

static TRACE_FILE: OnceLock<Option<PathBuf>> = OnceLock::new();

/// JSON-lines trace file, overridable with `CALCTERM_TRACE_LOG`.
pub fn tracing_log_path() -> PathBuf {
    env::var_os("CALCTERM_TRACE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("calcterm_trace.jsonl"))
}

/// Install the global JSON subscriber when logging is enabled. Returns the
/// trace file in use, or `None` when tracing is off or the file can't be opened.
pub fn init_tracing(config: &AppConfig) -> Option<PathBuf> {
    if !config.logging_enabled() {
        return None;
    }
    TRACE_FILE
        .get_or_init(|| {
            let path = tracing_log_path();
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .ok()?;
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok()?;
            Some(path)
        })
        .clone()
}

/// Emit the trace event for one controller outcome. Plain edits are not traced.
pub fn trace_outcome(source: TraceSource, input: CalcInput, outcome: &Outcome) {
    let source = source.label();
    match outcome {
        Outcome::Changed => {}
        Outcome::Rejected => tracing::debug!(event = "rejected", source, input = ?input),
        Outcome::Evaluated(_) => tracing::info!(event = "evaluate", source, ok = true),
        Outcome::Failed(err) => {
            tracing::info!(event = "evaluate", source, ok = false, reason = %err)
        }
    }
}
