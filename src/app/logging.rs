//! Debug and crash logs in the temp dir. The full-screen UI owns stdout, so
//! anything worth keeping goes to a capped file instead.

use crate::config::AppConfig;
use std::{
    env,
    fs::{self, OpenOptions},
    io::Write,
    panic,
    path::PathBuf,
    sync::{
        atomic::{AtomicU8, Ordering},
        Mutex, MutexGuard,
    },
    time::{SystemTime, UNIX_EPOCH},
};

/// How much the logs may record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
enum Detail {
    Off = 0,
    /// Events and errors, never what was typed.
    Metadata = 1,
    /// Also expressions, buffers, and panic payloads.
    Content = 2,
}

impl Detail {
    fn from_flags(enabled: bool, content: bool) -> Self {
        match (enabled, content) {
            (false, _) => Detail::Off,
            (true, false) => Detail::Metadata,
            (true, true) => Detail::Content,
        }
    }

    fn current() -> Self {
        match DETAIL.load(Ordering::Relaxed) {
            2 => Detail::Content,
            1 => Detail::Metadata,
            _ => Detail::Off,
        }
    }
}

static DETAIL: AtomicU8 = AtomicU8::new(Detail::Off as u8);
static DEBUG_SINK: Mutex<Option<DebugSink>> = Mutex::new(None);

#[derive(Debug, Clone, Copy)]
enum LogFile {
    Debug,
    Crash,
}

impl LogFile {
    fn path(self) -> PathBuf {
        let name = match self {
            LogFile::Debug => "calcterm.log",
            LogFile::Crash => "calcterm_crash.log",
        };
        env::temp_dir().join(name)
    }

    fn max_bytes(self) -> u64 {
        match self {
            LogFile::Debug => 5 * 1024 * 1024,
            LogFile::Crash => 256 * 1024,
        }
    }
}

/// Path to the debug log, truncated once it passes 5 MB.
pub fn log_file_path() -> PathBuf {
    LogFile::Debug.path()
}

/// Path to the crash log (location and version only, unless content logging is on).
pub fn crash_log_path() -> PathBuf {
    LogFile::Crash.path()
}

/// Open `target` for appending, starting it over when `incoming` more bytes
/// would push it past its cap. Returns the handle and the bytes already in it.
fn open_capped(target: LogFile, incoming: u64) -> Option<(fs::File, u64)> {
    let path = target.path();
    let existing = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    let restart = existing.saturating_add(incoming) > target.max_bytes();
    let mut options = OpenOptions::new();
    options.create(true);
    if restart {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    let file = options.open(&path).ok()?;
    Some((file, if restart { 0 } else { existing }))
}

struct DebugSink {
    file: fs::File,
    written: u64,
}

impl DebugSink {
    fn open() -> Option<Self> {
        let (file, written) = open_capped(LogFile::Debug, 0)?;
        Some(Self { file, written })
    }

    fn append(&mut self, line: &str) {
        let len = line.len() as u64;
        if self.written.saturating_add(len) > LogFile::Debug.max_bytes() {
            let Some((file, written)) = open_capped(LogFile::Debug, len) else {
                return;
            };
            self.file = file;
            self.written = written;
        }
        if self.file.write_all(line.as_bytes()).is_ok() {
            self.written = self.written.saturating_add(len);
        }
    }
}

fn debug_sink() -> MutexGuard<'static, Option<DebugSink>> {
    DEBUG_SINK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn stamped(msg: &str) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("[{secs}] {msg}\n")
}

fn set_detail(detail: Detail) {
    DETAIL.store(detail as u8, Ordering::Relaxed);
    *debug_sink() = if detail == Detail::Off {
        None
    } else {
        DebugSink::open()
    };
}

/// Apply `--logs`, `--no-logs`, and `--log-content`.
pub fn init_logging(config: &AppConfig) {
    set_detail(Detail::from_flags(
        config.logging_enabled(),
        config.log_content,
    ));
}

pub fn log_debug(msg: &str) {
    if Detail::current() == Detail::Off {
        return;
    }
    if let Some(sink) = debug_sink().as_mut() {
        sink.append(&stamped(msg));
    }
}

/// Like [`log_debug`], for messages that carry what the user typed.
pub fn log_debug_content(msg: &str) {
    if Detail::current() == Detail::Content {
        log_debug(msg);
    }
}

fn panic_message(info: &panic::PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .map(|text| (*text).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

/// Record a panic in the crash log. The payload is withheld unless content
/// logging is on, since it may quote an expression.
pub fn log_panic(info: &panic::PanicHookInfo<'_>) {
    let detail = Detail::current();
    if detail == Detail::Off {
        return;
    }
    let location = info
        .location()
        .map(|loc| format!("{}:{}", loc.file(), loc.line()))
        .unwrap_or_else(|| "unknown".to_string());
    let payload = if detail == Detail::Content {
        panic_message(info)
    } else {
        "payload withheld (--log-content off)".to_string()
    };
    let line = stamped(&format!(
        "calcterm {} panicked at {location}: {payload}",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some((mut file, _)) = open_capped(LogFile::Crash, line.len() as u64) {
        let _ = file.write_all(line.as_bytes());
    }
}

#[cfg(test)]
pub(crate) fn set_logging_for_tests(enabled: bool, content_enabled: bool) {
    set_detail(Detail::from_flags(enabled, content_enabled));
}
