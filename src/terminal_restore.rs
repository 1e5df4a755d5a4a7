//! Raw-mode / alternate-screen / mouse-capture bookkeeping.
//!
//! Every mode switched on is recorded in a process-wide flag so the panic hook
//! can undo exactly what was enabled, even when the guard never gets dropped.

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicBool, Ordering},
        OnceLock,
    },
};

static RAW_MODE_ENABLED: AtomicBool = AtomicBool::new(false);
static ALT_SCREEN_ENABLED: AtomicBool = AtomicBool::new(false);
static MOUSE_CAPTURE_ENABLED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

/// RAII guard that puts the terminal into calculator mode and restores it on drop.
pub struct TerminalRestoreGuard;

impl TerminalRestoreGuard {
    /// Enable raw mode, switch to the alternate screen, hide the cursor, and
    /// optionally capture mouse clicks for the keypad.
    pub fn enter(stdout: &mut impl Write, mouse: bool) -> io::Result<Self> {
        install_terminal_panic_hook();
        let guard = TerminalRestoreGuard;

        enable_raw_mode()?;
        RAW_MODE_ENABLED.store(true, Ordering::SeqCst);

        execute!(stdout, EnterAlternateScreen, Hide)?;
        ALT_SCREEN_ENABLED.store(true, Ordering::SeqCst);

        if mouse {
            execute!(stdout, EnableMouseCapture)?;
            MOUSE_CAPTURE_ENABLED.store(true, Ordering::SeqCst);
        }
        Ok(guard)
    }

    pub fn restore(&self) {
        restore_terminal();
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Undo whatever terminal modes are still recorded as enabled. Safe to call twice.
pub fn restore_terminal() {
    if RAW_MODE_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = disable_raw_mode();
    }
    let mut stdout = io::stdout();
    if MOUSE_CAPTURE_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = execute!(stdout, DisableMouseCapture);
    }
    if ALT_SCREEN_ENABLED.swap(false, Ordering::SeqCst) {
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
    let _ = execute!(stdout, Show);
    let _ = stdout.flush();
}

pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            crate::log_panic(info);
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            crate::log_debug(&format!("panic at {location}"));
            previous(info);
        }));
    });
}
