use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use super::protocol::{IpcCommand, IpcEvent};
use crate::calc::InputController;
use crate::input::{ButtonAction, CalcInput};
use crate::telemetry::{trace_outcome, TraceSource};
use crate::{log_debug, log_debug_content};

/// Controller plus the sink events are written to.
pub(super) struct IpcSession<W: Write> {
    pub(super) controller: InputController,
    writer: W,
}

impl<W: Write> IpcSession<W> {
    pub(super) fn new(writer: W) -> Self {
        Self {
            controller: InputController::new(),
            writer,
        }
    }

    pub(super) fn send_event(&mut self, event: &IpcEvent) -> Result<()> {
        let json = serde_json::to_string(event).context("failed to encode IPC event")?;
        writeln!(self.writer, "{json}").context("failed to write IPC event")?;
        self.writer.flush().context("failed to flush IPC event")
    }

    pub(super) fn display_event(&self) -> IpcEvent {
        IpcEvent::Display {
            text: self.controller.display_text(),
            buffer: self.controller.buffer().to_string(),
            overwrite: self.controller.is_overwrite(),
        }
    }

    pub(super) fn emit_ready(&mut self) -> Result<()> {
        let event = IpcEvent::Ready {
            version: env!("CARGO_PKG_VERSION").to_string(),
            display: self.controller.display_text(),
        };
        self.send_event(&event)
    }

    /// Handle one raw line. Returns `false` once the client asked to quit.
    pub(super) fn handle_line(&mut self, line: &str) -> Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }
        log_debug_content(&format!("IPC command: {trimmed}"));

        let command = match serde_json::from_str::<IpcCommand>(trimmed) {
            Ok(command) => command,
            Err(err) => {
                log_debug(&format!("IPC parse error: {err}"));
                self.send_event(&IpcEvent::Error {
                    message: format!("invalid command: {err}"),
                })?;
                return Ok(true);
            }
        };
        self.handle_command(command)
    }

    pub(super) fn handle_command(&mut self, command: IpcCommand) -> Result<bool> {
        let input = match command {
            IpcCommand::Quit => return Ok(false),
            IpcCommand::GetDisplay => None,
            IpcCommand::Key { key } => CalcInput::from_key_name(&key),
            IpcCommand::Press { value } => match CalcInput::from_button_value(&value) {
                Some(input) => Some(input),
                None => {
                    self.send_event(&IpcEvent::Error {
                        message: format!("unknown button value: {value}"),
                    })?;
                    return Ok(true);
                }
            },
            IpcCommand::Action { action } => match ButtonAction::from_name(&action) {
                Some(action) => Some(action.to_input()),
                None => {
                    self.send_event(&IpcEvent::Error {
                        message: format!("unknown action: {action}"),
                    })?;
                    return Ok(true);
                }
            },
        };

        if let Some(input) = input {
            let outcome = self.controller.apply(input);
            trace_outcome(TraceSource::Ipc, input, &outcome);
        }
        let event = self.display_event();
        self.send_event(&event)?;
        Ok(true)
    }
}

/// Serve commands from `reader` until end of input or a `quit` command.
pub fn run_ipc_session<R: BufRead, W: Write>(reader: R, writer: W) -> Result<()> {
    let mut session = IpcSession::new(writer);
    session.emit_ready()?;

    for line in reader.lines() {
        let line = line.context("failed to read IPC command")?;
        if !session.handle_line(&line)? {
            break;
        }
    }
    log_debug("IPC session finished");
    Ok(())
}

/// Run the JSON IPC session on stdin/stdout.
pub fn run_ipc_mode() -> Result<()> {
    log_debug("Starting JSON IPC mode");
    tracing::info!(event = "ipc_start");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = run_ipc_session(stdin.lock(), stdout.lock());
    tracing::info!(event = "ipc_end", ok = result.is_ok());
    result
}
