//! Session state shared by the terminal loop and the renderer.

use crate::calc::{InputController, InputMode, Outcome};
use crate::config::AppConfig;
use crate::input::CalcInput;
use crate::telemetry::{trace_outcome, TraceSource};
use crate::theme::Palette;

use super::logging::{log_debug, log_debug_content};

/// Central application state: one controller plus what the screen needs around it.
pub struct CalcApp {
    config: AppConfig,
    controller: InputController,
    palette: Palette,
    status: String,
    last_press: Option<CalcInput>,
    redraw: bool,
}

impl CalcApp {
    pub fn new(config: AppConfig) -> Self {
        let palette = Palette::for_theme(config.theme);
        Self {
            config,
            controller: InputController::new(),
            palette,
            status: "Ready".to_string(),
            last_press: None,
            redraw: true,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn controller(&self) -> &InputController {
        &self.controller
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Text for the display panel.
    pub fn display_text(&self) -> String {
        self.controller.display_text()
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn last_press(&self) -> Option<CalcInput> {
        self.last_press
    }

    /// Feed one input to the controller and update the status line.
    pub fn handle_input(&mut self, input: CalcInput) -> Outcome {
        let outcome = self.controller.apply(input);
        self.last_press = Some(input);
        self.redraw = true;
        trace_outcome(TraceSource::Tui, input, &outcome);
        match &outcome {
            Outcome::Changed => {
                self.status = match self.controller.mode() {
                    InputMode::Editing => "Editing".to_string(),
                    InputMode::Overwrite => "Ready".to_string(),
                };
            }
            Outcome::Rejected => {
                log_debug(&format!("input rejected: {input:?}"));
                self.status = "Ignored".to_string();
            }
            Outcome::Evaluated(value) => {
                log_debug_content(&format!("evaluated to {value}"));
                self.status = "Result".to_string();
            }
            Outcome::Failed(err) => {
                log_debug(&format!("evaluation failed: {err}"));
                self.status = "Error".to_string();
            }
        }
        outcome
    }

    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }
}
