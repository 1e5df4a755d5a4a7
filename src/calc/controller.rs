use super::expr::{evaluate_expression, EvalError};
use super::format::format_number;
use crate::input::CalcInput;
use crate::utf8_safe::truncate_with_ellipsis;

/// Buffer value after a clear or a backspace past the first character.
pub const DEFAULT_BUFFER: &str = "0";
/// Buffer value after any failed evaluation.
pub const ERROR_TEXT: &str = "Error";
/// Longest buffer shown on the display before it is cut with an ellipsis.
pub const DISPLAY_MAX_CHARS: usize = 20;

/// Whether the next keystroke replaces or extends the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Overwrite,
    Editing,
}

/// What a single input did to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The buffer or mode changed.
    Changed,
    /// The keystroke was refused and nothing changed.
    Rejected,
    /// Evaluation succeeded with this value.
    Evaluated(f64),
    /// Evaluation failed and the buffer now reads "Error".
    Failed(EvalError),
}

/// Owns the display buffer and the overwrite flag for one calculator session.
#[derive(Debug, Clone)]
pub struct InputController {
    buffer: String,
    mode: InputMode,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

impl InputController {
    pub fn new() -> Self {
        Self {
            buffer: DEFAULT_BUFFER.to_string(),
            mode: InputMode::Overwrite,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_overwrite(&self) -> bool {
        self.mode == InputMode::Overwrite
    }

    /// Buffer text as the display shows it.
    pub fn display_text(&self) -> String {
        truncate_with_ellipsis(&self.buffer, DISPLAY_MAX_CHARS)
    }

    /// Route one input to the matching operation.
    pub fn apply(&mut self, input: CalcInput) -> Outcome {
        match input {
            CalcInput::Digit(token) => self.append_digit(token),
            CalcInput::Operator(token) => self.append_operator(token),
            CalcInput::Percent => self.append_percent(),
            CalcInput::Backspace => self.backspace(),
            CalcInput::Clear => self.clear(),
            CalcInput::Evaluate => self.evaluate(),
        }
    }

    /// Enter a digit or decimal point.
    pub fn append_digit(&mut self, token: char) -> Outcome {
        if !(token.is_ascii_digit() || token == '.') {
            return Outcome::Rejected;
        }
        if self.mode == InputMode::Overwrite {
            self.buffer = if token == '.' {
                "0.".to_string()
            } else {
                token.to_string()
            };
            self.mode = InputMode::Editing;
            return Outcome::Changed;
        }
        self.push_token(token)
    }

    /// Enter `+ - * /` or a parenthesis. An arithmetic operator in overwrite
    /// mode keeps whatever non-zero buffer is showing and continues from it,
    /// including "Error", which then fails again on the next evaluation.
    pub fn append_operator(&mut self, token: char) -> Outcome {
        if !is_operator_or_paren(token) {
            return Outcome::Rejected;
        }
        if is_arithmetic_operator(token) && self.mode == InputMode::Overwrite && self.holds_result()
        {
            self.mode = InputMode::Editing;
        }
        if self.mode == InputMode::Overwrite {
            self.buffer = token.to_string();
            self.mode = InputMode::Editing;
            return Outcome::Changed;
        }
        self.push_token(token)
    }

    pub fn append_percent(&mut self) -> Outcome {
        if self.mode == InputMode::Overwrite {
            self.buffer = format!("{DEFAULT_BUFFER}%");
            self.mode = InputMode::Editing;
            return Outcome::Changed;
        }
        if self.buffer.ends_with('%') {
            return Outcome::Rejected;
        }
        self.buffer.push('%');
        Outcome::Changed
    }

    pub fn backspace(&mut self) -> Outcome {
        if self.mode == InputMode::Overwrite || self.buffer.chars().count() <= 1 {
            self.reset();
        } else {
            self.buffer.pop();
        }
        Outcome::Changed
    }

    pub fn clear(&mut self) -> Outcome {
        self.reset();
        Outcome::Changed
    }

    /// Evaluate the buffer and replace it with the result or "Error".
    pub fn evaluate(&mut self) -> Outcome {
        self.mode = InputMode::Overwrite;
        match evaluate_expression(&self.buffer) {
            Ok(value) => {
                self.buffer = format_number(value);
                Outcome::Evaluated(value)
            }
            Err(err) => {
                self.buffer = ERROR_TEXT.to_string();
                Outcome::Failed(err)
            }
        }
    }

    /// Replace the buffer wholesale in editing mode, as if it had been typed.
    pub fn load(&mut self, text: &str) {
        self.buffer = if text.is_empty() {
            DEFAULT_BUFFER.to_string()
        } else {
            text.to_string()
        };
        self.mode = InputMode::Editing;
    }

    fn reset(&mut self) {
        self.buffer = DEFAULT_BUFFER.to_string();
        self.mode = InputMode::Overwrite;
    }

    fn holds_result(&self) -> bool {
        self.buffer != DEFAULT_BUFFER
    }

    fn push_token(&mut self, token: char) -> Outcome {
        if self.buffer == DEFAULT_BUFFER && token == '0' {
            return Outcome::Rejected;
        }
        if token == '.' && self.buffer.contains('.') {
            return Outcome::Rejected;
        }
        self.buffer.push(token);
        Outcome::Changed
    }
}

pub fn is_arithmetic_operator(token: char) -> bool {
    matches!(token, '+' | '-' | '*' | '/')
}

pub fn is_operator_or_paren(token: char) -> bool {
    is_arithmetic_operator(token) || matches!(token, '(' | ')')
}
