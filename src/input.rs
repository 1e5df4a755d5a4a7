//! Mapping from keys, key names, and button payloads to calculator inputs.
//!
//! Every input source (terminal keys, keypad clicks, IPC commands) funnels
//! through [`CalcInput`] so the controller only sees one vocabulary.

use crate::calc::is_operator_or_paren;

/// One calculator operation requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcInput {
    /// `0`-`9` or `.`
    Digit(char),
    /// `+ - * /` or a parenthesis
    Operator(char),
    Percent,
    Backspace,
    Clear,
    Evaluate,
}

/// Named actions carried by keypad buttons that are not literal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Clear,
    Back,
    Calculate,
    Percent,
}

impl ButtonAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "clear" => Some(Self::Clear),
            "back" => Some(Self::Back),
            "calculate" => Some(Self::Calculate),
            "percent" => Some(Self::Percent),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ButtonAction::Clear => "clear",
            ButtonAction::Back => "back",
            ButtonAction::Calculate => "calculate",
            ButtonAction::Percent => "percent",
        }
    }

    pub fn to_input(self) -> CalcInput {
        match self {
            ButtonAction::Clear => CalcInput::Clear,
            ButtonAction::Back => CalcInput::Backspace,
            ButtonAction::Calculate => CalcInput::Evaluate,
            ButtonAction::Percent => CalcInput::Percent,
        }
    }
}

impl CalcInput {
    /// Map a typed character. Returns `None` for keys the calculator ignores.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' | '.' => Some(Self::Digit(ch)),
            c if is_operator_or_paren(c) => Some(Self::Operator(c)),
            '=' => Some(Self::Evaluate),
            '%' => Some(Self::Percent),
            _ => None,
        }
    }

    /// Map a browser-style key name (`"7"`, `"Enter"`, `"Backspace"`, `"Escape"`).
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "Enter" => Some(Self::Evaluate),
            "Backspace" => Some(Self::Backspace),
            "Escape" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::from_char(ch),
                    _ => None,
                }
            }
        }
    }

    /// Map the literal value carried by a keypad button.
    ///
    /// Only digits, `.`, operators, and parentheses are literal values; `%` and
    /// `=` arrive as named actions instead.
    pub fn from_button_value(value: &str) -> Option<Self> {
        match Self::from_key_name(value)? {
            input @ (Self::Digit(_) | Self::Operator(_)) => Some(input),
            _ => None,
        }
    }
}
