//! Clickable keypad layout.
//!
//! Buttons carry either a literal value or a named action, the same way the
//! calculator's labeled controls do. Cell positions are derived from the
//! keypad rectangle, so drawing and mouse hit-testing always agree.

use crate::input::{ButtonAction, CalcInput};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Payload delivered when a button is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPress {
    Value(&'static str),
    Action(ButtonAction),
}

/// A labeled keypad cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    pub label: &'static str,
    pub press: ButtonPress,
}

/// Visual grouping used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Digit,
    Operator,
    Action,
}

impl KeypadButton {
    const fn value(label: &'static str, value: &'static str) -> Self {
        Self {
            label,
            press: ButtonPress::Value(value),
        }
    }

    const fn action(label: &'static str, action: ButtonAction) -> Self {
        Self {
            label,
            press: ButtonPress::Action(action),
        }
    }

    /// Convert to a calculator input for dispatch.
    pub fn to_input(&self) -> Option<CalcInput> {
        match self.press {
            ButtonPress::Value(value) => CalcInput::from_button_value(value),
            ButtonPress::Action(action) => Some(action.to_input()),
        }
    }

    pub fn kind(&self) -> ButtonKind {
        match self.to_input() {
            Some(CalcInput::Digit(_)) => ButtonKind::Digit,
            Some(CalcInput::Operator(_)) => ButtonKind::Operator,
            _ => ButtonKind::Action,
        }
    }
}

/// Keypad rows, top to bottom.
pub const KEYPAD_ROWS: &[&[KeypadButton]] = &[
    &[
        KeypadButton::action("C", ButtonAction::Clear),
        KeypadButton::value("(", "("),
        KeypadButton::value(")", ")"),
        KeypadButton::action("⌫", ButtonAction::Back),
    ],
    &[
        KeypadButton::value("7", "7"),
        KeypadButton::value("8", "8"),
        KeypadButton::value("9", "9"),
        KeypadButton::value("÷", "/"),
    ],
    &[
        KeypadButton::value("4", "4"),
        KeypadButton::value("5", "5"),
        KeypadButton::value("6", "6"),
        KeypadButton::value("×", "*"),
    ],
    &[
        KeypadButton::value("1", "1"),
        KeypadButton::value("2", "2"),
        KeypadButton::value("3", "3"),
        KeypadButton::value("−", "-"),
    ],
    &[
        KeypadButton::value("0", "0"),
        KeypadButton::value(".", "."),
        KeypadButton::action("%", ButtonAction::Percent),
        KeypadButton::value("+", "+"),
    ],
    &[KeypadButton::action("=", ButtonAction::Calculate)],
];

/// Smallest keypad that still fits a bordered cell per button.
pub const MIN_KEYPAD_WIDTH: u16 = 4 * 5;
pub const MIN_KEYPAD_HEIGHT: u16 = 6 * 3;

/// Split the keypad area into one rectangle per button.
pub fn button_cells(area: Rect) -> Vec<(Rect, &'static KeypadButton)> {
    let row_count = KEYPAD_ROWS.len() as u32;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(KEYPAD_ROWS.iter().map(|_| Constraint::Ratio(1, row_count)))
        .split(area);

    let mut cells = Vec::new();
    for (row_area, buttons) in rows.iter().zip(KEYPAD_ROWS.iter()) {
        let col_count = buttons.len() as u32;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(buttons.iter().map(|_| Constraint::Ratio(1, col_count)))
            .split(*row_area);
        for (cell, button) in cols.iter().zip(buttons.iter()) {
            cells.push((*cell, button));
        }
    }
    cells
}

/// Find the button under a 0-based terminal cell coordinate.
pub fn button_at(area: Rect, x: u16, y: u16) -> Option<&'static KeypadButton> {
    button_cells(area)
        .into_iter()
        .find(|(cell, _)| contains(*cell, x, y))
        .map(|(_, button)| button)
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}
