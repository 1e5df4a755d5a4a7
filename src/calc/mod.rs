//! Calculator core: the input controller and the expression evaluator behind it.

mod controller;
mod expr;
mod format;

pub use controller::{
    is_arithmetic_operator, is_operator_or_paren, InputController, InputMode, Outcome,
    DEFAULT_BUFFER, DISPLAY_MAX_CHARS, ERROR_TEXT,
};
pub use expr::{
    evaluate_expression, is_allowed, normalize, parse_and_eval, rewrite_percent, EvalError,
    MAX_NESTING_DEPTH,
};
pub use format::format_number;
