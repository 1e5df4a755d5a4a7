//! Result formatting for the display buffer.

/// Magnitudes at or above this switch to exponent notation.
const EXPONENT_UPPER: f64 = 1e21;
/// Non-zero magnitudes below this switch to exponent notation.
const EXPONENT_LOWER: f64 = 1e-6;

/// Render a finite result the way a calculator display expects: the shortest
/// decimal that round-trips, no `-0`, and `1e+21` / `1.5e-7` style exponents
/// for very large or very small magnitudes.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER || magnitude < EXPONENT_LOWER {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    format!("{value}")
}
