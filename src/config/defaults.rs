use super::ThemeName;

pub const DEFAULT_THEME: ThemeName = ThemeName::Coral;
/// Longest expression accepted by `--eval`.
pub const MAX_EVAL_BYTES: usize = 4 * 1024;
