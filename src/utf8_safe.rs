//! UTF-8 safe string slicing for display text.
//!
//! The display buffer is ASCII in practice, but the ellipsis marker and the
//! `×`/`÷` glyphs are not, so every cut goes through these helpers.

use unicode_width::UnicodeWidthChar;

/// Returns a prefix of the string up to `max_chars` characters.
/// Respects UTF-8 boundaries and won't panic on multi-byte characters.
pub fn safe_prefix(s: &str, max_chars: usize) -> &str {
    if s.is_empty() || max_chars == 0 {
        return "";
    }

    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Keeps the first `max_chars` characters and appends `…` when anything was cut.
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    format!("{}…", safe_prefix(s, max_chars))
}

/// Return the leading part of the string that fits in `width_cols` display columns.
/// Wide glyphs that would straddle the edge are dropped rather than split.
pub fn fit_columns(s: &str, width_cols: usize) -> &str {
    if width_cols == 0 {
        return "";
    }
    let mut col = 0usize;
    for (idx, ch) in s.char_indices() {
        let next_col = col.saturating_add(UnicodeWidthChar::width(ch).unwrap_or(0).max(1));
        if next_col > width_cols {
            return &s[..idx];
        }
        col = next_col;
    }
    s
}
