//! Output text normalization.
//!
//! Decoders return text as their format crate produced it; the pipeline
//! funnels every success through [`normalize_text`] so callers see one
//! convention regardless of source format: no byte-order mark, `\n` line
//! endings. Inner whitespace is left untouched — extraction must not lose
//! content to over-aggressive trimming.

/// Strip a leading byte-order mark, if present.
///
/// Decoders produce `String`s, so a BOM survives as a leading U+FEFF.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Normalize `\r\n` and bare `\r` line endings to `\n`.
///
/// Returns the input unchanged (no allocation) when there is nothing to do.
pub fn normalize_line_endings(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

/// Full normalization pass: BOM strip, then line endings.
pub fn normalize_text(text: &str) -> String {
    normalize_line_endings(strip_bom(text))
}
