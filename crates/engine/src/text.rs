//! Description sanitization.

use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

/// Normalizes and sanitizes a user-supplied description.
///
/// NFC-normalizes the input, escapes `&`, `<` and `>` (quotes are left
/// alone), collapses runs of spaces, and trims. An input that sanitizes to
/// nothing is rejected as [`EngineError::EmptyDescription`].
pub(crate) fn sanitize_description(raw: &str) -> ResultEngine<String> {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_space = false;

    for ch in raw.nfc() {
        match ch {
            '&' => {
                out.push_str("&amp;");
                last_was_space = false;
            }
            '<' => {
                out.push_str("&lt;");
                last_was_space = false;
            }
            '>' => {
                out.push_str("&gt;");
                last_was_space = false;
            }
            ' ' => {
                if !last_was_space {
                    out.push(' ');
                }
                last_was_space = true;
            }
            other => {
                out.push(other);
                last_was_space = false;
            }
        }
    }

    let trimmed = out.trim();
    if trimmed.is_empty() {
        return Err(EngineError::EmptyDescription);
    }
    Ok(trimmed.to_string())
}
