//! Think-block stripping.
//!
//! Some models embed `<think>...</think>` spans inside their text content.
//! Those spans are internal deliberation, never part of the answer, and are
//! removed before the text is surfaced or treated as a final answer.

const OPEN: &str = "<think>";
const CLOSE: &str = "</think>";

/// Remove `<think>...</think>` spans from `text` and trim the remainder.
///
/// Returns `None` when nothing but think-content (or whitespace) remains:
/// a response consisting only of a marked span is absence of an answer,
/// not an empty answer. An unterminated `<think>` is not a span and is
/// left in place.
pub fn strip_think(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        match rest[start + OPEN.len()..].find(CLOSE) {
            Some(end) => {
                rest = &rest[start + OPEN.len() + end + CLOSE.len()..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);

    let trimmed = out.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
