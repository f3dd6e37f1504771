//! Greedy word-wrapping against measured text widths.

use crate::fonts::DeckFont;

/// Wraps `text` into lines whose measured width stays within `max_width`.
///
/// The input is split on whitespace (consecutive spaces collapse) and words
/// are accumulated greedily: a word that would push the measured width of the
/// accumulated line past `max_width` closes the current line and starts the
/// next one.  A single word that is wider than `max_width` on its own is
/// emitted as its own line, unmodified; the renderer never breaks inside a
/// word.
///
/// The function is pure and deterministic.  Empty or whitespace-only input
/// yields an empty vector.
pub fn wrap(text: &str, max_width: f32, font: DeckFont, font_size: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if font.text_width(&candidate, font_size) <= max_width {
            current = candidate;
        } else if current.is_empty() {
            // Unsplittable word wider than the line; it gets its own line.
            lines.push(word.to_string());
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
