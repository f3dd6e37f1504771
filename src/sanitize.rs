//! ASCII sanitization for text handed to the PDF text primitives.
//!
//! The builtin Helvetica faces used by the backend cannot encode arbitrary
//! Unicode.  Upstream AI providers are fond of typographic punctuation, so
//! every free-text string is rewritten to a plain-ASCII equivalent before it
//! reaches a draw call.  This is an encoding requirement, not a style choice.

/// Returns the ASCII replacement for a typographic character, if one exists.
fn replacement(c: char) -> Option<&'static str> {
    let replaced = match c {
        '\u{2192}' => "->",  // rightwards arrow
        '\u{2190}' => "<-",  // leftwards arrow
        '\u{21D2}' => "=>",  // rightwards double arrow
        '\u{2022}' => "-",   // bullet
        '\u{25E6}' => "-",   // white bullet
        '\u{2013}' => "-",   // en dash
        '\u{2014}' => "--",  // em dash
        '\u{2018}' | '\u{2019}' => "'",
        '\u{201C}' | '\u{201D}' => "\"",
        '\u{2026}' => "...", // horizontal ellipsis
        '\u{00A0}' => " ",   // no-break space
        _ => return None,
    };
    Some(replaced)
}

/// Rewrites `text` so that it only contains ASCII characters.
///
/// Typographic punctuation is mapped to plain equivalents through a fixed
/// table; any other non-ASCII character is dropped.  The function is
/// idempotent: sanitizing already-sanitized text returns it unchanged.
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(replaced) = replacement(c) {
            out.push_str(replaced);
        } else if c.is_ascii() {
            out.push(c);
        }
        // Everything else cannot be encoded by the builtin fonts and is
        // stripped.
    }
    out
}
