use proptest::prelude::*;

use protolab_render::fonts::DeckFont;
use protolab_render::layout::wrap;
use protolab_render::sanitize::sanitize_text;

proptest! {
    #[test]
    fn wrapped_lines_fit_unless_a_single_word_overflows(
        text in "[ -~]{0,160}",
        max_width in 40.0f32..400.0,
        size in 8.0f32..32.0,
    ) {
        for line in wrap(&text, max_width, DeckFont::Regular, size) {
            let fits = DeckFont::Regular.text_width(&line, size) <= max_width;
            prop_assert!(
                fits || !line.contains(' '),
                "line `{line}` overflows {max_width} but is not a lone word"
            );
        }
    }

    #[test]
    fn wrapping_preserves_word_sequence(
        text in "[ -~]{0,160}",
        max_width in 40.0f32..400.0,
    ) {
        let lines = wrap(&text, max_width, DeckFont::Regular, 12.0);
        let rewrapped: Vec<&str> = lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        prop_assert_eq!(rewrapped, original);
    }

    #[test]
    fn sanitization_is_idempotent_and_ascii(text in "\\PC{0,160}") {
        let once = sanitize_text(&text);
        prop_assert!(once.is_ascii());
        prop_assert_eq!(sanitize_text(&once), once);
    }
}
