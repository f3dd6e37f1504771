//! Width metrics for the builtin font faces used by the renderer.
//!
//! The PDF backend maps [`DeckFont`] onto the standard Helvetica family, whose
//! glyph advances are fixed by the PDF specification.  Keeping the advance
//! tables here lets the layout engine measure strings in page units without
//! touching the PDF backend, so wrapping stays a pure computation.

/// Fonts available to the composition layer.
///
/// The backend resolves these to the builtin Helvetica faces.  Builtin fonts
/// only encode a Latin subset, which is why every string handed to the text
/// primitives passes through [`crate::sanitize::sanitize_text`] first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeckFont {
    /// Helvetica regular.
    #[default]
    Regular,
    /// Helvetica bold.
    Bold,
    /// Helvetica oblique.
    Oblique,
}

/// Advance widths for Helvetica, in 1/1000 em, covering ASCII 0x20..=0x7E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278,
    278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584,
    584, 556, 1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667,
    556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222,
    222, 500, 222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500,
    500, 500, 334, 260, 334, 584,
];

/// Advance widths for Helvetica-Bold, in 1/1000 em, covering ASCII 0x20..=0x7E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278,
    278, 556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584,
    584, 611, 975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611,
    833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333,
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278,
    556, 278, 889, 611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556,
    500, 389, 280, 389, 584,
];

/// Fallback advance for characters outside the table, matching the width of a
/// digit.  Sanitized text should never hit this path.
const FALLBACK_WIDTH: u16 = 556;

impl DeckFont {
    fn widths(self) -> &'static [u16; 95] {
        match self {
            // Helvetica-Oblique shares the regular face's advances.
            DeckFont::Regular | DeckFont::Oblique => &HELVETICA_WIDTHS,
            DeckFont::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Returns the advance width of `c` in 1/1000 em.
    fn advance(self, c: char) -> u16 {
        let code = c as u32;
        if (0x20..=0x7E).contains(&code) {
            self.widths()[(code - 0x20) as usize]
        } else {
            FALLBACK_WIDTH
        }
    }

    /// Measures the rendered width of `text` at `size`, in page units (PDF
    /// points on an A4 canvas).
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let total: u32 = text.chars().map(|c| u32::from(self.advance(c))).sum();
        total as f32 / 1000.0 * size
    }
}
