//! Fixed-size page canvases and their positioned draw operations.
//!
//! A [`RenderedDocument`] is the intermediate form between content
//! composition and PDF serialization: an ordered list of pages, each holding
//! the rectangles and text runs to draw.  Coordinates use PDF user units
//! (points) with the origin at the bottom-left corner, so the backend can
//! translate operations without remapping.  Documents are immutable once
//! composition finishes.

use crate::error::RenderError;
use crate::fonts::DeckFont;
use crate::pdf;
use crate::sanitize::sanitize_text;

/// A4 page width in user units (points).
pub const A4_WIDTH: f32 = 595.0;
/// A4 page height in user units (points).
pub const A4_HEIGHT: f32 = 842.0;

/// A normalized RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Solid black, the fallback for malformed template colors.
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Creates a color from normalized components.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A positioned text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Sanitized text to draw.
    pub text: String,
    /// Baseline start, in page units from the left edge.
    pub x: f32,
    /// Baseline, in page units from the bottom edge.
    pub y: f32,
    /// Font size in points.
    pub size: f32,
    /// Face to draw with.
    pub font: DeckFont,
    /// Fill color.
    pub color: Rgb,
    /// Optional opacity in `[0, 1]`; `None` means fully opaque.
    pub opacity: Option<f32>,
    /// Optional counter-clockwise rotation in degrees around the baseline
    /// start.
    pub rotation: Option<f32>,
}

/// A single positioned draw operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// A filled rectangle anchored at its bottom-left corner.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    /// A text run.
    Text(TextRun),
}

/// One fixed-size page of positioned draw operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
}

impl Page {
    /// Creates an empty A4 page.
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            ops: Vec::new(),
        }
    }

    /// Page width in user units.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Page height in user units.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The draw operations in draw order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Iterates over the text runs on this page, in draw order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            DrawOp::Rect { .. } => None,
        })
    }

    /// Appends a filled rectangle.
    pub fn push_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    /// Appends an opaque, unrotated text run.
    ///
    /// All text entering the page model is sanitized here; the backend can
    /// assume plain ASCII.
    pub fn push_text(&mut self, text: &str, x: f32, y: f32, size: f32, font: DeckFont, color: Rgb) {
        self.push_text_run(TextRun {
            text: text.to_string(),
            x,
            y,
            size,
            font,
            color,
            opacity: None,
            rotation: None,
        });
    }

    /// Appends a fully specified text run, sanitizing its text.
    pub fn push_text_run(&mut self, mut run: TextRun) {
        run.text = sanitize_text(&run.text);
        self.ops.push(DrawOp::Text(run));
    }
}

/// An ordered, immutable sequence of composed pages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderedDocument {
    title: String,
    pages: Vec<Page>,
}

impl RenderedDocument {
    /// Creates an empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: sanitize_text(&title.into()),
            pages: Vec::new(),
        }
    }

    /// Document title carried into the PDF metadata.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The composed pages in order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Appends a page.
    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Mutable access to the pages, for overlay passes during composition.
    pub(crate) fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    /// Serializes the document to PDF bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RenderError> {
        pdf::serialize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, Rgb};
    use crate::fonts::DeckFont;

    #[test]
    fn push_text_sanitizes_before_recording() {
        let mut page = Page::a4();
        page.push_text(
            "growth \u{2192} profit",
            50.0,
            700.0,
            14.0,
            DeckFont::Regular,
            Rgb::BLACK,
        );
        let run = page.text_runs().next().unwrap();
        assert_eq!(run.text, "growth -> profit");
    }

    #[test]
    fn ops_preserve_draw_order() {
        let mut page = Page::a4();
        page.push_rect(0.0, 0.0, 10.0, 10.0, Rgb::BLACK);
        page.push_text("after", 0.0, 0.0, 12.0, DeckFont::Regular, Rgb::BLACK);
        assert_eq!(page.ops().len(), 2);
        assert!(matches!(page.ops()[0], super::DrawOp::Rect { .. }));
        assert!(matches!(page.ops()[1], super::DrawOp::Text(_)));
    }
}
