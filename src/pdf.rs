//! printpdf-backed serialization of composed documents.
//!
//! This is the only stage with a real failure mode at runtime; every error is
//! wrapped as a generation failure with the underlying cause preserved so
//! callers can report a single terminal "failed to generate" condition.

use std::io::{BufWriter, Cursor};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color as PdfColor, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Point,
    Polygon, Rgb as PdfRgb, TextMatrix,
};

use crate::error::{RenderError, RenderStage};
use crate::fonts::DeckFont;
use crate::page::{DrawOp, Page, Rgb, RenderedDocument, TextRun, A4_HEIGHT, A4_WIDTH};

const PT_TO_MM: f32 = 0.352_777_78;
const LAYER_NAME: &str = "Layer 1";

struct DocumentFonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl DocumentFonts {
    fn get(&self, font: DeckFont) -> &IndirectFontRef {
        match font {
            DeckFont::Regular => &self.regular,
            DeckFont::Bold => &self.bold,
            DeckFont::Oblique => &self.oblique,
        }
    }
}

fn wrap_serialize(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> RenderError {
    RenderError::generation(RenderStage::Serialize, err)
}

/// Serializes a composed document into PDF bytes.
pub(crate) fn serialize(document: &RenderedDocument) -> Result<Vec<u8>, RenderError> {
    let (first_width, first_height) = document
        .pages()
        .first()
        .map(|page| (page.width(), page.height()))
        .unwrap_or((A4_WIDTH, A4_HEIGHT));

    let (doc, first_page, first_layer) = PdfDocument::new(
        document.title(),
        Mm(first_width * PT_TO_MM),
        Mm(first_height * PT_TO_MM),
        LAYER_NAME,
    );

    let fonts = DocumentFonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(wrap_serialize)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(wrap_serialize)?,
        oblique: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(wrap_serialize)?,
    };

    for (index, page) in document.pages().iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(
                Mm(page.width() * PT_TO_MM),
                Mm(page.height() * PT_TO_MM),
                LAYER_NAME,
            );
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(page, &layer, &fonts);
    }

    let mut buf = Vec::new();
    {
        let cursor = Cursor::new(&mut buf);
        let mut writer = BufWriter::new(cursor);
        doc.save(&mut writer)
            .map_err(wrap_serialize)?;
    }
    Ok(buf)
}

fn draw_page(page: &Page, layer: &PdfLayerReference, fonts: &DocumentFonts) {
    for op in page.ops() {
        match op {
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => draw_rect(layer, *x, *y, *width, *height, *color),
            DrawOp::Text(run) => draw_text(layer, fonts, run),
        }
    }
}

fn draw_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
    set_fill_color(layer, color);
    let corners = vec![
        point(x, y),
        point(x + width, y),
        point(x + width, y + height),
        point(x, y + height),
    ];
    layer.add_polygon(Polygon {
        rings: vec![corners],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn draw_text(layer: &PdfLayerReference, fonts: &DocumentFonts, run: &TextRun) {
    set_fill_color(layer, flatten_opacity(run.color, run.opacity));
    let font = fonts.get(run.font);

    match run.rotation {
        None => layer.use_text(
            run.text.clone(),
            run.size,
            Mm(run.x * PT_TO_MM),
            Mm(run.y * PT_TO_MM),
            font,
        ),
        Some(degrees) => {
            let (sin, cos) = degrees.to_radians().sin_cos();
            layer.begin_text_section();
            layer.set_font(font, run.size);
            // Text matrix translation operands are in user units (points).
            layer.set_text_matrix(TextMatrix::Raw([cos, sin, -sin, cos, run.x, run.y]));
            layer.write_text(run.text.clone(), font);
            layer.end_text_section();
        }
    }
}

/// Composites a translucent color against the white page background.
///
/// The builtin-font text path has no alpha channel, so opacity is flattened
/// into the fill color at draw time.  Watermarks over existing ink will
/// occlude rather than blend, which matches the overlay-last draw order.
fn flatten_opacity(color: Rgb, opacity: Option<f32>) -> Rgb {
    match opacity {
        Some(alpha) if alpha < 1.0 => {
            let alpha = alpha.clamp(0.0, 1.0);
            Rgb::new(
                color.r * alpha + (1.0 - alpha),
                color.g * alpha + (1.0 - alpha),
                color.b * alpha + (1.0 - alpha),
            )
        }
        _ => color,
    }
}

fn set_fill_color(layer: &PdfLayerReference, color: Rgb) {
    layer.set_fill_color(PdfColor::Rgb(PdfRgb::new(color.r, color.g, color.b, None)));
}

fn point(x: f32, y: f32) -> (Point, bool) {
    (Point::new(Mm(x * PT_TO_MM), Mm(y * PT_TO_MM)), false)
}

#[cfg(test)]
mod tests {
    use super::flatten_opacity;
    use crate::page::Rgb;

    #[test]
    fn opaque_colors_pass_through() {
        let color = Rgb::new(0.2, 0.4, 0.6);
        assert_eq!(flatten_opacity(color, None), color);
        assert_eq!(flatten_opacity(color, Some(1.0)), color);
    }

    #[test]
    fn translucent_colors_lighten_toward_white() {
        let flattened = flatten_opacity(Rgb::BLACK, Some(0.3));
        assert!((flattened.r - 0.7).abs() < 1e-6);
        assert!((flattened.g - 0.7).abs() < 1e-6);
        assert!((flattened.b - 0.7).abs() < 1e-6);
    }
}
