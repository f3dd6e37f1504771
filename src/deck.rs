//! Pitch deck page composition.
//!
//! Turns a [`PitchDeckContent`] into a [`RenderedDocument`]: one title page,
//! one page per slide, and a closing market-insights page.  Free-tier exports
//! additionally get a diagonal watermark caption on every content page.

use log::debug;

use crate::config::DEFAULT_WATERMARK_TEXT;
use crate::content::{PitchDeckContent, PitchInsights, PitchSlide};
use crate::error::RenderError;
use crate::fonts::DeckFont;
use crate::layout::wrap;
use crate::page::{Page, RenderedDocument, Rgb, TextRun, A4_HEIGHT, A4_WIDTH};
use crate::sanitize::sanitize_text;
use crate::template::Palette;

const MARGIN: f32 = 50.0;
const CONTENT_WIDTH: f32 = A4_WIDTH - 2.0 * MARGIN;

const BANNER_HEIGHT: f32 = 170.0;
const HEADER_HEIGHT: f32 = 60.0;

const BULLET_INDENT: f32 = 60.0;
const BULLET_WIDTH: f32 = A4_WIDTH - BULLET_INDENT - MARGIN;
const BULLET_SIZE: f32 = 14.0;
const BULLET_LINE_ADVANCE: f32 = 20.0;
const BULLET_GAP: f32 = 10.0;

const KEY_POINT_INDENT: f32 = 70.0;
const KEY_POINT_WIDTH: f32 = A4_WIDTH - KEY_POINT_INDENT - MARGIN;
const KEY_POINT_SIZE: f32 = 12.0;
const KEY_POINT_LINE_ADVANCE: f32 = 18.0;

const INSIGHT_SIZE: f32 = 12.0;
const INSIGHT_LINE_ADVANCE: f32 = 18.0;

const WATERMARK_SIZE: f32 = 48.0;
const WATERMARK_OPACITY: f32 = 0.3;
const WATERMARK_ROTATION: f32 = -45.0;

const WHITE: Rgb = Rgb {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

/// Options controlling pitch-deck composition.
#[derive(Clone, Debug)]
pub struct DeckOptions {
    /// Overlay the watermark caption on slide and insights pages.
    pub watermark: bool,
    /// Caption used for the watermark overlay.
    pub watermark_text: String,
    /// Palette used for banners, headers and headings.
    pub palette: Palette,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            watermark: false,
            watermark_text: DEFAULT_WATERMARK_TEXT.to_string(),
            palette: Palette::default(),
        }
    }
}

/// Renders a pitch deck to PDF bytes.
///
/// On success the returned bytes hold a complete multi-page document; on
/// failure the error identifies the failing stage and carries the cause.
/// Failures are terminal for the same input and should be surfaced to the
/// user as "failed to generate the document".
pub fn generate_pitch_deck_pdf(
    content: &PitchDeckContent,
    watermark: bool,
) -> Result<Vec<u8>, RenderError> {
    let options = DeckOptions {
        watermark,
        ..DeckOptions::default()
    };
    compose_pitch_deck(content, &options)?.to_bytes()
}

/// Composes the page model for a pitch deck without serializing it.
pub fn compose_pitch_deck(
    content: &PitchDeckContent,
    options: &DeckOptions,
) -> Result<RenderedDocument, RenderError> {
    content.validate()?;

    let mut document = RenderedDocument::new(&content.title);
    document.push_page(title_page(content, &options.palette));

    let total = content.slides.len();
    for (index, slide) in content.slides.iter().enumerate() {
        let mut page = slide_page(slide, index + 1, total, &options.palette);
        if options.watermark {
            overlay_watermark(&mut page, &options.watermark_text);
        }
        document.push_page(page);
    }

    let insights = content.insights.clone().unwrap_or_default();
    let mut page = insights_page(&insights, &options.palette);
    if options.watermark {
        overlay_watermark(&mut page, &options.watermark_text);
    }
    document.push_page(page);

    debug!(
        "composed pitch deck `{}`: {} pages, watermark={}",
        document.title(),
        document.pages().len(),
        options.watermark
    );
    Ok(document)
}

fn title_page(content: &PitchDeckContent, palette: &Palette) -> Page {
    let mut page = Page::a4();
    page.push_rect(
        0.0,
        A4_HEIGHT - BANNER_HEIGHT,
        A4_WIDTH,
        BANNER_HEIGHT,
        palette.primary,
    );

    let title = sanitize_text(&content.title);
    let mut cursor = A4_HEIGHT - 90.0;
    for line in wrap(&title, CONTENT_WIDTH, DeckFont::Bold, 30.0) {
        page.push_text(&line, MARGIN, cursor, 30.0, DeckFont::Bold, WHITE);
        cursor -= 34.0;
    }

    page.push_text(
        "Prepared with ProtoLab",
        MARGIN,
        A4_HEIGHT - 210.0,
        12.0,
        DeckFont::Regular,
        palette.secondary,
    );
    page.push_text(
        "AI-assisted pitch deck",
        MARGIN,
        A4_HEIGHT - 230.0,
        12.0,
        DeckFont::Oblique,
        palette.secondary,
    );

    if let Some(summary) = &content.executive_summary {
        page.push_text(
            "Executive Summary",
            MARGIN,
            A4_HEIGHT - 280.0,
            14.0,
            DeckFont::Bold,
            palette.primary,
        );
        let body = sanitize_text(summary);
        let mut cursor = A4_HEIGHT - 302.0;
        for line in wrap(&body, CONTENT_WIDTH, DeckFont::Regular, 12.0) {
            page.push_text(&line, MARGIN, cursor, 12.0, DeckFont::Regular, Rgb::BLACK);
            cursor -= INSIGHT_LINE_ADVANCE;
        }
    }

    page
}

fn slide_page(slide: &PitchSlide, number: usize, total: usize, palette: &Palette) -> Page {
    let mut page = Page::a4();
    page.push_rect(
        0.0,
        A4_HEIGHT - HEADER_HEIGHT,
        A4_WIDTH,
        HEADER_HEIGHT,
        palette.primary,
    );
    page.push_text(
        &format!("{number}/{total}"),
        A4_WIDTH - 70.0,
        A4_HEIGHT - 38.0,
        12.0,
        DeckFont::Regular,
        WHITE,
    );
    page.push_text(
        &sanitize_text(&slide.title),
        MARGIN,
        A4_HEIGHT - 38.0,
        20.0,
        DeckFont::Bold,
        WHITE,
    );

    let mut cursor = A4_HEIGHT - 100.0;
    for bullet in &slide.content {
        let text = sanitize_text(&format!("\u{2022} {bullet}"));
        for line in wrap(&text, BULLET_WIDTH, DeckFont::Regular, BULLET_SIZE) {
            page.push_text(
                &line,
                BULLET_INDENT,
                cursor,
                BULLET_SIZE,
                DeckFont::Regular,
                Rgb::BLACK,
            );
            cursor -= BULLET_LINE_ADVANCE;
        }
        cursor -= BULLET_GAP;
    }

    if !slide.key_points.is_empty() {
        cursor -= 4.0;
        page.push_text(
            "Key Points",
            BULLET_INDENT,
            cursor,
            13.0,
            DeckFont::Bold,
            palette.secondary,
        );
        cursor -= BULLET_LINE_ADVANCE;

        for key_point in &slide.key_points {
            let text = sanitize_text(&format!("- {key_point}"));
            for line in wrap(&text, KEY_POINT_WIDTH, DeckFont::Regular, KEY_POINT_SIZE) {
                page.push_text(
                    &line,
                    KEY_POINT_INDENT,
                    cursor,
                    KEY_POINT_SIZE,
                    DeckFont::Regular,
                    Rgb::BLACK,
                );
                cursor -= KEY_POINT_LINE_ADVANCE;
            }
        }
    }

    page
}

fn insights_page(insights: &PitchInsights, palette: &Palette) -> Page {
    let mut page = Page::a4();
    page.push_text(
        "Market Insights",
        MARGIN,
        A4_HEIGHT - 70.0,
        22.0,
        DeckFont::Bold,
        palette.primary,
    );
    page.push_rect(MARGIN, A4_HEIGHT - 80.0, 120.0, 3.0, palette.accent);

    // The four sections are fixed, in this order, even when a body is empty.
    let sections: [(&str, &str); 4] = [
        ("Market Size", &insights.market_size),
        ("Revenue Projection", &insights.revenue_projection),
        ("Competitive Advantage", &insights.competitive_advantage),
        ("Go-to-Market Strategy", &insights.market_strategy),
    ];

    let mut cursor = A4_HEIGHT - 120.0;
    for (heading, body) in sections {
        page.push_text(
            heading,
            MARGIN,
            cursor,
            14.0,
            DeckFont::Bold,
            palette.secondary,
        );
        cursor -= 22.0;

        let body = sanitize_text(body);
        for line in wrap(&body, CONTENT_WIDTH, DeckFont::Regular, INSIGHT_SIZE) {
            page.push_text(&line, MARGIN, cursor, INSIGHT_SIZE, DeckFont::Regular, Rgb::BLACK);
            cursor -= INSIGHT_LINE_ADVANCE;
        }
        cursor -= 14.0;
    }

    page
}

/// Draws the diagonal watermark caption over everything already on the page.
pub(crate) fn overlay_watermark(page: &mut Page, text: &str) {
    let caption = sanitize_text(text);
    let width = DeckFont::Bold.text_width(&caption, WATERMARK_SIZE);
    let (sin, cos) = WATERMARK_ROTATION.to_radians().sin_cos();

    // Place the baseline so its midpoint sits at the page center.
    let x = page.width() / 2.0 - cos * width / 2.0;
    let y = page.height() / 2.0 - sin * width / 2.0;

    page.push_text_run(TextRun {
        text: caption,
        x,
        y,
        size: WATERMARK_SIZE,
        font: DeckFont::Bold,
        color: Rgb::new(0.3, 0.3, 0.3),
        opacity: Some(WATERMARK_OPACITY),
        rotation: Some(WATERMARK_ROTATION),
    });
}
