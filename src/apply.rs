//! Applying a catalog template to generic section-based documents.
//!
//! Resumes and business plans arrive as a title plus ordered sections; the
//! selected template contributes the palette and one of the fixed layout
//! variants that decide how those sections are placed on the page.

use std::mem;

use log::debug;
use thiserror::Error;

use crate::config::DEFAULT_WATERMARK_TEXT;
use crate::content::{DocumentData, DocumentSection};
use crate::deck::overlay_watermark;
use crate::error::RenderError;
use crate::fonts::DeckFont;
use crate::layout::wrap;
use crate::page::{Page, RenderedDocument, Rgb, A4_HEIGHT, A4_WIDTH};
use crate::sanitize::sanitize_text;
use crate::template::{select_layout, LayoutVariant, Palette, TemplateError};

const MARGIN: f32 = 50.0;
const CONTENT_WIDTH: f32 = A4_WIDTH - 2.0 * MARGIN;
const BOTTOM_MARGIN: f32 = 60.0;

const TITLE_BAND_HEIGHT: f32 = 90.0;

const HEADING_SIZE: f32 = 16.0;
const HEADING_ADVANCE: f32 = 24.0;
const BODY_SIZE: f32 = 12.0;
const BODY_LINE_ADVANCE: f32 = 18.0;
const SECTION_GAP: f32 = 12.0;

const COLUMN_GUTTER: f32 = 20.0;
const GRID_ROW_GAP: f32 = 24.0;

const WHITE: Rgb = Rgb {
    r: 1.0,
    g: 1.0,
    b: 1.0,
};

/// Options controlling template application.
#[derive(Clone, Debug)]
pub struct ApplyOptions {
    /// Search the premium catalog in addition to the free one.
    pub include_premium: bool,
    /// Overlay the watermark caption on every page.
    pub watermark: bool,
    /// Caption used for the watermark overlay.
    pub watermark_text: String,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            include_premium: false,
            watermark: false,
            watermark_text: DEFAULT_WATERMARK_TEXT.to_string(),
        }
    }
}

/// Failure while applying a template to a document.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The requested template does not exist in the searched catalog.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// The composed document could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Renders a document through the named template to PDF bytes.
pub fn apply_template(
    template_id: &str,
    data: &DocumentData,
    options: &ApplyOptions,
) -> Result<Vec<u8>, ApplyError> {
    let document = compose_with_template(template_id, data, options)?;
    Ok(document.to_bytes()?)
}

/// Composes the page model for a templated document without serializing it.
pub fn compose_with_template(
    template_id: &str,
    data: &DocumentData,
    options: &ApplyOptions,
) -> Result<RenderedDocument, ApplyError> {
    let (palette, variant) = select_layout(template_id, options.include_premium)?;

    let mut document = match variant {
        LayoutVariant::SingleColumn => compose_single_column(data, &palette),
        LayoutVariant::TwoColumn => compose_two_column(data, &palette),
        LayoutVariant::Grid => compose_grid(data, &palette),
    };

    if options.watermark {
        for page in document.pages_mut() {
            overlay_watermark(page, &options.watermark_text);
        }
    }

    debug!(
        "applied template `{template_id}` ({variant:?}): {} sections over {} pages",
        data.sections.len(),
        document.pages().len()
    );
    Ok(document)
}

/// First page of every variant: a colored band with the document title.
fn cover_header(data: &DocumentData, palette: &Palette) -> Page {
    let mut page = Page::a4();
    page.push_rect(
        0.0,
        A4_HEIGHT - TITLE_BAND_HEIGHT,
        A4_WIDTH,
        TITLE_BAND_HEIGHT,
        palette.primary,
    );
    let title = sanitize_text(&data.title);
    let mut cursor = A4_HEIGHT - 55.0;
    for line in wrap(&title, CONTENT_WIDTH, DeckFont::Bold, 24.0) {
        page.push_text(&line, MARGIN, cursor, 24.0, DeckFont::Bold, WHITE);
        cursor -= 28.0;
    }
    page
}

fn compose_single_column(data: &DocumentData, palette: &Palette) -> RenderedDocument {
    let mut document = RenderedDocument::new(&data.title);
    let mut page = cover_header(data, palette);
    let mut cursor = A4_HEIGHT - TITLE_BAND_HEIGHT - 40.0;

    for section in &data.sections {
        if cursor - HEADING_ADVANCE < BOTTOM_MARGIN {
            document.push_page(mem::replace(&mut page, Page::a4()));
            cursor = A4_HEIGHT - MARGIN;
        }
        page.push_text(
            &sanitize_text(&section.heading),
            MARGIN,
            cursor,
            HEADING_SIZE,
            DeckFont::Bold,
            palette.primary,
        );
        cursor -= HEADING_ADVANCE;

        let body = sanitize_text(&section.body);
        for line in wrap(&body, CONTENT_WIDTH, DeckFont::Regular, BODY_SIZE) {
            if cursor < BOTTOM_MARGIN {
                document.push_page(mem::replace(&mut page, Page::a4()));
                cursor = A4_HEIGHT - MARGIN;
            }
            page.push_text(&line, MARGIN, cursor, BODY_SIZE, DeckFont::Regular, Rgb::BLACK);
            cursor -= BODY_LINE_ADVANCE;
        }
        cursor -= SECTION_GAP;
    }

    document.push_page(page);
    document
}

/// Tracks the write position while filling left and right columns in turn.
struct ColumnFlow {
    column_width: f32,
    column: usize,
    cursor: f32,
    top: f32,
}

impl ColumnFlow {
    fn x(&self) -> f32 {
        MARGIN + self.column as f32 * (self.column_width + COLUMN_GUTTER)
    }

    /// Moves to the next column, or onto a fresh page, when fewer than
    /// `needed` units remain below the cursor.
    fn ensure_room(&mut self, document: &mut RenderedDocument, page: &mut Page, needed: f32) {
        if self.cursor - needed >= BOTTOM_MARGIN {
            return;
        }
        if self.column == 0 {
            self.column = 1;
            self.cursor = self.top;
            return;
        }
        document.push_page(mem::replace(page, Page::a4()));
        self.column = 0;
        self.top = A4_HEIGHT - MARGIN;
        self.cursor = self.top;
    }
}

fn compose_two_column(data: &DocumentData, palette: &Palette) -> RenderedDocument {
    let mut document = RenderedDocument::new(&data.title);
    let mut page = cover_header(data, palette);
    let top = A4_HEIGHT - TITLE_BAND_HEIGHT - 40.0;
    let mut flow = ColumnFlow {
        column_width: (CONTENT_WIDTH - COLUMN_GUTTER) / 2.0,
        column: 0,
        cursor: top,
        top,
    };

    for section in &data.sections {
        // Keep the heading and its first body line together.
        flow.ensure_room(&mut document, &mut page, HEADING_ADVANCE + BODY_LINE_ADVANCE);
        page.push_text(
            &sanitize_text(&section.heading),
            flow.x(),
            flow.cursor,
            HEADING_SIZE,
            DeckFont::Bold,
            palette.primary,
        );
        flow.cursor -= HEADING_ADVANCE;

        let body = sanitize_text(&section.body);
        for line in wrap(&body, flow.column_width, DeckFont::Regular, BODY_SIZE) {
            flow.ensure_room(&mut document, &mut page, 0.0);
            page.push_text(
                &line,
                flow.x(),
                flow.cursor,
                BODY_SIZE,
                DeckFont::Regular,
                Rgb::BLACK,
            );
            flow.cursor -= BODY_LINE_ADVANCE;
        }
        flow.cursor -= SECTION_GAP;
    }

    document.push_page(page);
    document
}

fn compose_grid(data: &DocumentData, palette: &Palette) -> RenderedDocument {
    let mut document = RenderedDocument::new(&data.title);
    let cell_width = (CONTENT_WIDTH - COLUMN_GUTTER) / 2.0;

    let mut page = cover_header(data, palette);
    let mut top = A4_HEIGHT - TITLE_BAND_HEIGHT - 30.0;
    let mut cell = 0usize;

    for section in &data.sections {
        if cell == 4 {
            document.push_page(mem::replace(&mut page, Page::a4()));
            top = A4_HEIGHT - MARGIN;
            cell = 0;
        }
        let cell_height = (top - BOTTOM_MARGIN - GRID_ROW_GAP) / 2.0;
        let column = cell % 2;
        let row = cell / 2;
        let x = MARGIN + column as f32 * (cell_width + COLUMN_GUTTER);
        let cell_top = top - row as f32 * (cell_height + GRID_ROW_GAP);
        draw_grid_cell(&mut page, section, palette, x, cell_top, cell_width, cell_height);
        cell += 1;
    }

    document.push_page(page);
    document
}

/// Draws one section into a grid cell, dropping body lines that overflow it.
fn draw_grid_cell(
    page: &mut Page,
    section: &DocumentSection,
    palette: &Palette,
    x: f32,
    cell_top: f32,
    cell_width: f32,
    cell_height: f32,
) {
    page.push_text(
        &sanitize_text(&section.heading),
        x,
        cell_top,
        14.0,
        DeckFont::Bold,
        palette.primary,
    );
    page.push_rect(x, cell_top - 8.0, cell_width, 2.0, palette.accent);

    let mut cursor = cell_top - 26.0;
    let floor = cell_top - cell_height;
    let capacity = ((cursor - floor) / BODY_LINE_ADVANCE).max(0.0) as usize;
    let body = sanitize_text(&section.body);
    for line in wrap(&body, cell_width, DeckFont::Regular, BODY_SIZE)
        .into_iter()
        .take(capacity)
    {
        page.push_text(&line, x, cursor, BODY_SIZE, DeckFont::Regular, Rgb::BLACK);
        cursor -= BODY_LINE_ADVANCE;
    }
}
