//! Structured document content consumed by the renderer.
//!
//! These types mirror the JSON shapes produced by the upstream content
//! provider.  They are deserialized once per request and consumed read-only;
//! the renderer never mutates or fabricates content.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A complete pitch deck as returned by the content provider.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchDeckContent {
    /// Deck title shown on the title page.
    pub title: String,
    /// Ordered slides; each maps to exactly one rendered page.
    #[serde(default)]
    pub slides: Vec<PitchSlide>,
    /// Market insights rendered on the closing summary page.
    #[serde(default)]
    pub insights: Option<PitchInsights>,
    /// Optional executive summary shown on the title page.
    #[serde(default)]
    pub executive_summary: Option<String>,
}

/// One structured unit of pitch-deck content.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchSlide {
    /// 1-based position of the slide within the deck.
    pub slide_number: u32,
    /// Slide heading.
    pub title: String,
    /// Ordered bullet paragraphs.
    #[serde(default)]
    pub content: Vec<String>,
    /// Ordered key points; may be empty.
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Prompt for an illustration; carried through but unused by the
    /// renderer.
    #[serde(default)]
    pub image_prompt: Option<String>,
}

impl PitchSlide {
    /// Creates a slide with the given position and title.
    pub fn new(slide_number: u32, title: impl Into<String>) -> Self {
        Self {
            slide_number,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the bullet content and returns the updated slide.
    pub fn with_content<I, S>(mut self, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = content.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the key points and returns the updated slide.
    pub fn with_key_points<I, S>(mut self, key_points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_points = key_points.into_iter().map(Into::into).collect();
        self
    }
}

/// Free-text market insights rendered on the summary page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchInsights {
    #[serde(default)]
    pub market_size: String,
    #[serde(default)]
    pub revenue_projection: String,
    #[serde(default)]
    pub competitive_advantage: String,
    #[serde(default)]
    pub market_strategy: String,
}

/// Violation of the slide-numbering invariant.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error(
    "slide at position {position} carries number {found}; slide numbers must \
     be dense, 1-based and match the slide's position"
)]
pub struct ContentError {
    /// 1-based position of the offending slide.
    pub position: usize,
    /// The slide number recorded in the content.
    pub found: u32,
}

impl PitchDeckContent {
    /// Creates an empty deck with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Checks that slide numbers are dense, monotonic and 1-based, matching
    /// each slide's ordinal position.
    pub fn validate(&self) -> Result<(), ContentError> {
        for (index, slide) in self.slides.iter().enumerate() {
            let expected = index as u32 + 1;
            if slide.slide_number != expected {
                return Err(ContentError {
                    position: index + 1,
                    found: slide.slide_number,
                });
            }
        }
        Ok(())
    }
}

/// Generic document content rendered through a template.
///
/// Resumes and business plans arrive as a flat list of titled sections; the
/// selected layout variant decides how the sections are placed on the page.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    /// Document title.
    pub title: String,
    /// Ordered sections.
    #[serde(default)]
    pub sections: Vec<DocumentSection>,
}

/// A titled block of body text within a [`DocumentData`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    /// Section heading.
    pub heading: String,
    /// Free-text body.
    pub body: String,
}

impl DocumentSection {
    /// Creates a section from a heading and body.
    pub fn new(heading: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: body.into(),
        }
    }
}
