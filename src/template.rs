//! The static template catalog and layout selection.
//!
//! Templates are fixed configuration: a color palette plus a layout variant,
//! grouped by document category and pricing tier.  The free catalog is always
//! searchable; premium templates are only consulted when the caller asks for
//! them.  Cosmetic defects in a template definition (a malformed hex color,
//! an unknown layout id) are recovered locally so a bad palette entry can
//! never block document generation.

use log::warn;
use thiserror::Error;

use crate::page::Rgb;

/// Document category a template applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateCategory {
    Resume,
    BusinessPlan,
    PitchDeck,
}

/// Pricing tier of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateTier {
    Free,
    Premium,
}

/// One of the fixed page-composition strategies a template can select.
///
/// The catalog stores layout ids as strings; they are resolved to this enum
/// when a template is applied so that dispatch is exhaustive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutVariant {
    /// Headings and body stacked in a single column.
    #[default]
    SingleColumn,
    /// Sections flow down the left column, then the right.
    TwoColumn,
    /// Sections placed into a 2x2 grid of cells per page.
    Grid,
}

impl LayoutVariant {
    /// Resolves a catalog layout id, or `None` for unknown ids.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "single-column" => Some(LayoutVariant::SingleColumn),
            "two-column" => Some(LayoutVariant::TwoColumn),
            "grid" => Some(LayoutVariant::Grid),
            _ => None,
        }
    }
}

/// A named palette-plus-layout configuration.
#[derive(Clone, Copy, Debug)]
pub struct Template {
    id: &'static str,
    category: TemplateCategory,
    tier: TemplateTier,
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    layout: &'static str,
}

impl Template {
    /// Unique template identifier.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Document category this template applies to.
    pub fn category(&self) -> TemplateCategory {
        self.category
    }

    /// Pricing tier.
    pub fn tier(&self) -> TemplateTier {
        self.tier
    }

    /// Converts the configured hex colors into a normalized palette.
    ///
    /// Malformed entries resolve to black instead of failing; the defect is
    /// logged because it indicates a broken catalog entry.
    pub fn palette(&self) -> Palette {
        Palette {
            primary: resolve_color(self.id, "primary", self.primary),
            secondary: resolve_color(self.id, "secondary", self.secondary),
            accent: resolve_color(self.id, "accent", self.accent),
        }
    }

    /// Resolves the configured layout id, falling back to the default
    /// single-column variant for unrecognized values.
    pub fn layout_variant(&self) -> LayoutVariant {
        match LayoutVariant::from_id(self.layout) {
            Some(variant) => variant,
            None => {
                warn!(
                    "template `{}` names unknown layout `{}`; using the default layout",
                    self.id, self.layout
                );
                LayoutVariant::default()
            }
        }
    }
}

/// Normalized `[0, 1]` RGB triples for the drawing primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
}

impl Default for Palette {
    /// The stock ProtoLab deck palette, used when rendering without a
    /// template.
    fn default() -> Self {
        Palette {
            primary: Rgb::new(0.12, 0.31, 0.47),
            secondary: Rgb::new(0.27, 0.45, 0.77),
            accent: Rgb::new(0.93, 0.49, 0.19),
        }
    }
}

/// Outcome of parsing a `#RRGGBB` color string.
///
/// The `defaulted` marker lets tests (and catalog linting) distinguish a
/// genuinely dark color from the black fallback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedColor {
    pub rgb: Rgb,
    pub defaulted: bool,
}

/// Parses a strict 6-digit hex color, with or without a leading `#`.
///
/// Anything else yields black with the `defaulted` marker set; a cosmetic
/// color defect must not block document generation.
pub fn parse_hex_color(hex: &str) -> ParsedColor {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        // Validated above, so the radix conversions cannot fail.
        let r = u8::from_str_radix(&digits[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&digits[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&digits[4..6], 16).unwrap_or(0);
        ParsedColor {
            rgb: Rgb::new(
                f32::from(r) / 255.0,
                f32::from(g) / 255.0,
                f32::from(b) / 255.0,
            ),
            defaulted: false,
        }
    } else {
        ParsedColor {
            rgb: Rgb::BLACK,
            defaulted: true,
        }
    }
}

fn resolve_color(template_id: &str, slot: &str, hex: &str) -> Rgb {
    let parsed = parse_hex_color(hex);
    if parsed.defaulted {
        warn!("template `{template_id}` has malformed {slot} color `{hex}`; defaulting to black");
    }
    parsed.rgb
}

/// Templates available to every plan.
const FREE_TEMPLATES: &[Template] = &[
    Template {
        id: "startup-classic",
        category: TemplateCategory::PitchDeck,
        tier: TemplateTier::Free,
        primary: "#1F4E79",
        secondary: "#4472C4",
        accent: "#ED7D31",
        layout: "single-column",
    },
    Template {
        id: "clean-slate",
        category: TemplateCategory::Resume,
        tier: TemplateTier::Free,
        primary: "#222831",
        secondary: "#393E46",
        accent: "#00ADB5",
        layout: "single-column",
    },
    Template {
        id: "foundation",
        category: TemplateCategory::BusinessPlan,
        tier: TemplateTier::Free,
        primary: "#2D4059",
        secondary: "#EA5455",
        accent: "#F07B3F",
        layout: "single-column",
    },
];

/// Templates reserved for paying plans.
const PREMIUM_TEMPLATES: &[Template] = &[
    Template {
        id: "investor-pro",
        category: TemplateCategory::PitchDeck,
        tier: TemplateTier::Premium,
        primary: "#0F3460",
        secondary: "#16213E",
        accent: "#E94560",
        layout: "two-column",
    },
    Template {
        id: "executive-edge",
        category: TemplateCategory::Resume,
        tier: TemplateTier::Premium,
        primary: "#1B262C",
        secondary: "#0F4C75",
        accent: "#3282B8",
        layout: "two-column",
    },
    Template {
        id: "blueprint-grid",
        category: TemplateCategory::BusinessPlan,
        tier: TemplateTier::Premium,
        primary: "#144272",
        secondary: "#205295",
        accent: "#2C74B3",
        layout: "grid",
    },
    Template {
        id: "venture-bold",
        category: TemplateCategory::PitchDeck,
        tier: TemplateTier::Premium,
        primary: "#371B58",
        secondary: "#4C3575",
        accent: "#7858A6",
        layout: "grid",
    },
];

/// The requested template id does not exist in the searched catalog.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("template `{id}` does not exist")]
pub struct TemplateError {
    /// The id that was requested.
    pub id: String,
}

/// Looks up a template by id.
///
/// The free catalog is always searched; premium templates only when
/// `include_premium` is set.
pub fn find_template(id: &str, include_premium: bool) -> Option<&'static Template> {
    let free = FREE_TEMPLATES.iter().find(|t| t.id == id);
    if free.is_some() || !include_premium {
        return free;
    }
    PREMIUM_TEMPLATES.iter().find(|t| t.id == id)
}

/// Resolves a template id to its palette and layout variant.
///
/// Fails with [`TemplateError`] for unknown ids; callers must surface the
/// failure rather than fall back silently.
pub fn select_layout(
    template_id: &str,
    include_premium: bool,
) -> Result<(Palette, LayoutVariant), TemplateError> {
    let template = find_template(template_id, include_premium).ok_or_else(|| TemplateError {
        id: template_id.to_string(),
    })?;
    Ok((template.palette(), template.layout_variant()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_free_template_resolves_to_configured_palette() {
        let (palette, variant) = select_layout("startup-classic", false).unwrap();
        assert_eq!(variant, LayoutVariant::SingleColumn);
        // #1F4E79 normalized.
        assert!((palette.primary.r - 0x1F as f32 / 255.0).abs() < 1e-6);
        assert!((palette.primary.g - 0x4E as f32 / 255.0).abs() < 1e-6);
        assert!((palette.primary.b - 0x79 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn unknown_template_is_not_found() {
        let err = select_layout("does-not-exist", true).unwrap_err();
        assert_eq!(err.id, "does-not-exist");
    }

    #[test]
    fn premium_templates_require_opt_in() {
        assert!(select_layout("investor-pro", false).is_err());
        let (_, variant) = select_layout("investor-pro", true).unwrap();
        assert_eq!(variant, LayoutVariant::TwoColumn);
    }

    #[test]
    fn malformed_hex_defaults_to_black_with_marker() {
        for bad in ["", "#12345", "#12345G", "blue", "#1234567"] {
            let parsed = parse_hex_color(bad);
            assert!(parsed.defaulted, "{bad:?} should default");
            assert_eq!(parsed.rgb, Rgb::BLACK);
        }
    }

    #[test]
    fn valid_black_is_not_marked_defaulted() {
        let parsed = parse_hex_color("#000000");
        assert!(!parsed.defaulted);
        assert_eq!(parsed.rgb, Rgb::BLACK);
    }

    #[test]
    fn hex_parses_with_or_without_hash() {
        assert_eq!(parse_hex_color("#FFFFFF"), parse_hex_color("FFFFFF"));
    }

    #[test]
    fn unknown_layout_id_falls_back_to_single_column() {
        let template = Template {
            id: "test",
            category: TemplateCategory::PitchDeck,
            tier: TemplateTier::Free,
            primary: "#000000",
            secondary: "#000000",
            accent: "#000000",
            layout: "spiral",
        };
        assert_eq!(template.layout_variant(), LayoutVariant::SingleColumn);
    }

    #[test]
    fn catalog_layout_ids_all_resolve() {
        for template in FREE_TEMPLATES.iter().chain(PREMIUM_TEMPLATES) {
            assert!(
                LayoutVariant::from_id(template.layout).is_some(),
                "template `{}` has unresolvable layout `{}`",
                template.id(),
                template.layout
            );
        }
    }
}
