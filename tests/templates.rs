use protolab_render::apply::{apply_template, compose_with_template, ApplyError, ApplyOptions};
use protolab_render::content::{DocumentData, DocumentSection};
use protolab_render::template::{select_layout, LayoutVariant};

fn resume_data() -> DocumentData {
    DocumentData {
        title: "Jane Mwangi".to_string(),
        sections: vec![
            DocumentSection::new(
                "Experience",
                "Operations lead for a distributed agricultural marketplace, \
                 growing throughput from two to forty counties.",
            ),
            DocumentSection::new(
                "Education",
                "BSc Computer Science, University of Nairobi.",
            ),
            DocumentSection::new("Skills", "Logistics, SQL, stakeholder management."),
        ],
    }
}

#[test]
fn free_templates_render_to_pdf_bytes() {
    for id in ["startup-classic", "clean-slate", "foundation"] {
        let bytes = apply_template(id, &resume_data(), &ApplyOptions::default())
            .unwrap_or_else(|err| panic!("template `{id}` failed: {err}"));
        assert!(bytes.starts_with(b"%PDF"));
    }
}

#[test]
fn unknown_template_id_is_rejected() {
    let err = apply_template("gold-leaf", &resume_data(), &ApplyOptions::default()).unwrap_err();
    match err {
        ApplyError::Template(inner) => assert_eq!(inner.id, "gold-leaf"),
        other => panic!("expected a template error, got {other}"),
    }
}

#[test]
fn premium_catalog_is_closed_by_default() {
    assert!(apply_template("executive-edge", &resume_data(), &ApplyOptions::default()).is_err());

    let options = ApplyOptions {
        include_premium: true,
        ..ApplyOptions::default()
    };
    let bytes = apply_template("executive-edge", &resume_data(), &options)
        .expect("premium template with opt-in");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn selected_palette_matches_catalog_hex_colors() {
    let (palette, variant) = select_layout("startup-classic", false).expect("known template");
    assert_eq!(variant, LayoutVariant::SingleColumn);
    assert!((palette.secondary.r - 0x44 as f32 / 255.0).abs() < 1e-6);
    assert!((palette.secondary.g - 0x72 as f32 / 255.0).abs() < 1e-6);
    assert!((palette.secondary.b - 0xC4 as f32 / 255.0).abs() < 1e-6);
}

#[test]
fn single_column_layout_paginates_long_documents() {
    let long = DocumentData {
        title: "Business Plan".to_string(),
        sections: (0..30)
            .map(|i| {
                DocumentSection::new(
                    format!("Chapter {i}"),
                    "A paragraph of planning prose that wraps over several lines once \
                     measured at body size. "
                        .repeat(3),
                )
            })
            .collect(),
    };
    let document = compose_with_template("startup-classic", &long, &ApplyOptions::default())
        .expect("compose long document");
    assert!(document.pages().len() > 1);
}

#[test]
fn every_section_heading_appears_in_each_variant() {
    let data = resume_data();
    let cases = [
        ("startup-classic", false),
        ("investor-pro", true),
        ("blueprint-grid", true),
    ];
    for (id, include_premium) in cases {
        let options = ApplyOptions {
            include_premium,
            ..ApplyOptions::default()
        };
        let document = compose_with_template(id, &data, &options)
            .unwrap_or_else(|err| panic!("template `{id}` failed: {err}"));
        for section in &data.sections {
            let found = document.pages().iter().any(|page| {
                page.text_runs().any(|run| run.text == section.heading)
            });
            assert!(found, "heading `{}` missing under `{id}`", section.heading);
        }
    }
}
