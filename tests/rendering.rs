use protolab_render::content::{PitchDeckContent, PitchInsights, PitchSlide};
use protolab_render::deck::{compose_pitch_deck, generate_pitch_deck_pdf, DeckOptions};
use sha2::{Digest, Sha256};

fn sample_deck() -> PitchDeckContent {
    PitchDeckContent {
        title: "AgriTech Kenya".to_string(),
        slides: vec![
            PitchSlide::new(1, "Problem")
                .with_content([
                    "Smallholder farmers lose up to 40% of harvests post-harvest.",
                    "Market price information rarely reaches rural producers in time.",
                ])
                .with_key_points(["Post-harvest loss is the single largest margin drain."]),
            PitchSlide::new(2, "Solution")
                .with_content([
                    "SMS-first marketplace connecting farmers directly to urban buyers.",
                    "Cold-chain micro-depots placed at county aggregation points.",
                ])
                .with_key_points(["Works on feature phones", "No app install required"]),
            PitchSlide::new(3, "Market").with_content([
                "Six million smallholder farming households across East Africa.",
            ]),
        ],
        insights: Some(PitchInsights {
            market_size: "USD 2.4B addressable produce trade in Kenya alone.".to_string(),
            revenue_projection: "3% take rate reaching USD 1.2M ARR by year three.".to_string(),
            competitive_advantage: "Only SMS-native player with physical cold-chain assets."
                .to_string(),
            market_strategy: "County-by-county rollout anchored on cooperative partnerships."
                .to_string(),
        }),
        executive_summary: Some(
            "AgriTech Kenya cuts post-harvest losses by connecting smallholders to \
             urban demand within hours of harvest."
                .to_string(),
        ),
    }
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            if let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            {
                let start_index = offset + start_pos + start.len();
                if let Some(end_pos) = data[start_index..]
                    .windows(end.len())
                    .position(|window| window == end)
                {
                    for byte in &mut data[start_index..start_index + end_pos] {
                        if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                            *byte = b'0';
                        }
                    }
                    offset = start_index + end_pos + end.len();
                } else {
                    break;
                }
            } else {
                break;
            }
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    scrub_xml(&mut normalized, b"<xmp:CreateDate>", b"</xmp:CreateDate>");
    scrub_xml(&mut normalized, b"<xmp:ModifyDate>", b"</xmp:ModifyDate>");
    scrub_xml(
        &mut normalized,
        b"<xmp:MetadataDate>",
        b"</xmp:MetadataDate>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:DocumentID>",
        b"</xmpMM:DocumentID>",
    );
    scrub_xml(
        &mut normalized,
        b"<xmpMM:InstanceID>",
        b"</xmpMM:InstanceID>",
    );
    scrub_xml(&mut normalized, b"<xmpMM:VersionID>", b"</xmpMM:VersionID>");
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    let digest = Sha256::digest(&normalized);
    digest.into()
}

#[test]
fn renders_non_empty_output() {
    let bytes = generate_pitch_deck_pdf(&sample_deck(), false).expect("render sample deck");
    assert!(bytes.starts_with(b"%PDF"), "output should be a PDF");
}

#[test]
fn deck_renders_one_page_per_slide_plus_title_and_insights() {
    let deck = sample_deck();
    let document = compose_pitch_deck(&deck, &DeckOptions::default()).expect("compose deck");
    assert_eq!(document.pages().len(), deck.slides.len() + 2);
}

#[test]
fn empty_deck_renders_two_pages() {
    let document = compose_pitch_deck(&PitchDeckContent::new("Empty"), &DeckOptions::default())
        .expect("compose empty deck");
    assert_eq!(document.pages().len(), 2);
}

#[test]
fn watermark_adds_exactly_one_rotated_run_per_content_page() {
    let deck = sample_deck();
    let plain = compose_pitch_deck(&deck, &DeckOptions::default()).expect("compose plain");
    let options = DeckOptions {
        watermark: true,
        ..DeckOptions::default()
    };
    let marked = compose_pitch_deck(&deck, &options).expect("compose watermarked");

    assert_eq!(plain.pages().len(), marked.pages().len());
    for (index, (plain_page, marked_page)) in
        plain.pages().iter().zip(marked.pages()).enumerate()
    {
        let rotated: Vec<_> = marked_page
            .text_runs()
            .filter(|run| run.rotation.is_some())
            .collect();
        if index == 0 {
            assert!(rotated.is_empty(), "title page must stay unwatermarked");
        } else {
            assert_eq!(rotated.len(), 1, "page {index} should carry one watermark");
            assert_eq!(rotated[0].text, options.watermark_text);
        }

        // Everything except the watermark must be untouched.
        let stripped: Vec<_> = marked_page
            .text_runs()
            .filter(|run| run.rotation.is_none())
            .collect();
        let expected: Vec<_> = plain_page.text_runs().collect();
        assert_eq!(stripped, expected);
    }
}

#[test]
fn rendering_is_deterministic() {
    let deck = sample_deck();
    let bytes_a = generate_pitch_deck_pdf(&deck, true).expect("first render");
    let bytes_b = generate_pitch_deck_pdf(&deck, true).expect("second render");

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn provider_json_deserializes_with_camel_case_fields() {
    let json = r#"{
        "title": "AgriTech Kenya",
        "slides": [
            {
                "slideNumber": 1,
                "title": "Problem",
                "content": ["Harvest losses"],
                "keyPoints": ["Margin drain"],
                "imagePrompt": "a maize field at dusk"
            }
        ],
        "insights": {
            "marketSize": "USD 2.4B",
            "revenueProjection": "USD 1.2M ARR",
            "competitiveAdvantage": "SMS-native",
            "marketStrategy": "County rollout"
        },
        "executiveSummary": "Cuts post-harvest losses."
    }"#;

    let deck: PitchDeckContent = serde_json::from_str(json).expect("deserialize deck");
    assert_eq!(deck.slides.len(), 1);
    assert_eq!(deck.slides[0].slide_number, 1);
    assert_eq!(deck.slides[0].key_points, ["Margin drain"]);
    assert_eq!(
        deck.slides[0].image_prompt.as_deref(),
        Some("a maize field at dusk")
    );
    assert!(deck.validate().is_ok());
    assert!(generate_pitch_deck_pdf(&deck, false).is_ok());
}

#[cfg(feature = "bookmarks")]
#[test]
fn outline_entries_cover_each_slide_and_the_insights_page() {
    use lopdf::{Document, Object};
    use protolab_render::outline::apply_slide_outlines;

    let deck = sample_deck();
    let bytes = generate_pitch_deck_pdf(&deck, false).expect("render deck");
    let with_outline = apply_slide_outlines(&bytes, &deck).expect("attach outline");

    let document = Document::load_mem(&with_outline).expect("reload PDF");
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .expect("catalog reference");
    let catalog = document
        .get_object(catalog_id)
        .and_then(Object::as_dict)
        .expect("catalog dictionary");
    let outlines_id = catalog
        .get(b"Outlines")
        .and_then(Object::as_reference)
        .expect("outlines reference");
    let outlines = document
        .get_object(outlines_id)
        .and_then(Object::as_dict)
        .expect("outlines dictionary");

    let count = outlines
        .get(b"Count")
        .and_then(Object::as_i64)
        .expect("outline count");
    assert_eq!(count as usize, deck.slides.len() + 1);
}
