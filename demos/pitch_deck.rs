use std::error::Error;

use protolab_render::content::{PitchDeckContent, PitchInsights, PitchSlide};
use protolab_render::deck::generate_pitch_deck_pdf;

fn main() -> Result<(), Box<dyn Error>> {
    let deck = PitchDeckContent {
        title: "AgriTech Kenya".to_string(),
        slides: vec![
            PitchSlide::new(1, "Problem").with_content([
                "Smallholder farmers lose up to 40% of harvests after picking.",
                "Market prices rarely reach rural producers before the sale.",
            ]),
            PitchSlide::new(2, "Solution")
                .with_content([
                    "SMS-first marketplace connecting farmers directly to urban buyers.",
                ])
                .with_key_points(["Works on feature phones", "No app install required"]),
            PitchSlide::new(3, "Traction").with_content([
                "1,200 farmers onboarded across three counties in six months.",
            ]),
        ],
        insights: Some(PitchInsights {
            market_size: "USD 2.4B addressable produce trade in Kenya alone.".to_string(),
            revenue_projection: "3% take rate reaching USD 1.2M ARR by year three.".to_string(),
            competitive_advantage: "Only SMS-native player with cold-chain assets.".to_string(),
            market_strategy: "County-by-county rollout via cooperative partnerships.".to_string(),
        }),
        executive_summary: None,
    };

    let pdf = generate_pitch_deck_pdf(&deck, true)?;
    std::fs::write("pitch_deck.pdf", &pdf)?;
    println!("Generated pitch_deck.pdf ({} bytes)", pdf.len());
    Ok(())
}
