//! Score Specs
//!
//! Reads one JSON-encoded phone specification from stdin and prints the
//! predicted price range, using the same configuration and model as the form.
//!
//! ```text
//! echo '{"battery_power":3000,"blue":1,...}' | score-specs
//! ```

use anyhow::{Context, Result};
use mobile_price_predictor::{
    config::AppConfig,
    feature_extractor::FeatureExtractor,
    logging::{self, LogTarget},
    models::inference::Predictor,
    models::loader::ModelLoader,
    types::features::PhoneSpecs,
};
use std::io::Read;
use tracing::info;

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    logging::init(&config.logging, LogTarget::Stderr)?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read specification from stdin")?;
    let specs = PhoneSpecs::from_json(&input)?;

    let loader = ModelLoader::with_threads(config.model.onnx_threads);
    let predictor = Predictor::new(loader.load_state(&config.model.path));

    let record = FeatureExtractor::new().extract(&specs);
    let range = predictor.predict(&record)?;
    let (label, tier) = range.presentation();

    info!(label = label, tier = %tier, "Specification scored");
    println!("{} {} ({})", range.emoji(), label, tier);
    Ok(())
}
