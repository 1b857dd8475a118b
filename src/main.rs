//! Mobile Price Range Predictor - Main Entry Point
//!
//! Loads the trained classifier once, then runs the interactive prediction form.

use anyhow::Result;
use mobile_price_predictor::{
    config::AppConfig,
    logging::{self, LogTarget},
    models::loader::ModelLoader,
    models::inference::Predictor,
    session::PredictionSession,
    ui::{self, App},
};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize logging
    logging::init(&config.logging, LogTarget::File)?;

    info!("Starting Mobile Price Range Predictor");
    info!(model_path = %config.model.path, "Configuration loaded successfully");

    // Load the model once; a failure keeps the form usable but blocks prediction
    let loader = ModelLoader::with_threads(config.model.onnx_threads);
    let predictor = Predictor::new(loader.load_state(&config.model.path));
    match predictor.model_name() {
        Some(name) => info!(model = %name, "Predictor initialized"),
        None => warn!("Predictor initialized without a model; predictions are disabled"),
    }

    let app = App::new(PredictionSession::new(predictor), config.about.clone());
    ui::run(app)?;

    info!("Shutting down");
    Ok(())
}
