//! Mobile Price Range Predictor Library
//!
//! Collects smartphone specifications, lays them out in the column order of a
//! pre-trained classifier, and maps the predicted class to a price category.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod logging;
pub mod models;
pub mod session;
pub mod types;
pub mod ui;

pub use config::AppConfig;
pub use error::{ModelLoadError, PredictError};
pub use feature_extractor::FeatureExtractor;
pub use models::inference::{ModelState, Predictor};
pub use models::loader::ModelLoader;
pub use session::PredictionSession;
pub use types::{
    features::{Feature, PhoneSpecs},
    prediction::{PriceRange, SeverityTier},
    record::FeatureRecord,
};
