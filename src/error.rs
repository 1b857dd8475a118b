//! Error types surfaced by model loading and prediction

use std::path::PathBuf;
use thiserror::Error;

/// Why a predict action produced no verdict
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// No model was loaded at startup; inference is never attempted.
    #[error("Model unavailable: {reason}. Place a trained model artifact at the configured model path and restart.")]
    ModelUnavailable { reason: String },

    /// The model was invoked and failed.
    #[error("Prediction failed: {cause}")]
    Prediction { cause: String },
}

impl PredictError {
    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        PredictError::ModelUnavailable {
            reason: reason.into(),
        }
    }

    pub fn prediction(cause: impl Into<String>) -> Self {
        PredictError::Prediction {
            cause: cause.into(),
        }
    }
}

/// Failure to bring a model artifact into memory
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported model format '{extension}' for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model schema mismatch: {reason}")]
    Schema { reason: String },

    #[error("model runtime error: {0}")]
    Runtime(String),
}
