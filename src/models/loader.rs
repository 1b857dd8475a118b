//! Model artifact loader

use crate::error::ModelLoadError;
use crate::models::classifier::Classifier;
use crate::models::inference::ModelState;
use crate::models::linear::LinearClassifier;
use std::path::Path;
use tracing::{info, warn};

/// Loads the classifier artifact, choosing the backend by file extension.
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread)
    pub fn new() -> Self {
        Self::with_threads(1)
    }

    /// Create a new model loader with specified number of ONNX threads
    pub fn with_threads(onnx_threads: usize) -> Self {
        Self {
            onnx_threads: onnx_threads.max(1),
        }
    }

    /// Load a single model artifact from file
    pub fn load_model<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Box<dyn Classifier>, ModelLoadError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ModelLoadError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        info!(path = %path.display(), format = %extension, "Loading model artifact");

        match extension.as_str() {
            "json" => Ok(Box::new(LinearClassifier::load(path)?)),
            #[cfg(feature = "onnx")]
            "onnx" => {
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("onnx");
                Ok(Box::new(crate::models::onnx::OnnxClassifier::load(
                    path,
                    name,
                    self.onnx_threads,
                )?))
            }
            _ => {
                if extension == "onnx" {
                    warn!(
                        threads = self.onnx_threads,
                        "ONNX artifact given but this build lacks the `onnx` feature"
                    );
                }
                Err(ModelLoadError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    extension,
                })
            }
        }
    }

    /// Load the artifact once at startup, folding any failure into
    /// [`ModelState::Unavailable`].
    pub fn load_state<P: AsRef<Path>>(&self, path: P) -> ModelState {
        let path = path.as_ref();
        match self.load_model(path) {
            Ok(model) => {
                info!(model = %model.name(), path = %path.display(), "Model ready");
                ModelState::Loaded(model)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Model unavailable");
                ModelState::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}
