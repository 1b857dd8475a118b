//! ONNX Runtime backend for exported classifiers

use crate::error::ModelLoadError;
use crate::models::classifier::{best_class, Classifier};
use crate::types::features::FEATURE_COUNT;
use crate::types::prediction::PriceRange;
use crate::types::record::FeatureRecord;
use anyhow::{anyhow, bail, Context, Result};
use ort::memory::Allocator;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, DynValue, ValueType};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

fn runtime_err(e: impl std::fmt::Display) -> ModelLoadError {
    ModelLoadError::Runtime(e.to_string())
}

/// Classifier backed by an ONNX Runtime session.
///
/// Running a session needs exclusive access, so it sits behind a mutex; the
/// pipeline is single-threaded and the lock is never contended.
pub struct OnnxClassifier {
    name: String,
    session: Mutex<Session>,
    input_name: String,
    /// Integer class output ("label" in skl2onnx exports)
    label_output: Option<String>,
    /// Per-class probabilities, used when no integer label is available
    prob_output: Option<String>,
    /// Class id of each probability column
    classes: Vec<i64>,
}

impl OnnxClassifier {
    /// Load an ONNX model from file
    pub fn load<P: AsRef<Path>>(
        path: P,
        name: &str,
        threads: usize,
    ) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();

        info!(model = %name, path = %path.display(), threads = threads, "Loading ONNX model");

        let session = Session::builder()
            .map_err(runtime_err)?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(runtime_err)?
            .with_intra_threads(threads)
            .map_err(runtime_err)?
            .commit_from_file(path)
            .map_err(runtime_err)?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| ModelLoadError::Schema {
                reason: "model declares no inputs".to_string(),
            })?;

        if let ValueType::Tensor { shape, .. } = &input.input_type {
            if let Some(&width) = shape.last() {
                // negative widths are symbolic dimensions
                if width >= 0 && width as usize != FEATURE_COUNT {
                    return Err(ModelLoadError::Schema {
                        reason: format!(
                            "input '{}' expects {} features, extractor produces {}",
                            input.name, width, FEATURE_COUNT
                        ),
                    });
                }
            }
        }
        let input_name = input.name.clone();

        let label_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("label"))
            .map(|o| o.name.clone());

        let prob_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob") || o.name.contains("output"))
            .map(|o| o.name.clone());

        if label_output.is_none() && prob_output.is_none() {
            return Err(ModelLoadError::Schema {
                reason: "model has neither a label nor a probability output".to_string(),
            });
        }

        info!(
            model = %name,
            input = %input_name,
            label_output = ?label_output,
            prob_output = ?prob_output,
            "Model loaded successfully"
        );

        Ok(Self {
            name: name.to_string(),
            session: Mutex::new(session),
            input_name,
            label_output,
            prob_output,
            classes: PriceRange::ALL.iter().map(|r| r.class_id()).collect(),
        })
    }

    /// Most probable class from a probability output.
    ///
    /// Handles a `[1, n_classes]` float tensor (columns in class order) and the
    /// `seq(map(int64, float))` shape that ZipMap-style exports emit.
    fn class_from_probabilities(&self, output: &DynValue) -> Result<i64> {
        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            if data.len() != self.classes.len() {
                bail!(
                    "probability output has {} columns, expected {}",
                    data.len(),
                    self.classes.len()
                );
            }
            let scores = self.classes.iter().copied().zip(data.iter().map(|p| *p as f64));
            return best_class(scores).ok_or_else(|| anyhow!("empty probability tensor"));
        }

        let dtype = output.dtype();
        if DynSequenceValueType::can_downcast(&dtype) {
            return class_from_sequence_map(output);
        }

        bail!("unsupported probability output type {:?}", dtype)
    }
}

/// Highest-probability key of the first `map(int64, float)` in a sequence.
fn class_from_sequence_map(output: &DynValue) -> Result<i64> {
    let allocator = Allocator::default();

    let sequence = output
        .downcast_ref::<DynSequenceValueType>()
        .map_err(|e| anyhow!("Failed to downcast to sequence: {}", e))?;

    // batch size is 1, so only the first map matters
    let maps = sequence.try_extract_sequence::<DynMapValueType>(&allocator)?;
    let first = maps.first().ok_or_else(|| anyhow!("Empty sequence"))?;

    let pairs = first.try_extract_key_values::<i64, f32>()?;
    best_class(pairs.into_iter().map(|(class, p)| (class, p as f64)))
        .ok_or_else(|| anyhow!("No probability found in map"))
}

impl Classifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &FeatureRecord) -> Result<i64> {
        use ort::value::Tensor;

        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, FEATURE_COUNT as i64];
        let input_tensor = Tensor::from_array((shape, record.to_vec()))
            .context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow!("Lock error: {}", e))?;

        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        if let Some(name) = &self.label_output {
            if let Some(output) = outputs.get(name.as_str()) {
                match output.try_extract_tensor::<i64>() {
                    Ok((_, data)) => {
                        if let Some(&label) = data.first() {
                            debug!(model = %self.name, label = label, "Extracted label");
                            return Ok(label);
                        }
                    }
                    // string class labels, for instance
                    Err(e) => debug!(
                        model = %self.name,
                        output = %name,
                        error = %e,
                        "Label output is not an int64 tensor, falling back to probabilities"
                    ),
                }
            }
        }

        if let Some(name) = &self.prob_output {
            if let Some(output) = outputs.get(name.as_str()) {
                let label = self.class_from_probabilities(&output)?;
                debug!(model = %self.name, label = label, "Extracted most probable class");
                return Ok(label);
            }
        }

        Err(anyhow!("model '{}' produced no usable output", self.name))
    }
}
