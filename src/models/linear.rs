//! Multinomial linear classifier read from a JSON artifact
//!
//! The artifact holds an optional standard scaler followed by one weight row
//! and intercept per class, the layout a fitted scikit-learn
//! `StandardScaler` + `LogisticRegression` pipeline exports to.

use crate::error::ModelLoadError;
use crate::models::classifier::{best_class, Classifier};
use crate::types::features::{FEATURE_COUNT, FEATURE_NAMES};
use crate::types::prediction::PriceRange;
use crate::types::record::FeatureRecord;
use anyhow::{anyhow, bail, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Standardization applied before the linear layer
#[derive(Debug, Clone, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// On-disk form of the linear model
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModelArtifact {
    #[serde(default = "default_name")]
    pub name: String,
    /// Training-time column order, checked against the extractor when present
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub classes: Vec<i64>,
    #[serde(default)]
    pub scaler: Option<ScalerParams>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

fn default_name() -> String {
    "linear".to_string()
}

/// Validated linear classifier
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    name: String,
    classes: Vec<i64>,
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
    weights: Vec<[f64; FEATURE_COUNT]>,
    intercepts: Vec<f64>,
}

fn schema_err(reason: String) -> ModelLoadError {
    ModelLoadError::Schema { reason }
}

fn fixed_width(values: &[f64], what: &str) -> Result<[f64; FEATURE_COUNT], ModelLoadError> {
    values.try_into().map_err(|_| {
        schema_err(format!(
            "{} has {} values, expected {}",
            what,
            values.len(),
            FEATURE_COUNT
        ))
    })
}

impl LinearClassifier {
    /// Validate an artifact against the model input layout.
    pub fn from_artifact(artifact: LinearModelArtifact) -> Result<Self, ModelLoadError> {
        if let Some(names) = &artifact.feature_names {
            if names.len() != FEATURE_COUNT
                || names.iter().zip(FEATURE_NAMES.iter()).any(|(a, b)| a != b)
            {
                return Err(schema_err(format!(
                    "feature_names {:?} do not match expected column order {:?}",
                    names, FEATURE_NAMES
                )));
            }
        }

        if artifact.classes.is_empty() {
            return Err(schema_err("model declares no classes".to_string()));
        }
        for (i, class) in artifact.classes.iter().enumerate() {
            if PriceRange::try_from(*class).is_err() {
                return Err(schema_err(format!(
                    "class {} is not a price range, expected one of 0, 1, 2, 3",
                    class
                )));
            }
            if artifact.classes[..i].contains(class) {
                return Err(schema_err(format!("class {} is declared twice", class)));
            }
        }
        if artifact.coefficients.len() != artifact.classes.len() {
            return Err(schema_err(format!(
                "{} coefficient rows for {} classes",
                artifact.coefficients.len(),
                artifact.classes.len()
            )));
        }
        if artifact.intercepts.len() != artifact.classes.len() {
            return Err(schema_err(format!(
                "{} intercepts for {} classes",
                artifact.intercepts.len(),
                artifact.classes.len()
            )));
        }

        let weights = artifact
            .coefficients
            .iter()
            .enumerate()
            .map(|(i, row)| fixed_width(row, &format!("coefficient row {}", i)))
            .collect::<Result<Vec<_>, _>>()?;

        let (mean, scale) = match &artifact.scaler {
            Some(scaler) => {
                let mean = fixed_width(&scaler.mean, "scaler mean")?;
                let scale = fixed_width(&scaler.scale, "scaler scale")?;
                if let Some(i) = scale.iter().position(|s| !s.is_finite() || *s <= 0.0) {
                    return Err(schema_err(format!(
                        "scaler scale for {} must be positive, got {}",
                        FEATURE_NAMES[i], scale[i]
                    )));
                }
                (mean, scale)
            }
            None => ([0.0; FEATURE_COUNT], [1.0; FEATURE_COUNT]),
        };

        Ok(Self {
            name: artifact.name,
            classes: artifact.classes,
            mean,
            scale,
            weights,
            intercepts: artifact.intercepts,
        })
    }

    /// Parse and validate a JSON artifact.
    pub fn from_json_str(json: &str) -> Result<Self, ModelLoadError> {
        let artifact: LinearModelArtifact =
            serde_json::from_str(json).map_err(|source| ModelLoadError::Parse {
                path: Path::new("<inline>").to_path_buf(),
                source,
            })?;
        Self::from_artifact(artifact)
    }

    /// Load a JSON artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: LinearModelArtifact =
            serde_json::from_str(&raw).map_err(|source| ModelLoadError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let model = Self::from_artifact(artifact)?;

        info!(
            model = %model.name,
            classes = ?model.classes,
            path = %path.display(),
            "Linear model loaded"
        );
        Ok(model)
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Per-class decision scores for a row.
    pub fn decision_function(&self, record: &FeatureRecord) -> Vec<f64> {
        let x: Vec<f64> = record
            .values()
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&v, (&m, &s))| (v as f64 - m) / s)
            .collect();

        self.weights
            .iter()
            .zip(self.intercepts.iter())
            .map(|(w, b)| w.iter().zip(x.iter()).map(|(wi, xi)| wi * xi).sum::<f64>() + b)
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, record: &FeatureRecord) -> Result<i64> {
        let scores = self.decision_function(record);

        if let Some(i) = scores.iter().position(|s| !s.is_finite()) {
            bail!("non-finite decision score for class {}", self.classes[i]);
        }

        best_class(self.classes.iter().copied().zip(scores))
            .ok_or_else(|| anyhow!("model '{}' has no classes", self.name))
    }
}
