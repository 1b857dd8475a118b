//! Feature extraction for price-range model inference.
//!
//! This module lays out phone specifications in the column order
//! the classifier saw during training.

use crate::types::features::{PhoneSpecs, FEATURE_COUNT, FEATURE_NAMES};
use crate::types::record::FeatureRecord;

fn flag(v: bool) -> f32 {
    if v {
        1.0
    } else {
        0.0
    }
}

/// Feature extractor that transforms phone specifications into model input rows.
///
/// Columns are written in the exact order expected by the trained model.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract the model input row from a specification.
    ///
    /// Order matches [`FEATURE_NAMES`].
    pub fn extract(&self, specs: &PhoneSpecs) -> FeatureRecord {
        FeatureRecord::new([
            specs.battery_power as f32,
            flag(specs.blue),
            specs.clock_speed,
            flag(specs.dual_sim),
            specs.fc as f32,
            flag(specs.four_g),
            specs.int_memory as f32,
            specs.m_dep,
            specs.mobile_wt as f32,
            specs.n_cores as f32,
            specs.pc as f32,
            specs.px_height as f32,
            specs.px_width as f32,
            specs.ram as f32,
            specs.sc_h as f32,
            specs.sc_w as f32,
            specs.talk_time as f32,
            flag(specs.three_g),
            flag(specs.touch_screen),
            flag(specs.wifi),
        ])
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (matching training order).
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
