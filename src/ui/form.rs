//! Input controls for the twenty phone features

use crate::types::features::{Feature, FeatureDomain, FeatureGroup, PhoneSpecs};

/// Current values of the form plus which control has focus.
///
/// Controls are visited in panel order (Connectivity first), which differs
/// from the model's column order.
#[derive(Debug, Clone)]
pub struct FormState {
    specs: PhoneSpecs,
    order: Vec<Feature>,
    focus: usize,
}

impl FormState {
    pub fn new() -> Self {
        Self::with_specs(PhoneSpecs::default())
    }

    pub fn with_specs(specs: PhoneSpecs) -> Self {
        let order = FeatureGroup::ALL
            .iter()
            .flat_map(|g| g.features().iter().copied())
            .collect();
        Self {
            specs,
            order,
            focus: 0,
        }
    }

    pub fn specs(&self) -> &PhoneSpecs {
        &self.specs
    }

    pub fn focused(&self) -> Feature {
        self.order[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.order.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.order.len() - 1) % self.order.len();
    }

    /// Move the focused slider by `steps` ticks.
    pub fn adjust(&mut self, steps: i32) {
        let feature = self.focused();
        self.specs.nudge(feature, steps);
    }

    /// Flip the focused control if it is a yes/no choice.
    pub fn toggle(&mut self) {
        let feature = self.focused();
        if feature.domain().is_flag() {
            self.specs.nudge(feature, 1);
        }
    }

    /// Restore defaults, keeping focus where it is.
    pub fn reset(&mut self) {
        self.specs = PhoneSpecs::default();
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Text shown for a feature's current value.
pub fn format_value(feature: Feature, value: f64) -> String {
    match feature.domain() {
        FeatureDomain::Flag => {
            if value >= 0.5 {
                "Yes".to_string()
            } else {
                "No".to_string()
            }
        }
        FeatureDomain::Count { .. } => format!("{}", value as i64),
        FeatureDomain::Measure { .. } => format!("{:.1}", value),
    }
}

/// Fraction of the slider that is filled, in `0.0..=1.0`.
pub fn slider_ratio(feature: Feature, value: f64) -> f64 {
    let (min, max) = feature.domain().bounds();
    if max <= min {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}
