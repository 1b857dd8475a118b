//! Ordered model input row

use super::features::{FEATURE_COUNT, FEATURE_NAMES};

/// One model input row: exactly [`FEATURE_COUNT`] values in [`FEATURE_NAMES`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRecord {
    values: [f32; FEATURE_COUNT],
}

impl FeatureRecord {
    pub fn new(values: [f32; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f32; FEATURE_COUNT] {
        &self.values
    }

    /// Value of the named column, if the name is a model column.
    pub fn get(&self, name: &str) -> Option<f32> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// `(column name, value)` pairs in model order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.values.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_name() {
        let mut values = [0.0; FEATURE_COUNT];
        values[13] = 4000.0;
        let record = FeatureRecord::new(values);

        assert_eq!(record.get("ram"), Some(4000.0));
        assert_eq!(record.get("battery_power"), Some(0.0));
        assert_eq!(record.get("price"), None);
    }

    #[test]
    fn test_fields_follow_column_order() {
        let record = FeatureRecord::new([1.0; FEATURE_COUNT]);
        let names: Vec<&str> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, FEATURE_NAMES.to_vec());
    }
}
