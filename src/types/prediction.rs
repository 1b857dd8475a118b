//! Price-range labels and their display treatment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display urgency of a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Info,
    Warning,
    Error,
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeverityTier::Info => "info",
            SeverityTier::Warning => "warning",
            SeverityTier::Error => "error",
        };
        f.write_str(s)
    }
}

/// Price category predicted by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [
        PriceRange::Low,
        PriceRange::Medium,
        PriceRange::High,
        PriceRange::VeryHigh,
    ];

    /// Class index used by the model.
    pub fn class_id(&self) -> i64 {
        match self {
            PriceRange::Low => 0,
            PriceRange::Medium => 1,
            PriceRange::High => 2,
            PriceRange::VeryHigh => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceRange::Low => "Low Cost",
            PriceRange::Medium => "Medium Cost",
            PriceRange::High => "High Cost",
            PriceRange::VeryHigh => "Very High Cost",
        }
    }

    pub fn tier(&self) -> SeverityTier {
        match self {
            PriceRange::Low | PriceRange::Medium => SeverityTier::Info,
            PriceRange::High => SeverityTier::Warning,
            PriceRange::VeryHigh => SeverityTier::Error,
        }
    }

    /// `(category name, severity tier)` for rendering.
    pub fn presentation(&self) -> (&'static str, SeverityTier) {
        (self.label(), self.tier())
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            PriceRange::Low => "🟢",
            PriceRange::Medium => "🔵",
            PriceRange::High => "🟠",
            PriceRange::VeryHigh => "🔴",
        }
    }
}

impl TryFrom<i64> for PriceRange {
    type Error = i64;

    fn try_from(class_id: i64) -> Result<Self, Self::Error> {
        match class_id {
            0 => Ok(PriceRange::Low),
            1 => Ok(PriceRange::Medium),
            2 => Ok(PriceRange::High),
            3 => Ok(PriceRange::VeryHigh),
            other => Err(other),
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_table() {
        assert_eq!(
            PriceRange::Low.presentation(),
            ("Low Cost", SeverityTier::Info)
        );
        assert_eq!(
            PriceRange::Medium.presentation(),
            ("Medium Cost", SeverityTier::Info)
        );
        assert_eq!(
            PriceRange::High.presentation(),
            ("High Cost", SeverityTier::Warning)
        );
        assert_eq!(
            PriceRange::VeryHigh.presentation(),
            ("Very High Cost", SeverityTier::Error)
        );
    }

    #[test]
    fn test_class_id_mapping_is_closed() {
        for range in PriceRange::ALL {
            assert_eq!(PriceRange::try_from(range.class_id()), Ok(range));
        }
        assert_eq!(PriceRange::try_from(4), Err(4));
        assert_eq!(PriceRange::try_from(-1), Err(-1));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&PriceRange::VeryHigh).unwrap();
        assert_eq!(json, "\"very_high\"");
        let tier = serde_json::to_string(&SeverityTier::Warning).unwrap();
        assert_eq!(tier, "\"warning\"");
    }
}
