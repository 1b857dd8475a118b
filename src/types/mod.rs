//! Type definitions for the price prediction pipeline

pub mod features;
pub mod prediction;
pub mod record;

pub use features::{Feature, FeatureDomain, FeatureGroup, PhoneSpecs, FEATURE_COUNT, FEATURE_NAMES};
pub use prediction::{PriceRange, SeverityTier};
pub use record::FeatureRecord;
