//! Model handle seam

use crate::types::record::FeatureRecord;
use anyhow::Result;

/// A loaded, read-only price-range classifier.
///
/// `predict` returns the raw class label the model emits; mapping it onto
/// [`PriceRange`](crate::PriceRange) is the predictor's job.
pub trait Classifier: Send + Sync {
    /// Short name used in logs and the status panel.
    fn name(&self) -> &str;

    /// Run inference on a single row.
    fn predict(&self, record: &FeatureRecord) -> Result<i64>;
}

/// Class id with the highest score. Ties go to the earlier entry.
pub fn best_class<I>(scores: I) -> Option<i64>
where
    I: IntoIterator<Item = (i64, f64)>,
{
    let mut best: Option<(i64, f64)> = None;
    for (class, score) in scores {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((class, score)),
        }
    }
    best.map(|(class, _)| class)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scripted classifier that counts invocations.
    pub struct MockClassifier {
        outcome: std::result::Result<i64, String>,
        calls: Arc<AtomicUsize>,
    }

    impl MockClassifier {
        pub fn returning(label: i64) -> Self {
            Self {
                outcome: Ok(label),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing(cause: &str) -> Self {
            Self {
                outcome: Err(cause.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Shared call counter, readable after the mock is boxed.
        pub fn calls(&self) -> Arc<AtomicUsize> {
            self.calls.clone()
        }
    }

    impl Classifier for MockClassifier {
        fn name(&self) -> &str {
            "mock"
        }

        fn predict(&self, _record: &FeatureRecord) -> Result<i64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(label) => Ok(*label),
                Err(cause) => Err(anyhow::anyhow!("{}", cause)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_class_returns_class_id() {
        // keys as emitted by a ZipMap output, not in class order
        let scores = [(3, 0.1), (1, 0.7), (2, 0.15), (0, 0.05)];
        assert_eq!(best_class(scores), Some(1));
    }

    #[test]
    fn test_best_class_ties_and_empty() {
        assert_eq!(best_class([(0, 0.5), (2, 0.5)]), Some(0));
        assert_eq!(best_class(Vec::new()), None);
    }
}
