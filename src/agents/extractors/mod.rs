//! Detail extractors, dispatched by classified category
//!
//! Each extractor pulls category-specific facts from a record and returns
//! them as one variant of `ExtractedDetails`. The registry maps categories
//! to extractors explicitly; categories without an extractor yield
//! `ExtractedDetails::None`.
//!
//! ## Extractors
//!
//! 1. **Bug** - device, OS, app version, repro steps, severity
//! 2. **Feature** - theme, demand score, priority, request summary

pub mod bug;
pub mod feature;

pub use bug::BugExtractor;
pub use feature::FeatureExtractor;

use crate::rules::RuleSet;
use crate::types::{Category, ExtractedDetails, FeedbackRecord};

/// Trait for category-specific detail extraction
pub trait DetailExtractor: Send + Sync {
    /// Extractor name (e.g., "Bug", "Feature")
    fn name(&self) -> &str;

    /// The category whose records this extractor handles
    fn category(&self) -> Category;

    /// Extract details from a record already classified as `category()`
    fn extract(&self, record: &FeedbackRecord, rules: &RuleSet) -> ExtractedDetails;
}

/// Create the default extractor set
pub fn default_extractors() -> Vec<Box<dyn DetailExtractor>> {
    vec![Box::new(BugExtractor), Box::new(FeatureExtractor)]
}

/// Explicit category → extractor mapping.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn DetailExtractor>>,
}

impl ExtractorRegistry {
    pub fn new(extractors: Vec<Box<dyn DetailExtractor>>) -> Self {
        Self { extractors }
    }

    /// The extractor registered for `category`, if any.
    pub fn for_category(&self, category: Category) -> Option<&dyn DetailExtractor> {
        self.extractors
            .iter()
            .find(|e| e.category() == category)
            .map(|e| e.as_ref())
    }

    /// Run the extractor for `category`, or return `None` details.
    pub fn extract(
        &self,
        record: &FeedbackRecord,
        category: Category,
        rules: &RuleSet,
    ) -> ExtractedDetails {
        self.for_category(category)
            .map_or(ExtractedDetails::None, |e| e.extract(record, rules))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new(default_extractors())
    }
}
